use nalgebra::{DMatrix, DVector, RealField, Scalar};
use num_traits::{Float, FromPrimitive};

mod errors;
#[cfg(test)]
mod test;

pub use errors::{SolveError, SystemBuildError};

/// A dense linear system `$\boldsymbol{A}\vec{x} \approx \vec{b}$` reconstructed
/// from flat buffers.
///
/// The coefficient matrix is `nrows × ncols` and is decoded from a row-major
/// buffer, i.e. element `$(i,j)$` of the matrix is read from offset
/// `i*ncols + j`. The right hand side has one element per matrix row. The
/// system does not have to be square and does not have to have full rank, see
/// [`solve_least_squares`](LinearSystem::solve_least_squares).
///
/// Instances only live for the duration of a solve; they borrow nothing and
/// own copies of the decoded data.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem<ScalarType>
where
    ScalarType: Scalar,
{
    /// the dense coefficient matrix `$\boldsymbol{A}$`
    coefficients: DMatrix<ScalarType>,
    /// the right hand side `$\vec{b}$`, one element per row of the matrix
    rhs: DVector<ScalarType>,
}

impl<ScalarType> LinearSystem<ScalarType>
where
    ScalarType: Scalar + Copy,
{
    /// Decode a system from flat buffers.
    ///
    /// The coefficient buffer is read row-major and must hold at least
    /// `nrows * ncols` elements; the right hand side buffer must hold at
    /// least `nrows` elements. Excess elements are ignored, which mirrors
    /// the boundary contract where the caller states the dimensions and the
    /// buffers may be larger than necessary.
    ///
    /// # Errors
    ///
    /// An error is returned if either dimension is zero or one of the
    /// buffers is too short for the stated dimensions.
    pub fn from_row_major(
        coefficients: &[ScalarType],
        rhs: &[ScalarType],
        nrows: usize,
        ncols: usize,
    ) -> Result<Self, SystemBuildError> {
        if nrows == 0 || ncols == 0 {
            return Err(SystemBuildError::EmptySystem { nrows, ncols });
        }
        let required_len = nrows * ncols;
        if coefficients.len() < required_len {
            return Err(SystemBuildError::CoefficientBufferTooShort {
                nrows,
                ncols,
                required_len,
                actual_len: coefficients.len(),
            });
        }
        if rhs.len() < nrows {
            return Err(SystemBuildError::RhsBufferTooShort {
                nrows,
                actual_len: rhs.len(),
            });
        }
        Ok(Self {
            coefficients: DMatrix::from_row_slice(nrows, ncols, &coefficients[..required_len]),
            rhs: DVector::from_column_slice(&rhs[..nrows]),
        })
    }

    /// Build a system from already decoded matrix and vector data.
    ///
    /// # Errors
    ///
    /// An error is returned if the matrix has a zero dimension or the right
    /// hand side length does not equal the number of matrix rows.
    pub fn new(
        coefficients: DMatrix<ScalarType>,
        rhs: DVector<ScalarType>,
    ) -> Result<Self, SystemBuildError> {
        if coefficients.nrows() == 0 || coefficients.ncols() == 0 {
            return Err(SystemBuildError::EmptySystem {
                nrows: coefficients.nrows(),
                ncols: coefficients.ncols(),
            });
        }
        if rhs.len() != coefficients.nrows() {
            return Err(SystemBuildError::RhsBufferTooShort {
                nrows: coefficients.nrows(),
                actual_len: rhs.len(),
            });
        }
        Ok(Self { coefficients, rhs })
    }

    /// the number of rows of the coefficient matrix
    pub fn nrows(&self) -> usize {
        self.coefficients.nrows()
    }

    /// the number of columns of the coefficient matrix, which is also the
    /// length of the solution vector
    pub fn ncols(&self) -> usize {
        self.coefficients.ncols()
    }

    /// the decoded coefficient matrix `$\boldsymbol{A}$`
    pub fn coefficients(&self) -> &DMatrix<ScalarType> {
        &self.coefficients
    }

    /// the decoded right hand side `$\vec{b}$`
    pub fn right_hand_side(&self) -> &DVector<ScalarType> {
        &self.rhs
    }
}

impl<ScalarType> LinearSystem<ScalarType>
where
    ScalarType: Scalar + RealField + Float + FromPrimitive + Copy,
{
    /// Compute the minimum-norm least-squares solution `$\vec{x}$` of the
    /// system via singular value decomposition with thin `$\boldsymbol{U}$`
    /// and `$\boldsymbol{V}$` factors.
    ///
    /// For a square, full-rank matrix this is the exact solution. For an
    /// overdetermined system it minimizes `$||\boldsymbol{A}\vec{x}-\vec{b}||_2$`.
    /// For an underdetermined or rank-deficient system it is the solution of
    /// smallest norm among all least-squares solutions.
    ///
    /// Singular values at or below `$\sigma_{max} \cdot \max(n_{rows}, n_{cols})
    /// \cdot \epsilon$` (with `$\epsilon$` the machine epsilon of the scalar
    /// type) are treated as zero. This is the same heuristic that OCTAVE uses
    /// for its rank function, see
    /// <https://octave.sourceforge.io/octave/function/rank.html>, and it is
    /// deliberately not exposed as a tunable parameter.
    ///
    /// Rank deficiency is silent: a singular or ill-conditioned system
    /// produces the minimum-norm answer rather than an error. Non-finite
    /// input values propagate through the decomposition without any signal.
    ///
    /// # Errors
    ///
    /// An error is returned only if the decomposition cannot produce a
    /// solution at all, which does not happen for finite, well-formed input.
    pub fn solve_least_squares(&self) -> Result<DVector<ScalarType>, SolveError> {
        let max_dim = self.nrows().max(self.ncols());
        let svd = self.coefficients.clone().svd(true, true);
        let svd_epsilon = svd.singular_values.max()
            * ScalarType::from_usize(max_dim).expect("integer size out of floating point bounds")
            * <ScalarType as Float>::epsilon();
        svd.solve(&self.rhs, svd_epsilon)
            .map_err(|reason| SolveError::Decomposition { reason })
    }
}
