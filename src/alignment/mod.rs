use nalgebra::{DMatrix, DVector, RealField, Scalar};
use num_traits::{Float, FromPrimitive, One, Zero};
use thiserror::Error as ThisError;


/// An error structure for failures of the similarity transform estimation.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AlignmentError {
    /// The two point sets do not have identical dimensions.
    #[error(
        "Source point set is {}x{}, destination point set is {}x{}. Both must have identical dimensions.",
        source_nrows,
        source_ncols,
        destination_nrows,
        destination_ncols
    )]
    PointSetMismatch {
        /// coordinate dimension of the source points
        source_nrows: usize,
        /// number of source points
        source_ncols: usize,
        /// coordinate dimension of the destination points
        destination_nrows: usize,
        /// number of destination points
        destination_ncols: usize,
    },

    /// A point set with no points or no coordinate dimensions was given.
    #[error("Point sets must contain at least one point of nonzero dimension.")]
    EmptyPointSet,

    /// The decomposition of the cross covariance did not produce the
    /// orthogonal factors. This does not occur for finite input.
    #[error("Singular value decomposition of the cross covariance failed.")]
    Decomposition,
}

/// Estimate the similarity transform that best maps `source` onto
/// `destination` in the least-squares sense.
///
/// Both point sets are `$d \times n$` matrices holding one `$d$`-dimensional
/// point per column, with the point at column `$i$` of `source` corresponding
/// to the point at column `$i$` of `destination`. The function finds the
/// rotation `$\boldsymbol{R}$` (with `$\det \boldsymbol{R} = +1$`), translation
/// `$\vec{t}$` and uniform scale `$c$` minimizing
///
/// ```math
/// \sum_i ||\vec{h}_i - (c \boldsymbol{R} \vec{l}_i + \vec{t})||_2^2
/// ```
///
/// using the method of (Umeyama1991), see the crate level documentation. When
/// `with_scaling` is `false` the scale is fixed at one and the result is the
/// best rigid transform.
///
/// The result is the homogeneous `$(d+1) \times (d+1)$` matrix with
/// `$c\boldsymbol{R}$` in the upper left block, `$\vec{t}$` in the last
/// column and the usual `$(0,\dots,0,1)$` bottom row.
///
/// Degenerate geometry is silent in the same way the least-squares solver is
/// silent about rank deficiency: collapsed point sets (e.g. all points
/// identical) produce a degenerate transform rather than an error.
///
/// # Errors
///
/// An error is returned if the point sets differ in shape or are empty.
pub fn similarity_transform<ScalarType>(
    source: &DMatrix<ScalarType>,
    destination: &DMatrix<ScalarType>,
    with_scaling: bool,
) -> Result<DMatrix<ScalarType>, AlignmentError>
where
    ScalarType: Scalar + RealField + Float + FromPrimitive + Copy,
{
    if source.shape() != destination.shape() {
        return Err(AlignmentError::PointSetMismatch {
            source_nrows: source.nrows(),
            source_ncols: source.ncols(),
            destination_nrows: destination.nrows(),
            destination_ncols: destination.ncols(),
        });
    }
    if source.nrows() == 0 || source.ncols() == 0 {
        return Err(AlignmentError::EmptyPointSet);
    }

    let dim = source.nrows();
    let point_count = ScalarType::from_usize(source.ncols())
        .expect("integer size out of floating point bounds");

    let source_mean = source.column_sum() / point_count;
    let destination_mean = destination.column_sum() / point_count;

    let mut source_demeaned = source.clone();
    for mut column in source_demeaned.column_iter_mut() {
        column -= &source_mean;
    }
    let mut destination_demeaned = destination.clone();
    for mut column in destination_demeaned.column_iter_mut() {
        column -= &destination_mean;
    }

    let source_variance = source_demeaned.norm_squared() / point_count;

    // cross covariance of the demeaned point sets
    let sigma = (&destination_demeaned * source_demeaned.transpose()) / point_count;

    let svd = sigma.svd(true, true);
    let u = svd.u.as_ref().ok_or(AlignmentError::Decomposition)?;
    let v_t = svd.v_t.as_ref().ok_or(AlignmentError::Decomposition)?;

    // flip the weakest singular direction if the orthogonal factors would
    // combine into a reflection, so the recovered rotation stays proper
    let mut sign_flip = DVector::from_element(dim, ScalarType::one());
    if u.determinant() * v_t.determinant() < ScalarType::zero() {
        sign_flip[dim - 1] = -ScalarType::one();
    }

    let rotation = u * DMatrix::from_diagonal(&sign_flip) * v_t;

    let scale = if with_scaling {
        svd.singular_values.dot(&sign_flip) / source_variance
    } else {
        ScalarType::one()
    };

    let scaled_rotation = rotation.map(|entry| entry * scale);
    let translation = destination_mean - &scaled_rotation * &source_mean;

    let mut transform = DMatrix::identity(dim + 1, dim + 1);
    transform
        .view_mut((0, 0), (dim, dim))
        .copy_from(&scaled_rotation);
    transform
        .view_mut((0, dim), (dim, 1))
        .copy_from(&translation);
    Ok(transform)
}
