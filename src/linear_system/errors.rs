use thiserror::Error as ThisError;

/// An error structure that contains error variants that occur when decoding
/// a linear system from flat buffers.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SystemBuildError {
    /// One of the stated dimensions is zero, so the system has no content.
    #[error(
        "A system of dimensions {}x{} has no solvable content. Both dimensions must be nonzero.",
        nrows,
        ncols
    )]
    EmptySystem {
        /// the stated number of rows
        nrows: usize,
        /// the stated number of columns
        ncols: usize,
    },

    /// The coefficient buffer is too short for the stated dimensions.
    #[error(
        "Coefficient buffer holds {} elements, but a {}x{} system requires at least {}.",
        actual_len,
        nrows,
        ncols,
        required_len
    )]
    CoefficientBufferTooShort {
        /// the stated number of rows
        nrows: usize,
        /// the stated number of columns
        ncols: usize,
        /// the element count the stated dimensions require
        required_len: usize,
        /// the element count the buffer actually holds
        actual_len: usize,
    },

    /// The right hand side buffer is too short for the stated row count.
    #[error(
        "Right hand side buffer holds {} elements, but a system with {} rows requires at least as many.",
        actual_len,
        nrows
    )]
    RhsBufferTooShort {
        /// the stated number of rows
        nrows: usize,
        /// the element count the buffer actually holds
        actual_len: usize,
    },
}

/// An error structure for failures of the least-squares solve itself.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SolveError {
    /// The singular value decomposition did not produce a solution. This
    /// does not occur for finite, well-formed input.
    #[error("Singular value decomposition did not produce a solution: {}", reason)]
    Decomposition {
        /// the reason reported by the decomposition
        reason: &'static str,
    },
}
