#![warn(missing_docs)]
//!
//! # Introduction
//!
//! This crate solves dense linear systems `$\boldsymbol{A}\vec{x} \approx \vec{b}$`
//! in the least-squares sense and hands the solution across a C foreign-function
//! boundary to an embedding host process. It is the native half of a managed
//! runtime integration: the host flattens its coefficient matrix into a row-major
//! buffer, calls a single exported function, and receives a freshly allocated
//! result buffer whose ownership it must later return through a matching release
//! function.
//!
//! The solver computes the *minimum-norm least-squares* solution
//!
//! ```math
//! \vec{x} = \arg\min_{\vec{x}} ||\boldsymbol{A}\vec{x}-\vec{b}||_2,
//! ```
//!
//! which generalizes an ordinary linear solve: for a square, full-rank
//! `$\boldsymbol{A}$` it is the exact solution, for an overdetermined system it
//! is the least-squares fit, and for an underdetermined or rank-deficient system
//! it is the solution of smallest euclidean norm among the infinitely many
//! candidates. This is achieved with a singular value decomposition computing
//! thin `$\boldsymbol{U}$` and `$\boldsymbol{V}$` factors, which is robust for
//! non-square and rank-deficient matrices where e.g. a plain QR decomposition
//! would fail.
//!
//! # Usage from Rust
//!
//! The decomposition machinery is available as a normal library API, without
//! going through raw pointers:
//!
//! ```rust
//! use lstsq::LinearSystem;
//!
//! // | 2 0 | * x = | 4 |
//! // | 0 2 |       | 6 |
//! let system = LinearSystem::<f64>::from_row_major(&[2., 0., 0., 2.], &[4., 6.], 2, 2).unwrap();
//! let x = system.solve_least_squares().unwrap();
//! assert!((x[0] - 2.).abs() < 1e-12);
//! assert!((x[1] - 3.).abs() < 1e-12);
//! ```
//!
//! # Usage from a host process
//!
//! The [`ffi`] module exports three C-ABI symbols:
//!
//! * `solveSystem(A, b, nrows, ncols)` returns a heap buffer of `ncols`
//!   solution elements. The matrix buffer is read row-major, i.e. element
//!   `(i, j)` sits at offset `i*ncols + j`.
//! * `releaseMemory(buffer)` gives a buffer obtained from this module back to
//!   the allocator that produced it. Every returned buffer must be released
//!   exactly once, and only through this function — the host's own `free`
//!   belongs to a different allocator and must never see these pointers.
//! * `umeyama(L, H, nrows, ncols, resize)` estimates the similarity transform
//!   aligning the point set `L` with the point set `H` (see [`alignment`]) and
//!   returns it as a flattened homogeneous matrix, released the same way.
//!
//! The element count of a returned buffer is not carried in the pointer; it is
//! part of the call contract (`ncols` for the solver, `(nrows+1)²` for the
//! alignment). Internally each buffer knows its own length (see
//! [`SolutionBuffer`](crate::buffer::SolutionBuffer)), which is what allows
//! `releaseMemory` to reconstruct the allocation from the bare address without
//! any global bookkeeping.
//!
//! # Numerical behavior
//!
//! Rank deficiency is handled by the decomposition's singular-value cutoff and
//! is *silent*: an ill-conditioned or singular system produces the minimum-norm
//! answer rather than an error. Likewise, non-finite input values propagate
//! through the decomposition and may produce non-finite output without any
//! signal. See [`LinearSystem::solve_least_squares`] for the exact cutoff.
//!
//! # References and Further Reading
//!
//! (Golub2013) Golub, G., Van Loan, C. *Matrix Computations*, 4th ed., ch. 5.5:
//! the SVD and the least squares problem.
//!
//! (Umeyama1991) Umeyama, S. Least-squares estimation of transformation
//! parameters between two point patterns. *IEEE PAMI* **13**(4), 376–380 (1991).

/// estimation of similarity transforms between point sets
pub mod alignment;
/// the owned result buffer that crosses the foreign-function boundary
pub mod buffer;
/// the exported C-ABI surface
pub mod ffi;
/// the dense linear system data model and its least-squares solver
pub mod linear_system;
/// commonly useful imports
pub mod prelude;

pub use linear_system::LinearSystem;
