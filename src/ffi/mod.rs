//! The C-ABI surface of the crate, exported under the symbol names the
//! embedding host declares in its `DllImport` bindings.
//!
//! All three functions are stateless one-shot calls: inputs are decoded,
//! the result buffer is allocated, and ownership of that buffer transfers to
//! the caller on return. The only sanctioned way to free a returned buffer
//! is [`releaseMemory`]; routing it through the host's own `free` pairs it
//! with the wrong allocator.
//!
//! Argument screening is deliberately minimal: null pointers and
//! non-positive dimensions yield a null return instead of undefined
//! behavior, because those checks are free. Everything beyond that is the
//! caller's contract — buffers shorter than the stated dimensions cannot be
//! detected here and remain undefined, and numerically degenerate input
//! still produces a (possibly degenerate) result buffer rather than an
//! error.
#![allow(non_snake_case)]

use crate::alignment::similarity_transform;
use crate::buffer::SolutionBuffer;
use crate::linear_system::LinearSystem;
use nalgebra::DMatrix;
use std::os::raw::{c_float, c_int};
use std::ptr;
use std::slice;


/// Solve the dense linear system `A·x ≈ b` in the minimum-norm least-squares
/// sense and return a freshly allocated buffer of `ncols` solution elements.
///
/// `A` is read as an `nrows × ncols` matrix in row-major order (element
/// `(i, j)` at offset `i*ncols + j`), `b` as a vector of `nrows` elements.
/// Values are widened to double precision internally; the returned buffer is
/// single precision like the inputs.
///
/// Ownership of the returned buffer passes to the caller, who must release
/// it exactly once through [`releaseMemory`]. Returns null if a pointer is
/// null or a dimension is not positive.
///
/// # Safety
///
/// `A` must be valid for reads of `nrows * ncols` elements and `b` for reads
/// of `nrows` elements. The input buffers are only read for the duration of
/// the call.
#[no_mangle]
pub unsafe extern "C" fn solveSystem(
    A: *const c_float,
    b: *const c_float,
    nrows: c_int,
    ncols: c_int,
) -> *mut c_float {
    if A.is_null() || b.is_null() || nrows <= 0 || ncols <= 0 {
        return ptr::null_mut();
    }
    let nrows = nrows as usize;
    let ncols = ncols as usize;

    let coefficients: Vec<f64> = slice::from_raw_parts(A, nrows * ncols)
        .iter()
        .map(|&value| f64::from(value))
        .collect();
    let rhs: Vec<f64> = slice::from_raw_parts(b, nrows)
        .iter()
        .map(|&value| f64::from(value))
        .collect();

    let Ok(system) = LinearSystem::from_row_major(&coefficients, &rhs, nrows, ncols) else {
        return ptr::null_mut();
    };
    let Ok(solution) = system.solve_least_squares() else {
        return ptr::null_mut();
    };

    let narrowed: Vec<c_float> = solution.iter().map(|&value| value as c_float).collect();
    SolutionBuffer::from_slice(&narrowed).into_raw()
}

/// Release a buffer previously returned by [`solveSystem`] or [`umeyama`],
/// using the allocator that produced it. Returns `0`.
///
/// A null pointer is tolerated and ignored.
///
/// # Safety
///
/// `buffer` must be null or a pointer obtained from this module that has not
/// been released before. Releasing a pointer twice, or releasing memory this
/// module did not allocate, is undefined behavior.
#[no_mangle]
pub unsafe extern "C" fn releaseMemory(buffer: *mut c_float) -> c_int {
    if !buffer.is_null() {
        drop(SolutionBuffer::from_raw(buffer));
    }
    0
}

/// Estimate the similarity transform mapping the point set `L` onto the
/// point set `H` and return it as a row-major flattened homogeneous
/// `(nrows+1) × (nrows+1)` matrix — 16 elements for three-dimensional
/// points.
///
/// Both buffers are read as `nrows × ncols` matrices in row-major order,
/// holding one `nrows`-dimensional point per column; column `i` of `L`
/// corresponds to column `i` of `H`. When `resize` is set the transform
/// includes a uniform scale factor, otherwise it is rigid (rotation and
/// translation only). See
/// [`similarity_transform`](crate::alignment::similarity_transform) for the
/// estimation method.
///
/// Ownership of the returned buffer passes to the caller, who must release
/// it exactly once through [`releaseMemory`]. Returns null if a pointer is
/// null or a dimension is not positive.
///
/// # Safety
///
/// `L` and `H` must each be valid for reads of `nrows * ncols` elements.
/// The input buffers are only read for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn umeyama(
    L: *const c_float,
    H: *const c_float,
    nrows: c_int,
    ncols: c_int,
    resize: bool,
) -> *mut c_float {
    if L.is_null() || H.is_null() || nrows <= 0 || ncols <= 0 {
        return ptr::null_mut();
    }
    let nrows = nrows as usize;
    let ncols = ncols as usize;

    let source = matrix_from_row_major(slice::from_raw_parts(L, nrows * ncols), nrows, ncols);
    let destination = matrix_from_row_major(slice::from_raw_parts(H, nrows * ncols), nrows, ncols);

    let Ok(transform) = similarity_transform(&source, &destination, resize) else {
        return ptr::null_mut();
    };

    let dim = nrows + 1;
    let mut flattened = Vec::with_capacity(dim * dim);
    for i in 0..dim {
        for j in 0..dim {
            flattened.push(transform[(i, j)] as c_float);
        }
    }
    SolutionBuffer::from_slice(&flattened).into_raw()
}

/// decode a row-major single precision buffer into a double precision matrix
fn matrix_from_row_major(values: &[c_float], nrows: usize, ncols: usize) -> DMatrix<f64> {
    DMatrix::from_fn(nrows, ncols, |i, j| f64::from(values[i * ncols + j]))
}
