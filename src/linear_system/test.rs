use crate::linear_system::{LinearSystem, SystemBuildError};
use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};

#[test]
fn square_full_rank_system_is_solved_exactly() {
    // | 2 0 |       | 4 |
    // | 0 2 | * x = | 6 |
    let system =
        LinearSystem::<f64>::from_row_major(&[2., 0., 0., 2.], &[4., 6.], 2, 2).unwrap();
    let x = system.solve_least_squares().unwrap();
    assert_eq!(x.len(), 2);
    assert_relative_eq!(x[0], 2., epsilon = 1e-12);
    assert_relative_eq!(x[1], 3., epsilon = 1e-12);
}

#[test]
fn overdetermined_consistent_system_is_fit_with_zero_residual() {
    // three equations, two unknowns, but consistent: x = (1,1) fits exactly
    let coefficients = [1., 0., 0., 1., 1., 1.];
    let rhs = [1., 1., 2.];
    let system = LinearSystem::<f64>::from_row_major(&coefficients, &rhs, 3, 2).unwrap();
    let x = system.solve_least_squares().unwrap();
    assert_relative_eq!(x[0], 1., epsilon = 1e-12);
    assert_relative_eq!(x[1], 1., epsilon = 1e-12);

    let residual = system.coefficients() * &x - system.right_hand_side();
    assert_relative_eq!(residual.norm(), 0., epsilon = 1e-12);
}

#[test]
fn overdetermined_inconsistent_system_matches_the_normal_equations_solution() {
    // same matrix as above, but an inconsistent right hand side. The normal
    // equations (A^T A) x = A^T b give x = (2/3, 5/3) in closed form.
    let coefficients = [1., 0., 0., 1., 1., 1.];
    let rhs = [1., 2., 2.];
    let system = LinearSystem::<f64>::from_row_major(&coefficients, &rhs, 3, 2).unwrap();
    let x = system.solve_least_squares().unwrap();
    assert_relative_eq!(x[0], 2. / 3., epsilon = 1e-12);
    assert_relative_eq!(x[1], 5. / 3., epsilon = 1e-12);
}

#[test]
fn underdetermined_system_yields_the_minimum_norm_solution() {
    // x1 + x2 = 2 has infinitely many solutions; the minimum-norm one is
    // (1,1), not e.g. (2,0)
    let system = LinearSystem::<f64>::from_row_major(&[1., 1.], &[2.], 1, 2).unwrap();
    let x = system.solve_least_squares().unwrap();
    assert_eq!(x.len(), 2);
    assert_relative_eq!(x[0], 1., epsilon = 1e-12);
    assert_relative_eq!(x[1], 1., epsilon = 1e-12);
}

#[test]
fn rank_deficient_system_yields_the_minimum_norm_solution() {
    // both rows state x1 + x2 = 2, so the matrix has rank one. The
    // singular-value cutoff must kick in and produce (1,1).
    let system =
        LinearSystem::<f64>::from_row_major(&[1., 1., 1., 1.], &[2., 2.], 2, 2).unwrap();
    let x = system.solve_least_squares().unwrap();
    assert_relative_eq!(x[0], 1., epsilon = 1e-12);
    assert_relative_eq!(x[1], 1., epsilon = 1e-12);
}

#[test]
fn solving_the_same_system_twice_is_bitwise_identical() {
    let coefficients = [3., 1., -2., 0.5, 4., 4., -1., 2.5, 0., 1., 1., 1.];
    let rhs = [1., -2., 3.];
    let system = LinearSystem::<f64>::from_row_major(&coefficients, &rhs, 3, 4).unwrap();
    let first = system.solve_least_squares().unwrap();
    let second = system.solve_least_squares().unwrap();
    assert_eq!(first, second);
}

#[test]
fn excess_buffer_elements_are_ignored() {
    let coefficients = [2., 0., 0., 2., 99., 99.];
    let rhs = [4., 6., 99.];
    let system = LinearSystem::<f64>::from_row_major(&coefficients, &rhs, 2, 2).unwrap();
    assert_eq!(system.nrows(), 2);
    assert_eq!(system.ncols(), 2);
    let x = system.solve_least_squares().unwrap();
    assert_relative_eq!(x[0], 2., epsilon = 1e-12);
    assert_relative_eq!(x[1], 3., epsilon = 1e-12);
}

#[test]
fn row_major_decoding_places_elements_correctly() {
    let system =
        LinearSystem::<f64>::from_row_major(&[1., 2., 3., 4., 5., 6.], &[0., 0.], 2, 3).unwrap();
    let expected = DMatrix::from_row_slice(2, 3, &[1., 2., 3., 4., 5., 6.]);
    assert_eq!(system.coefficients(), &expected);
    assert_eq!(system.coefficients()[(0, 1)], 2.);
    assert_eq!(system.coefficients()[(1, 0)], 4.);
}

#[test]
fn single_precision_systems_solve_as_well() {
    let system =
        LinearSystem::<f32>::from_row_major(&[2., 0., 0., 2.], &[4., 6.], 2, 2).unwrap();
    let x = system.solve_least_squares().unwrap();
    assert_relative_eq!(x[0], 2., epsilon = 1e-4);
    assert_relative_eq!(x[1], 3., epsilon = 1e-4);
}

#[test]
fn zero_dimensions_are_rejected() {
    assert_eq!(
        LinearSystem::<f64>::from_row_major(&[], &[], 0, 2),
        Err(SystemBuildError::EmptySystem { nrows: 0, ncols: 2 })
    );
    assert_eq!(
        LinearSystem::<f64>::from_row_major(&[], &[], 2, 0),
        Err(SystemBuildError::EmptySystem { nrows: 2, ncols: 0 })
    );
}

#[test]
fn too_short_buffers_are_rejected_with_the_offending_lengths() {
    assert_eq!(
        LinearSystem::<f64>::from_row_major(&[1., 2., 3.], &[1., 1.], 2, 2),
        Err(SystemBuildError::CoefficientBufferTooShort {
            nrows: 2,
            ncols: 2,
            required_len: 4,
            actual_len: 3,
        })
    );
    assert_eq!(
        LinearSystem::<f64>::from_row_major(&[1., 2., 3., 4.], &[1.], 2, 2),
        Err(SystemBuildError::RhsBufferTooShort {
            nrows: 2,
            actual_len: 1,
        })
    );
}

#[test]
fn construction_from_decoded_parts_checks_the_rhs_length() {
    let coefficients = DMatrix::from_row_slice(2, 2, &[1., 0., 0., 1.]);
    let rhs = DVector::from_column_slice(&[1., 2., 3.]);
    assert_eq!(
        LinearSystem::new(coefficients, rhs),
        Err(SystemBuildError::RhsBufferTooShort {
            nrows: 2,
            actual_len: 3,
        })
    );
}
