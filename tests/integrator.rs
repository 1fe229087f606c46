use swing::SimError;
use swing::core::solve::{Integrator, RungeKutta4};
use swing::laws::classical::{PendulumDynamics, ProjectileDynamics, STANDARD_GRAVITY};
use swing::laws::rhs::{Dynamics, RhsFn};

#[test]
fn test_rk4_exact_on_polynomial_solution() {
    // s = [x, v, a, j]: s' = A·s + b with A nilpotent, so the exact solution
    // is a cubic in t and RK4 must reproduce it to rounding.
    let snap = 0.25;
    let rhs = RhsFn::new("jerk chain", 4, |s: &[f64]| vec![s[1], s[2], s[3], snap]);

    let s0 = [1.0, -2.0, 0.5, 3.0];
    let dt = 0.1;
    let (t, s1) = RungeKutta4.advance(&rhs, 0.0, &s0, dt).unwrap();

    let exact = [
        s0[0] + s0[1] * dt + s0[2] * dt.powi(2) / 2.0 + s0[3] * dt.powi(3) / 6.0 + snap * dt.powi(4) / 24.0,
        s0[1] + s0[2] * dt + s0[3] * dt.powi(2) / 2.0 + snap * dt.powi(3) / 6.0,
        s0[2] + s0[3] * dt + snap * dt.powi(2) / 2.0,
        s0[3] + snap * dt,
    ];

    assert!((t - dt).abs() < 1e-15);
    for (i, (a, e)) in s1.iter().zip(exact).enumerate() {
        assert!((a - e).abs() < 1e-14, "component {i}: {a} vs {e}");
    }
}

#[test]
fn test_rk4_linear_rotation_is_fifth_order_locally() {
    // s' = A·s with A a rotation generator; exact solution is a rotation by dt
    let rhs = RhsFn::new("rotation", 2, |s: &[f64]| vec![-s[1], s[0]]);

    for dt in [0.1, 0.05] {
        let (_, s1) = RungeKutta4.advance(&rhs, 0.0, &[1.0, 0.0], dt).unwrap();
        let error = ((s1[0] - dt.cos()).powi(2) + (s1[1] - dt.sin()).powi(2)).sqrt();
        assert!(error < dt.powi(5), "dt = {dt}: error {error}");
    }
}

#[test]
fn test_rk4_shape_mismatch() {
    let short = RhsFn::new("short", 2, |_: &[f64]| vec![0.0]);
    let result = RungeKutta4.advance(&short, 0.0, &[1.0, 2.0], 0.01);
    assert_eq!(result, Err(SimError::ShapeMismatch { expected: 2, actual: 1 }));

    // the shipped models check the layout of their input as well
    let pendulum = PendulumDynamics::new(STANDARD_GRAVITY, 1.0).unwrap();
    let result = RungeKutta4.advance(&pendulum, 0.0, &[0.1, 0.0, 0.0, 0.0], 0.01);
    assert!(matches!(result, Err(SimError::ShapeMismatch { expected: 2, actual: 4 })));
}

#[test]
fn test_rk4_rejects_bad_step() {
    let rhs = RhsFn::new("decay", 1, |s: &[f64]| vec![-s[0]]);
    for dt in [0.0, -0.1, f64::NAN] {
        let result = RungeKutta4.advance(&rhs, 0.0, &[1.0], dt);
        assert!(
            matches!(result, Err(SimError::InvalidArgument { name: "dt", .. })),
            "dt = {dt}: {result:?}"
        );
    }
}

#[test]
fn test_rk4_is_reusable_across_systems() {
    let integrator = RungeKutta4;
    let systems: Vec<(Box<dyn Dynamics>, Vec<f64>)> = vec![
        (Box::new(ProjectileDynamics::new(STANDARD_GRAVITY).unwrap()), vec![0.0, 1.0, 1.0, 0.0]),
        (Box::new(PendulumDynamics::new(STANDARD_GRAVITY, 1.0).unwrap()), vec![0.3, 0.0]),
    ];

    for (dynamics, state) in &systems {
        let (t, next) = integrator.advance(dynamics.as_ref(), 0.0, state, 0.01).unwrap();
        assert_eq!(next.len(), state.len(), "{}", dynamics.name());
        assert!((t - 0.01).abs() < 1e-15);
        assert_ne!(&next, state, "{} should have moved", dynamics.name());
    }
}

#[test]
fn test_projectile_drag_slows_the_fall() {
    let vacuum = ProjectileDynamics::new(STANDARD_GRAVITY).unwrap();
    assert_eq!(vacuum.derivative(&[0.0, 5.0, 3.0, -4.0]).unwrap(), vec![3.0, -4.0, 0.0, -STANDARD_GRAVITY]);

    // zero drag coefficient falls back to the vacuum model exactly
    let no_drag = ProjectileDynamics::with_drag(STANDARD_GRAVITY, 1.0, 0.0, 0.5, 1.225).unwrap();
    assert_eq!(no_drag.drag_factor(), 0.0);

    let draggy = ProjectileDynamics::with_drag(STANDARD_GRAVITY, 2.0, 0.5, 0.1, 1.2).unwrap();
    let k = 1.2 * 0.5 * 0.1 / (2.0 * 2.0);
    assert!((draggy.drag_factor() - k).abs() < 1e-15);

    let d = draggy.derivative(&[0.0, 5.0, 3.0, -4.0]).unwrap();
    // |v| = 5
    assert!((d[2] - (-k * 5.0 * 3.0)).abs() < 1e-12, "ax = {}", d[2]);
    assert!((d[3] - (-STANDARD_GRAVITY + k * 5.0 * 4.0)).abs() < 1e-12, "ay = {}", d[3]);
}
