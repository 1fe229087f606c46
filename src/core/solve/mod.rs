use crate::error::{Result, SimError, ensure_positive};
use crate::laws::rhs::Dynamics;

/// A one-step time integrator for `ds/dt = f(s)`.
///
/// Integrators are stateless: `advance` takes the current `(t, state)` and
/// returns the next one, so a single instance can be shared between systems
/// and between concurrent runs.
pub trait Integrator {
    fn name(&self) -> &str;

    /// Advances `state` at time `t` by one step `dt`, returning `(t + dt, state')`.
    fn advance(
        &self,
        dynamics: &dyn Dynamics,
        t: f64,
        state: &[f64],
        dt: f64,
    ) -> Result<(f64, Vec<f64>)>;
}

/// Classical fixed-step 4th-order Runge-Kutta.
///
/// Local truncation error is O(dt⁵), global error O(dt⁴).
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

/// Evaluates the right-hand side and checks that it has the state's shape.
fn evaluate(dynamics: &dyn Dynamics, state: &[f64]) -> Result<Vec<f64>> {
    let k = dynamics.derivative(state)?;
    if k.len() != state.len() {
        return Err(SimError::shape(state.len(), k.len()));
    }
    Ok(k)
}

/// `state + h·k`
fn offset(state: &[f64], k: &[f64], h: f64) -> Vec<f64> {
    state.iter().zip(k).map(|(s, k)| s + h * k).collect()
}

impl Integrator for RungeKutta4 {
    fn name(&self) -> &str {
        "rk4"
    }

    fn advance(
        &self,
        dynamics: &dyn Dynamics,
        t: f64,
        state: &[f64],
        dt: f64,
    ) -> Result<(f64, Vec<f64>)> {
        ensure_positive("dt", dt)?;
        let half = 0.5 * dt;

        let k1 = evaluate(dynamics, state)?;
        let k2 = evaluate(dynamics, &offset(state, &k1, half))?;
        let k3 = evaluate(dynamics, &offset(state, &k2, half))?;
        let k4 = evaluate(dynamics, &offset(state, &k3, dt))?;

        let next = state
            .iter()
            .enumerate()
            .map(|(i, s)| s + dt / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]))
            .collect();

        Ok((t + dt, next))
    }
}
