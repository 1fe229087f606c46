use crate::core::state::{PendulumState, StateLayout};
use crate::error::{Result, ensure_finite, ensure_positive};
use crate::laws::rhs::Dynamics;

/// Frictionless single pendulum: `d/dt [θ, ω] = [ω, -g·sin(θ)/l]`.
///
/// `θ` is measured from the downward vertical, so gravity's restoring torque
/// goes with `sin θ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumDynamics {
    pub g: f64,
    pub length: f64,
}

impl PendulumDynamics {
    pub fn new(g: f64, length: f64) -> Result<Self> {
        Ok(Self {
            g: ensure_finite("gravity", g)?,
            length: ensure_positive("length", length)?,
        })
    }
}

impl Dynamics for PendulumDynamics {
    fn name(&self) -> &str {
        "pendulum"
    }

    fn dimension(&self) -> usize {
        PendulumState::LEN
    }

    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>> {
        let s = PendulumState::from_slice(state)?;
        let alpha = -self.g * s.theta.sin() / self.length;
        Ok(vec![s.omega, alpha])
    }
}
