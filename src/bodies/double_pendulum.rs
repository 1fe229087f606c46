use glam::DVec2;

use crate::bodies::{Body, Pendulum};
use crate::core::state::DoublePendulumState;
use crate::error::{Result, ensure_finite};
use crate::laws::classical::DoublePendulumDynamics;
use crate::simulation::StopCondition;

/// Two pendula where the lower one hangs from the tip of the upper one.
///
/// The lower link's origin is not independent state: it is re-derived from
/// the upper link every time the angles change. The links are therefore only
/// reachable by shared reference, and the sole mutator is [`Self::set_state`],
/// which moves both together.
#[derive(Debug, Clone, PartialEq)]
pub struct DoublePendulum {
    upper: Pendulum,
    lower: Pendulum,
}

impl DoublePendulum {
    /// Joins two pendula. Whatever origin `lower` had is replaced by the tip of `upper`.
    pub fn new(upper: Pendulum, lower: Pendulum) -> Self {
        let mut double = Self { upper, lower };
        double.reanchor();
        double
    }

    /// Sets both angles and angular velocities at once.
    ///
    /// All inputs are validated before anything is written, so a rejected
    /// update leaves the composite untouched.
    pub fn set_state(&mut self, theta1: f64, theta2: f64, omega1: f64, omega2: f64) -> Result<()> {
        let theta1 = ensure_finite("theta1", theta1)?;
        let theta2 = ensure_finite("theta2", theta2)?;
        let omega1 = ensure_finite("omega1", omega1)?;
        let omega2 = ensure_finite("omega2", omega2)?;

        self.upper.set_angle(theta1)?;
        self.upper.set_angular_velocity(omega1)?;
        self.lower.set_angle(theta2)?;
        self.lower.set_angular_velocity(omega2)?;
        self.reanchor();
        Ok(())
    }

    fn reanchor(&mut self) {
        let tip = self.upper.position();
        let tip_velocity = self.upper.velocity();
        self.lower.reanchor(tip, tip_velocity);
    }

    pub fn upper(&self) -> &Pendulum {
        &self.upper
    }

    pub fn lower(&self) -> &Pendulum {
        &self.lower
    }

    /// Packed parameters `[m1, m2, l1, l2]` as consumed by [`DoublePendulumDynamics::from_params`].
    pub fn params(&self) -> [f64; 4] {
        [
            self.upper.mass(),
            self.lower.mass(),
            self.upper.length(),
            self.lower.length(),
        ]
    }
}

impl Body for DoublePendulum {
    type Layout = DoublePendulumState;
    type Dynamics = DoublePendulumDynamics;

    fn system_name(&self) -> &'static str {
        "double pendulum"
    }

    fn dynamics(&self, gravity: f64) -> Result<DoublePendulumDynamics> {
        DoublePendulumDynamics::from_params(self.params(), gravity)
    }

    fn state(&self) -> Result<DoublePendulumState> {
        Ok(DoublePendulumState {
            theta1: self.upper.theta(),
            theta2: self.lower.theta(),
            omega1: self.upper.omega(),
            omega2: self.lower.omega(),
        })
    }

    fn apply_state(&mut self, state: &DoublePendulumState) -> Result<()> {
        self.set_state(state.theta1, state.theta2, state.omega1, state.omega2)
    }

    fn positions(&self) -> Vec<DVec2> {
        vec![self.upper.position(), self.lower.position()]
    }

    fn default_stop(&self, duration: f64) -> StopCondition {
        StopCondition::Duration(duration)
    }
}
