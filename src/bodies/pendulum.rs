use glam::DVec2;

use crate::bodies::Body;
use crate::core::geometry::{
    HANGING_OFFSET, cartesian_to_polar, polar_to_cartesian, polar_velocity_to_cartesian,
};
use crate::core::state::PendulumState;
use crate::error::{Result, ensure_finite, ensure_non_negative, ensure_positive};
use crate::laws::classical::PendulumDynamics;
use crate::simulation::StopCondition;

/// A point mass on a massless rigid rod swinging about `origin`.
///
/// `theta` is measured from the downward vertical and grows counter-clockwise:
///
/// ```text
/// x = origin.x + l·sin θ
/// y = origin.y − l·cos θ
/// ```
///
/// Position and velocity are derived on demand from `(θ, ω, length, origin)`,
/// never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Pendulum {
    mass: f64,
    length: f64,
    origin: DVec2,
    /// Velocity of the anchor point; non-zero only when hanging from another link.
    origin_velocity: DVec2,
    theta: f64,
    omega: f64,
}

impl Default for Pendulum {
    fn default() -> Self {
        Self {
            mass: 1.0,
            length: 1.0,
            origin: DVec2::ZERO,
            origin_velocity: DVec2::ZERO,
            theta: 0.0,
            omega: 0.0,
        }
    }
}

impl Pendulum {
    /// A pendulum at rest, hanging straight down.
    pub fn new(mass: f64, length: f64, origin: DVec2) -> Result<Self> {
        let mass = ensure_positive("mass", mass)?;
        let length = ensure_non_negative("length", length)?;
        ensure_finite("origin.x", origin.x)?;
        ensure_finite("origin.y", origin.y)?;

        Ok(Self {
            mass,
            length,
            origin,
            ..Self::default()
        })
    }

    pub fn set_angle(&mut self, theta: f64) -> Result<()> {
        self.theta = ensure_finite("theta", theta)?;
        Ok(())
    }

    pub fn set_angular_velocity(&mut self, omega: f64) -> Result<()> {
        self.omega = ensure_finite("omega", omega)?;
        Ok(())
    }

    /// Swings the rod so that it points from the origin towards `target`.
    ///
    /// The length is kept; only the angle changes. Fails with a domain error if
    /// `target` coincides with the origin.
    pub fn point_towards(&mut self, target: DVec2) -> Result<()> {
        let d = target - self.origin;
        let (_, theta) = cartesian_to_polar(d.x, d.y, HANGING_OFFSET)?;
        self.set_angle(theta)
    }

    /// Moves the anchor. Used by [`super::DoublePendulum`] to hang this link
    /// from the tip of its parent.
    pub(crate) fn reanchor(&mut self, origin: DVec2, origin_velocity: DVec2) {
        self.origin = origin;
        self.origin_velocity = origin_velocity;
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Cartesian position of the bob.
    pub fn position(&self) -> DVec2 {
        let (x, y) = polar_to_cartesian(self.length, self.theta, HANGING_OFFSET);
        self.origin + DVec2::new(x, y)
    }

    /// Cartesian velocity of the bob, including the anchor's own velocity.
    ///
    /// Relative to the anchor the speed is `l·|ω|`, perpendicular to the rod.
    pub fn velocity(&self) -> DVec2 {
        let (vx, vy) =
            polar_velocity_to_cartesian(0.0, self.omega, self.length, self.theta + HANGING_OFFSET);
        self.origin_velocity + DVec2::new(vx, vy)
    }

    pub fn x(&self) -> f64 {
        self.position().x
    }

    pub fn y(&self) -> f64 {
        self.position().y
    }

    pub fn vx(&self) -> f64 {
        self.velocity().x
    }

    pub fn vy(&self) -> f64 {
        self.velocity().y
    }
}

impl Body for Pendulum {
    type Layout = PendulumState;
    type Dynamics = PendulumDynamics;

    fn system_name(&self) -> &'static str {
        "pendulum"
    }

    fn dynamics(&self, gravity: f64) -> Result<PendulumDynamics> {
        PendulumDynamics::new(gravity, self.length)
    }

    fn state(&self) -> Result<PendulumState> {
        Ok(PendulumState {
            theta: self.theta,
            omega: self.omega,
        })
    }

    fn apply_state(&mut self, state: &PendulumState) -> Result<()> {
        let theta = ensure_finite("theta", state.theta)?;
        let omega = ensure_finite("omega", state.omega)?;
        self.theta = theta;
        self.omega = omega;
        Ok(())
    }

    fn positions(&self) -> Vec<DVec2> {
        vec![self.position()]
    }

    fn default_stop(&self, duration: f64) -> StopCondition {
        StopCondition::Duration(duration)
    }
}
