//! Body models: physical properties plus the kinematic state the driver writes back into.

pub mod double_pendulum;
pub mod particle;
pub mod pendulum;

pub use double_pendulum::DoublePendulum;
pub use particle::{Particle, Polar, PolarVelocity, Position, Velocity};
pub use pendulum::Pendulum;

use glam::DVec2;

use crate::core::state::StateLayout;
use crate::error::Result;
use crate::laws::rhs::Dynamics;
use crate::simulation::StopCondition;

/// A body the simulation driver can step.
///
/// The driver reads the initial state vector from the body, feeds it through
/// the body's dynamics and writes every new state back via
/// [`Body::apply_state`], which re-derives the Cartesian coordinates.
pub trait Body {
    type Layout: StateLayout;
    type Dynamics: Dynamics;

    fn system_name(&self) -> &'static str;

    /// The right-hand side for this body, closed over its fixed physical parameters.
    fn dynamics(&self, gravity: f64) -> Result<Self::Dynamics>;

    /// Current kinematic state in the layout the dynamics expects.
    fn state(&self) -> Result<Self::Layout>;

    /// Writes a new kinematic state back into the body.
    fn apply_state(&mut self, state: &Self::Layout) -> Result<()>;

    /// Cartesian positions of the tracked points (one per link).
    fn positions(&self) -> Vec<DVec2>;

    /// The stop policy this kind of system uses unless told otherwise.
    fn default_stop(&self, duration: f64) -> StopCondition;
}
