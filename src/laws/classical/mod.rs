pub mod double_pendulum;
pub mod pendulum;
pub mod projectile;

pub use double_pendulum::DoublePendulumDynamics;
pub use pendulum::PendulumDynamics;
pub use projectile::ProjectileDynamics;

/// Gravitational acceleration used throughout, in m/s².
pub const STANDARD_GRAVITY: f64 = 9.82;

/// Sea-level air density, in kg/m³.
pub const AIR_DENSITY: f64 = 1.225;
