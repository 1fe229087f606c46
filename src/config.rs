//! Scenario configuration, loadable from RON.
//!
//! ```ron
//! (
//!     name: "lazy swing",
//!     gravity: 9.82,
//!     dt: 0.01,
//!     duration: 5.0,
//!     scenario: Pendulum(
//!         link: (mass: 1.0, length: 1.0, origin: (0.0, 0.0)),
//!         theta: 0.785,
//!         omega: 0.0,
//!     ),
//! )
//! ```

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};
use std::path::Path;

use anyhow::{Context, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::bodies::{Body, DoublePendulum, Particle, Pendulum, Position, Velocity};
use crate::core::geometry::HANGING_OFFSET;
use crate::error::{self, ensure_non_negative, ensure_positive};
use crate::laws::classical::STANDARD_GRAVITY;
use crate::simulation::{Simulation, Trajectory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenarioKind {
    Projectile,
    Pendulum,
    DoublePendulum,
}

/// Physical properties of one pendulum link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub mass: f64,
    pub length: f64,
    #[serde(default)]
    pub origin: (f64, f64),
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            length: 1.0,
            origin: (0.0, 0.0),
        }
    }
}

impl LinkConfig {
    fn build(&self) -> error::Result<Pendulum> {
        Pendulum::new(self.mass, self.length, DVec2::new(self.origin.0, self.origin.1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioConfig {
    Projectile {
        mass: f64,
        #[serde(default)]
        drag_coefficient: f64,
        #[serde(default)]
        area: f64,
        position: (f64, f64),
        velocity: (f64, f64),
    },
    Pendulum {
        link: LinkConfig,
        theta: f64,
        #[serde(default)]
        omega: f64,
    },
    DoublePendulum {
        upper: LinkConfig,
        lower: LinkConfig,
        theta1: f64,
        theta2: f64,
        #[serde(default)]
        omega1: f64,
        #[serde(default)]
        omega2: f64,
    },
}

impl ScenarioConfig {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            ScenarioConfig::Projectile { .. } => ScenarioKind::Projectile,
            ScenarioConfig::Pendulum { .. } => ScenarioKind::Pendulum,
            ScenarioConfig::DoublePendulum { .. } => ScenarioKind::DoublePendulum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub name: String,
    pub gravity: f64,
    pub dt: f64,
    /// Run length for the pendula; for the projectile, the limit if it never reaches the ground.
    pub duration: f64,
    pub scenario: ScenarioConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::preset(ScenarioKind::Pendulum)
    }
}

impl SimulationConfig {
    /// The stock setups: a unit pendulum released at polar angle 7π/4, a
    /// particle dropped from one metre, and a unit double pendulum with the
    /// upper link horizontal.
    pub fn preset(kind: ScenarioKind) -> Self {
        let scenario = match kind {
            ScenarioKind::Projectile => ScenarioConfig::Projectile {
                mass: 1.0,
                drag_coefficient: 0.0,
                area: 0.0,
                position: (0.0, 1.0),
                velocity: (0.0, 0.0),
            },
            ScenarioKind::Pendulum => ScenarioConfig::Pendulum {
                link: LinkConfig::default(),
                // 7π/4 from the positive x-axis, re-measured from the downward vertical
                theta: 7.0 * FRAC_PI_4 - HANGING_OFFSET - TAU,
                omega: 0.0,
            },
            ScenarioKind::DoublePendulum => ScenarioConfig::DoublePendulum {
                upper: LinkConfig::default(),
                lower: LinkConfig::default(),
                theta1: FRAC_PI_2,
                theta2: 0.0,
                omega1: 0.0,
                omega2: 0.0,
            },
        };

        Self {
            name: format!("{kind:?}"),
            gravity: STANDARD_GRAVITY,
            dt: 0.01,
            duration: 5.0,
            scenario,
        }
    }

    /// Parses and validates a RON document.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let config: Self = ron::from_str(source).context("failed to parse simulation config")?;
        config.validate().context("invalid simulation config")?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_ron_str(&source).with_context(|| format!("in {}", path.display()))
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("failed to serialize simulation config")
    }

    /// Checks the numeric settings. Body properties are checked when the bodies are built.
    pub fn validate(&self) -> error::Result<()> {
        ensure_non_negative("gravity", self.gravity)?;
        ensure_positive("dt", self.dt)?;
        ensure_positive("duration", self.duration)?;
        Ok(())
    }

    /// Builds the configured body and runs it with RK4 under its default stop policy.
    pub fn run(&self) -> error::Result<Trajectory> {
        self.validate()?;
        match self.scenario {
            ScenarioConfig::Projectile {
                mass,
                drag_coefficient,
                area,
                position,
                velocity,
            } => {
                let mut particle = Particle::with_properties(mass, drag_coefficient, area)?;
                particle.set_position(Position::Cartesian {
                    x: position.0,
                    y: position.1,
                })?;
                particle.set_velocity(Velocity::Cartesian {
                    vx: velocity.0,
                    vy: velocity.1,
                })?;
                self.simulate(particle)
            }
            ScenarioConfig::Pendulum { link, theta, omega } => {
                let mut pendulum = link.build()?;
                pendulum.set_angle(theta)?;
                pendulum.set_angular_velocity(omega)?;
                self.simulate(pendulum)
            }
            ScenarioConfig::DoublePendulum {
                upper,
                lower,
                theta1,
                theta2,
                omega1,
                omega2,
            } => {
                let mut double = DoublePendulum::new(upper.build()?, lower.build()?);
                double.set_state(theta1, theta2, omega1, omega2)?;
                self.simulate(double)
            }
        }
    }

    fn simulate<B: Body>(&self, body: B) -> error::Result<Trajectory> {
        let stop = body.default_stop(self.duration);
        Simulation::new(body, self.gravity, self.dt, stop)?.run()
    }
}
