use glam::DVec2;

use crate::bodies::Body;
use crate::core::geometry::{
    cartesian_to_polar, cartesian_velocity_to_polar, polar_to_cartesian,
    polar_velocity_to_cartesian,
};
use crate::core::state::ProjectileState;
use crate::error::{Result, SimError, ensure_finite, ensure_non_negative, ensure_positive};
use crate::laws::classical::{AIR_DENSITY, ProjectileDynamics};
use crate::simulation::StopCondition;

/// A position given in either coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Cartesian { x: f64, y: f64 },
    /// `theta` is measured from the positive x-axis.
    Polar { r: f64, theta: f64 },
}

/// A velocity given in either coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Velocity {
    Cartesian { vx: f64, vy: f64 },
    Polar { radial: f64, angular: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub r: f64,
    pub theta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarVelocity {
    pub radial: f64,
    pub angular: f64,
}

/// A point mass whose kinematic state is kept in both Cartesian and polar form.
///
/// Setting either representation recomputes the other. At the origin there is
/// no polar representation; the particle is still valid, its polar fields are
/// simply `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    mass: f64,
    drag_coefficient: f64,
    area: f64,

    position: Option<DVec2>,
    polar: Option<Polar>,
    velocity: Option<DVec2>,
    polar_velocity: Option<PolarVelocity>,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            mass: 1.0,
            drag_coefficient: 0.0,
            area: 0.0,
            position: None,
            polar: None,
            velocity: None,
            polar_velocity: None,
        }
    }
}

impl Particle {
    /// A drag-free particle of the given mass, without position or velocity.
    pub fn new(mass: f64) -> Result<Self> {
        Self::with_properties(mass, 0.0, 0.0)
    }

    /// A particle with the given mass and drag properties, without position or velocity.
    pub fn with_properties(mass: f64, drag_coefficient: f64, area: f64) -> Result<Self> {
        let mut particle = Self::default();
        particle.set_properties(mass, drag_coefficient, area)?;
        Ok(particle)
    }

    /// Replaces the physical properties. Nothing is changed if any value is rejected.
    pub fn set_properties(&mut self, mass: f64, drag_coefficient: f64, area: f64) -> Result<()> {
        let mass = ensure_positive("mass", mass)?;
        let drag_coefficient = ensure_non_negative("drag_coefficient", drag_coefficient)?;
        let area = ensure_non_negative("area", area)?;

        self.mass = mass;
        self.drag_coefficient = drag_coefficient;
        self.area = area;
        Ok(())
    }

    pub fn set_position(&mut self, position: Position) -> Result<()> {
        match position {
            Position::Cartesian { x, y } => {
                let x = ensure_finite("x", x)?;
                let y = ensure_finite("y", y)?;
                self.position = Some(DVec2::new(x, y));
                self.polar = match cartesian_to_polar(x, y, 0.0) {
                    Ok((r, theta)) => Some(Polar { r, theta }),
                    Err(_) => {
                        tracing::trace!("particle at the origin, polar coordinates omitted");
                        None
                    }
                };
            }
            Position::Polar { r, theta } => {
                let r = ensure_finite("r", r)?;
                let theta = ensure_finite("theta", theta)?;
                if r == 0.0 {
                    return Err(SimError::domain(
                        "r = 0 is a singular point in polar coordinates; use Cartesian",
                    ));
                }
                if r < 0.0 {
                    return Err(SimError::invalid("r", format!("must be > 0, got {r}")));
                }
                let (x, y) = polar_to_cartesian(r, theta, 0.0);
                self.position = Some(DVec2::new(x, y));
                self.polar = Some(Polar { r, theta });
            }
        }

        // Cartesian velocity is the ground truth; its polar split depends on where we are.
        if let Some(v) = self.velocity {
            self.polar_velocity = self.split_velocity(v);
        }
        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: Velocity) -> Result<()> {
        let position = self.position.ok_or(SimError::MissingPosition)?;

        match velocity {
            Velocity::Cartesian { vx, vy } => {
                let v = DVec2::new(ensure_finite("vx", vx)?, ensure_finite("vy", vy)?);
                self.velocity = Some(v);
                self.polar_velocity = self.split_velocity(v);
            }
            Velocity::Polar { radial, angular } => {
                let radial = ensure_finite("radial", radial)?;
                let angular = ensure_finite("angular", angular)?;
                let Some(Polar { r, theta }) = self.polar else {
                    return Err(SimError::domain(format!(
                        "polar velocity undefined at ({}, {})",
                        position.x, position.y
                    )));
                };
                let (vx, vy) = polar_velocity_to_cartesian(radial, angular, r, theta);
                self.velocity = Some(DVec2::new(vx, vy));
                self.polar_velocity = Some(PolarVelocity { radial, angular });
            }
        }
        Ok(())
    }

    fn split_velocity(&self, v: DVec2) -> Option<PolarVelocity> {
        let (p, polar) = (self.position?, self.polar?);
        cartesian_velocity_to_polar(v.x, v.y, p.x, p.y, polar.r)
            .ok()
            .map(|(radial, angular)| PolarVelocity { radial, angular })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn position(&self) -> Option<DVec2> {
        self.position
    }

    pub fn polar(&self) -> Option<Polar> {
        self.polar
    }

    pub fn velocity(&self) -> Option<DVec2> {
        self.velocity
    }

    pub fn polar_velocity(&self) -> Option<PolarVelocity> {
        self.polar_velocity
    }

    /// The dynamics matching this particle's properties; drag-free unless both
    /// drag coefficient and area are non-zero.
    pub fn dynamics(&self, gravity: f64) -> Result<ProjectileDynamics> {
        ProjectileDynamics::with_drag(
            gravity,
            self.mass,
            self.drag_coefficient,
            self.area,
            AIR_DENSITY,
        )
    }
}

impl Body for Particle {
    type Layout = ProjectileState;
    type Dynamics = ProjectileDynamics;

    fn system_name(&self) -> &'static str {
        "projectile"
    }

    fn dynamics(&self, gravity: f64) -> Result<ProjectileDynamics> {
        Particle::dynamics(self, gravity)
    }

    fn state(&self) -> Result<ProjectileState> {
        let p = self.position.ok_or(SimError::MissingPosition)?;
        let v = self
            .velocity
            .ok_or_else(|| SimError::invalid("velocity", "must be set before simulating"))?;
        Ok(ProjectileState {
            x: p.x,
            y: p.y,
            vx: v.x,
            vy: v.y,
        })
    }

    fn apply_state(&mut self, state: &ProjectileState) -> Result<()> {
        self.set_position(Position::Cartesian {
            x: state.x,
            y: state.y,
        })?;
        self.set_velocity(Velocity::Cartesian {
            vx: state.vx,
            vy: state.vy,
        })
    }

    fn positions(&self) -> Vec<DVec2> {
        self.position.into_iter().collect()
    }

    fn default_stop(&self, duration: f64) -> StopCondition {
        StopCondition::GroundContact {
            ground: 0.0,
            max_time: duration,
        }
    }
}
