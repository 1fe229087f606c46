use crate::bodies::{DoublePendulum, Particle, Pendulum};

/// A synchronous probe that extracts a scalar value from a body.
pub trait Probe<B: ?Sized> {
    fn name(&self) -> &str;
    fn measure(&self, body: &B) -> f64;
}

/// Total mechanical energy `T + V`, with potential energy measured from `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MechanicalEnergy {
    pub gravity: f64,
}

impl MechanicalEnergy {
    pub fn new(gravity: f64) -> Self {
        Self { gravity }
    }

    fn point_mass(&self, mass: f64, speed_sq: f64, height: f64) -> f64 {
        0.5 * mass * speed_sq + mass * self.gravity * height
    }
}

impl Probe<Pendulum> for MechanicalEnergy {
    fn name(&self) -> &str {
        "Total Energy"
    }

    fn measure(&self, body: &Pendulum) -> f64 {
        self.point_mass(body.mass(), body.velocity().length_squared(), body.y())
    }
}

impl Probe<DoublePendulum> for MechanicalEnergy {
    fn name(&self) -> &str {
        "Total Energy"
    }

    fn measure(&self, body: &DoublePendulum) -> f64 {
        // lower link velocity is absolute, so the two kinetic terms simply add
        let link = |p: &Pendulum| <Self as Probe<Pendulum>>::measure(self, p);
        link(body.upper()) + link(body.lower())
    }
}

/// A particle without position or velocity has no energy to report; it measures as `NaN`.
impl Probe<Particle> for MechanicalEnergy {
    fn name(&self) -> &str {
        "Total Energy"
    }

    fn measure(&self, body: &Particle) -> f64 {
        match (body.position(), body.velocity()) {
            (Some(p), Some(v)) => self.point_mass(body.mass(), v.length_squared(), p.y),
            _ => f64::NAN,
        }
    }
}
