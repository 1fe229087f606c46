use crate::core::state::{ProjectileState, StateLayout};
use crate::error::{Result, ensure_finite, ensure_non_negative, ensure_positive};
use crate::laws::rhs::Dynamics;

/// Point mass under constant gravity, optionally with quadratic air drag.
///
/// Without drag: `d/dt [x, y, vx, vy] = [vx, vy, 0, -g]`.
/// With drag the acceleration gains `-(ρ·C_d·A / 2m)·|v|·v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileDynamics {
    pub g: f64,
    /// `ρ·C_d·A / 2m`, zero when drag is off.
    drag_factor: f64,
}

impl ProjectileDynamics {
    /// Drag-free free fall.
    pub fn new(g: f64) -> Result<Self> {
        Ok(Self {
            g: ensure_finite("gravity", g)?,
            drag_factor: 0.0,
        })
    }

    /// Free fall with quadratic drag for a body of the given mass, drag
    /// coefficient and reference area, in air of density `air_density`.
    pub fn with_drag(
        g: f64,
        mass: f64,
        drag_coefficient: f64,
        area: f64,
        air_density: f64,
    ) -> Result<Self> {
        let mass = ensure_positive("mass", mass)?;
        let drag_coefficient = ensure_non_negative("drag_coefficient", drag_coefficient)?;
        let area = ensure_non_negative("area", area)?;
        let air_density = ensure_non_negative("air_density", air_density)?;

        Ok(Self {
            g: ensure_finite("gravity", g)?,
            drag_factor: air_density * drag_coefficient * area / (2.0 * mass),
        })
    }

    pub fn drag_factor(&self) -> f64 {
        self.drag_factor
    }
}

impl Dynamics for ProjectileDynamics {
    fn name(&self) -> &str {
        if self.drag_factor > 0.0 {
            "projectile (drag)"
        } else {
            "projectile"
        }
    }

    fn dimension(&self) -> usize {
        ProjectileState::LEN
    }

    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>> {
        let s = ProjectileState::from_slice(state)?;

        let (mut ax, mut ay) = (0.0, -self.g);
        if self.drag_factor > 0.0 {
            let speed = s.vx.hypot(s.vy);
            ax -= self.drag_factor * speed * s.vx;
            ay -= self.drag_factor * speed * s.vy;
        }

        Ok(vec![s.vx, s.vy, ax, ay])
    }
}
