use crate::core::state::{DoublePendulumState, StateLayout};
use crate::error::{Result, SimError, ensure_finite, ensure_positive};
use crate::laws::rhs::Dynamics;

/// Below this the 2×2 solve for the angular accelerations is treated as singular.
pub const SINGULAR_DETERMINANT: f64 = 1e-12;

/// Two point masses on massless rigid rods, link 2 hanging from the tip of link 1.
///
/// The Euler-Lagrange equations are linear in the angular accelerations:
///
/// ```text
/// θ1'' + α1·θ2'' = f1
/// α2·θ1'' + θ2'' = f2
///
/// α1 = (l2/l1)·(m2/(m1+m2))·cos(θ1−θ2)
/// α2 = (l1/l2)·cos(θ1−θ2)
/// f1 = −(l2/l1)·(m2/(m1+m2))·ω2²·sin(θ1−θ2) − (g/l1)·sin θ1
/// f2 =  (l1/l2)·ω1²·sin(θ1−θ2) − (g/l2)·sin θ2
/// ```
///
/// and are solved by Cramer's rule at every evaluation. The determinant
/// `1 − α1·α2` equals `1 − m2/(m1+m2)·cos²(θ1−θ2)`, which is bounded below by
/// `m1/(m1+m2)`; it only collapses when the upper mass is negligible against
/// the lower one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePendulumDynamics {
    pub g: f64,
    pub m1: f64,
    pub m2: f64,
    pub l1: f64,
    pub l2: f64,
}

impl DoublePendulumDynamics {
    pub fn new(g: f64, m1: f64, m2: f64, l1: f64, l2: f64) -> Result<Self> {
        Ok(Self {
            g: ensure_finite("gravity", g)?,
            m1: ensure_positive("m1", m1)?,
            m2: ensure_positive("m2", m2)?,
            l1: ensure_positive("l1", l1)?,
            l2: ensure_positive("l2", l2)?,
        })
    }

    /// Builds from the packed parameter vector `[m1, m2, l1, l2]`.
    pub fn from_params(params: [f64; 4], g: f64) -> Result<Self> {
        let [m1, m2, l1, l2] = params;
        Self::new(g, m1, m2, l1, l2)
    }

    /// The packed parameter vector `[m1, m2, l1, l2]`.
    pub fn params(&self) -> [f64; 4] {
        [self.m1, self.m2, self.l1, self.l2]
    }

    /// Angular accelerations `(θ1'', θ2'')` at the given state.
    pub fn angular_accelerations(&self, s: &DoublePendulumState) -> Result<(f64, f64)> {
        let Self { g, m1, m2, l1, l2 } = *self;

        let delta = s.theta1 - s.theta2;
        let (sin_d, cos_d) = delta.sin_cos();
        let mass_ratio = m2 / (m1 + m2);

        let alpha1 = (l2 / l1) * mass_ratio * cos_d;
        let alpha2 = (l1 / l2) * cos_d;
        let f1 = -(l2 / l1) * mass_ratio * s.omega2 * s.omega2 * sin_d - (g / l1) * s.theta1.sin();
        let f2 = (l1 / l2) * s.omega1 * s.omega1 * sin_d - (g / l2) * s.theta2.sin();

        let det = 1.0 - alpha1 * alpha2;
        if !det.is_finite() || det.abs() < SINGULAR_DETERMINANT {
            return Err(SimError::NumericalInstability {
                context: "double pendulum determinant",
                value: det,
            });
        }

        let g1 = (f1 - alpha1 * f2) / det;
        let g2 = (f2 - alpha2 * f1) / det;
        for value in [g1, g2] {
            if !value.is_finite() {
                return Err(SimError::NumericalInstability {
                    context: "double pendulum angular acceleration",
                    value,
                });
            }
        }

        Ok((g1, g2))
    }
}

impl Dynamics for DoublePendulumDynamics {
    fn name(&self) -> &str {
        "double pendulum"
    }

    fn dimension(&self) -> usize {
        DoublePendulumState::LEN
    }

    fn derivative(&self, state: &[f64]) -> Result<Vec<f64>> {
        let s = DoublePendulumState::from_slice(state)?;
        let (g1, g2) = self.angular_accelerations(&s)?;
        Ok(vec![s.omega1, s.omega2, g1, g2])
    }
}
