use crate::error::{Result, SimError};

/// A fixed layout over a flat state vector.
///
/// The integrator only ever sees `&[f64]`; dynamics functions and body models
/// unpack and repack through these layouts so that all three agree on which
/// slot holds which coordinate.
pub trait StateLayout: Sized + Copy {
    /// Number of components.
    const LEN: usize;

    /// Packs into a flat vector of length [`Self::LEN`].
    fn to_vec(&self) -> Vec<f64>;

    /// Unpacks a flat vector, failing with [`SimError::ShapeMismatch`] on a wrong length.
    fn from_slice(state: &[f64]) -> Result<Self>;
}

fn check_len(expected: usize, state: &[f64]) -> Result<()> {
    if state.len() == expected {
        Ok(())
    } else {
        Err(SimError::shape(expected, state.len()))
    }
}

/// Free particle: `[x, y, vx, vy]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectileState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl StateLayout for ProjectileState {
    const LEN: usize = 4;

    fn to_vec(&self) -> Vec<f64> {
        vec![self.x, self.y, self.vx, self.vy]
    }

    fn from_slice(state: &[f64]) -> Result<Self> {
        check_len(Self::LEN, state)?;
        Ok(Self {
            x: state[0],
            y: state[1],
            vx: state[2],
            vy: state[3],
        })
    }
}

/// Single pendulum: `[theta, omega]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendulumState {
    pub theta: f64,
    pub omega: f64,
}

impl StateLayout for PendulumState {
    const LEN: usize = 2;

    fn to_vec(&self) -> Vec<f64> {
        vec![self.theta, self.omega]
    }

    fn from_slice(state: &[f64]) -> Result<Self> {
        check_len(Self::LEN, state)?;
        Ok(Self {
            theta: state[0],
            omega: state[1],
        })
    }
}

/// Double pendulum: `[theta1, theta2, omega1, omega2]`.
///
/// Angles come first, then angular velocities; link 1 is the upper link.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DoublePendulumState {
    pub theta1: f64,
    pub theta2: f64,
    pub omega1: f64,
    pub omega2: f64,
}

impl StateLayout for DoublePendulumState {
    const LEN: usize = 4;

    fn to_vec(&self) -> Vec<f64> {
        vec![self.theta1, self.theta2, self.omega1, self.omega2]
    }

    fn from_slice(state: &[f64]) -> Result<Self> {
        check_len(Self::LEN, state)?;
        Ok(Self {
            theta1: state[0],
            theta2: state[1],
            omega1: state[2],
            omega2: state[3],
        })
    }
}
