use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::bodies::Body;
use crate::core::solve::{Integrator, RungeKutta4};
use crate::core::state::StateLayout;
use crate::error::{Result, SimError, ensure_finite, ensure_non_negative, ensure_positive};
use crate::laws::rhs::Dynamics;

/// Fraction of a step tolerated when comparing accumulated time against a duration.
const TIME_TOLERANCE: f64 = 1e-9;

/// When the stepping loop ends.
///
/// Each system picks its policy explicitly (see [`Body::default_stop`]);
/// neither one is a generalization of the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StopCondition {
    /// Stop once `t >= duration`.
    Duration(f64),
    /// Stop once any tracked point is at or below `ground`, or at `max_time`
    /// if it never gets there. Contact is only checked after the first step,
    /// so a launch from the ground works.
    GroundContact { ground: f64, max_time: f64 },
}

impl StopCondition {
    fn validate(&self) -> Result<()> {
        match *self {
            StopCondition::Duration(duration) => {
                ensure_non_negative("duration", duration)?;
            }
            StopCondition::GroundContact { ground, max_time } => {
                ensure_finite("ground", ground)?;
                ensure_non_negative("max_time", max_time)?;
            }
        }
        Ok(())
    }

    pub fn is_met(&self, t: f64, dt: f64, steps: usize, positions: &[DVec2]) -> bool {
        match *self {
            StopCondition::Duration(duration) => reached(t, duration, dt),
            StopCondition::GroundContact { ground, max_time } => {
                (steps > 0 && positions.iter().any(|p| p.y <= ground)) || reached(t, max_time, dt)
            }
        }
    }
}

fn reached(t: f64, limit: f64, dt: f64) -> bool {
    t >= limit - TIME_TOLERANCE * dt
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Stepping,
    Done,
}

/// Receives one sample per step: the time and the position of every tracked point.
pub trait TrajectorySink {
    fn record(&mut self, t: f64, positions: &[DVec2]);
}

/// Buffered time series of positions, one track per link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub tracks: Vec<Vec<DVec2>>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn track(&self, link: usize) -> Option<&[DVec2]> {
        self.tracks.get(link).map(Vec::as_slice)
    }

    pub fn final_time(&self) -> Option<f64> {
        self.time.last().copied()
    }

    /// The sample at `index`: its time and one position per link.
    pub fn sample(&self, index: usize) -> Option<(f64, Vec<DVec2>)> {
        let t = *self.time.get(index)?;
        let positions = self
            .tracks
            .iter()
            .map(|track| track.get(index).copied())
            .collect::<Option<Vec<_>>>()?;
        Some((t, positions))
    }
}

impl TrajectorySink for Trajectory {
    fn record(&mut self, t: f64, positions: &[DVec2]) {
        if self.tracks.is_empty() {
            self.tracks = vec![Vec::new(); positions.len()];
        }
        self.time.push(t);
        for (track, p) in self.tracks.iter_mut().zip(positions) {
            track.push(*p);
        }
    }
}

/// Drives one body from its initial state to the stop condition.
///
/// ```text
/// Initialized --run--> Stepping --stop condition--> Done
/// ```
///
/// The simulation owns its body; independent runs share nothing mutable.
pub struct Simulation<B: Body, I: Integrator = RungeKutta4> {
    body: B,
    dynamics: B::Dynamics,
    integrator: I,
    dt: f64,
    stop: StopCondition,
    t: f64,
    state: Vec<f64>,
    steps: usize,
    phase: Phase,
}

impl<B: Body> Simulation<B> {
    /// A simulation using classical RK4.
    pub fn new(body: B, gravity: f64, dt: f64, stop: StopCondition) -> Result<Self> {
        Self::with_integrator(body, RungeKutta4, gravity, dt, stop)
    }
}

impl<B: Body, I: Integrator> Simulation<B, I> {
    pub fn with_integrator(
        body: B,
        integrator: I,
        gravity: f64,
        dt: f64,
        stop: StopCondition,
    ) -> Result<Self> {
        let dt = ensure_positive("dt", dt)?;
        stop.validate()?;

        let dynamics = body.dynamics(gravity)?;
        if dynamics.dimension() != B::Layout::LEN {
            return Err(SimError::shape(B::Layout::LEN, dynamics.dimension()));
        }
        let state = body.state()?.to_vec();

        Ok(Self {
            body,
            dynamics,
            integrator,
            dt,
            stop,
            t: 0.0,
            state,
            steps: 0,
            phase: Phase::Initialized,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn stop_condition(&self) -> StopCondition {
        self.stop
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn into_body(self) -> B {
        self.body
    }

    /// Raw state vector in the body's layout.
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Advances one step and writes the result back into the body.
    pub fn step(&mut self) -> Result<()> {
        let (t, next) = self
            .integrator
            .advance(&self.dynamics, self.t, &self.state, self.dt)?;

        if let Some(&value) = next.iter().find(|v| !v.is_finite()) {
            return Err(SimError::NumericalInstability {
                context: "integrated state",
                value,
            });
        }

        let layout = B::Layout::from_slice(&next)?;
        self.body.apply_state(&layout)?;

        self.t = t;
        self.state = next;
        self.steps += 1;
        tracing::trace!(t = self.t, step = self.steps, "step");
        Ok(())
    }

    /// Runs to the stop condition, buffering every sample.
    pub fn run(&mut self) -> Result<Trajectory> {
        let mut trajectory = Trajectory::default();
        self.run_with(&mut trajectory)?;
        Ok(trajectory)
    }

    /// Runs to the stop condition, streaming every sample (including the
    /// initial one) into `sink`. An error aborts the run.
    pub fn run_with<S: TrajectorySink>(&mut self, sink: &mut S) -> Result<()> {
        if self.phase != Phase::Initialized {
            return Err(SimError::invalid(
                "phase",
                format!("simulation can only run once, currently {:?}", self.phase),
            ));
        }

        tracing::info!(
            system = self.body.system_name(),
            dynamics = self.dynamics.name(),
            integrator = self.integrator.name(),
            dt = self.dt,
            stop = ?self.stop,
            "simulation starting"
        );

        let positions = self.body.positions();
        sink.record(self.t, &positions);
        self.set_phase(Phase::Stepping);

        let mut positions = positions;
        while !self.stop.is_met(self.t, self.dt, self.steps, &positions) {
            if let Err(err) = self.step() {
                tracing::error!(%err, t = self.t, step = self.steps, "simulation aborted");
                self.set_phase(Phase::Done);
                return Err(err);
            }
            positions = self.body.positions();
            sink.record(self.t, &positions);
        }

        if let StopCondition::GroundContact { ground, max_time } = self.stop {
            let lowest = positions.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
            if lowest <= ground {
                tracing::debug!(overshoot = ground - lowest, "ground contact");
            } else {
                tracing::warn!(max_time, lowest, "no ground contact before the time limit");
            }
        }

        self.set_phase(Phase::Done);
        tracing::info!(
            system = self.body.system_name(),
            steps = self.steps,
            t_end = self.t,
            "simulation finished"
        );
        Ok(())
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }
}
