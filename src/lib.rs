// Fixed-step simulation of simple mechanical systems
pub mod core {
    pub mod geometry;
    pub mod solve;
    pub mod state;
}

pub mod laws {
    pub mod classical;
    pub mod rhs;
}

pub mod investigation {
    pub mod probe;
}

pub mod bodies;
pub mod config;
pub mod error;
pub mod simulation;

pub use error::{Result, SimError};
