pub mod polar;

pub use polar::{
    HANGING_OFFSET, cartesian_to_polar, cartesian_velocity_to_polar, polar_angle,
    polar_to_cartesian, polar_velocity_to_cartesian,
};
