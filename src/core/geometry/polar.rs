use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{Result, SimError};

/// Offset that turns an angle measured from the positive x-axis into an angle
/// measured from the negative y-axis (hanging straight down is `0`).
///
/// Reported angles are `polar - offset`, so the hanging angle is `polar + π/2`.
pub const HANGING_OFFSET: f64 = -FRAC_PI_2;

/// Quadrant-aware angle of `(x, y)` in `[0, 2π)`, shifted by `-offset`.
/// Points on the negative y-axis report `-π/2`.
///
/// Fails with [`SimError::Domain`] at the origin, where the angle is undefined.
pub fn polar_angle(x: f64, y: f64, offset: f64) -> Result<f64> {
    let angle = if x > 0.0 && y > 0.0 {
        (y / x).atan()
    } else if x < 0.0 && y > 0.0 {
        PI - (y / x.abs()).atan()
    } else if x < 0.0 && y < 0.0 {
        PI + (y / x).atan()
    } else if x > 0.0 && y < 0.0 {
        // rounds up to exactly 2π when y/x is below the ulp of 2π
        let angle = TAU + (y / x).atan();
        if angle >= TAU { angle - TAU } else { angle }
    } else if x == 0.0 && y != 0.0 {
        y.signum() * FRAC_PI_2
    } else if x > 0.0 && y == 0.0 {
        0.0
    } else if x < 0.0 && y == 0.0 {
        PI
    } else {
        return Err(SimError::domain(format!(
            "angle ill-defined for (x, y) = ({x}, {y})"
        )));
    };

    Ok(angle - offset)
}

/// Cartesian `(x, y)` to polar `(r, θ)`, with `θ` reported relative to `offset`.
pub fn cartesian_to_polar(x: f64, y: f64, offset: f64) -> Result<(f64, f64)> {
    let theta = polar_angle(x, y, offset)?;
    Ok((x.hypot(y), theta))
}

/// Polar `(r, θ)` to Cartesian `(x, y)`; inverse of [`cartesian_to_polar`] for the same `offset`.
pub fn polar_to_cartesian(r: f64, theta: f64, offset: f64) -> (f64, f64) {
    let (sin, cos) = (theta + offset).sin_cos();
    (r * cos, r * sin)
}

/// Cartesian velocity to `(radial velocity, angular velocity)`.
///
/// `r` must be the radius of `(x, y)`. At `r = 0` the decomposition does not
/// exist and [`SimError::Domain`] is returned.
pub fn cartesian_velocity_to_polar(vx: f64, vy: f64, x: f64, y: f64, r: f64) -> Result<(f64, f64)> {
    if r == 0.0 {
        return Err(SimError::domain(
            "radial/angular velocity undefined at r = 0",
        ));
    }
    let radial = (x * vx + y * vy) / r;
    let angular = (x * vy - y * vx) / (r * r);
    Ok((radial, angular))
}

/// `(radial velocity, angular velocity)` at polar position `(r, θ)` to Cartesian velocity.
///
/// `theta` is measured from the positive x-axis (apply the offset first).
pub fn polar_velocity_to_cartesian(radial: f64, angular: f64, r: f64, theta: f64) -> (f64, f64) {
    let (sin, cos) = theta.sin_cos();
    let vx = radial * cos - r * angular * sin;
    let vy = radial * sin + r * angular * cos;
    (vx, vy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants() {
        let cases = [
            ((1.0, 1.0), PI / 4.0),
            ((-1.0, 1.0), 3.0 * PI / 4.0),
            ((-1.0, -1.0), 5.0 * PI / 4.0),
            ((1.0, -1.0), 7.0 * PI / 4.0),
            ((0.0, 2.0), FRAC_PI_2),
            ((0.0, -2.0), -FRAC_PI_2),
            ((3.0, 0.0), 0.0),
            ((-3.0, 0.0), PI),
            ((1.0, -1e-17), 0.0),
        ];
        for ((x, y), expected) in cases {
            let theta = polar_angle(x, y, 0.0).unwrap();
            assert!((theta - expected).abs() < 1e-12, "({x}, {y}) -> {theta}, expected {expected}");
            assert!(theta < TAU, "({x}, {y}) -> {theta} is not below 2π");
        }
    }

    #[test]
    fn origin_is_rejected() {
        assert!(matches!(polar_angle(0.0, 0.0, 0.0), Err(SimError::Domain(_))));
        assert!(matches!(
            cartesian_velocity_to_polar(1.0, 0.0, 0.0, 0.0, 0.0),
            Err(SimError::Domain(_))
        ));
    }

    #[test]
    fn hanging_offset_measures_from_negative_y() {
        // straight down
        let theta = polar_angle(0.0, -1.0, HANGING_OFFSET).unwrap();
        assert!(theta.abs() < 1e-12);
        // swung out to +x
        let theta = polar_angle(1.0, 0.0, HANGING_OFFSET).unwrap();
        assert!((theta - FRAC_PI_2).abs() < 1e-12);
    }
}
