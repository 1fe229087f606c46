use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::DVec2;
use swing::bodies::{DoublePendulum, Pendulum};
use swing::investigation::probe::{MechanicalEnergy, Probe};
use swing::laws::classical::STANDARD_GRAVITY;
use swing::simulation::{Simulation, StopCondition};

#[test]
fn test_single_pendulum_energy_conservation() {
    let mut pendulum = Pendulum::new(1.0, 1.0, DVec2::ZERO).unwrap();
    pendulum.set_angle(FRAC_PI_4).unwrap();
    pendulum.set_angular_velocity(0.0).unwrap();

    let probe = MechanicalEnergy::new(STANDARD_GRAVITY);
    let initial_energy = probe.measure(&pendulum);
    println!("Initial Energy: {:.6}", initial_energy);

    let mut sim = Simulation::new(pendulum, STANDARD_GRAVITY, 0.01, StopCondition::Duration(5.0)).unwrap();
    let trajectory = sim.run().unwrap();

    let final_energy = probe.measure(sim.body());
    println!("Final Energy: {:.6}", final_energy);

    let t_end = trajectory.final_time().unwrap();
    assert!((t_end - 5.0).abs() < 1e-6, "stopped at t = {t_end}");

    let drift = ((final_energy - initial_energy) / initial_energy).abs();
    println!("Energy Drift: {:.3e}", drift);
    assert!(drift < 0.01, "Energy drift too high for RK4: {drift}");
}

#[test]
fn test_single_pendulum_swing_stays_bounded() {
    // released at rest, the bob can never rise above its release height
    let mut pendulum = Pendulum::default();
    pendulum.set_angle(FRAC_PI_4).unwrap();
    let release_height = pendulum.y();

    let mut sim = Simulation::new(pendulum, STANDARD_GRAVITY, 0.01, StopCondition::Duration(5.0)).unwrap();
    let trajectory = sim.run().unwrap();

    let track = trajectory.track(0).unwrap();
    let highest = track.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    assert!(highest <= release_height + 1e-6, "{highest} above {release_height}");

    // and it does swing through to the other side
    let leftmost = track.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    assert!(leftmost < -0.7, "leftmost x = {leftmost}");
}

#[test]
fn test_double_pendulum_energy_conservation() {
    let mut double = DoublePendulum::new(Pendulum::default(), Pendulum::default());
    double.set_state(FRAC_PI_2, 0.0, 0.0, 0.0).unwrap();

    let probe = MechanicalEnergy::new(STANDARD_GRAVITY);
    let initial_energy = probe.measure(&double);
    assert!((initial_energy + STANDARD_GRAVITY).abs() < 1e-12, "E0 = {initial_energy}");

    let mut sim = Simulation::new(double, STANDARD_GRAVITY, 0.001, StopCondition::Duration(2.0)).unwrap();
    sim.run().unwrap();

    let final_energy = probe.measure(sim.body());
    let drift = ((final_energy - initial_energy) / initial_energy).abs();
    println!("Energy Drift: {:.3e}", drift);
    assert!(drift < 1e-3, "Double pendulum energy drift too high: {drift}");
}

#[test]
fn test_double_pendulum_energy_with_unequal_links() {
    let upper = Pendulum::new(2.0, 1.5, DVec2::new(0.0, 3.0)).unwrap();
    let lower = Pendulum::new(0.5, 0.8, DVec2::ZERO).unwrap();
    let mut double = DoublePendulum::new(upper, lower);
    double.set_state(1.0, -0.5, 0.5, -1.5).unwrap();

    let probe = MechanicalEnergy::new(STANDARD_GRAVITY);
    let initial_energy = probe.measure(&double);

    let mut sim = Simulation::new(double, STANDARD_GRAVITY, 0.001, StopCondition::Duration(2.0)).unwrap();
    sim.run().unwrap();

    let final_energy = probe.measure(sim.body());
    let error = (final_energy - initial_energy).abs();
    println!("Initial {initial_energy:.6}, final {final_energy:.6}");
    assert!(error < 1e-3 * initial_energy.abs().max(1.0), "energy error {error}");
}
