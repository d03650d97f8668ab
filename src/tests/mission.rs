use crate::prelude::*;
use crate::tests::init_logger;

fn leo_config() -> MissionConfig {
    MissionConfig {
        constraints: vec![
            ConstraintConfig::EarthLimb { margin_deg: 6.0 },
            ConstraintConfig::SunSeparation { min_angle_deg: 46.0 },
            ConstraintConfig::MoonSeparation { min_angle_deg: 23.0 },
            ConstraintConfig::GalacticLatitude { min_angle_deg: 10.0 },
        ],
        fov: FovConfig {
            width_deg: 7.1,
            height_deg: None,
        },
        orbit: OrbitConfig::TleLines {
            line1: "1 99990U 26001A   26001.00000000  .00000000  00000-0  00000-0 0  9994"
                .to_string(),
            line2: "2 99990  97.8000 100.0000 0001000  90.0000 270.0000 14.81370966000018"
                .to_string(),
        },
        min_overhead_s: 0.0,
        max_angular_velocity_deg_s: 0.872,
        max_angular_acceleration_deg_s2: 0.244,
    }
}

#[test]
fn presets_build() {
    init_logger();
    for mission in [Mission::dorado(), Mission::ultrasat(), Mission::uvex()] {
        let mission = mission.unwrap();
        assert!(mission.max_angular_velocity_rad_s > 0.0);
        assert!(mission.max_angular_acceleration_rad_s2 > 0.0);
        assert!(mission.min_overhead >= Duration::ZERO);
    }
    assert_eq!(Mission::dorado().unwrap().constraints.len(), 7);
}

#[test]
fn construction_rejects_bad_parameters() {
    init_logger();

    let mut cfg = leo_config();
    cfg.max_angular_velocity_deg_s = 0.0;
    assert!(Mission::new(cfg).is_err());

    let mut cfg = leo_config();
    cfg.max_angular_acceleration_deg_s2 = -0.1;
    assert!(Mission::new(cfg).is_err());

    let mut cfg = leo_config();
    cfg.min_overhead_s = -1.0;
    assert!(Mission::new(cfg).is_err());

    let mut cfg = leo_config();
    cfg.constraints
        .push(ConstraintConfig::SunSeparation { min_angle_deg: 0.0 });
    assert!(Mission::new(cfg).is_err());

    let mut cfg = leo_config();
    cfg.constraints.push(ConstraintConfig::TrappedParticleFlux {
        max_flux_cm2_s: -1.0,
        energy_mev: 20.0,
        particle: Particle::Proton,
        solar: SolarActivity::Max,
    });
    assert!(Mission::new(cfg).is_err());

    let mut cfg = leo_config();
    cfg.orbit = OrbitConfig::Spice {
        body: "tess".to_string(),
        kernels: vec![],
    };
    assert!(Mission::new(cfg).is_err());

    let mut cfg = leo_config();
    cfg.orbit = OrbitConfig::Spice {
        body: "no such probe".to_string(),
        kernels: vec!["https://example.org/kernel.bsp".to_string()],
    };
    assert!(Mission::new(cfg).is_err());
}

#[test]
fn overhead_floor() {
    init_logger();
    let mut cfg = leo_config();
    cfg.min_overhead_s = 10.0;
    let mission = Mission::new(cfg).unwrap();

    let center = SkyCoord::from_degrees(123.0, -45.0);
    // zero-distance repoint still pays the fixed dead time
    assert_eq!(
        mission.overhead(center, center).unwrap(),
        10.0 * Unit::Second
    );

    // a long slew dominates the floor
    let far = SkyCoord::from_degrees(303.0, 45.0);
    assert!(mission.overhead(center, far).unwrap() > 10.0 * Unit::Second);
}

#[test]
fn overhead_triangular_branch() {
    init_logger();
    let mission = Mission::dorado().unwrap();

    // 0.2° repoint: d_acc ≈ 1.56° so this never reaches peak velocity
    let a = SkyCoord::from_degrees(10.0, 0.0);
    let b = SkyCoord::from_degrees(10.2, 0.0);
    let overhead = mission.overhead(a, b).unwrap();
    let expected_s = 2.0 * (0.2_f64 / 0.244).sqrt();
    assert!(
        (overhead.to_unit(Unit::Second) - expected_s).abs() < 1e-6,
        "{} vs {} s",
        overhead,
        expected_s
    );
}

#[test]
fn constraint_order_never_matters() {
    init_logger();
    let grid = SkyGrid::healpix_ring(4);
    let t0 = Epoch::from_gregorian_utc_at_midnight(2026, 1, 1);
    let times: Vec<Epoch> = (0..4).map(|i| t0 + (i as f64) * 10.0 * Unit::Minute).collect();

    let forward = Mission::new(leo_config()).unwrap();
    let mut reversed_cfg = leo_config();
    reversed_cfg.constraints.reverse();
    let reversed = Mission::new(reversed_cfg).unwrap();

    let a = forward.get_field_of_regard(&grid, &times, 1).unwrap();
    let b = reversed.get_field_of_regard(&grid, &times, 1).unwrap();
    assert_eq!(a, b);
}
