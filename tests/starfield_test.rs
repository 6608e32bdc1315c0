use starscape::{config::StarBounds, starfield::StarFieldGeometry};

fn bounds() -> StarBounds {
    StarBounds {
        width: 10.0,
        height: 20.0,
        depth: 20.0,
    }
}

#[test]
fn generates_three_floats_per_star_and_one_scale() {
    let geometry = StarFieldGeometry::generate(150, bounds());
    assert_eq!(geometry.count(), 150);
    assert_eq!(geometry.positions.len(), 450);
    assert_eq!(geometry.scales.len(), 150);
}

#[test]
fn positions_stay_inside_the_configured_bounds() {
    let geometry = StarFieldGeometry::generate_seeded(500, bounds(), 7);
    for star in geometry.positions.chunks(3) {
        assert!(star[0] >= -5.0 && star[0] < 5.0, "x out of bounds: {}", star[0]);
        assert!(star[1] >= 0.0 && star[1] < 20.0, "y out of bounds: {}", star[1]);
        assert!(star[2] >= -10.0 && star[2] < 10.0, "z out of bounds: {}", star[2]);
    }
}

#[test]
fn scales_are_unit_interval() {
    let geometry = StarFieldGeometry::generate_seeded(500, bounds(), 11);
    for &scale in &geometry.scales {
        assert!((0.0..1.0).contains(&scale));
    }
}

#[test]
fn same_seed_reproduces_the_field() {
    let a = StarFieldGeometry::generate_seeded(64, bounds(), 42);
    let b = StarFieldGeometry::generate_seeded(64, bounds(), 42);
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.scales, b.scales);
}

#[test]
fn different_seeds_differ() {
    let a = StarFieldGeometry::generate_seeded(64, bounds(), 1);
    let b = StarFieldGeometry::generate_seeded(64, bounds(), 2);
    assert_ne!(a.positions, b.positions);
}

#[test]
fn zero_stars_is_a_valid_degenerate_field() {
    let geometry = StarFieldGeometry::generate(0, bounds());
    assert_eq!(geometry.count(), 0);
    assert!(geometry.positions.is_empty());
}
