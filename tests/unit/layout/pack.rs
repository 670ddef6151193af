use super::*;

fn assert_no_overlap(leaves: &[Point], r: f64) {
    for (i, a) in leaves.iter().enumerate() {
        for b in &leaves[i + 1..] {
            let d = (*a - *b).hypot();
            assert!(d >= 2.0 * r - 1e-6, "leaves overlap: d={d}");
        }
    }
}

#[test]
fn lcg_first_values_are_fixed() {
    let mut rng = Lcg::new();
    // (1664525 * 1 + 1013904223) mod 2^32 = 1015568748
    assert!((rng.next_f64() - 1_015_568_748.0 / 4_294_967_296.0).abs() < 1e-15);
    let v = rng.next_f64();
    assert!((0.0..1.0).contains(&v));
}

#[test]
fn empty_group_packs_to_nothing() {
    assert!(pack_group(0, Point::ZERO, &LayoutConfig::default()).is_none());
}

#[test]
fn single_leaf_sits_on_anchor() {
    let anchor = Point::new(945.0, 495.0);
    let g = pack_group(1, anchor, &LayoutConfig::default()).unwrap();
    assert_eq!(g.leaves, vec![anchor]);
    assert_eq!(g.leaf_radius, 10.0);
    assert!(g.radius > 10.0 && g.radius < 10.5);
}

#[test]
fn two_leaves_are_mirrored_around_anchor() {
    let anchor = Point::new(100.0, 100.0);
    let g = pack_group(2, anchor, &LayoutConfig::default()).unwrap();
    assert!((g.leaves[0].x - 89.9).abs() < 1e-9);
    assert!((g.leaves[1].x - 110.1).abs() < 1e-9);
    assert_eq!(g.leaves[0].y, 100.0);
    assert!((g.radius - 20.3).abs() < 1e-9);
}

#[test]
fn many_leaves_do_not_overlap_and_stay_enclosed() {
    let cfg = LayoutConfig::default();
    let anchor = Point::new(600.0, 400.0);
    for n in [3usize, 4, 7, 19, 60] {
        let g = pack_group(n, anchor, &cfg).unwrap();
        assert_eq!(g.leaves.len(), n);
        assert_no_overlap(&g.leaves, cfg.leaf_radius);
        for p in &g.leaves {
            let d = (*p - g.center).hypot();
            assert!(d + cfg.leaf_radius <= g.radius + 1e-6, "n={n} leaf escapes");
        }
    }
}

#[test]
fn packing_is_deterministic() {
    let cfg = LayoutConfig::default();
    let a = pack_group(25, Point::new(10.0, 20.0), &cfg).unwrap();
    let b = pack_group(25, Point::new(10.0, 20.0), &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn leaf_radius_scales_positions() {
    let mut cfg = LayoutConfig::default();
    let small = pack_group(5, Point::ZERO, &cfg).unwrap();
    cfg.leaf_radius = 20.0;
    let big = pack_group(5, Point::ZERO, &cfg).unwrap();
    for (s, b) in small.leaves.iter().zip(&big.leaves) {
        assert!((b.x - 2.0 * s.x).abs() < 1e-9);
        assert!((b.y - 2.0 * s.y).abs() < 1e-9);
    }
    assert!((big.radius - 2.0 * small.radius).abs() < 1e-9);
}

#[test]
fn enclose_finds_circle_around_three_points() {
    let mut rng = Lcg::new();
    let circles = [
        Circle::new(-10.0, 0.0, 1.0),
        Circle::new(10.0, 0.0, 1.0),
        Circle::new(0.0, 5.0, 1.0),
    ];
    let e = enclose(&circles, &mut rng).unwrap();
    assert!((e.r - 11.0).abs() < 1e-9);
    assert!(e.x.abs() < 1e-9);
    assert!(e.y.abs() < 1e-9);
}
