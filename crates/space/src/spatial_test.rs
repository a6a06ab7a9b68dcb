use nalgebra::Vector3;
use seeded_random::Random;

use crate::body::BodyId;
use crate::spatial::SpatialIndex;

fn scatter(rng: &mut Random, count: u32, extent: f64) -> Vec<(BodyId, Vector3<f64>)> {
    (0..count)
        .map(|i| {
            let p = Vector3::new(
                rng.double_range(-extent, extent),
                rng.double_range(-extent, extent),
                rng.double_range(-extent, extent),
            );
            (BodyId(i), p)
        })
        .collect()
}

#[test]
fn test_maybe_near_never_misses() {
    let mut rng = Random::new(&[9, 9, 9]);
    let bodies = scatter(&mut rng, 300, 1e6);
    let index = SpatialIndex::build(bodies.clone());
    assert_eq!(index.len(), 300);

    for _ in 0..100 {
        let p = Vector3::new(
            rng.double_range(-1e6, 1e6),
            rng.double_range(-1e6, 1e6),
            rng.double_range(-1e6, 1e6),
        );
        let d = rng.double_max(4e5);
        let found = index.maybe_near(&p, d);
        for (id, q) in &bodies {
            if (q - p).norm() <= d {
                assert!(found.contains(id), "body {} within {d} of {p:?} was missed", id.0);
            }
        }
    }
}

#[test]
fn test_maybe_near_returns_a_shell() {
    let index = SpatialIndex::build(vec![
        (BodyId(0), Vector3::new(10.0, 0.0, 0.0)),
        (BodyId(1), Vector3::new(-10.0, 0.0, 0.0)),
        (BodyId(2), Vector3::new(100.0, 0.0, 0.0)),
    ]);
    // body 1 is on the far side but at the same origin distance
    let mut found = index.maybe_near(&Vector3::new(10.0, 0.0, 0.0), 1.0);
    found.sort();
    assert_eq!(found, vec![BodyId(0), BodyId(1)]);
}

#[test]
fn test_empty_and_out_of_range_queries() {
    let index = SpatialIndex::default();
    assert!(index.is_empty());
    assert!(index.maybe_near(&Vector3::zeros(), 1e9).is_empty());

    let index = SpatialIndex::build(vec![(BodyId(5), Vector3::new(1.0, 0.0, 0.0))]);
    assert!(index.maybe_near(&Vector3::new(500.0, 0.0, 0.0), 10.0).is_empty());
    assert_eq!(index.maybe_near(&Vector3::zeros(), 1.0), vec![BodyId(5)]);
}
