//! Property tests for geometry, decoding and selection.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use truss_ga::fitness::economy_fitness;
use truss_ga::ga::{rank_probabilities, rank_selection, Genome};
use truss_ga::geometry::{Geometry, ADJACENCY_THRESHOLD};
use truss_ga::structure::build;

fn span() -> impl Strategy<Value = (u32, u32)> {
    (2u32..16).prop_flat_map(|length| (Just(length), 0..length))
}

proptest! {
    #[test]
    fn edges_are_short((length, height) in span()) {
        let g = Geometry::generate(length, height).unwrap();
        prop_assert!(!g.points().is_empty());
        for i in 0..g.genome_len() {
            let (a, b) = g.endpoints(i);
            prop_assert!(a.distance(&b) < ADJACENCY_THRESHOLD);
            prop_assert!(a.x <= g.mirror_line() && b.x <= g.mirror_line());
            prop_assert!(a.y <= height as i32 && b.y <= height as i32);
        }
    }

    #[test]
    fn decoded_nodes_are_mirror_symmetric(
        (length, height) in span(),
        seed in any::<u64>(),
    ) {
        let g = Geometry::generate(length, height).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let genome = Genome::random(g.genome_len(), &mut rng);
        if let Some(s) = build(&genome, &g).into_structure() {
            let nodes: BTreeSet<(i32, i32)> = s.nodes().iter().map(|n| (n.x, n.y)).collect();
            let reflected: BTreeSet<(i32, i32)> = s
                .nodes()
                .iter()
                .map(|n| n.mirrored(s.mirror_line()))
                .map(|n| (n.x, n.y))
                .collect();
            prop_assert_eq!(nodes, reflected);
            prop_assert_eq!(s.element_count(), genome.count_active());
            prop_assert!(s.span() > 0.0);
        }
    }

    #[test]
    fn rank_probabilities_are_a_decreasing_distribution(n in 1usize..1000) {
        let p = rank_probabilities(n);
        prop_assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        for pair in p.windows(2) {
            prop_assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn economy_is_bounded(counts in prop::collection::vec(prop::option::of(0usize..60), 1..40)) {
        let e = economy_fitness(&counts);
        prop_assert_eq!(e.len(), counts.len());
        for (value, count) in e.iter().zip(&counts) {
            prop_assert!((0.0..=10.0).contains(value));
            if !matches!(count, Some(n) if *n > 0) {
                prop_assert_eq!(*value, 0.0);
            }
        }
    }
}

#[test]
fn rank_selection_top_beats_bottom() {
    let fitness: Vec<f64> = (0..50).map(|i| 100.0 - i as f64).collect();
    let mut rng = StdRng::seed_from_u64(123);
    let mut counts = vec![0usize; fitness.len()];
    for _ in 0..200 {
        for idx in rank_selection(&fitness, fitness.len(), &mut rng) {
            counts[idx] += 1;
        }
    }
    assert!(counts[0] > counts[49]);
}
