//! Integration tests for the epidemic simulations.
//!
//! The simulations are stochastic, so the tests fix the random seed
//! and assert structural properties: compartment sums, monotone
//! recovery, extinction under forced parameters, reproducibility, and
//! a tolerance-band persistence check above the epidemic threshold.

use meshwork_core::{Label, NodeId};
use meshwork_graph::epidemic::{
    SirConfig, SirSimulation, SisConfig, SisSimulation, MIN_SAMPLE_GAP,
};
use meshwork_graph::Graph;

fn node(id: u64) -> NodeId {
    NodeId::new(id)
}

/// Ring of `n` nodes with a chord every `step`; the first half carries
/// the seed label.
fn seeded_ring(n: u64, step: u64) -> Graph {
    let mut builder = Graph::builder();
    for id in 0..n {
        let label = if id < n / 2 { Label::L1 } else { Label::L2 };
        builder.add_node(node(id), label).unwrap();
    }
    for id in 0..n {
        builder.add_edge(node(id), node((id + 1) % n)).unwrap();
    }
    for id in (0..n).step_by(step as usize) {
        builder.add_edge(node(id), node((id + n / 2) % n)).unwrap();
    }
    builder.build()
}

#[test]
fn sir_compartments_sum_to_population_at_every_sample() {
    let graph = seeded_ring(20, 5);
    let trace = SirSimulation::run(&graph, &SirConfig::default());
    for sample in &trace.samples {
        assert_eq!(
            sample.susceptible + sample.infected + sample.recovered,
            graph.node_count()
        );
    }
}

#[test]
fn sir_reaches_extinction_under_certain_recovery() {
    let graph = seeded_ring(20, 5);
    let config = SirConfig::new().with_infection_probability(0.0).with_recovery_probability(1.0);
    let trace = SirSimulation::run(&graph, &config);
    let last = trace.samples.last().unwrap();
    assert_eq!(last.infected, 0);
    assert_eq!(last.recovered, 10);
    assert_eq!(last.susceptible, 10);
}

#[test]
fn sis_compartments_sum_to_population_at_every_sample() {
    let graph = seeded_ring(20, 5);
    let config = SisConfig::new().with_t_max(100.0);
    let trace = SisSimulation::run(&graph, &config);
    for sample in &trace.samples {
        assert_eq!(sample.susceptible + sample.infected, graph.node_count());
    }
}

#[test]
fn sis_trace_is_reproducible_for_a_fixed_seed() {
    let graph = seeded_ring(20, 5);
    let config = SisConfig::new().with_t_max(100.0).with_rng_seed(7);
    let first = SisSimulation::run(&graph, &config);
    let second = SisSimulation::run(&graph, &config);
    assert_eq!(first, second);
}

#[test]
fn sis_persists_above_the_epidemic_threshold() {
    // τ/γ = 10 on a connected ring with chords: the infection should
    // still be alive at the horizon in most trials. Statistical check
    // over independent seeds with a generous tolerance band.
    let graph = seeded_ring(20, 5);
    let trials = 20;
    let mut active = 0;
    for seed in 0..trials {
        let config = SisConfig::new()
            .with_transmission_rate(1.0)
            .with_recovery_rate(0.1)
            .with_t_max(20.0)
            .with_rng_seed(seed);
        let trace = SisSimulation::run(&graph, &config);
        if trace.samples.last().unwrap().infected > 0 {
            active += 1;
        }
    }
    assert!(active >= trials / 2, "only {active} of {trials} trials stayed active");
}

#[test]
fn downsampled_traces_respect_the_minimum_gap() {
    let graph = seeded_ring(20, 5);
    let config = SisConfig::new().with_t_max(500.0);
    let trace = SisSimulation::run(&graph, &config);
    let sampled = trace.downsample(MIN_SAMPLE_GAP);
    for pair in sampled.windows(2) {
        assert!(pair[1].time - pair[0].time >= MIN_SAMPLE_GAP);
    }

    let sir = SirSimulation::run(&graph, &SirConfig::default());
    let sampled = sir.downsample(MIN_SAMPLE_GAP);
    for pair in sampled.windows(2) {
        assert!(f64::from(pair[1].time) - f64::from(pair[0].time) >= MIN_SAMPLE_GAP);
    }
}
