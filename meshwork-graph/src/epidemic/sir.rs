//! SIR epidemic simulation: susceptible-infected-recovered.
//!
//! Discrete-time stochastic process with synchronous steps: every
//! infected node independently infects each susceptible neighbour with
//! probability `p`, then recovers terminally with probability `r`.
//! A node infected at step `t` starts transmitting at step `t + 1`.
//! The trace records the compartment counts after every step until
//! extinction or the horizon.

use meshwork_core::Label;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::Graph;

use super::downsample_by_time;

/// Node compartment in the SIR process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Susceptible,
    Infected,
    Recovered,
}

/// Configuration for the SIR simulation.
#[derive(Debug, Clone)]
pub struct SirConfig {
    /// Per-contact infection probability `p` per step.
    /// Default: 0.1
    pub infection_probability: f64,

    /// Per-node recovery probability `r` per step.
    /// Default: 0.05
    pub recovery_probability: f64,

    /// Number of steps in the horizon.
    /// Default: 1000
    pub t_max: u32,

    /// Nodes carrying this label start infected.
    /// Default: [`Label::L1`]
    pub seed_label: Label,

    /// Random source seed; fix it to reproduce a trace.
    /// Default: 42
    pub rng_seed: u64,
}

impl Default for SirConfig {
    fn default() -> Self {
        Self {
            infection_probability: 0.1,
            recovery_probability: 0.05,
            t_max: 1000,
            seed_label: Label::L1,
            rng_seed: 42,
        }
    }
}

impl SirConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-contact infection probability.
    #[must_use]
    pub const fn with_infection_probability(mut self, infection_probability: f64) -> Self {
        self.infection_probability = infection_probability;
        self
    }

    /// Set the per-node recovery probability.
    #[must_use]
    pub const fn with_recovery_probability(mut self, recovery_probability: f64) -> Self {
        self.recovery_probability = recovery_probability;
        self
    }

    /// Set the step horizon.
    #[must_use]
    pub const fn with_t_max(mut self, t_max: u32) -> Self {
        self.t_max = t_max;
        self
    }

    /// Set the seed label of the initially infected set.
    #[must_use]
    pub const fn with_seed_label(mut self, seed_label: Label) -> Self {
        self.seed_label = seed_label;
        self
    }

    /// Set the random source seed.
    #[must_use]
    pub const fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }
}

/// One step sample of an SIR trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SirSample {
    /// Step number, starting at zero.
    pub time: u32,
    /// Susceptible node count.
    pub susceptible: usize,
    /// Infected node count.
    pub infected: usize,
    /// Recovered node count.
    pub recovered: usize,
}

/// Step trace of one SIR run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SirTrace {
    /// One sample per step, starting at step zero.
    pub samples: Vec<SirSample>,
}

impl SirTrace {
    /// Reduce the step trace to samples at least `min_gap` time units
    /// apart.
    #[must_use]
    pub fn downsample(&self, min_gap: f64) -> Vec<SirSample> {
        downsample_by_time(&self.samples, min_gap, |sample| f64::from(sample.time))
    }
}

/// SIR simulation implementation.
pub struct SirSimulation;

impl SirSimulation {
    /// Run one stochastic SIR trajectory.
    #[must_use]
    pub fn run(graph: &Graph, config: &SirConfig) -> SirTrace {
        let n = graph.node_count();
        let contact = graph.undirected();

        let mut state = vec![State::Susceptible; n];
        let mut infected_count = 0usize;
        for index in graph.nodes_with_label(config.seed_label) {
            state[index] = State::Infected;
            infected_count += 1;
        }
        let mut susceptible_count = n - infected_count;
        let mut recovered_count = 0usize;

        let mut rng = StdRng::seed_from_u64(config.rng_seed);
        let mut samples = vec![SirSample {
            time: 0,
            susceptible: susceptible_count,
            infected: infected_count,
            recovered: recovered_count,
        }];

        for time in 1..=config.t_max {
            if infected_count == 0 {
                break;
            }

            // Independent transmission attempt per infected contact.
            let mut infect = vec![false; n];
            for index in 0..n {
                if state[index] != State::Infected {
                    continue;
                }
                for neighbor in contact.neighbors(index) {
                    if state[neighbor] == State::Susceptible
                        && rng.gen::<f64>() < config.infection_probability
                    {
                        infect[neighbor] = true;
                    }
                }
            }

            // Recovery draws for the nodes infected before this step.
            let mut recover = vec![false; n];
            for index in 0..n {
                if state[index] == State::Infected
                    && rng.gen::<f64>() < config.recovery_probability
                {
                    recover[index] = true;
                }
            }

            // Synchronous update: the two flag sets touch disjoint nodes.
            for index in 0..n {
                if infect[index] {
                    state[index] = State::Infected;
                    susceptible_count -= 1;
                    infected_count += 1;
                }
                if recover[index] {
                    state[index] = State::Recovered;
                    infected_count -= 1;
                    recovered_count += 1;
                }
            }

            samples.push(SirSample {
                time,
                susceptible: susceptible_count,
                infected: infected_count,
                recovered: recovered_count,
            });
        }

        SirTrace { samples }
    }
}

#[cfg(test)]
mod tests {
    use meshwork_core::NodeId;

    use super::*;

    fn node(id: u64) -> NodeId {
        NodeId::new(id)
    }

    /// Path 1 -- 2 -- 3 -- 4; node 1 carries the seed label.
    fn seeded_path() -> Graph {
        let mut builder = Graph::builder();
        builder.add_node(node(1), Label::L1).unwrap();
        for id in 2..=4 {
            builder.add_node(node(id), Label::L2).unwrap();
        }
        for id in 1..=3 {
            builder.add_edge(node(id), node(id + 1)).unwrap();
        }
        builder.build()
    }

    #[test]
    fn config_defaults() {
        let config = SirConfig::default();
        assert!((config.infection_probability - 0.1).abs() < f64::EPSILON);
        assert!((config.recovery_probability - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.t_max, 1000);
        assert_eq!(config.seed_label, Label::L1);
        assert_eq!(config.rng_seed, 42);
    }

    #[test]
    fn compartments_always_sum_to_population() {
        let graph = seeded_path();
        let trace = SirSimulation::run(&graph, &SirConfig::default());
        for sample in &trace.samples {
            assert_eq!(
                sample.susceptible + sample.infected + sample.recovered,
                graph.node_count()
            );
        }
    }

    #[test]
    fn recovered_count_never_decreases() {
        let graph = seeded_path();
        let trace = SirSimulation::run(&graph, &SirConfig::default());
        for pair in trace.samples.windows(2) {
            assert!(pair[1].recovered >= pair[0].recovered);
        }
    }

    #[test]
    fn certain_recovery_without_spread_ends_in_one_step() {
        let graph = seeded_path();
        let config =
            SirConfig::new().with_infection_probability(0.0).with_recovery_probability(1.0);
        let trace = SirSimulation::run(&graph, &config);
        assert_eq!(
            trace.samples,
            vec![
                SirSample { time: 0, susceptible: 3, infected: 1, recovered: 0 },
                SirSample { time: 1, susceptible: 3, infected: 0, recovered: 1 },
            ]
        );
    }

    #[test]
    fn certain_spread_marches_down_the_path() {
        let graph = seeded_path();
        let config =
            SirConfig::new().with_infection_probability(1.0).with_recovery_probability(1.0);
        let trace = SirSimulation::run(&graph, &config);
        // The wave advances one hop per step while the back recovers.
        assert_eq!(
            trace.samples,
            vec![
                SirSample { time: 0, susceptible: 3, infected: 1, recovered: 0 },
                SirSample { time: 1, susceptible: 2, infected: 1, recovered: 1 },
                SirSample { time: 2, susceptible: 1, infected: 1, recovered: 2 },
                SirSample { time: 3, susceptible: 0, infected: 1, recovered: 3 },
                SirSample { time: 4, susceptible: 0, infected: 0, recovered: 4 },
            ]
        );
    }

    #[test]
    fn same_seed_reproduces_the_trace() {
        let graph = seeded_path();
        let config = SirConfig::default();
        let first = SirSimulation::run(&graph, &config);
        let second = SirSimulation::run(&graph, &config);
        assert_eq!(first, second);
    }
}
