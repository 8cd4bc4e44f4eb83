//! SIS epidemic simulation: susceptible-infected-susceptible.
//!
//! Continuous-time stochastic Markov chain over node states, run
//! event by event (Gillespie): a susceptible node becomes infected at
//! rate τ per infected neighbour, an infected node recovers back to
//! susceptible at rate γ. Waiting times between events are exponential
//! in the total rate; the trace records the compartment counts after
//! every event until extinction or the time horizon.

use meshwork_core::Label;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::Graph;

use super::downsample_by_time;

/// Configuration for the SIS simulation.
#[derive(Debug, Clone)]
pub struct SisConfig {
    /// Recovery rate γ per infected node.
    /// Default: 0.1
    pub recovery_rate: f64,

    /// Transmission rate τ per susceptible-infected contact.
    /// Default: 0.05
    pub transmission_rate: f64,

    /// Time horizon; events past it are discarded.
    /// Default: 1000.0
    pub t_max: f64,

    /// Nodes carrying this label start infected.
    /// Default: [`Label::L1`]
    pub seed_label: Label,

    /// Random source seed; fix it to reproduce a trace.
    /// Default: 42
    pub rng_seed: u64,
}

impl Default for SisConfig {
    fn default() -> Self {
        Self {
            recovery_rate: 0.1,
            transmission_rate: 0.05,
            t_max: 1000.0,
            seed_label: Label::L1,
            rng_seed: 42,
        }
    }
}

impl SisConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recovery rate γ.
    #[must_use]
    pub const fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.recovery_rate = recovery_rate;
        self
    }

    /// Set the transmission rate τ.
    #[must_use]
    pub const fn with_transmission_rate(mut self, transmission_rate: f64) -> Self {
        self.transmission_rate = transmission_rate;
        self
    }

    /// Set the time horizon.
    #[must_use]
    pub const fn with_t_max(mut self, t_max: f64) -> Self {
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

/// One event sample of an SIS trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SisSample {
    /// Event time.
    pub time: f64,
    /// Susceptible node count.
    pub susceptible: usize,
    /// Infected node count.
    pub infected: usize,
}

/// Event trace of one SIS run.
#[derive(Debug, Clone, PartialEq)]
pub struct SisTrace {
    /// One sample per event, starting at time zero.
    pub samples: Vec<SisSample>,
}

impl SisTrace {
    /// Reduce the irregular event trace to samples at least `min_gap`
    /// time units apart.
    #[must_use]
    pub fn downsample(&self, min_gap: f64) -> Vec<SisSample> {
        downsample_by_time(&self.samples, min_gap, |sample| sample.time)
    }
}

/// SIS simulation implementation.
pub struct SisSimulation;

impl SisSimulation {
    /// Run one stochastic SIS trajectory.
    ///
    /// The run terminates at extinction (no infected node left), when
    /// the next event would pass the horizon, or immediately when no
    /// event can occur at all (zero total rate).
    #[must_use]
    pub fn run(graph: &Graph, config: &SisConfig) -> SisTrace {
        let n = graph.node_count();
        let contact = graph.undirected();

        let mut infected = vec![false; n];
        let mut infected_count = 0usize;
        for index in graph.nodes_with_label(config.seed_label) {
            infected[index] = true;
            infected_count += 1;
        }

        // Infected-neighbour count per node, plus the number of
        // susceptible-infected contact pairs driving transmission.
        let mut pressure = vec![0usize; n];
        for index in 0..n {
            if infected[index] {
                for neighbor in contact.neighbors(index) {
                    pressure[neighbor] += 1;
                }
            }
        }
        let mut si_pairs: usize =
            (0..n).filter(|&index| !infected[index]).map(|index| pressure[index]).sum();

        let mut rng = StdRng::seed_from_u64(config.rng_seed);
        let mut time = 0.0f64;
        let mut samples = vec![SisSample {
            time,
            susceptible: n - infected_count,
            infected: infected_count,
        }];

        while infected_count > 0 {
            let infection_rate = config.transmission_rate * si_pairs as f64;
            let recovery_rate = config.recovery_rate * infected_count as f64;
            let total_rate = infection_rate + recovery_rate;
            if total_rate <= 0.0 {
                break;
            }

            // Exponential waiting time by inverse transform.
            let draw: f64 = rng.gen();
            time += -(1.0 - draw).ln() / total_rate;
            if time > config.t_max {
                break;
            }

            if rng.gen::<f64>() * total_rate < recovery_rate {
                // Uniform choice among the infected.
                let mut remaining = rng.gen_range(0..infected_count);
                let mut chosen = None;
                for index in 0..n {
                    if infected[index] {
                        if remaining == 0 {
                            chosen = Some(index);
                            break;
                        }
                        remaining -= 1;
                    }
                }
                let Some(node) = chosen else { break };
                infected[node] = false;
                infected_count -= 1;
                for neighbor in contact.neighbors(node) {
                    pressure[neighbor] -= 1;
                    if !infected[neighbor] {
                        si_pairs -= 1;
                    }
                }
                // The node is susceptible again: its own infected
                // neighbours now press on it.
                si_pairs += pressure[node];
            } else {
                // Susceptible node chosen proportional to its pressure.
                let mut remaining = rng.gen_range(0..si_pairs);
                let mut chosen = None;
                for index in 0..n {
                    if !infected[index] && pressure[index] > 0 {
                        if remaining < pressure[index] {
                            chosen = Some(index);
                            break;
                        }
                        remaining -= pressure[index];
                    }
                }
                let Some(node) = chosen else { break };
                infected[node] = true;
                infected_count += 1;
                si_pairs -= pressure[node];
                for neighbor in contact.neighbors(node) {
                    pressure[neighbor] += 1;
                    if !infected[neighbor] {
                        si_pairs += 1;
                    }
                }
            }

            samples.push(SisSample {
                time,
                susceptible: n - infected_count,
                infected: infected_count,
            });
        }

        SisTrace { samples }
    }
}

#[cfg(test)]
mod tests {
    use meshwork_core::NodeId;

    use super::*;

    fn node(id: u64) -> NodeId {
        NodeId::new(id)
    }

    /// 1 -- 2 -- 3 -- 4 as directed edges; node 1 carries the seed label.
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
        let config = SisConfig::default();
        assert!((config.recovery_rate - 0.1).abs() < f64::EPSILON);
        assert!((config.transmission_rate - 0.05).abs() < f64::EPSILON);
        assert!((config.t_max - 1000.0).abs() < f64::EPSILON);
        assert_eq!(config.seed_label, Label::L1);
        assert_eq!(config.rng_seed, 42);
    }

    #[test]
    fn config_builder() {
        let config = SisConfig::new()
            .with_recovery_rate(1.0)
            .with_transmission_rate(0.5)
            .with_t_max(10.0)
            .with_seed_label(Label::L3)
            .with_rng_seed(7);
        assert!((config.recovery_rate - 1.0).abs() < f64::EPSILON);
        assert!((config.transmission_rate - 0.5).abs() < f64::EPSILON);
        assert!((config.t_max - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.seed_label, Label::L3);
        assert_eq!(config.rng_seed, 7);
    }

    #[test]
    fn trace_starts_with_the_seeded_population() {
        let graph = seeded_path();
        let trace = SisSimulation::run(&graph, &SisConfig::default());
        assert_eq!(trace.samples[0], SisSample { time: 0.0, susceptible: 3, infected: 1 });
    }

    #[test]
    fn compartments_always_sum_to_population() {
        let graph = seeded_path();
        let trace = SisSimulation::run(&graph, &SisConfig::default());
        for sample in &trace.samples {
            assert_eq!(sample.susceptible + sample.infected, graph.node_count());
        }
    }

    #[test]
    fn event_times_are_increasing() {
        let graph = seeded_path();
        let trace = SisSimulation::run(&graph, &SisConfig::default());
        for pair in trace.samples.windows(2) {
            assert!(pair[1].time > pair[0].time);
        }
    }

    #[test]
    fn zero_transmission_only_recovers() {
        let graph = seeded_path();
        let config = SisConfig::new().with_transmission_rate(0.0).with_recovery_rate(1.0);
        let trace = SisSimulation::run(&graph, &config);
        // One recovery event: the single seeded node goes extinct.
        assert_eq!(trace.samples.len(), 2);
        assert_eq!(trace.samples[1].infected, 0);
    }

    #[test]
    fn seedless_label_is_immediately_extinct() {
        let graph = seeded_path();
        let config = SisConfig::new().with_seed_label(Label::L7);
        let trace = SisSimulation::run(&graph, &config);
        assert_eq!(trace.samples.len(), 1);
        assert_eq!(trace.samples[0].infected, 0);
    }

    #[test]
    fn same_seed_reproduces_the_trace() {
        let graph = seeded_path();
        let config = SisConfig::new().with_transmission_rate(0.4);
        let first = SisSimulation::run(&graph, &config);
        let second = SisSimulation::run(&graph, &config);
        assert_eq!(first, second);
    }
}
