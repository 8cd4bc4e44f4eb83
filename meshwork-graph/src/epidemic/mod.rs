//! Epidemic-spread simulations over the contact network.
//!
//! The directed graph is projected to an undirected contact network
//! and the nodes carrying a configured seed label start infected.
//! Two compartmental models are provided:
//!
//! - [`SisSimulation`] - susceptible/infected with reinfection,
//!   continuous-time event-driven Markov chain
//! - [`SirSimulation`] - susceptible/infected/recovered with terminal
//!   recovery, discrete synchronous steps
//!
//! Both produce irregular-time event traces; [`SisTrace::downsample`]
//! and [`SirTrace::downsample`] reduce them to a fixed minimum cadence
//! ([`MIN_SAMPLE_GAP`]) for charting. The simulations are stochastic:
//! fix the `rng_seed` on the config to reproduce a trace, or vary it
//! to draw a fresh sample.

mod sir;
mod sis;

pub use sir::{SirConfig, SirSample, SirSimulation, SirTrace};
pub use sis::{SisConfig, SisSample, SisSimulation, SisTrace};

/// Minimum time gap between samples retained by trace downsampling.
pub const MIN_SAMPLE_GAP: f64 = 50.0;

/// Keep the first sample, then only samples at least `min_gap` after
/// the last retained one.
pub(crate) fn downsample_by_time<S: Copy>(
    samples: &[S],
    min_gap: f64,
    time: impl Fn(&S) -> f64,
) -> Vec<S> {
    let mut kept = Vec::new();
    let mut last = f64::NEG_INFINITY;
    for sample in samples {
        let t = time(sample);
        if kept.is_empty() || t - last >= min_gap {
            kept.push(*sample);
            last = t;
        }
    }
    kept
}
