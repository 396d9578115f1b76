use crate::config::SimulationConfig;
use crate::lattice::Lattice;
use crate::metropolis::{candidates_per_step, Metropolis};
use rand::Rng;
use tracing::debug;

/// Energy and magnetization of the whole lattice after one recorded step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub energy: f64,
    pub magnetization: i64,
}

/// Samples of one temperature, produced on demand.
///
/// The first call to `next` runs every step before the analysis window
/// (burn-in plus any unrecorded steps after it). Each further call runs one
/// step and records the lattice. The stream ends after `num_analysis`
/// samples and cannot be restarted.
pub struct SampleStream<'a, R: Rng + ?Sized> {
    lattice: &'a mut Lattice,
    rng: &'a mut R,
    metropolis: Metropolis,
    candidates: u64,
    warmup: usize,
    remaining: usize,
    accepted: u64,
    proposed: u64,
}

/// Start the Markov chain for one temperature on `lattice`
pub fn run<'a, R: Rng + ?Sized>(
    lattice: &'a mut Lattice,
    config: &SimulationConfig,
    temperature: f64,
    rng: &'a mut R,
) -> SampleStream<'a, R> {
    let candidates = candidates_per_step(lattice.sites(), config.flip_prop) as u64;
    SampleStream {
        lattice,
        rng,
        candidates,
        metropolis: Metropolis::new(temperature, config.interaction(), config.flip_prop),
        warmup: config.num_warmup(),
        remaining: config.num_analysis,
        accepted: 0,
        proposed: 0,
    }
}

impl<'a, R: Rng + ?Sized> SampleStream<'a, R> {
    pub fn temperature(&self) -> f64 {
        self.metropolis.temperature
    }

    /// Fraction of proposed flips accepted so far
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }

    fn advance(&mut self) {
        let accepted = self.metropolis.step(&mut *self.lattice, &mut *self.rng);
        self.accepted += accepted as u64;
        self.proposed += self.candidates;
    }
}

impl<'a, R: Rng + ?Sized> Iterator for SampleStream<'a, R> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.remaining == 0 {
            return None;
        }

        if self.warmup > 0 {
            for _ in 0..self.warmup {
                self.advance();
            }
            debug!(
                "T = {:.4}: {} warm-up steps done, acceptance rate {:.4}",
                self.temperature(),
                self.warmup,
                self.acceptance_rate()
            );
            self.warmup = 0;
        }

        self.advance();
        self.remaining -= 1;

        Some(Sample {
            energy: self.lattice.total_energy(&self.metropolis.interaction),
            magnetization: self.lattice.total_magnetization(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, R: Rng + ?Sized> ExactSizeIterator for SampleStream<'a, R> {}
