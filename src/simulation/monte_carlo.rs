//! Metropolis Monte-Carlo sampler, see [`MetropolisSampler`].

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use super::super::config::SpinConfiguration;
use super::super::error::ObservableError;
use super::super::{statistics, Real};
use super::hamiltonian::IsingHamiltonian;

/// Running-mean series accumulated over a sampling window.
///
/// Four equal-length series, one entry per recorded sample: the running means of the
/// energy, the magnetization and their squares. Entry `k` is the mean over the first
/// `k + 1` samples, so the last entry of each series is the converged estimate and the
/// whole series shows how the run converged.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SampleSeries {
    energy: Vec<Real>,
    magnetization: Vec<Real>,
    energy_squared: Vec<Real>,
    magnetization_squared: Vec<Real>,
}

impl SampleSeries {
    fn with_capacity(samples: usize) -> Self {
        Self {
            energy: Vec::with_capacity(samples),
            magnetization: Vec::with_capacity(samples),
            energy_squared: Vec::with_capacity(samples),
            magnetization_squared: Vec::with_capacity(samples),
        }
    }

    /// Record the first sample directly, no averaging involved.
    fn push_first(&mut self, energy: Real, magnetization: Real) {
        self.energy.push(energy);
        self.magnetization.push(magnetization);
        self.energy_squared.push(energy * energy);
        self.magnetization_squared.push(magnetization * magnetization);
    }

    /// Fold sample `sample_index` (zero-based) into the four running means.
    fn accumulate(&mut self, sample_index: usize, energy: Real, magnetization: Real) {
        let count = (sample_index + 1) as Real;
        let update = |series: &mut Vec<Real>, sample: Real| {
            let previous = series[sample_index - 1];
            series.push(previous + (sample - previous) / count);
        };
        update(&mut self.energy, energy);
        update(&mut self.magnetization, magnetization);
        update(&mut self.energy_squared, energy * energy);
        update(&mut self.magnetization_squared, magnetization * magnetization);
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.energy.len()
    }

    /// Whether no sample was recorded.
    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    /// Running mean of the energy.
    pub fn energy(&self) -> &[Real] {
        &self.energy
    }

    /// Running mean of the magnetization.
    pub fn magnetization(&self) -> &[Real] {
        &self.magnetization
    }

    /// Running mean of the squared energy.
    pub fn energy_squared(&self) -> &[Real] {
        &self.energy_squared
    }

    /// Running mean of the squared magnetization.
    pub fn magnetization_squared(&self) -> &[Real] {
        &self.magnetization_squared
    }

    /// Final mean energy, [`None`] on an empty series.
    pub fn final_energy(&self) -> Option<Real> {
        self.energy.last().copied()
    }

    /// Final mean magnetization, [`None`] on an empty series.
    pub fn final_magnetization(&self) -> Option<Real> {
        self.magnetization.last().copied()
    }

    /// Heat capacity `(⟨E²⟩ − ⟨E⟩²) / T²` derived from the final running means,
    /// [`None`] on an empty series.
    pub fn heat_capacity(&self, temperature: Real) -> Option<Real> {
        Some(statistics::heat_capacity(
            *self.energy.last()?,
            *self.energy_squared.last()?,
            temperature,
        ))
    }

    /// Magnetic susceptibility `(⟨M²⟩ − ⟨M⟩²) / T` derived from the final running
    /// means, [`None`] on an empty series.
    pub fn susceptibility(&self, temperature: Real) -> Option<Real> {
        Some(statistics::magnetic_susceptibility(
            *self.magnetization.last()?,
            *self.magnetization_squared.last()?,
            temperature,
        ))
    }
}

/// Metropolis Markov-chain Monte-Carlo sampler.
///
/// Drives repeated [`IsingHamiltonian::metropolis_sweep`] calls over a configuration,
/// discards a thermalization prefix and accumulates running statistics over the
/// sampling window. The sampler owns its random number generator, seed it before
/// construction for a reproducible run.
///
/// # Example
/// ```
/// use ising_mc_rs::prelude::*;
/// use rand::SeedableRng;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let couplings = vec![vec![(1_usize, -1_f64)], vec![(0_usize, -1_f64)]];
/// let hamiltonian = IsingHamiltonian::new(&couplings, RealVector::zeros(2))?;
/// let mut configuration = SpinConfiguration::new_cold(2);
///
/// let rng = rand::rngs::StdRng::seed_from_u64(0); // change with your seed
/// let mut sampler = MetropolisSampler::new(100, 10, rng).ok_or("need at least one sweep")?;
/// let series = sampler.run(&hamiltonian, &mut configuration, 1_f64)?;
/// assert_eq!(series.len(), 100);
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MetropolisSampler<Rng: rand::Rng> {
    n_sweeps: usize,
    n_burn: usize,
    rng: Rng,
}

impl<Rng: rand::Rng> MetropolisSampler<Rng> {
    getter!(
        /// Get a ref to the rng.
        pub const,
        rng,
        Rng
    );

    getter_copy!(
        /// Number of recorded sweeps per run.
        pub const,
        n_sweeps,
        usize
    );

    getter_copy!(
        /// Number of discarded thermalization sweeps per run.
        pub const,
        n_burn,
        usize
    );

    /// `n_sweeps` is the number of recorded samples and should be greater than 0,
    /// `n_burn` is the number of thermalization sweeps discarded beforehand.
    pub fn new(n_sweeps: usize, n_burn: usize, rng: Rng) -> Option<Self> {
        if n_sweeps == 0 {
            return None;
        }
        Some(Self {
            n_sweeps,
            n_burn,
            rng,
        })
    }

    /// Get the rng, consuming the sampler.
    #[allow(clippy::missing_const_for_fn)] // false positive
    pub fn rng_owned(self) -> Rng {
        self.rng
    }

    /// Get a mutable reference to the rng.
    pub fn rng_mut(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// Run the chain: `n_burn` discarded sweeps, then `n_sweeps` recorded samples.
    ///
    /// Sample 0 is read directly from the post-burn-in configuration, no sweep happens
    /// before it. Every further sample performs exactly one sweep, then folds the
    /// observed energy and magnetization (and their squares) into the running means,
    /// `new = old + (sample − old) / (k + 1)` for zero-based sample index `k`.
    ///
    /// The configuration is mutated in place and holds the chain's final state when the
    /// run returns. Heat capacity and susceptibility are not computed here, derive them
    /// from the returned series, see [`SampleSeries::heat_capacity`] and
    /// [`SampleSeries::susceptibility`].
    ///
    /// # Errors
    /// [`ObservableError::IncompatibleSize`] if the configuration's length differs from
    /// the Hamiltonian's site count.
    pub fn run(
        &mut self,
        hamiltonian: &IsingHamiltonian,
        configuration: &mut SpinConfiguration,
        temperature: Real,
    ) -> Result<SampleSeries, ObservableError> {
        // thermalization
        for _ in 0..self.n_burn {
            hamiltonian.metropolis_sweep(configuration, temperature, &mut self.rng)?;
        }

        // accumulation
        let mut series = SampleSeries::with_capacity(self.n_sweeps);
        let energy = hamiltonian.energy(configuration)?;
        series.push_first(energy, configuration.magnetization());

        for sample_index in 1..self.n_sweeps {
            hamiltonian.metropolis_sweep(configuration, temperature, &mut self.rng)?;
            let energy = hamiltonian.energy(configuration)?;
            series.accumulate(sample_index, energy, configuration.magnetization());
        }
        Ok(series)
    }
}

impl<Rng: rand::Rng> AsRef<Rng> for MetropolisSampler<Rng> {
    fn as_ref(&self) -> &Rng {
        self.rng()
    }
}

impl<Rng: rand::Rng> AsMut<Rng> for MetropolisSampler<Rng> {
    fn as_mut(&mut self) -> &mut Rng {
        self.rng_mut()
    }
}
