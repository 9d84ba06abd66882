//! Ising Hamiltonian model, see [`IsingHamiltonian`].

use approx::{abs_diff_eq, AbsDiffEq};
use rand_distr::{Distribution, Uniform};
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use super::super::config::SpinConfiguration;
use super::super::error::{HamiltonianInitializationError, ObservableError};
use super::super::{statistics, Real, RealVector};

/// Exact thermodynamic averages of a system at a fixed temperature.
///
/// Produced by [`IsingHamiltonian::compute_average_values`]. The fluctuation observables
/// follow the usual definitions, heat capacity `(⟨E²⟩ − ⟨E⟩²) / T²` and magnetic
/// susceptibility `(⟨M²⟩ − ⟨M⟩²) / T`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ThermodynamicAverages {
    /// Mean energy `⟨E⟩`.
    pub energy: Real,
    /// Mean magnetization `⟨M⟩`.
    pub magnetization: Real,
    /// Heat capacity.
    pub heat_capacity: Real,
    /// Magnetic susceptibility.
    pub magnetic_susceptibility: Real,
}

impl AbsDiffEq for ThermodynamicAverages {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Real::abs_diff_eq(&self.energy, &other.energy, epsilon)
            && Real::abs_diff_eq(&self.magnetization, &other.magnetization, epsilon)
            && Real::abs_diff_eq(&self.heat_capacity, &other.heat_capacity, epsilon)
            && Real::abs_diff_eq(
                &self.magnetic_susceptibility,
                &other.magnetic_susceptibility,
                epsilon,
            )
    }
}

/// Classical Ising Hamiltonian on an arbitrary interaction graph.
///
/// Holds a sparse pairwise coupling structure and one external-field coefficient per
/// site. The coupling topology is fixed at construction, only the field vector may be
/// reassigned afterwards, see [`Self::set_field`].
///
/// The coupling structure is expected to be stored symmetrically: whenever site `i`
/// lists `(j, strength)`, site `j` must list `(i, strength)`. [`Self::energy`] and
/// [`Self::delta_e_for_flip`] are only consistent with each other under that
/// precondition. [`Self::new`] does not verify it, [`Self::new_symmetric`] does.
///
/// # Example
/// ```
/// use ising_mc_rs::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // A ferromagnetic ring of 8 spins in a field of 0.1 per site.
/// let sites = 8;
/// let couplings: Vec<Vec<(usize, Real)>> = (0..sites)
///     .map(|i| vec![((i + 1) % sites, 1_f64), ((i + sites - 1) % sites, 1_f64)])
///     .collect();
/// let hamiltonian =
///     IsingHamiltonian::new_symmetric(&couplings, RealVector::from_element(sites, 0.1_f64))?;
///
/// let mut configuration = SpinConfiguration::new_cold(sites);
/// configuration.set_from_integer(106);
/// assert!((hamiltonian.energy(&configuration)? - -4_f64).abs() < 1e-12_f64);
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct IsingHamiltonian {
    neighbors: Vec<Vec<usize>>,
    strengths: Vec<Vec<Real>>,
    field: RealVector,
}

impl IsingHamiltonian {
    getter!(
        /// Get a ref to the external-field coefficient vector.
        pub const,
        field,
        RealVector
    );

    /// Build a Hamiltonian from a per-site list of `(neighbor, strength)` pairs and a
    /// field vector of matching length.
    ///
    /// The per-site neighbor-index and neighbor-strength arrays are derived here once,
    /// energy deltas then iterate them without touching the input representation again.
    ///
    /// Symmetric coupling storage is a precondition, not a checked property, use
    /// [`Self::new_symmetric`] to verify it.
    ///
    /// # Errors
    /// - [`HamiltonianInitializationError::IncompatibleSize`] if the coupling structure
    ///   and the field vector disagree on the site count.
    /// - [`HamiltonianInitializationError::NeighborOutOfRange`] if an entry couples to a
    ///   site outside the system.
    pub fn new(
        couplings: &[Vec<(usize, Real)>],
        field: RealVector,
    ) -> Result<Self, HamiltonianInitializationError> {
        if couplings.len() != field.len() {
            return Err(HamiltonianInitializationError::IncompatibleSize {
                couplings: couplings.len(),
                field: field.len(),
            });
        }
        let sites = couplings.len();
        let mut neighbors = Vec::with_capacity(sites);
        let mut strengths = Vec::with_capacity(sites);
        for (site, entries) in couplings.iter().enumerate() {
            let mut neighbor_row = Vec::with_capacity(entries.len());
            let mut strength_row = Vec::with_capacity(entries.len());
            for &(neighbor, strength) in entries {
                if neighbor >= sites {
                    return Err(HamiltonianInitializationError::NeighborOutOfRange {
                        site,
                        neighbor,
                    });
                }
                neighbor_row.push(neighbor);
                strength_row.push(strength);
            }
            neighbors.push(neighbor_row);
            strengths.push(strength_row);
        }
        Ok(Self {
            neighbors,
            strengths,
            field,
        })
    }

    /// Like [`Self::new`] but additionally verifies that every stored coupling has a
    /// reverse entry of equal strength.
    ///
    /// # Errors
    /// The errors of [`Self::new`], plus
    /// [`HamiltonianInitializationError::AsymmetricCoupling`] naming the first one-sided
    /// pair found.
    pub fn new_symmetric(
        couplings: &[Vec<(usize, Real)>],
        field: RealVector,
    ) -> Result<Self, HamiltonianInitializationError> {
        let hamiltonian = Self::new(couplings, field)?;
        hamiltonian.check_symmetry()?;
        Ok(hamiltonian)
    }

    /// Number of sites.
    pub fn size(&self) -> usize {
        self.field.len()
    }

    /// Replace the external-field coefficient vector, the only mutation allowed after
    /// construction.
    ///
    /// # Errors
    /// [`HamiltonianInitializationError::IncompatibleSize`] if the new vector's length
    /// differs from the site count.
    pub fn set_field(&mut self, field: RealVector) -> Result<(), HamiltonianInitializationError> {
        if field.len() != self.field.len() {
            return Err(HamiltonianInitializationError::IncompatibleSize {
                couplings: self.neighbors.len(),
                field: field.len(),
            });
        }
        self.field = field;
        Ok(())
    }

    fn check_symmetry(&self) -> Result<(), HamiltonianInitializationError> {
        for site in 0..self.size() {
            for (&neighbor, &strength) in self.neighbors[site].iter().zip(&self.strengths[site]) {
                let mirrored = self.neighbors[neighbor]
                    .iter()
                    .zip(&self.strengths[neighbor])
                    .any(|(&back, &back_strength)| {
                        back == site && abs_diff_eq!(strength, back_strength)
                    });
                if !mirrored {
                    return Err(HamiltonianInitializationError::AsymmetricCoupling {
                        site,
                        neighbor,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_dimension(&self, configuration: &SpinConfiguration) -> Result<(), ObservableError> {
        if configuration.len() == self.size() {
            Ok(())
        }
        else {
            Err(ObservableError::IncompatibleSize {
                hamiltonian: self.size(),
                configuration: configuration.len(),
            })
        }
    }

    /// Total energy of a configuration.
    ///
    /// Each unique coupling pair contributes `+strength` when the two spins are equal
    /// and `−strength` otherwise, each site contributes `field · spin`. Stored pairs
    /// with neighbor index below the owning site are skipped, the symmetric reverse
    /// entry accounts for them.
    ///
    /// # Errors
    /// [`ObservableError::IncompatibleSize`] if the configuration's length differs from
    /// the site count.
    pub fn energy(&self, configuration: &SpinConfiguration) -> Result<Real, ObservableError> {
        self.check_dimension(configuration)?;
        Ok(self.energy_unchecked(configuration))
    }

    fn energy_unchecked(&self, configuration: &SpinConfiguration) -> Real {
        let mut energy = 0_f64;
        for site in 0..self.size() {
            for (&neighbor, &strength) in self.neighbors[site].iter().zip(&self.strengths[site]) {
                if neighbor < site {
                    continue;
                }
                if configuration.get(site) == configuration.get(neighbor) {
                    energy += strength;
                }
                else {
                    energy -= strength;
                }
            }
            energy += self.field[site] * configuration.spin(site);
        }
        energy
    }

    /// Energy change from flipping the spin at `site`, without mutating the
    /// configuration or recomputing the full sum.
    ///
    /// Every stored neighbor of `site` enters the local sum here, there is no ordering
    /// filter, this is a single-site contribution, not a global double-counted one. For
    /// symmetric coupling storage this is exactly
    /// `energy(flipped) − energy(configuration)`.
    ///
    /// # Panics
    /// Panics if `site` is out of range or the configuration is shorter than the system.
    pub fn delta_e_for_flip(&self, site: usize, configuration: &SpinConfiguration) -> Real {
        let delta_spin = if configuration.get(site) {
            -2_f64
        }
        else {
            2_f64
        };
        let mut neighbor_sum = 0_f64;
        for (&neighbor, &strength) in self.neighbors[site].iter().zip(&self.strengths[site]) {
            neighbor_sum += configuration.spin(neighbor) * strength;
        }
        (neighbor_sum + self.field[site]) * delta_spin
    }

    /// One Metropolis sweep: visit every site once in index order, flipping each with
    /// the Metropolis acceptance rule at the given temperature.
    ///
    /// A flip with non-positive energy delta is accepted unconditionally without
    /// consulting the generator. A flip with positive delta is accepted iff a uniform
    /// draw in `[0, 1)` does not exceed `exp(−ΔE / T)`. Accepted flips are applied
    /// immediately, later sites in the same sweep see the updated spins.
    ///
    /// Returns the number of accepted flips.
    ///
    /// A non-positive or non-finite temperature is not rejected, the acceptance
    /// threshold then degenerates (to 0 or 1) instead of erroring.
    ///
    /// # Errors
    /// [`ObservableError::IncompatibleSize`] if the configuration's length differs from
    /// the site count.
    pub fn metropolis_sweep<R>(
        &self,
        configuration: &mut SpinConfiguration,
        temperature: Real,
        rng: &mut R,
    ) -> Result<usize, ObservableError>
    where
        R: rand::Rng + ?Sized,
    {
        self.check_dimension(configuration)?;
        let uniform = Uniform::new(0_f64, 1_f64);
        let mut accepted = 0_usize;
        for site in 0..self.size() {
            let delta_e = self.delta_e_for_flip(site, configuration);
            if delta_e > 0_f64 && uniform.sample(rng) > (-delta_e / temperature).exp() {
                continue;
            }
            configuration.flip_site(site);
            accepted += 1;
        }
        Ok(accepted)
    }

    /// Exact thermodynamic averages by brute-force enumeration of all `2^N`
    /// configurations, Boltzmann-weighted at the given temperature.
    ///
    /// This is exponential in the number of sites and intended as a validation oracle
    /// for small systems (roughly `N <= 24`). The passed configuration is used as the
    /// enumeration scratch state and is left set to the last enumerated index, snapshot
    /// it beforehand if the original state matters.
    ///
    /// # Errors
    /// [`ObservableError::IncompatibleSize`] if the configuration's length differs from
    /// the site count.
    pub fn compute_average_values(
        &self,
        configuration: &mut SpinConfiguration,
        temperature: Real,
    ) -> Result<ThermodynamicAverages, ObservableError> {
        self.check_dimension(configuration)?;
        let mut partition = 0_f64;
        let mut energy_sum = 0_f64;
        let mut energy_squared_sum = 0_f64;
        let mut magnetization_sum = 0_f64;
        let mut magnetization_squared_sum = 0_f64;
        for index in 0..configuration.number_of_states() {
            configuration.set_from_integer(index);
            let energy = self.energy_unchecked(configuration);
            let magnetization = configuration.magnetization();
            let weight = (-energy / temperature).exp();
            partition += weight;
            energy_sum += energy * weight;
            energy_squared_sum += energy * energy * weight;
            magnetization_sum += magnetization * weight;
            magnetization_squared_sum += magnetization * magnetization * weight;
        }
        let energy = energy_sum / partition;
        let magnetization = magnetization_sum / partition;
        Ok(ThermodynamicAverages {
            energy,
            magnetization,
            heat_capacity: statistics::heat_capacity(
                energy,
                energy_squared_sum / partition,
                temperature,
            ),
            magnetic_susceptibility: statistics::magnetic_susceptibility(
                magnetization,
                magnetization_squared_sum / partition,
                temperature,
            ),
        })
    }
}
