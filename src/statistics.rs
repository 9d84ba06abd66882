//! provide statistical tools
//!
//! The fluctuation observables used across the crate live here, together with small
//! mean/variance helpers and a rayon-parallel exact temperature scan.

use std::iter::Sum;
use std::ops::{Div, Mul, Sub};

use num_traits::Zero;
use rayon::prelude::*;

use super::config::SpinConfiguration;
use super::error::ObservableError;
use super::simulation::hamiltonian::{IsingHamiltonian, ThermodynamicAverages};
use super::Real;

/// Heat capacity from the fluctuation of the energy, `(⟨E²⟩ − ⟨E⟩²) / T²`.
pub fn heat_capacity(energy_mean: Real, energy_squared_mean: Real, temperature: Real) -> Real {
    (energy_squared_mean - energy_mean * energy_mean) / (temperature * temperature)
}

/// Magnetic susceptibility from the fluctuation of the magnetization,
/// `(⟨M²⟩ − ⟨M⟩²) / T`.
pub fn magnetic_susceptibility(
    magnetization_mean: Real,
    magnetization_squared_mean: Real,
    temperature: Real,
) -> Real {
    (magnetization_squared_mean - magnetization_mean * magnetization_mean) / temperature
}

/// compute the mean from a collection
/// # Example
/// ```
/// use ising_mc_rs::statistics::mean;
///
/// let vec = vec![1_f64, 2_f64, 3_f64, 4_f64];
/// assert_eq!(mean(&vec), 2.5_f64);
/// ```
pub fn mean<'a, T, IntoIter>(data: IntoIter) -> T
where
    T: Div<f64, Output = T> + Sum<&'a T> + 'a,
    IntoIter: IntoIterator<Item = &'a T>,
    IntoIter::IntoIter: ExactSizeIterator,
{
    let iter = data.into_iter();
    let len = iter.len() as f64;
    let sum: T = iter.sum();
    sum / len
}

/// compute the sample variance (squared of standard deviation) from a collection
/// # Example
/// ```
/// use ising_mc_rs::statistics::variance;
///
/// let vec = vec![0_f64, 1_f64, 0_f64, 1_f64];
/// assert_eq!(variance(&vec), 1_f64 / 3_f64);
/// ```
pub fn variance<'a, T, IntoIter>(data: IntoIter) -> T
where
    T: 'a
        + Clone
        + Zero
        + Div<f64, Output = T>
        + Mul<T, Output = T>
        + Sub<T, Output = T>
        + Sum<&'a T>,
    IntoIter: IntoIterator<Item = &'a T> + Clone,
    IntoIter::IntoIter: ExactSizeIterator,
{
    let [_, variance] = mean_and_variance(data);
    variance
}

/// Compute the mean and sample variance from a collection.
/// # Example
/// ```
/// use ising_mc_rs::statistics::mean_and_variance;
///
/// let vec = vec![0_f64, 1_f64, 0_f64, 1_f64];
/// assert_eq!(mean_and_variance(&vec), [0.5_f64, 1_f64 / 3_f64]);
/// ```
pub fn mean_and_variance<'a, T, IntoIter>(data: IntoIter) -> [T; 2]
where
    T: 'a
        + Clone
        + Zero
        + Div<f64, Output = T>
        + Mul<T, Output = T>
        + Sub<T, Output = T>
        + Sum<&'a T>,
    IntoIter: IntoIterator<Item = &'a T> + Clone,
    IntoIter::IntoIter: ExactSizeIterator,
{
    // often data is just a reference so cloning it is not a big deal
    let mean = mean(data.clone());
    let iter = data.into_iter();
    let len = iter.len();
    let variance = iter
        .map(|el| (el.clone() - mean.clone()) * (el.clone() - mean.clone()))
        .fold(T::zero(), |acc, el| acc + el)
        / (len - 1) as f64;
    [mean, variance]
}

/// Exact thermodynamic averages over a whole temperature grid, one enumeration per
/// temperature on the rayon thread pool.
///
/// Every temperature gets its own fresh scratch configuration, the enumerations are
/// fully independent. The result order matches `temperatures`. The exponential
/// per-temperature cost of [`IsingHamiltonian::compute_average_values`] applies to each
/// grid point.
///
/// # Errors
/// Cannot fail for a well-formed Hamiltonian, the scratch configurations are built with
/// the Hamiltonian's own site count. The [`Result`] mirrors
/// [`IsingHamiltonian::compute_average_values`].
///
/// # Example
/// ```
/// use ising_mc_rs::prelude::*;
/// use ising_mc_rs::statistics::exact_temperature_scan;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let couplings = vec![vec![(1_usize, 1_f64)], vec![(0_usize, 1_f64)]];
/// let hamiltonian = IsingHamiltonian::new(&couplings, RealVector::zeros(2))?;
/// let averages = exact_temperature_scan(&hamiltonian, &[0.5_f64, 1_f64, 2_f64])?;
/// assert_eq!(averages.len(), 3);
/// #     Ok(())
/// # }
/// ```
pub fn exact_temperature_scan(
    hamiltonian: &IsingHamiltonian,
    temperatures: &[Real],
) -> Result<Vec<ThermodynamicAverages>, ObservableError> {
    temperatures
        .par_iter()
        .map(|&temperature| {
            let mut configuration = SpinConfiguration::new_cold(hamiltonian.size());
            hamiltonian.compute_average_values(&mut configuration, temperature)
        })
        .collect()
}
