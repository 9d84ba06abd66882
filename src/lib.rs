//! Classical Ising model simulation and tools.
//!
//! This library simulates a classical Ising spin model on an arbitrary interaction graph
//! and estimates its thermodynamic observables (energy, magnetization, heat capacity,
//! magnetic susceptibility). Two methods are provided: brute-force enumeration over every
//! spin configuration, usable as an exact oracle for small systems, and Metropolis
//! Markov-chain Monte Carlo sampling for larger ones.
//!
//! **Features**:
//! - Arbitrary sparse coupling graphs, not just regular lattices;
//! - Per-site external field coefficients;
//! - Exact averages by partition-function summation;
//! - Metropolis sampling with running-mean accumulation;
//! - Injectable random number generators for reproducible runs;
//! - Serde support.
//!
//! ## Usage
//!
//! Estimate the mean energy of a ferromagnetic ring of 8 spins in a small external field:
//!
//! ```
//! use ising_mc_rs::prelude::*;
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sites = 8;
//! let couplings: Vec<Vec<(usize, Real)>> = (0..sites)
//!     .map(|i| vec![((i + 1) % sites, 1_f64), ((i + sites - 1) % sites, 1_f64)])
//!     .collect();
//! let field = RealVector::from_element(sites, 0.1_f64);
//! let hamiltonian = IsingHamiltonian::new(&couplings, field)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0); // change with your seed
//! let mut configuration = SpinConfiguration::new_random(sites, 4, &mut rng)?;
//! let mut sampler =
//!     MetropolisSampler::new(1_000, 100, rng).ok_or("need at least one sweep")?;
//!
//! let series = sampler.run(&hamiltonian, &mut configuration, 2_f64)?;
//! let energy = series.final_energy().ok_or("empty series")?;
//! let heat_capacity = series.heat_capacity(2_f64).ok_or("empty series")?;
//! # let _ = (energy, heat_capacity);
//! #     Ok(())
//! # }
//! ```
//!
//! For a system this small the sampled averages can be checked against the exact
//! enumeration:
//!
//! ```
//! use ising_mc_rs::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sites = 6;
//! let couplings: Vec<Vec<(usize, Real)>> = (0..sites)
//!     .map(|i| vec![((i + 1) % sites, 2_f64), ((i + sites - 1) % sites, 2_f64)])
//!     .collect();
//! let hamiltonian =
//!     IsingHamiltonian::new(&couplings, RealVector::from_element(sites, 1.1_f64))?;
//! let mut configuration = SpinConfiguration::new_cold(sites);
//!
//! let averages = hamiltonian.compute_average_values(&mut configuration, 1_f64)?;
//! assert!((averages.energy - -11.904_320_15_f64).abs() < 1e-6_f64);
//! #     Ok(())
//! # }
//! ```
//!
//! The enumeration cost is `2^N`; keep it for validation of small systems (roughly
//! `N <= 24`) and use [`MetropolisSampler`](simulation::MetropolisSampler) beyond that.
//!
//! ## Discussion about Random Number Generators (RNGs)
//!
//! This library uses the trait [`rand::Rng`] any time it needs a random number and never
//! owns a process-wide generator. The choice of RNG is up to the user of the library,
//! seeding it is what makes a run reproducible.
//!
//! Some of the possible choices:
//! - **Recommended** [`rand_xoshiro::Xoshiro256PlusPlus`](https://docs.rs/rand_xoshiro/0.6.0/rand_xoshiro/struct.Xoshiro256PlusPlus.html)
//!   non-cryptographic, good performance and statistical quality, reproducible.
//! - [`rand::rngs::StdRng`](https://docs.rs/rand/0.8.5/rand/rngs/struct.StdRng.html)
//!   cryptographically secure, can be seeded. Deterministic but not portable between
//!   platforms. It is however slow.
//! - [`rand::rngs::ThreadRng`](https://docs.rs/rand/0.8.5/rand/rngs/struct.ThreadRng.html)
//!   a CSPRNG. The data is not reproducible and it is reseeded often.

#![warn(clippy::cast_sign_loss)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::cast_possible_wrap)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::cognitive_complexity)]
#![warn(clippy::float_cmp_const)]
#![warn(clippy::implicit_hasher)]
#![warn(clippy::implicit_saturating_sub)]
#![warn(clippy::imprecise_flops)]
#![warn(clippy::large_types_passed_by_value)]
#![warn(clippy::macro_use_imports)]
#![warn(clippy::manual_ok_or)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::non_ascii_literal)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::todo)]
#![warn(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::unreadable_literal)]
#![warn(clippy::unseparated_literal_suffix)]
#![warn(clippy::unused_self)]
#![warn(clippy::missing_errors_doc)]
#![warn(missing_docs)]

pub use rand::{Rng, SeedableRng};
pub use rand_distr::Distribution;

#[macro_use]
mod macro_def;
pub mod config;
pub mod error;
pub mod prelude;
pub mod simulation;
pub mod statistics;

#[cfg(test)]
mod test;

/// alias for [`f64`]
pub type Real = f64;
/// alias for [`nalgebra::DVector::<Real>`], used for the external field coefficients.
pub type RealVector = nalgebra::DVector<Real>;
