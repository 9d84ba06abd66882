//! Module for the simulation components: the Hamiltonian model and the Monte-Carlo
//! sampler, see [`IsingHamiltonian`] and [`MetropolisSampler`].

pub mod hamiltonian;
pub mod monte_carlo;

pub use hamiltonian::*;
pub use monte_carlo::*;
