//! reexport for easy use,
//! `use ising_mc_rs::prelude::*`

pub use super::config::SpinConfiguration;
pub use super::error::{ConfigurationError, HamiltonianInitializationError, ObservableError};
pub use super::simulation::{
    IsingHamiltonian, MetropolisSampler, SampleSeries, ThermodynamicAverages,
};
pub use super::{Real, RealVector};
