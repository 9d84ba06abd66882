//! defines different error types.

use core::fmt::Display;
use std::error::Error;

/// Error while manipulating a [`SpinConfiguration`](crate::config::SpinConfiguration).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ConfigurationError {
    /// A bulk state assignment does not have the configuration's length.
    IncompatibleLength {
        /// Number of sites of the configuration.
        expected: usize,
        /// Length of the rejected assignment.
        found: usize,
    },
    /// More randomly placed up-spins were requested than there are sites.
    TooManyUpSpins {
        /// Number of up-spins requested.
        requested: usize,
        /// Number of sites available.
        sites: usize,
    },
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IncompatibleLength { expected, found } => write!(
                f,
                "configuration error: expected a state of length {}, got {}",
                expected, found
            ),
            Self::TooManyUpSpins { requested, sites } => write!(
                f,
                "configuration error: cannot place {} up-spins on {} sites",
                requested, sites
            ),
        }
    }
}

impl Error for ConfigurationError {}

/// Error while initialising an [`IsingHamiltonian`](crate::simulation::IsingHamiltonian).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HamiltonianInitializationError {
    /// The coupling structure's site count and the field vector's length disagree.
    IncompatibleSize {
        /// Number of sites of the coupling structure.
        couplings: usize,
        /// Length of the field vector.
        field: usize,
    },
    /// A coupling entry points at a site outside the system.
    NeighborOutOfRange {
        /// Site owning the offending entry.
        site: usize,
        /// The out-of-range neighbor index.
        neighbor: usize,
    },
    /// A coupling entry has no matching reverse entry of equal strength.
    AsymmetricCoupling {
        /// Site owning the one-sided entry.
        site: usize,
        /// Neighbor missing the reverse entry.
        neighbor: usize,
    },
}

impl Display for HamiltonianInitializationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IncompatibleSize { couplings, field } => write!(
                f,
                "hamiltonian initialization error: {} coupling sites but a field of length {}",
                couplings, field
            ),
            Self::NeighborOutOfRange { site, neighbor } => write!(
                f,
                "hamiltonian initialization error: site {} couples to out-of-range site {}",
                site, neighbor
            ),
            Self::AsymmetricCoupling { site, neighbor } => write!(
                f,
                "hamiltonian initialization error: coupling ({}, {}) has no symmetric counterpart",
                site, neighbor
            ),
        }
    }
}

impl Error for HamiltonianInitializationError {}

/// Error while computing an observable of a configuration.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ObservableError {
    /// The configuration's length does not match the Hamiltonian's site count.
    IncompatibleSize {
        /// Number of sites of the Hamiltonian.
        hamiltonian: usize,
        /// Length of the rejected configuration.
        configuration: usize,
    },
}

impl Display for ObservableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IncompatibleSize {
                hamiltonian,
                configuration,
            } => write!(
                f,
                "observable error: hamiltonian of {} sites, configuration of length {}",
                hamiltonian, configuration
            ),
        }
    }
}

impl Error for ObservableError {}
