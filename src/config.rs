//! Spin configuration container, see [`SpinConfiguration`].

use core::fmt::Display;

use bitvec::order::Msb0;
use bitvec::slice::BitSlice;
use bitvec::vec::BitVec;
use bitvec::view::BitView;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use super::error::ConfigurationError;
use super::Real;

/// An ordered fixed-length sequence of binary spin values.
///
/// Each site holds 0 (spin down, value −1) or 1 (spin up, value +1). The length is fixed
/// at construction, the state is mutated in place by flips and bulk assignments. Cloning
/// is the way to snapshot a state before handing it to a mutating operation.
///
/// # Example
/// ```
/// use ising_mc_rs::config::SpinConfiguration;
///
/// let mut configuration = SpinConfiguration::new_cold(4);
/// configuration.flip_site(2);
/// assert_eq!(configuration.to_string(), "0010");
/// assert_eq!(configuration.magnetization(), -2_f64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SpinConfiguration {
    state: BitVec<usize, Msb0>,
}

impl SpinConfiguration {
    /// Create a configuration with every spin down.
    pub fn new_cold(sites: usize) -> Self {
        Self {
            state: BitVec::repeat(false, sites),
        }
    }

    /// Create a configuration with exactly `up_spins` ones placed at distinct random
    /// sites.
    ///
    /// # Errors
    /// [`ConfigurationError::TooManyUpSpins`] if `up_spins` exceeds `sites`.
    pub fn new_random<R>(
        sites: usize,
        up_spins: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError>
    where
        R: rand::Rng + ?Sized,
    {
        let mut configuration = Self::new_cold(sites);
        configuration.randomize(up_spins, rng)?;
        Ok(configuration)
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether the configuration has no site.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Total number of distinct configurations of this length, `2^N`.
    ///
    /// Only meaningful for small systems; enumerating the configuration space is
    /// exponential and practical only for roughly `N <= 24`.
    pub fn number_of_states(&self) -> usize {
        debug_assert!(
            self.state.len() < usize::BITS as usize,
            "configuration space size overflows usize"
        );
        1_usize << self.state.len()
    }

    /// Binary value of the site at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> bool {
        self.state[index]
    }

    /// Spin value of the site at `index`, mapping {0, 1} to {−1, +1}.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn spin(&self, index: usize) -> Real {
        if self.state[index] {
            1_f64
        }
        else {
            -1_f64
        }
    }

    /// Flip the spin at `index` in place.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn flip_site(&mut self, index: usize) {
        let value = self.state[index];
        self.state.set(index, !value);
    }

    /// Set the state to the big-endian binary representation of `index`, zero-padded to
    /// the configuration's length. Site 0 receives the most significant bit.
    ///
    /// # Example
    /// ```
    /// use ising_mc_rs::config::SpinConfiguration;
    ///
    /// let mut configuration = SpinConfiguration::new_cold(8);
    /// configuration.set_from_integer(106);
    /// assert_eq!(configuration.to_string(), "01101010");
    /// ```
    ///
    /// # Panics
    /// Panics if the configuration is longer than [`usize::BITS`], `index` cannot
    /// address such a space.
    pub fn set_from_integer(&mut self, index: usize) {
        let bits = index.view_bits::<Msb0>();
        let length = self.state.len();
        self.state.copy_from_bitslice(&bits[bits.len() - length..]);
    }

    /// Assign the whole state from a bit slice of matching length.
    ///
    /// # Errors
    /// [`ConfigurationError::IncompatibleLength`] if `state` does not have exactly one
    /// bit per site.
    pub fn set_state(&mut self, state: &BitSlice<usize, Msb0>) -> Result<(), ConfigurationError> {
        if state.len() != self.state.len() {
            return Err(ConfigurationError::IncompatibleLength {
                expected: self.state.len(),
                found: state.len(),
            });
        }
        self.state.copy_from_bitslice(state);
        Ok(())
    }

    /// Reset every spin down, then place exactly `up_spins` ones at distinct sites drawn
    /// uniformly from `rng`.
    ///
    /// # Errors
    /// [`ConfigurationError::TooManyUpSpins`] if `up_spins` exceeds the number of sites,
    /// the request is rejected rather than clamped.
    pub fn randomize<R>(&mut self, up_spins: usize, rng: &mut R) -> Result<(), ConfigurationError>
    where
        R: rand::Rng + ?Sized,
    {
        if up_spins > self.state.len() {
            return Err(ConfigurationError::TooManyUpSpins {
                requested: up_spins,
                sites: self.state.len(),
            });
        }
        self.state.fill(false);
        for site in rand::seq::index::sample(rng, self.state.len(), up_spins) {
            self.state.set(site, true);
        }
        Ok(())
    }

    /// Signed magnetization, the sum of `2 * value − 1` over all sites.
    pub fn magnetization(&self) -> Real {
        2_f64 * self.state.count_ones() as Real - self.state.len() as Real
    }
}

impl Display for SpinConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for bit in &self.state {
            write!(f, "{}", u8::from(*bit))?;
        }
        Ok(())
    }
}
