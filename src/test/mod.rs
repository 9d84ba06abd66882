//! Module for tests

use std::error::Error;

use approx::assert_abs_diff_eq;
use bitvec::order::Msb0;
use bitvec::prelude::bitvec;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::SpinConfiguration;
use super::simulation::{IsingHamiltonian, MetropolisSampler};
use super::statistics::exact_temperature_scan;
use super::{Real, RealVector};

const SEED_RNG: u64 = 0x45_78_93_f4_4a_b0_67_f0;

/// Couplings of a 1D ring with a single strength, both directions stored.
fn ring_couplings(sites: usize, strength: Real) -> Vec<Vec<(usize, Real)>> {
    (0..sites)
        .map(|i| {
            vec![
                ((i + 1) % sites, strength),
                ((i + sites - 1) % sites, strength),
            ]
        })
        .collect()
}

fn ring_hamiltonian(sites: usize, strength: Real, field: Real) -> IsingHamiltonian {
    IsingHamiltonian::new_symmetric(
        &ring_couplings(sites, strength),
        RealVector::from_element(sites, field),
    )
    .expect("valid ring")
}

/// Store an undirected edge in both per-site lists.
fn add_edge(couplings: &mut [Vec<(usize, Real)>], a: usize, b: usize, strength: Real) {
    couplings[a].push((b, strength));
    couplings[b].push((a, strength));
}

#[test]
/// energies of two hand-checked configurations on a ring of 8 sites
fn ring_boundary_energies() -> Result<(), Box<dyn Error>> {
    let hamiltonian = ring_hamiltonian(8, 1_f64, 0.1_f64);
    let mut configuration = SpinConfiguration::new_cold(8);

    configuration.set_state(&bitvec![usize, Msb0; 0, 0, 0, 0, 0, 0, 1, 1])?;
    assert_abs_diff_eq!(hamiltonian.energy(&configuration)?, 3.6_f64, epsilon = 1e-12_f64);

    configuration.set_from_integer(106);
    assert_abs_diff_eq!(hamiltonian.energy(&configuration)?, -4_f64, epsilon = 1e-12_f64);
    Ok(())
}

#[test]
/// exact averages of a ring of 6 sites against reference values
fn partition_function_averages() -> Result<(), Box<dyn Error>> {
    let hamiltonian = ring_hamiltonian(6, 2_f64, 1.1_f64);
    let mut configuration = SpinConfiguration::new_cold(6);

    let averages = hamiltonian.compute_average_values(&mut configuration, 1_f64)?;
    assert_abs_diff_eq!(averages.energy, -11.904_320_15_f64, epsilon = 1e-6_f64);
    assert_abs_diff_eq!(averages.magnetization, -0.026_608_20_f64, epsilon = 1e-6_f64);
    assert_abs_diff_eq!(averages.heat_capacity, 0.590_269_94_f64, epsilon = 1e-6_f64);
    assert_abs_diff_eq!(
        averages.magnetic_susceptibility,
        0.054_042_95_f64,
        epsilon = 1e-6_f64
    );

    // the enumeration leaves the scratch configuration at the last index
    assert_eq!(configuration.to_string(), "111111");
    Ok(())
}

#[test]
/// exact averages of a ring of 10 sites built from an explicit coupling list
fn exact_averages_explicit_list() -> Result<(), Box<dyn Error>> {
    let sites = 10;
    let couplings: Vec<Vec<(usize, Real)>> = (0..sites)
        .map(|i| {
            vec![
                ((i + 1) % sites, 1_f64),
                ((i + sites - 1) % sites, 1_f64),
            ]
        })
        .collect();
    let hamiltonian =
        IsingHamiltonian::new(&couplings, RealVector::from_element(sites, 0.1_f64))?;
    let mut configuration = SpinConfiguration::new_cold(sites);

    let averages = hamiltonian.compute_average_values(&mut configuration, 2_f64)?;
    assert_abs_diff_eq!(averages.energy, -4.637_851_485_809_469_5_f64, epsilon = 1e-8_f64);
    assert_abs_diff_eq!(
        averages.magnetization,
        -0.183_823_360_601_135_4_f64,
        epsilon = 1e-8_f64
    );
    assert_abs_diff_eq!(
        averages.heat_capacity,
        1.988_383_374_965_371_4_f64,
        epsilon = 1e-8_f64
    );
    assert_abs_diff_eq!(
        averages.magnetic_susceptibility,
        1.839_172_208_561_442_8_f64,
        epsilon = 1e-8_f64
    );
    Ok(())
}

#[test]
/// `energy(flip(c, i)) - energy(c) == delta_e_for_flip(i, c)` on an irregular graph
fn delta_e_is_consistent_with_energy() -> Result<(), Box<dyn Error>> {
    let sites = 12;
    let mut couplings = ring_couplings(sites, 0.7_f64);
    add_edge(&mut couplings, 2, 5, 1.3_f64);
    add_edge(&mut couplings, 4, 8, -0.9_f64);
    add_edge(&mut couplings, 0, 4, 0.45_f64);
    let field = RealVector::from_iterator(sites, (0..sites).map(|i| 0.1_f64 * i as Real - 0.3_f64));
    let hamiltonian = IsingHamiltonian::new_symmetric(&couplings, field)?;

    let mut rng = StdRng::seed_from_u64(SEED_RNG);
    for up_spins in [0, 3, 6, 12] {
        let mut configuration = SpinConfiguration::new_random(sites, up_spins, &mut rng)?;
        for site in 0..sites {
            let before = hamiltonian.energy(&configuration)?;
            let delta = hamiltonian.delta_e_for_flip(site, &configuration);
            configuration.flip_site(site);
            let after = hamiltonian.energy(&configuration)?;
            assert_abs_diff_eq!(after - before, delta, epsilon = 1e-10_f64);
            configuration.flip_site(site);
            assert_abs_diff_eq!(hamiltonian.energy(&configuration)?, before, epsilon = 1e-10_f64);
        }
    }
    Ok(())
}

#[test]
/// with all couplings and fields zero every configuration has zero energy
fn trivial_coupling_gives_zero_energy() -> Result<(), Box<dyn Error>> {
    let couplings: Vec<Vec<(usize, Real)>> = vec![Vec::new(); 6];
    let hamiltonian = IsingHamiltonian::new_symmetric(&couplings, RealVector::zeros(6))?;
    let mut configuration = SpinConfiguration::new_cold(6);
    for index in 0..configuration.number_of_states() {
        configuration.set_from_integer(index);
        assert_eq!(hamiltonian.energy(&configuration)?, 0_f64);
    }
    Ok(())
}

#[test]
/// non-positive deltas are accepted without consulting the generator
fn non_positive_delta_never_draws() -> Result<(), Box<dyn Error>> {
    // zero couplings and fields: every delta is exactly zero
    let couplings: Vec<Vec<(usize, Real)>> = vec![Vec::new(); 6];
    let hamiltonian = IsingHamiltonian::new(&couplings, RealVector::zeros(6))?;
    let mut configuration = SpinConfiguration::new_cold(6);

    let mut rng = StdRng::seed_from_u64(SEED_RNG);
    let untouched = rng.clone();
    let accepted = hamiltonian.metropolis_sweep(&mut configuration, 1_f64, &mut rng)?;
    assert_eq!(accepted, 6);
    assert_eq!(configuration.to_string(), "111111");
    assert_eq!(rng, untouched);

    // a strong favorable field drives every site up in one sweep, again without draws
    let hamiltonian = IsingHamiltonian::new(&couplings, RealVector::from_element(6, -10_f64))?;
    let mut configuration = SpinConfiguration::new_cold(6);
    let accepted = hamiltonian.metropolis_sweep(&mut configuration, 0.1_f64, &mut rng)?;
    assert_eq!(accepted, 6);
    assert_eq!(configuration.to_string(), "111111");
    assert_eq!(rng, untouched);
    Ok(())
}

#[test]
/// a ferromagnetic ring relaxes close to its ground state at low temperature
fn low_temperature_relaxation() -> Result<(), Box<dyn Error>> {
    let sites = 10;
    // negative strength favors aligned pairs in this sign convention
    let hamiltonian = ring_hamiltonian(sites, -1_f64, -0.001_f64);
    let mut rng = StdRng::seed_from_u64(SEED_RNG);
    let mut configuration = SpinConfiguration::new_random(sites, 5, &mut rng)?;

    for _ in 0..2_000 {
        hamiltonian.metropolis_sweep(&mut configuration, 0.1_f64, &mut rng)?;
    }
    // ground state energy is -10 with a field contribution of at most 0.01
    assert!(hamiltonian.energy(&configuration)? < -8_f64);
    Ok(())
}

#[test]
/// a long seeded Metropolis run agrees with the exact enumeration, ring of 8 sites
fn sampling_agrees_with_enumeration() -> Result<(), Box<dyn Error>> {
    let temperature = 2_f64;
    let hamiltonian = ring_hamiltonian(8, 1_f64, 0.1_f64);

    let mut scratch = SpinConfiguration::new_cold(8);
    let exact = hamiltonian.compute_average_values(&mut scratch, temperature)?;

    let mut rng = StdRng::seed_from_u64(SEED_RNG);
    let mut configuration = SpinConfiguration::new_random(8, 4, &mut rng)?;
    let mut sampler = MetropolisSampler::new(500_000, 1_000, rng).ok_or("non zero sweeps")?;
    let series = sampler.run(&hamiltonian, &mut configuration, temperature)?;

    let energy = series.final_energy().ok_or("empty series")?;
    let magnetization = series.final_magnetization().ok_or("empty series")?;
    assert_abs_diff_eq!(energy, exact.energy, epsilon = 0.05_f64);
    assert_abs_diff_eq!(magnetization, exact.magnetization, epsilon = 0.05_f64);

    let heat_capacity = series.heat_capacity(temperature).ok_or("empty series")?;
    let susceptibility = series.susceptibility(temperature).ok_or("empty series")?;
    assert_abs_diff_eq!(heat_capacity, exact.heat_capacity, epsilon = 0.2_f64);
    assert_abs_diff_eq!(
        susceptibility,
        exact.magnetic_susceptibility,
        epsilon = 0.2_f64
    );
    Ok(())
}

#[test]
/// same agreement on the largest system the oracle is still comfortable with
fn sampling_agrees_with_enumeration_ten_sites() -> Result<(), Box<dyn Error>> {
    let temperature = 2_f64;
    let hamiltonian = ring_hamiltonian(10, 1_f64, 0.1_f64);

    let mut scratch = SpinConfiguration::new_cold(10);
    let exact = hamiltonian.compute_average_values(&mut scratch, temperature)?;

    let rng = StdRng::seed_from_u64(SEED_RNG.wrapping_add(1));
    let mut configuration = SpinConfiguration::new_cold(10);
    let mut sampler = MetropolisSampler::new(200_000, 1_000, rng).ok_or("non zero sweeps")?;
    let series = sampler.run(&hamiltonian, &mut configuration, temperature)?;

    assert_abs_diff_eq!(
        series.final_energy().ok_or("empty series")?,
        exact.energy,
        epsilon = 0.06_f64
    );
    assert_abs_diff_eq!(
        series.final_magnetization().ok_or("empty series")?,
        exact.magnetization,
        epsilon = 0.06_f64
    );
    Ok(())
}

#[test]
/// susceptibility and heat capacity peaks of the exact temperature scan
fn temperature_scan_peaks() -> Result<(), Box<dyn Error>> {
    let hamiltonian = ring_hamiltonian(8, 1_f64, 0.1_f64);
    let temperatures: Vec<Real> = (1..100).map(|t| 0.1_f64 * t as Real).collect();
    let averages = exact_temperature_scan(&hamiltonian, &temperatures)?;
    assert_eq!(averages.len(), temperatures.len());

    let (susceptibility_peak, at_peak) = averages
        .iter()
        .enumerate()
        .max_by(|a, b| {
            a.1.magnetic_susceptibility
                .partial_cmp(&b.1.magnetic_susceptibility)
                .expect("comparable susceptibilities")
        })
        .ok_or("empty scan")?;
    assert_abs_diff_eq!(temperatures[susceptibility_peak], 2_f64, epsilon = 1e-12_f64);
    assert_abs_diff_eq!(at_peak.energy, -3.732_318_50_f64, epsilon = 1e-6_f64);
    assert_abs_diff_eq!(at_peak.magnetization, -0.146_581_68_f64, epsilon = 1e-6_f64);
    assert_abs_diff_eq!(at_peak.heat_capacity, 1.645_891_65_f64, epsilon = 1e-6_f64);
    assert_abs_diff_eq!(
        at_peak.magnetic_susceptibility,
        1.466_630_62_f64,
        epsilon = 1e-6_f64
    );

    let (heat_capacity_peak, _) = averages
        .iter()
        .enumerate()
        .max_by(|a, b| {
            a.1.heat_capacity
                .partial_cmp(&b.1.heat_capacity)
                .expect("comparable heat capacities")
        })
        .ok_or("empty scan")?;
    assert_abs_diff_eq!(temperatures[heat_capacity_peak], 1_f64, epsilon = 1e-12_f64);
    Ok(())
}
