use std::f64::consts::PI;

use ndarray::Array2;
use statrs::function::erf::erfc;

use crate::{Error, Vector3D};
use crate::math::compute_k_vectors;
use crate::systems::{NeighborsList, System};

/// Largest acceptable magnitude for the sum of all charges. Anything above
/// this is a non-neutral system, for which the lattice sum diverges.
const CHARGE_NEUTRALITY_TOLERANCE: f64 = 1e-12;

/// Smallest acceptable distance between two sites of a pair. Anything below
/// this indicates overlapping sites or a corrupted neighbor list.
const MIN_PAIR_DISTANCE: f64 = 1e-12;

/// Options for a single energy evaluation, with the corresponding defaults
/// when a field is left unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyOptions<'a> {
    /// Charge carried by each site, in the same order as the system
    /// positions. Defaults to no charge on any site.
    pub charges: Option<&'a [f64]>,
    /// Dipole moment carried by each site, in the same order as the system
    /// positions. Defaults to no dipole on any site.
    pub dipoles: Option<&'a [Vector3D]>,
    /// Precomputed neighbor list to reuse across evaluations sharing the
    /// same geometry. Defaults to computing the list on the fly.
    pub neighbors: Option<&'a NeighborsList>,
}

/// Compute the electrostatic energy of the periodic system, in units where
/// `4πε₀ = 1`, under tin-foil boundary conditions.
///
/// The energy is the sum of a real-space term over all neighbor pairs, a
/// Fourier-space term over the reciprocal lattice modes, and a self-energy
/// correction removing the interaction of every site with its own screening
/// cloud.
///
/// The input charges must sum to zero: a net charge makes the energy of the
/// periodic system infinite, and is reported as an error rather than
/// compensated. The tiny numerical residue of a neutral charge assignment
/// (below 1e-12 in magnitude) is spread evenly over the sites to keep it
/// from polluting the Fourier-space sum.
#[time_graph::instrument(name = "ewald::energy")]
pub fn energy(system: &System, options: EnergyOptions<'_>) -> Result<f64, Error> {
    let size = system.size();

    let mut charges = match options.charges {
        Some(charges) => {
            if charges.len() != size {
                return Err(Error::InvalidParameter(format!(
                    "wrong number of charges: expected {}, got {}", size, charges.len()
                )));
            }
            charges.to_vec()
        }
        None => vec![0.0; size],
    };

    let dipoles = match options.dipoles {
        Some(dipoles) => {
            if dipoles.len() != size {
                return Err(Error::InvalidParameter(format!(
                    "wrong number of dipoles: expected {}, got {}", size, dipoles.len()
                )));
            }
            dipoles.to_vec()
        }
        None => vec![Vector3D::zero(); size],
    };

    let total_charge: f64 = charges.iter().sum();
    if !(total_charge.abs() < CHARGE_NEUTRALITY_TOLERANCE) {
        return Err(Error::InvalidParameter(format!(
            "charges must sum to zero, got a net charge of {}", total_charge
        )));
    }

    // remove the residual floating point imbalance of the input
    for charge in &mut charges {
        *charge -= total_charge / size as f64;
    }

    let computed_neighbors;
    let neighbors = match options.neighbors {
        Some(neighbors) => neighbors,
        None => {
            computed_neighbors = NeighborsList::new(system);
            &computed_neighbors
        }
    };

    let mut energy = real_space_energy(system, neighbors, &charges, &dipoles)?;
    energy += fourier_space_energy(system, &charges, &dipoles);
    energy -= self_energy(&charges, &dipoles, system.sigma());

    return Ok(energy);
}

/// Accumulate the screened pair interactions over all neighbor entries.
///
/// Every undirected pair appears twice in a well-formed neighbor list, once
/// in each direction, so each closed-form contribution carries a factor 1/2.
fn real_space_energy(
    system: &System,
    neighbors: &NeighborsList,
    charges: &[f64],
    dipoles: &[Vector3D],
) -> Result<f64, Error> {
    let sigma = system.sigma();
    let sigma2 = sigma * sigma;

    let mut energy = 0.0;
    for neighbor in neighbors.iter() {
        if neighbor.first >= system.size() || neighbor.second >= system.size() {
            return Err(Error::InvalidParameter(format!(
                "out of bounds site index in neighbor list: ({}, {}) in a system of {} sites",
                neighbor.first, neighbor.second, system.size()
            )));
        }

        let vector = system.displacement(neighbor);
        let r2 = vector * vector;
        let r = f64::sqrt(r2);
        if r <= MIN_PAIR_DISTANCE {
            return Err(Error::InvalidParameter(format!(
                "sites {} and {} are at the same position, the pair distance is not defined",
                neighbor.first, neighbor.second
            )));
        }
        let direction = vector / r;

        let erfc0 = erfc(r / (std::f64::consts::SQRT_2 * sigma));
        let gauss0 = f64::sqrt(2.0 / PI) * (r / sigma) * f64::exp(-r2 / (2.0 * sigma2));

        let q_i = charges[neighbor.first];
        let q_j = charges[neighbor.second];
        let p_i = dipoles[neighbor.first];
        let p_j = dipoles[neighbor.second];
        let p_i_r = p_i * direction;
        let p_j_r = p_j * direction;

        // charge-charge
        energy += 0.5 * q_i * q_j * erfc0 / r;
        // charge-dipole, antisymmetric under exchange of the pair ends
        energy += 0.5 * (q_i * p_j_r - q_j * p_i_r) * (erfc0 + gauss0) / r2;
        // dipole-dipole
        energy += 0.5 * ((p_i * p_j) * (erfc0 + gauss0)
            - 3.0 * p_i_r * p_j_r * (erfc0 + (1.0 + r2 / (3.0 * sigma2)) * gauss0)) / (r2 * r);
    }

    return Ok(energy);
}

/// Accumulate the long-ranged part of the interactions over the reciprocal
/// lattice modes within the Fourier-space cutoff.
fn fourier_space_energy(system: &System, charges: &[f64], dipoles: &[Vector3D]) -> f64 {
    let sigma2 = system.sigma() * system.sigma();
    let volume = system.cell().volume();

    let k_vectors = compute_k_vectors(system.cell(), system.fourier_space_cutoff());
    if k_vectors.is_empty() {
        return 0.0;
    }

    let positions = system.positions();

    // cosines[[i_k, i_p]] = cos(k_vectors[i_k] · positions[i_p]), same for
    // sines
    let mut cosines = Array2::from_elem((k_vectors.len(), positions.len()), 0.0);
    let mut sines = Array2::from_elem((k_vectors.len(), positions.len()), 0.0);
    for (i_k, k_vector) in k_vectors.iter().enumerate() {
        for (i_p, &position) in positions.iter().enumerate() {
            let phase = k_vector.vector * position;
            cosines[[i_k, i_p]] = f64::cos(phase);
            sines[[i_k, i_p]] = f64::sin(phase);
        }
    }

    let mut energy = 0.0;
    for (i_k, k_vector) in k_vectors.iter().enumerate() {
        // structure factor ρ̂(k) = Σ_i (q_i + i p_i·k) exp(-i k·r_i)
        let mut real = 0.0;
        let mut imag = 0.0;
        for i_p in 0..positions.len() {
            let moment = dipoles[i_p] * k_vector.vector;
            real += charges[i_p] * cosines[[i_k, i_p]] + moment * sines[[i_k, i_p]];
            imag += moment * cosines[[i_k, i_p]] - charges[i_p] * sines[[i_k, i_p]];
        }

        energy += f64::exp(-sigma2 * k_vector.norm2 / 2.0) / k_vector.norm2
            * (real * real + imag * imag);
    }

    // every mode carries a 4π/2V weight; the doubling accounts for the -k
    // modes left out of the half grid enumeration
    return 2.0 * (2.0 * PI / volume) * energy;
}

/// Interaction of each site with its own Gaussian screening cloud, to be
/// subtracted from the Fourier-space sum
fn self_energy(charges: &[f64], dipoles: &[Vector3D], sigma: f64) -> f64 {
    let sqrt_2_pi = f64::sqrt(2.0 * PI);

    let mut energy = 0.0;
    for (charge, dipole) in charges.iter().zip(dipoles) {
        energy += charge * charge / (sqrt_2_pi * sigma);
        energy += (*dipole * *dipole) / (3.0 * sqrt_2_pi * sigma * sigma * sigma);
    }

    return energy;
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::UnitCell;
    use crate::systems::{CellShift, Neighbor};

    use super::*;

    fn cscl() -> System {
        System::new(
            UnitCell::cubic(1.0).unwrap(),
            vec![
                Vector3D::new(0.0, 0.0, 0.0),
                Vector3D::new(0.5, 0.5, 0.5),
            ],
        ).unwrap()
    }

    #[test]
    fn cscl_madelung_constant() {
        let system = cscl();
        let energy = energy(&system, EnergyOptions {
            charges: Some(&[1.0, -1.0]),
            ..Default::default()
        }).unwrap();

        // Madelung constant of the CsCl structure, referred to the
        // nearest-neighbor distance √3/2
        let distance = f64::sqrt(3.0) / 2.0;
        assert_relative_eq!(energy * distance, -1.76267477307099, epsilon = 1e-13);
    }

    #[test]
    fn non_neutral_system() {
        let result = energy(&cscl(), EnergyOptions {
            charges: Some(&[1.0, -0.5]),
            ..Default::default()
        });

        match result {
            Err(Error::InvalidParameter(message)) => {
                assert!(message.contains("charges must sum to zero"));
            }
            _ => panic!("expected an invalid parameter error"),
        }
    }

    #[test]
    fn mismatched_arrays() {
        let result = energy(&cscl(), EnergyOptions {
            charges: Some(&[1.0, -1.0, 0.0]),
            ..Default::default()
        });
        assert!(result.is_err());

        let result = energy(&cscl(), EnergyOptions {
            dipoles: Some(&[Vector3D::zero()]),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn zero_distance_neighbor() {
        let system = cscl();

        // a neighbor list supplied by the caller can break the invariant
        // that pair distances are positive; this must be reported, not
        // silently summed
        let corrupted = NeighborsList {
            cutoff: system.real_space_cutoff(),
            by_site: vec![
                vec![Neighbor { first: 0, second: 0, shift: CellShift([0, 0, 0]) }],
                vec![],
            ],
        };

        let result = energy(&system, EnergyOptions {
            charges: Some(&[1.0, -1.0]),
            neighbors: Some(&corrupted),
            ..Default::default()
        });

        match result {
            Err(Error::InvalidParameter(message)) => {
                assert!(message.contains("same position"));
            }
            _ => panic!("expected an invalid parameter error"),
        }
    }

    #[test]
    fn out_of_bounds_neighbor() {
        let system = cscl();
        let corrupted = NeighborsList {
            cutoff: system.real_space_cutoff(),
            by_site: vec![
                vec![Neighbor { first: 0, second: 7, shift: CellShift([0, 0, 0]) }],
                vec![],
            ],
        };

        let result = energy(&system, EnergyOptions {
            neighbors: Some(&corrupted),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn no_charges_no_dipoles() {
        // with nothing on the sites, all three terms vanish
        let energy = energy(&cscl(), EnergyOptions::default()).unwrap();
        assert_eq!(energy, 0.0);
    }
}
