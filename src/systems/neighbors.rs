use log::warn;

use crate::{Matrix3, Vector3D};
use crate::math::required_cell_displacement;

use super::System;

/// A cell shift represents the displacement along cell axis between the
/// actual position of a site and a periodic image of this site.
///
/// The cell shift can be used to reconstruct the vector between two points,
/// wrapped inside the unit cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellShift(pub [i32; 3]);

impl std::ops::Index<usize> for CellShift {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl CellShift {
    /// Compute the shift vector in cartesian coordinates, using the given
    /// cell matrix (rows are the lattice vectors).
    pub fn cartesian(&self, cell: &Matrix3) -> Vector3D {
        let x = cell[0][0] * self[0] as f64 + cell[1][0] * self[1] as f64 + cell[2][0] * self[2] as f64;
        let y = cell[0][1] * self[0] as f64 + cell[1][1] * self[1] as f64 + cell[2][1] * self[2] as f64;
        let z = cell[0][2] * self[0] as f64 + cell[1][2] * self[1] as f64 + cell[2][2] * self[2] as f64;
        Vector3D::new(x, y, z)
    }

    /// Check if all three shifts are zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0, 0, 0]
    }
}

/// A directed pair of interacting sites: the site `second`, in the periodic
/// image of the cell designated by `shift`, interacts with the site `first`
/// in the home cell.
///
/// The vector between the sites can be reconstructed as
/// `position[second] - position[first] + shift.cartesian(cell_matrix)`.
/// A pair between a site and itself in the home cell (`first == second` with
/// a zero shift) is never a valid `Neighbor`, since the distance between the
/// two ends would be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// index of the first site in the pair
    pub first: usize,
    /// index of the second site in the pair
    pub second: usize,
    /// number of shifts along the cell axis applied to the `second` site
    pub shift: CellShift,
}

/// A full neighbor list: for each site taken as `first`, all the `Neighbor`
/// entries whose distance is within the real-space cutoff of the system.
///
/// Both directions of a given pair are present, `(i, j, shift)` in the list
/// of site `i` and `(j, i, -shift)` in the list of site `j`, so energy
/// accumulation over all entries visits every interaction exactly twice; the
/// pairwise energy expressions carry the matching 1/2 factor.
///
/// The fields are public so that a list built by other means (for example a
/// spatially accelerated search) can be passed to the energy evaluation; such
/// a list must follow the same conventions.
#[derive(Debug, Clone)]
pub struct NeighborsList {
    /// the cutoff used to create this neighbor list
    pub cutoff: f64,
    /// for each site, all pairs having this site as `first`
    pub by_site: Vec<Vec<Neighbor>>,
}

impl NeighborsList {
    /// Build the neighbor list of the given system, using the real-space
    /// cutoff derived from the system's summation parameters.
    ///
    /// This is a brute-force enumeration of every candidate (site, site,
    /// periodic shift) triplet within per-axis shift bounds covering the
    /// cutoff sphere, quadratic in the number of sites. The bounds get one
    /// extra cell of margin so that sites close to the cell boundary still
    /// see every image within the cutoff.
    #[time_graph::instrument(name = "NeighborsList")]
    pub fn new(system: &System) -> NeighborsList {
        let cutoff = system.real_space_cutoff();
        let cutoff2 = cutoff * cutoff;

        let matrix = system.cell().matrix();
        let positions = system.positions();

        let [n1_max, n2_max, n3_max] = required_cell_displacement(&matrix, cutoff);
        let (n1_max, n2_max, n3_max) = (n1_max + 1, n2_max + 1, n3_max + 1);

        let mut by_site = Vec::with_capacity(positions.len());
        for first in 0..positions.len() {
            let mut neighbors = Vec::new();
            for second in 0..positions.len() {
                for n1 in -n1_max..=n1_max {
                    for n2 in -n2_max..=n2_max {
                        for n3 in -n3_max..=n3_max {
                            let shift = CellShift([n1 as i32, n2 as i32, n3 as i32]);
                            if first == second && shift.is_zero() {
                                continue;
                            }

                            let mut vector = positions[second] - positions[first];
                            vector += shift.cartesian(&matrix);

                            let distance2 = vector * vector;
                            if distance2 > 0.0 && distance2 <= cutoff2 {
                                if distance2 < 1e-3 {
                                    warn!(
                                        "sites {} and {} are very close to one another ({})",
                                        first, second, distance2.sqrt()
                                    );
                                }

                                neighbors.push(Neighbor {
                                    first: first,
                                    second: second,
                                    shift: shift,
                                });
                            }
                        }
                    }
                }
            }
            by_site.push(neighbors);
        }

        return NeighborsList {
            cutoff: cutoff,
            by_site: by_site,
        };
    }

    /// Iterate over all the entries in this list, in order
    pub fn iter(&self) -> impl Iterator<Item = &Neighbor> + '_ {
        self.by_site.iter().flatten()
    }

    /// Total number of entries in this list
    pub fn len(&self) -> usize {
        self.by_site.iter().map(Vec::len).sum()
    }

    /// Check if this list contains no entry at all
    pub fn is_empty(&self) -> bool {
        self.by_site.iter().all(Vec::is_empty)
    }
}
