//! Generate the k-vectors (also called reciprocal or Fourier vectors) needed
//! for the Fourier-space part of the Ewald summation. More specifically,
//! these are all points of the reciprocal lattice that lie within a ball of a
//! specified cutoff radius.

use crate::Vector3D;
use crate::systems::UnitCell;

use super::required_cell_displacement;

/// A single k-vector and its squared norm stored together
#[derive(Debug, Clone)]
pub struct KVector {
    /// 3 component k-vector
    pub vector: Vector3D,
    /// squared length of the k-vector
    pub norm2: f64,
}

/// Generate k-vectors up to a certain cutoff (in reciprocal space units) for
/// a given cell.
///
/// Only half of the modes are generated: since `-k` is not included whenever
/// `k` is, users summing a quantity that is even under `k => -k` (such as the
/// squared modulus of a structure factor) must double the result.
pub fn compute_k_vectors(cell: &UnitCell, k_cutoff: f64) -> Vec<KVector> {
    let reciprocal = cell.reciprocal();

    let cutoff_squared = k_cutoff * k_cutoff;
    let b1 = Vector3D::from(reciprocal[0]);
    let b2 = Vector3D::from(reciprocal[1]);
    let b3 = Vector3D::from(reciprocal[2]);

    let [n1_max, n2_max, n3_max] = required_cell_displacement(&reciprocal, k_cutoff);

    let mut results = Vec::new();

    for n3 in 1..n3_max + 1 {
        let k = n3 as f64 * b3;
        let norm_squared = k.norm2();
        if norm_squared <= cutoff_squared {
            results.push(KVector {
                vector: k,
                norm2: norm_squared,
            });
        }
    }

    for n2 in 1..n2_max + 1 {
        for n3 in -n3_max..n3_max + 1 {
            let k = n2 as f64 * b2 + n3 as f64 * b3;
            let norm_squared = k.norm2();
            if norm_squared <= cutoff_squared {
                results.push(KVector {
                    vector: k,
                    norm2: norm_squared,
                });
            }
        }
    }

    for n1 in 1..n1_max + 1 {
        for n2 in -n2_max..n2_max + 1 {
            for n3 in -n3_max..n3_max + 1 {
                let k = n1 as f64 * b1 + n2 as f64 * b2 + n3 as f64 * b3;
                let norm_squared = k.norm2();
                if norm_squared <= cutoff_squared {
                    results.push(KVector {
                        vector: k,
                        norm2: norm_squared,
                    });
                }
            }
        }
    }

    return results;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_ulps_eq;

    use std::f64::consts::PI;

    #[test]
    fn cubic_cell() {
        let cell = UnitCell::cubic(1.0).unwrap();

        // reciprocal vectors have length 2π; only the three positive axis
        // modes are below a cutoff between 2π and 2π√2
        let k_vectors = compute_k_vectors(&cell, 1.01 * 2.0 * PI);
        assert_eq!(k_vectors.len(), 3);
        for k_vector in &k_vectors {
            assert_ulps_eq!(k_vector.norm2, 4.0 * PI * PI);
            assert_ulps_eq!(k_vector.norm2, k_vector.vector.norm2());
        }

        // between 2π√2 and 2π√3, the 12 face diagonals (6 in the half grid)
        // appear as well
        let k_vectors = compute_k_vectors(&cell, 1.5 * 2.0 * PI);
        assert_eq!(k_vectors.len(), 9);
    }

    #[test]
    fn cutoff_ball() {
        let cell = UnitCell::new(crate::Matrix3::new([
            [1.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [0.3, 0.4, 1.0],
        ])).unwrap();

        let k_cutoff = 4.0 * 2.0 * PI;
        for k_vector in compute_k_vectors(&cell, k_cutoff) {
            assert!(k_vector.norm2 > 0.0);
            assert!(k_vector.norm2 <= k_cutoff * k_cutoff);
        }
    }
}
