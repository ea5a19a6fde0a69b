use crate::{Matrix3, Vector3D};

/// Compute, for each of the three basis vectors (rows of `basis`), the
/// largest integer multiple of this vector needed so that tiling the basis
/// covers a full sphere of radius `cutoff`.
///
/// For a non-orthogonal basis, the distance between successive lattice planes
/// along a given direction is smaller than the length of the corresponding
/// basis vector, and more repetitions are required than the raw
/// `cutoff / length` ratio would suggest. This plane spacing is the
/// projection of the basis vector on the direction of the matching dual
/// (reciprocal) vector, which is orthogonal to the two other basis vectors.
///
/// The same formula applies to the direct lattice (searching periodic images
/// within a real-space cutoff) and to the reciprocal lattice (searching
/// Fourier modes within a frequency cutoff), the two lattices being dual of
/// each other.
pub fn required_cell_displacement(basis: &Matrix3, cutoff: f64) -> [isize; 3] {
    debug_assert!(cutoff > 0.0);
    let dual = 2.0 * std::f64::consts::PI * basis.transposed().inverse();

    let mut bounds = [0; 3];
    for (axis, bound) in bounds.iter_mut().enumerate() {
        let direction = Vector3D::from(dual[axis]).normalized();
        let spacing = Vector3D::from(basis[axis]) * direction;
        // the small shift guards against truncation when cutoff/spacing is
        // exactly at an integer boundary up to floating point rounding
        *bound = f64::round(cutoff / spacing + 1e-6) as isize;
    }

    return bounds;
}
