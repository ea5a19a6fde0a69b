//! The `UnitCell` type represents the periodically repeated parallelepiped
//! enclosing a simulated system.
use crate::{Error, Matrix3, Vector3D};

/// An `UnitCell` defines the periodic boundaries of a system.
///
/// The cell is described by its matrix representation, where the rows of the
/// matrix are the three lattice vectors. The lattice vectors must be linearly
/// independent, and can form an arbitrary (triclinic) parallelepiped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    /// Unit cell matrix, rows are the lattice vectors
    matrix: Matrix3,
    /// Transpose of the unit cell matrix, cached from matrix
    transpose: Matrix3,
    /// Inverse of the transpose of the unit cell matrix, cached from matrix
    inverse: Matrix3,
}

impl UnitCell {
    /// Create an unit cell from its matrix representation, the rows of the
    /// matrix being the lattice vectors.
    pub fn new(matrix: Matrix3) -> Result<UnitCell, Error> {
        if !(matrix.determinant().abs() > 1e-12) {
            return Err(Error::InvalidParameter(
                "lattice vectors are linearly dependent, the unit cell has no volume".into()
            ));
        }

        return Ok(UnitCell {
            matrix: matrix,
            transpose: matrix.transposed(),
            inverse: matrix.transposed().inverse(),
        });
    }

    /// Create an unit cell from three lattice vectors
    pub fn from_vectors(a: Vector3D, b: Vector3D, c: Vector3D) -> Result<UnitCell, Error> {
        UnitCell::new(Matrix3::new([
            [a.x, a.y, a.z],
            [b.x, b.y, b.z],
            [c.x, c.y, c.z],
        ]))
    }

    /// Create an orthorhombic unit cell, with side lengths `a, b, c`.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<UnitCell, Error> {
        if !(a > 0.0 && b > 0.0 && c > 0.0) {
            return Err(Error::InvalidParameter(
                "cell lengths must be positive".into()
            ));
        }

        UnitCell::new(Matrix3::new([
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c],
        ]))
    }

    /// Create a cubic unit cell, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> Result<UnitCell, Error> {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Get the matricial representation of the unit cell
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the volume of the cell, i.e. the absolute value of the scalar
    /// triple product of the lattice vectors
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    /// Get the matrix of reciprocal lattice vectors (as rows), such that
    /// `a_i · b_j = 2π δ_ij` where the `a_i` are the lattice vectors.
    pub fn reciprocal(&self) -> Matrix3 {
        2.0 * std::f64::consts::PI * self.inverse
    }

    /// Get the fractional representation of the `vector` in this cell
    pub fn fractional(&self, vector: Vector3D) -> Vector3D {
        // this needs to use the inverse of the transpose of the matrix, since
        // we only have code to multiply a vector by a matrix on the left
        return self.inverse * vector;
    }

    /// Get the Cartesian representation of the `fractional` vector in this
    /// cell
    pub fn cartesian(&self, fractional: Vector3D) -> Vector3D {
        // this needs to use the inverse of the transpose of the matrix, since
        // we only have code to multiply a vector by a matrix on the left
        return self.transpose * fractional;
    }
}
