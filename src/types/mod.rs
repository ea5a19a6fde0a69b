//! This module provides the 3D vector and matrix types used in all other
//! modules.

mod vectors;
pub use self::vectors::Vector3D;

mod matrix;
pub use self::matrix::Matrix3;
