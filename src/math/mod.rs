mod cell_displacement;
pub(crate) use self::cell_displacement::required_cell_displacement;

mod k_vectors;
pub(crate) use self::k_vectors::{KVector, compute_k_vectors};
