//! Ewald summation of the electrostatic energy of a periodic system of
//! point charges and point dipoles.
//!
//! The slowly converging Coulomb lattice sum is split into a short-ranged
//! part summed over neighbor pairs in real space, a smooth long-ranged part
//! summed over Fourier modes of the reciprocal lattice, and a self-energy
//! correction; tin-foil boundary conditions (a perfectly conducting medium
//! at infinity) remove the surface term. The split is controlled by the
//! Gaussian screening width σ derived from [`EwaldParameters`], and the
//! computed energy does not depend on it beyond the requested accuracy.

mod parameters;
pub use self::parameters::EwaldParameters;

mod energy;
pub use self::energy::{energy, EnergyOptions};
