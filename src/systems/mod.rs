use log::warn;

use crate::{Error, Vector3D};
use crate::ewald::EwaldParameters;

mod cell;
pub use self::cell::UnitCell;

mod neighbors;
pub use self::neighbors::{CellShift, Neighbor, NeighborsList};

/// Diagnostic record for a site found outside of the unit cell before
/// wrapping, produced by [`wrap_positions`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedSite {
    /// index of the site
    pub site: usize,
    /// Cartesian position of the site before wrapping
    pub position: Vector3D,
    /// fractional coordinates of the site before wrapping
    pub fractional: Vector3D,
}

/// Wrap all `positions` back inside the fundamental parallelepiped of the
/// given `cell`, reducing every fractional coordinate modulo 1 into [0, 1).
///
/// The returned list contains one entry for each site that was outside the
/// cell; what to do with these diagnostics (log them, fail, ignore them) is
/// left to the caller. Wrapping an already wrapped set of positions is a
/// no-op up to floating point rounding.
pub fn wrap_positions(cell: &UnitCell, positions: &mut [Vector3D]) -> Vec<WrappedSite> {
    let mut wrapped = Vec::new();

    for (site, position) in positions.iter_mut().enumerate() {
        let fractional = cell.fractional(*position);

        let mut inside = true;
        let mut reduced = fractional;
        for axis in 0..3 {
            let floor = f64::floor(reduced[axis]);
            if floor != 0.0 {
                inside = false;
            }
            reduced[axis] -= floor;
        }

        if !inside {
            wrapped.push(WrappedSite {
                site: site,
                position: *position,
                fractional: fractional,
            });
            *position = cell.cartesian(reduced);
        }
    }

    return wrapped;
}

/// A `System` describes a periodic crystal: an unit cell, the positions of
/// the sites (ions) inside this cell, and the parameters controlling the
/// accuracy of the Ewald summation over this crystal.
///
/// Positions are wrapped inside the unit cell during construction, and the
/// system is immutable afterwards, making it safe to share between repeated
/// energy evaluations.
#[derive(Debug, Clone)]
pub struct System {
    cell: UnitCell,
    positions: Vec<Vector3D>,
    parameters: EwaldParameters,
}

impl System {
    /// Create a new `System` with the given unit cell and site positions,
    /// using the default summation parameters.
    ///
    /// Positions outside the unit cell are wrapped back inside, emitting a
    /// warning for each of them.
    pub fn new(cell: UnitCell, positions: Vec<Vector3D>) -> Result<System, Error> {
        System::with_parameters(cell, positions, EwaldParameters::default())
    }

    /// Create a new `System` with the given unit cell, site positions and
    /// summation parameters.
    pub fn with_parameters(
        cell: UnitCell,
        mut positions: Vec<Vector3D>,
        parameters: EwaldParameters,
    ) -> Result<System, Error> {
        parameters.validate()?;

        if positions.is_empty() {
            return Err(Error::InvalidParameter(
                "a system must contain at least one site".into()
            ));
        }

        for entry in wrap_positions(&cell, &mut positions) {
            warn!(
                "position of site {} was outside of the unit cell \
                (fractional coordinates [{}, {}, {}]), it has been wrapped back inside",
                entry.site, entry.fractional[0], entry.fractional[1], entry.fractional[2]
            );
        }

        return Ok(System {
            cell: cell,
            positions: positions,
            parameters: parameters,
        });
    }

    /// Get the unit cell of this system
    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Get the number of sites in this system
    pub fn size(&self) -> usize {
        self.positions.len()
    }

    /// Get the positions of the sites in this system, wrapped inside the
    /// unit cell
    pub fn positions(&self) -> &[Vector3D] {
        &self.positions
    }

    /// Get the summation parameters of this system
    pub fn parameters(&self) -> &EwaldParameters {
        &self.parameters
    }

    /// Get the width σ of the Gaussian charge clouds splitting the
    /// summation between real and Fourier space.
    ///
    /// The width scales with the typical length per site
    /// `V^(1/3) / N^(1/6)`, keeping the real- and Fourier-space work
    /// balanced as the system grows; the balance parameter then shifts work
    /// between the two sums.
    pub fn sigma(&self) -> f64 {
        let length = self.cell.volume().cbrt();
        length / (self.parameters.balance * (self.size() as f64).powf(1.0 / 6.0))
    }

    /// Get the real-space distance beyond which screened pair interactions
    /// are negligible at the accuracy set by the summation parameters
    pub fn real_space_cutoff(&self) -> f64 {
        std::f64::consts::SQRT_2 * self.parameters.accuracy * self.sigma()
    }

    /// Get the wavevector magnitude beyond which Fourier modes are
    /// negligible at the accuracy set by the summation parameters
    pub fn fourier_space_cutoff(&self) -> f64 {
        std::f64::consts::SQRT_2 * self.parameters.accuracy / self.sigma()
    }

    /// Get the separation vector of the given `neighbor` pair: the position
    /// of the designated periodic image of the second site, relative to the
    /// first site.
    pub fn displacement(&self, neighbor: &Neighbor) -> Vector3D {
        let mut vector = self.positions[neighbor.second] - self.positions[neighbor.first];
        vector += neighbor.shift.cartesian(&self.cell.matrix());
        return vector;
    }

    /// Compute the neighbor list of this system.
    ///
    /// The result can be passed to repeated energy evaluations sharing the
    /// same geometry through
    /// [`EnergyOptions::neighbors`](crate::EnergyOptions), saving the cost
    /// of re-enumerating the pairs when only charges or dipoles change.
    pub fn neighbors(&self) -> NeighborsList {
        NeighborsList::new(self)
    }
}
