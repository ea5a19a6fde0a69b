#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::range_plus_one)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_lossless)]
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown, clippy::similar_names)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod types;
pub use types::*;

pub(crate) mod math;

mod errors;
pub use self::errors::Error;

pub mod systems;
pub use systems::{System, UnitCell};
pub use systems::{CellShift, Neighbor, NeighborsList};
pub use systems::{WrappedSite, wrap_positions};

pub mod ewald;
pub use ewald::{energy, EnergyOptions, EwaldParameters};
