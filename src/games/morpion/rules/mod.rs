//! Game rules for morpion.
//!
//! Pure functions over a [`Grid`](super::Grid). Rules are kept apart from
//! board storage and history so the controller can compose them.

pub mod win;

pub use win::{Orientation, RuleError, detect_winner, winning_orientation};
