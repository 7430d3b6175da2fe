//! Text label styling and the egui overlay that draws it.

pub mod label;
pub mod overlay;

pub use label::{TextLabel, TextStyle};
pub use overlay::{TextOverlay, LABEL_FAMILY};
