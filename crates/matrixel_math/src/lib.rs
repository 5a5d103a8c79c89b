pub mod coefficient;
pub mod control;
pub mod css;
pub mod number;
pub mod preset;
pub mod transform;

pub use coefficient::{Coefficient, Notation};
pub use control::ControlClass;
pub use preset::{Preset, UnknownPresetError};
pub use transform::{CoefficientKey, TransformState};
