//! IRIS safety index
//!
//! Rule based, no ML: the status is a function of the local hour.
//!
//! | Hours        | Status  |
//! |--------------|---------|
//! | 06:00-17:59  | SAFE    |
//! | 18:00-20:59  | CAUTION |
//! | otherwise    | DANGER  |
//!
//! The map view additionally folds in a synthetic crowd density
//! (see [`crowd`]); nothing here senses real crowds.

pub mod crowd;
mod index;

pub use crowd::{assess_area, calculate_risk, generate_crowd};
pub use index::{IrisIndex, SafetyIndex, TimeOfDayIndex, iris_index, is_night};
