//! # issuance-core
//! Constants, parameter set, and trait contracts for the layer issuance
//! schedule.
//!
//! All public amounts are integers in smidge. Nothing in this crate touches
//! floating point.

pub mod constants;
pub mod error;
pub mod params;
pub mod traits;

pub use error::ParamsError;
pub use params::{ParameterSet, ScheduleConfig};
pub use traits::{SubsidySchedule, VestingSchedule};
