//! Incrementality test budget estimation.

pub mod engine;
pub mod error;
pub mod scenario;
pub mod types;


pub use engine::BudgetEngine;
pub use error::EstimatorError;
pub use scenario::{ConfidencePreset, PresetEstimate};
pub use types::{BudgetEstimate, EstimateParams, Feasibility, MdeCategory};
