//! Expected measurable impact of a test budget.

pub mod projection;


pub use projection::ImpactProjection;
