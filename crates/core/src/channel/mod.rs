//! Marketing channels and cross-channel context.

pub mod context;
pub mod types;

#[cfg(test)]
mod tests;

pub use context::{form_share_percent, ShareAssessment, SpendShare};
pub use types::Channel;
