//! Core budget estimation logic for Liftgauge.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `estimator` - Incrementality test budget estimation
//! - `impact` - Expected measurable impact of a test budget
//! - `channel` - Marketing channels and cross-channel context

pub mod channel;
pub mod estimator;
pub mod impact;
