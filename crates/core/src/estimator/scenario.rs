//! Confidence preset scenarios.
//!
//! Three fixed statistical configurations run alongside every custom
//! estimate so the requested design can be compared against standard
//! industry parameters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::engine::BudgetEngine;
use super::types::{BudgetEstimate, EstimateParams};

/// A fixed statistical configuration for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidencePreset {
    /// 10% MDE, 90% power, p < 0.05.
    High,
    /// 10% MDE, 80% power, p < 0.05.
    Medium,
    /// 15% MDE, 70% power, p < 0.05.
    Low,
}

impl ConfidencePreset {
    /// All presets, in descending confidence order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// MDE percentage for this preset.
    #[must_use]
    pub fn mde_percent(self) -> Decimal {
        match self {
            Self::High | Self::Medium => Decimal::new(10, 0),
            Self::Low => Decimal::new(15, 0),
        }
    }

    /// Statistical power fraction for this preset.
    #[must_use]
    pub fn power(self) -> Decimal {
        match self {
            Self::High => Decimal::new(90, 2),
            Self::Medium => Decimal::new(80, 2),
            Self::Low => Decimal::new(70, 2),
        }
    }

    /// Significance threshold for this preset (p < 0.05 for all three).
    #[must_use]
    pub fn significance(self) -> Decimal {
        Decimal::new(5, 2)
    }

    /// Rough probability band that a test with this preset concludes.
    #[must_use]
    pub const fn success_probability(self) -> &'static str {
        match self {
            Self::High => "60-90%",
            Self::Medium => "30-60%",
            Self::Low => "0-30%",
        }
    }

    /// Smallest lift the preset is designed to detect, as a display label.
    #[must_use]
    pub const fn min_detectable_lift(self) -> &'static str {
        match self {
            Self::High | Self::Medium => "10%",
            Self::Low => "15%",
        }
    }

    /// Builds engine parameters for this preset over the caller's spend,
    /// CPA, duration, and cap.
    #[must_use]
    pub fn params(
        self,
        monthly_spend: Decimal,
        cost_per_acquisition: Decimal,
        duration_weeks: Decimal,
        max_multiplier: Option<Decimal>,
    ) -> EstimateParams {
        EstimateParams {
            monthly_spend,
            cost_per_acquisition,
            mde_percent: self.mde_percent(),
            power: self.power(),
            duration_weeks,
            significance: self.significance(),
            max_multiplier,
        }
    }
}

impl std::fmt::Display for ConfidencePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High Confidence"),
            Self::Medium => write!(f, "Medium Confidence"),
            Self::Low => write!(f, "Low Confidence"),
        }
    }
}

/// A preset together with its computed estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetEstimate {
    /// Which preset was run.
    pub preset: ConfidencePreset,
    /// The engine output for that preset.
    pub estimate: BudgetEstimate,
}

impl BudgetEngine {
    /// Runs all confidence presets over the caller's spend, CPA, duration,
    /// and cap.
    #[must_use]
    pub fn compute_presets(
        monthly_spend: Decimal,
        cost_per_acquisition: Decimal,
        duration_weeks: Decimal,
        max_multiplier: Option<Decimal>,
    ) -> Vec<PresetEstimate> {
        ConfidencePreset::ALL
            .into_iter()
            .map(|preset| PresetEstimate {
                preset,
                estimate: Self::compute(&preset.params(
                    monthly_spend,
                    cost_per_acquisition,
                    duration_weeks,
                    max_multiplier,
                )),
            })
            .collect()
    }
}
