//! Estimator data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters for a single budget estimate.
///
/// The engine itself does not validate ranges; degenerate inputs degrade to
/// zero or fallback outputs instead of failing. Range checks live in
/// [`super::engine::BudgetEngine::validate_params`] and at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateParams {
    /// Current monthly spend on the channel under test.
    pub monthly_spend: Decimal,
    /// Cost per acquisition (cost per form) for the channel.
    pub cost_per_acquisition: Decimal,
    /// Minimum detectable effect, in percentage points (e.g. 10 for 10%).
    pub mde_percent: Decimal,
    /// Statistical power as a fraction (e.g. 0.80 for 80%).
    pub power: Decimal,
    /// Test duration in weeks.
    pub duration_weeks: Decimal,
    /// Significance threshold as a fraction (e.g. 0.05 for p < 0.05).
    pub significance: Decimal,
    /// Optional cap on the spend multiplier.
    pub max_multiplier: Option<Decimal>,
}

/// Result of a budget estimate.
///
/// `incremental_budget == total_budget - normal_budget` holds on both the
/// capped and uncapped paths. All budget figures cover the full test
/// duration, not a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetEstimate {
    /// Extra spend above the normal budget for the test duration.
    pub incremental_budget: Decimal,
    /// Total spend for the test duration.
    pub total_budget: Decimal,
    /// Spend for the test duration at the current monthly rate.
    pub normal_budget: Decimal,
    /// Applied spend multiplier (total / normal), after any cap.
    pub multiplier: Decimal,
    /// Multiplier required by the statistical parameters, before any cap.
    pub statistical_multiplier: Decimal,
    /// True when the statistical multiplier exceeded the requested cap.
    pub is_capped: bool,
    /// Conversions expected at the total test budget.
    pub observed_conversions: Decimal,
    /// Conversions expected at the normal budget.
    pub baseline_conversions: Decimal,
    /// Conversions required for statistical detection.
    pub required_conversions: Decimal,
    /// Classification of the MDE input.
    pub mde_category: MdeCategory,
}

/// Classification of a minimum detectable effect.
///
/// Smaller effects need a larger conversion sample to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MdeCategory {
    /// MDE of 5% or less.
    VerySmall,
    /// MDE above 5% up to 10%.
    Small,
    /// MDE above 10% up to 15%.
    Moderate,
    /// MDE above 15% up to 20%.
    Large,
    /// MDE above 20%.
    VeryLarge,
}

impl MdeCategory {
    /// Classifies an MDE percentage into its bucket.
    ///
    /// Boundaries are inclusive: exactly 5% still falls in `VerySmall`.
    #[must_use]
    pub fn classify(mde_percent: Decimal) -> Self {
        if mde_percent <= Decimal::new(5, 0) {
            Self::VerySmall
        } else if mde_percent <= Decimal::new(10, 0) {
            Self::Small
        } else if mde_percent <= Decimal::new(15, 0) {
            Self::Moderate
        } else if mde_percent <= Decimal::new(20, 0) {
            Self::Large
        } else {
            Self::VeryLarge
        }
    }

    /// Base conversions required for detection in this bucket, before
    /// power and significance adjustments.
    #[must_use]
    pub fn required_base_conversions(self) -> Decimal {
        match self {
            Self::VerySmall => Decimal::new(800, 0),
            Self::Small => Decimal::new(400, 0),
            Self::Moderate => Decimal::new(200, 0),
            Self::Large => Decimal::new(150, 0),
            Self::VeryLarge => Decimal::new(100, 0),
        }
    }
}

impl std::fmt::Display for MdeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VerySmall => write!(f, "Very Small"),
            Self::Small => write!(f, "Small"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Large => write!(f, "Large"),
            Self::VeryLarge => write!(f, "Very Large"),
        }
    }
}

/// Practicality rating of a spend multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    /// Multiplier of 3x or less.
    High,
    /// Multiplier above 3x up to 4x.
    Medium,
    /// Multiplier above 4x.
    Low,
}

impl Feasibility {
    /// Rates a spend multiplier.
    #[must_use]
    pub fn from_multiplier(multiplier: Decimal) -> Self {
        if multiplier <= Decimal::new(3, 0) {
            Self::High
        } else if multiplier <= Decimal::new(4, 0) {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for Feasibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}
