//! Budget estimation engine.

use rust_decimal::Decimal;

use super::error::EstimatorError;
use super::types::{BudgetEstimate, EstimateParams, MdeCategory};

/// Average weeks per month, used to normalize monthly spend (4.33).
const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Spend multiplier fallback when the normal budget is zero.
///
/// An inherited constant with no stated derivation; kept verbatim so that
/// zero-spend inputs produce the same output as they always have.
const FALLBACK_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Baseline significance threshold the adjustment is relative to (0.05).
const BASELINE_SIGNIFICANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// One half, for the power adjustment's linear map.
const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Engine for computing incrementality test budgets.
///
/// Pure and deterministic: no state, no side effects, and no panics for any
/// numeric input. Every division that could hit zero is guarded.
pub struct BudgetEngine;

impl BudgetEngine {
    /// Validates estimate parameters against the engine's documented domain.
    ///
    /// `compute` itself accepts anything; this is the check callers run
    /// before trusting the output to mean something.
    pub fn validate_params(params: &EstimateParams) -> Result<(), EstimatorError> {
        if params.duration_weeks <= Decimal::ZERO {
            return Err(EstimatorError::InvalidDuration);
        }
        if params.mde_percent <= Decimal::ZERO || params.mde_percent > Decimal::ONE_HUNDRED {
            return Err(EstimatorError::InvalidMde);
        }
        if params.power <= Decimal::ZERO || params.power > Decimal::ONE {
            return Err(EstimatorError::InvalidPower);
        }
        if params.significance <= Decimal::ZERO || params.significance >= Decimal::ONE {
            return Err(EstimatorError::InvalidSignificance);
        }
        if let Some(cap) = params.max_multiplier {
            if cap <= Decimal::ZERO {
                return Err(EstimatorError::InvalidMaxMultiplier);
            }
        }
        Ok(())
    }

    /// Computes the budget estimate for a set of parameters.
    ///
    /// Degenerate inputs (zero or negative spend, CPA, or duration) degrade
    /// to zero-valued or fallback outputs rather than failing.
    #[must_use]
    pub fn compute(params: &EstimateParams) -> BudgetEstimate {
        let weekly_spend = params.monthly_spend / WEEKS_PER_MONTH;
        let normal_budget = weekly_spend * params.duration_weeks;

        let baseline_conversions =
            Self::conversions_at(normal_budget, params.cost_per_acquisition);

        let mde_category = MdeCategory::classify(params.mde_percent);
        let base_conversions = mde_category.required_base_conversions();

        // Power maps linearly from [0, 1] to a [0.5, 1.0] multiplier; a
        // stricter threshold than 0.05 scales the requirement up.
        let power_adjustment = HALF + params.power * HALF;
        let significance_adjustment = if params.significance > Decimal::ZERO {
            BASELINE_SIGNIFICANCE / params.significance
        } else {
            Decimal::ZERO
        };

        let required_conversions = base_conversions * power_adjustment * significance_adjustment;
        let required_budget = required_conversions * params.cost_per_acquisition;

        let statistical_multiplier = if normal_budget > Decimal::ZERO {
            required_budget / normal_budget
        } else {
            FALLBACK_MULTIPLIER
        };

        let (is_capped, multiplier, total_budget) = match params.max_multiplier {
            Some(cap) if statistical_multiplier > cap => (true, cap, normal_budget * cap),
            _ => (false, statistical_multiplier, required_budget),
        };

        let incremental_budget = total_budget - normal_budget;
        let observed_conversions = Self::conversions_at(total_budget, params.cost_per_acquisition);

        BudgetEstimate {
            incremental_budget,
            total_budget,
            normal_budget,
            multiplier,
            statistical_multiplier,
            is_capped,
            observed_conversions,
            baseline_conversions,
            required_conversions,
            mde_category,
        }
    }

    /// Conversions a budget buys at a given CPA, zero when the CPA is not
    /// positive.
    fn conversions_at(budget: Decimal, cost_per_acquisition: Decimal) -> Decimal {
        if cost_per_acquisition > Decimal::ZERO {
            budget / cost_per_acquisition
        } else {
            Decimal::ZERO
        }
    }
}
