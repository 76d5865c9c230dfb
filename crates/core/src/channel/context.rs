//! Cross-channel context calculations.
//!
//! Context only, never an input to the budget math: a channel with a small
//! share of total spend tends to have strong cross-channel dependencies
//! that single-channel testing cannot see.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a channel's share of total marketing spend reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareAssessment {
    /// Share below 10%: results may be dominated by cross-channel effects.
    LowShare,
    /// Share above 50%: results tend to be more reliable.
    HighShare,
    /// Anything in between.
    Balanced,
}

/// A channel's share of total marketing spend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendShare {
    /// Spend on the channel under test.
    pub channel_spend: Decimal,
    /// Total spend across all channels.
    pub total_marketing_spend: Decimal,
    /// Channel share as a percentage of total spend, zero when the total is
    /// not positive.
    pub share_percent: Decimal,
    /// Reading of the share.
    pub assessment: ShareAssessment,
}

impl SpendShare {
    /// Calculates the spend share for a channel.
    #[must_use]
    pub fn calculate(channel_spend: Decimal, total_marketing_spend: Decimal) -> Self {
        let share_percent = if total_marketing_spend > Decimal::ZERO {
            channel_spend / total_marketing_spend * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let assessment = if share_percent < Decimal::new(10, 0) {
            ShareAssessment::LowShare
        } else if share_percent > Decimal::new(50, 0) {
            ShareAssessment::HighShare
        } else {
            ShareAssessment::Balanced
        };

        Self {
            channel_spend,
            total_marketing_spend,
            share_percent,
            assessment,
        }
    }
}

/// Share of total monthly form submissions driven by the channel, as a
/// percentage. Zero when the CPA or the total is not positive.
#[must_use]
pub fn form_share_percent(
    monthly_spend: Decimal,
    cost_per_acquisition: Decimal,
    total_monthly_forms: Decimal,
) -> Decimal {
    if cost_per_acquisition <= Decimal::ZERO || total_monthly_forms <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    monthly_spend / cost_per_acquisition / total_monthly_forms * Decimal::ONE_HUNDRED
}
