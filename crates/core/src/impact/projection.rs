//! Control/treatment impact projection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::estimator::BudgetEstimate;

/// Expected measurable impact of a test, derived from an estimate.
///
/// The observed conversions are split evenly into control and treatment
/// groups; the treatment group is lifted by the MDE. The difference is what
/// the test is designed to measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactProjection {
    /// Form submissions expected in the control group.
    pub control_forms: Decimal,
    /// Form submissions expected in the treatment group at the assumed lift.
    pub treatment_forms: Decimal,
    /// Additional form submissions attributable to the lift.
    pub incremental_forms: Decimal,
    /// Qualified leads expected in the control group.
    pub control_aqls: Decimal,
    /// Qualified leads expected in the treatment group.
    pub treatment_aqls: Decimal,
    /// Additional qualified leads attributable to the lift.
    pub incremental_aqls: Decimal,
    /// Incremental budget spent per additional qualified lead, zero when no
    /// incremental leads are expected.
    pub cost_per_incremental_aql: Decimal,
}

impl ImpactProjection {
    /// Projects the measurable impact for an estimate.
    ///
    /// `mde_percent` is the assumed lift in percentage points and
    /// `aql_rate` the form-to-qualified-lead rate as a fraction.
    #[must_use]
    pub fn project(estimate: &BudgetEstimate, mde_percent: Decimal, aql_rate: Decimal) -> Self {
        let two = Decimal::new(2, 0);
        let lift = Decimal::ONE + mde_percent / Decimal::ONE_HUNDRED;

        let control_forms = estimate.observed_conversions / two;
        let treatment_forms = control_forms * lift;
        let incremental_forms = treatment_forms - control_forms;

        let control_aqls = control_forms * aql_rate;
        let treatment_aqls = treatment_forms * aql_rate;
        let incremental_aqls = treatment_aqls - control_aqls;

        let cost_per_incremental_aql = if incremental_aqls > Decimal::ZERO {
            estimate.incremental_budget / incremental_aqls
        } else {
            Decimal::ZERO
        };

        Self {
            control_forms,
            treatment_forms,
            incremental_forms,
            control_aqls,
            treatment_aqls,
            incremental_aqls,
            cost_per_incremental_aql,
        }
    }
}
