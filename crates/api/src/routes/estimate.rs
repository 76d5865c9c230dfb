//! Budget estimate routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::AppState;
use liftgauge_core::channel::{Channel, ShareAssessment, SpendShare, form_share_percent};
use liftgauge_core::estimator::{
    BudgetEngine, BudgetEstimate, ConfidencePreset, EstimateParams, Feasibility, MdeCategory,
};
use liftgauge_core::impact::ImpactProjection;
use liftgauge_shared::AppError;

/// Creates the estimate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/estimate", post(run_estimate))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for a budget estimate.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    /// Channel under test.
    pub channel: Channel,
    /// Current monthly spend on the channel.
    pub monthly_spend: Decimal,
    /// Cost per form for the channel. Defaults per channel when omitted.
    #[serde(default)]
    pub cost_per_acquisition: Option<Decimal>,
    /// Test duration in weeks.
    pub duration_weeks: u32,
    /// Minimum detectable effect in percent (1-30).
    pub mde_percent: Decimal,
    /// Statistical power in percent (50-100).
    pub power_percent: Decimal,
    /// Significance threshold, one of 0.01, 0.05, 0.10.
    pub significance: Decimal,
    /// Form to qualified-lead rate in percent. Defaults to 65.
    #[serde(default)]
    pub aql_rate_percent: Option<Decimal>,
    /// Optional cap on the spend multiplier.
    #[serde(default)]
    pub budget_cap: Option<BudgetCapRequest>,
    /// Total monthly form submissions across all channels, context only.
    #[serde(default)]
    pub total_monthly_forms: Option<Decimal>,
    /// Total monthly marketing spend across all channels, context only.
    #[serde(default)]
    pub total_marketing_spend: Option<Decimal>,
}

/// Budget cap settings.
#[derive(Debug, Deserialize)]
pub struct BudgetCapRequest {
    /// Whether the cap is applied.
    pub enabled: bool,
    /// Maximum spend multiplier when enabled.
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: Decimal,
}

fn default_max_multiplier() -> Decimal {
    Decimal::new(50, 1)
}

fn default_aql_rate_percent() -> Decimal {
    Decimal::new(65, 0)
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for a budget estimate.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    /// Unique identifier for this estimate.
    pub estimate_id: Uuid,
    /// Display name of the channel under test.
    pub channel: String,
    /// Test duration in weeks.
    pub duration_weeks: u32,
    /// Echo of the statistical settings used.
    pub settings: SettingsResponse,
    /// Budget figures for the custom configuration.
    pub budget: BudgetResponse,
    /// Statistical diagnostics behind the budget figures.
    pub diagnostics: DiagnosticsResponse,
    /// Expected measurable impact of the test.
    pub impact: ImpactResponse,
    /// Cross-channel context, when the request carried the totals.
    pub context: ContextResponse,
    /// The standard confidence presets run with the same spend and duration.
    pub presets: Vec<PresetResponse>,
}

/// Echo of statistical settings.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    /// Minimum detectable effect in percent.
    pub mde_percent: String,
    /// Statistical power in percent.
    pub power_percent: String,
    /// Significance threshold.
    pub significance: String,
}

/// Budget figures, all covering the full test duration.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Extra spend above the normal budget.
    pub incremental_budget: String,
    /// Total test spend.
    pub total_budget: String,
    /// Spend at the current monthly rate.
    pub normal_budget: String,
    /// Applied spend multiplier.
    pub multiplier: String,
    /// Whether the multiplier was capped below the statistical requirement.
    pub is_capped: bool,
}

/// Statistical diagnostics.
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    /// Conversions required for statistical detection.
    pub required_conversions: String,
    /// Conversions expected at normal spend.
    pub baseline_conversions: String,
    /// Conversions expected at the total test budget.
    pub observed_conversions: String,
    /// Multiplier required before any cap.
    pub statistical_multiplier: String,
    /// Classification of the MDE input.
    pub mde_category: MdeCategory,
    /// Practicality rating of the applied multiplier.
    pub feasibility: Feasibility,
}

/// Expected measurable impact.
#[derive(Debug, Serialize)]
pub struct ImpactResponse {
    /// Form submissions expected in the control group.
    pub control_forms: String,
    /// Form submissions expected in the treatment group.
    pub treatment_forms: String,
    /// Additional form submissions from the lift.
    pub incremental_forms: String,
    /// Additional qualified leads from the lift.
    pub incremental_aqls: String,
    /// Incremental budget per additional qualified lead.
    pub cost_per_incremental_aql: String,
}

/// Cross-channel context.
#[derive(Debug, Serialize)]
pub struct ContextResponse {
    /// Channel share of total marketing spend.
    pub spend_share: Option<SpendShareResponse>,
    /// Channel share of total monthly forms, in percent.
    pub form_share_percent: Option<String>,
}

/// Spend share block.
#[derive(Debug, Serialize)]
pub struct SpendShareResponse {
    /// Share in percent.
    pub share_percent: String,
    /// Reading of the share.
    pub assessment: ShareAssessment,
}

/// One confidence preset with its results.
#[derive(Debug, Serialize)]
pub struct PresetResponse {
    /// Preset identifier.
    pub preset: ConfidencePreset,
    /// Human-readable preset name.
    pub label: String,
    /// Preset MDE in percent.
    pub mde_percent: String,
    /// Preset power in percent.
    pub power_percent: String,
    /// Preset significance threshold.
    pub significance: String,
    /// Extra spend above the normal budget.
    pub incremental_budget: String,
    /// Total test spend.
    pub total_budget: String,
    /// Applied spend multiplier.
    pub multiplier: String,
    /// Whether the preset hit the budget cap.
    pub is_capped: bool,
    /// Rough probability band that the test concludes.
    pub success_probability: String,
    /// Smallest lift the preset detects.
    pub min_detectable_lift: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Formats a Decimal as a money string with 2 decimal places.
fn format_money(amount: Decimal) -> String {
    format!("{amount:.2}")
}

/// Formats a Decimal as a percentage string with 2 decimal places.
fn format_percent(amount: Decimal) -> String {
    format!("{amount:.2}")
}

/// Formats a multiplier with 2 decimal places.
fn format_multiplier(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Formats a conversion count as a whole number.
fn format_count(value: Decimal) -> String {
    value.trunc().to_string()
}

fn bad_request(error: &str, message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": error,
            "message": message
        })),
    )
        .into_response()
}

/// Accepted significance thresholds.
fn is_supported_significance(significance: Decimal) -> bool {
    significance == Decimal::new(1, 2)
        || significance == Decimal::new(5, 2)
        || significance == Decimal::new(10, 2)
}

fn preset_response(preset: ConfidencePreset, estimate: &BudgetEstimate) -> PresetResponse {
    PresetResponse {
        preset,
        label: preset.to_string(),
        mde_percent: format_percent(preset.mde_percent()),
        power_percent: format_percent(preset.power() * Decimal::ONE_HUNDRED),
        significance: preset.significance().to_string(),
        incremental_budget: format_money(estimate.incremental_budget),
        total_budget: format_money(estimate.total_budget),
        multiplier: format_multiplier(estimate.multiplier),
        is_capped: estimate.is_capped,
        success_probability: preset.success_probability().to_string(),
        min_detectable_lift: preset.min_detectable_lift().to_string(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /estimate
///
/// Runs the budget engine for the caller's configuration and the three
/// standard confidence presets.
#[allow(clippy::too_many_lines)]
#[axum::debug_handler]
async fn run_estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> impl IntoResponse {
    let limits = &state.config.estimator;

    if request.monthly_spend < Decimal::ZERO {
        return bad_request("invalid_monthly_spend", "Monthly spend must not be negative");
    }

    let cost_per_acquisition = request
        .cost_per_acquisition
        .unwrap_or_else(|| request.channel.default_cpa());
    if cost_per_acquisition < Decimal::ZERO {
        return bad_request(
            "invalid_cost_per_acquisition",
            "Cost per acquisition must not be negative",
        );
    }

    if request.duration_weeks < limits.min_duration_weeks
        || request.duration_weeks > limits.max_duration_weeks
    {
        return bad_request(
            "invalid_duration",
            &format!(
                "Test duration must be between {} and {} weeks",
                limits.min_duration_weeks, limits.max_duration_weeks
            ),
        );
    }

    if request.mde_percent < Decimal::ONE || request.mde_percent > Decimal::new(30, 0) {
        return bad_request(
            "invalid_mde",
            "Minimum detectable effect must be between 1 and 30 percent",
        );
    }

    if request.power_percent < Decimal::new(50, 0)
        || request.power_percent > Decimal::ONE_HUNDRED
    {
        return bad_request(
            "invalid_power",
            "Statistical power must be between 50 and 100 percent",
        );
    }

    if !is_supported_significance(request.significance) {
        return bad_request(
            "invalid_significance",
            "Significance threshold must be one of 0.01, 0.05, 0.10",
        );
    }

    let aql_rate_percent = request
        .aql_rate_percent
        .unwrap_or_else(default_aql_rate_percent);
    if aql_rate_percent < Decimal::ZERO || aql_rate_percent > Decimal::ONE_HUNDRED {
        return bad_request(
            "invalid_aql_rate",
            "Form to AQL rate must be between 0 and 100 percent",
        );
    }

    let max_multiplier = match &request.budget_cap {
        Some(cap) if cap.enabled => {
            if cap.max_multiplier <= Decimal::ZERO
                || cap.max_multiplier > limits.multiplier_ceiling
            {
                return bad_request(
                    "invalid_max_multiplier",
                    &format!(
                        "Budget cap multiplier must be above 0 and at most {}",
                        limits.multiplier_ceiling
                    ),
                );
            }
            Some(cap.max_multiplier)
        }
        _ => None,
    };

    let duration_weeks = Decimal::from(request.duration_weeks);
    let params = EstimateParams {
        monthly_spend: request.monthly_spend,
        cost_per_acquisition,
        mde_percent: request.mde_percent,
        power: request.power_percent / Decimal::ONE_HUNDRED,
        duration_weeks,
        significance: request.significance,
        max_multiplier,
    };

    if let Err(e) = BudgetEngine::validate_params(&params) {
        let err = AppError::Validation(e.to_string());
        return (
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST),
            Json(json!({
                "error": err.error_code(),
                "message": err.to_string()
            })),
        )
            .into_response();
    }

    let estimate = BudgetEngine::compute(&params);
    let impact = ImpactProjection::project(
        &estimate,
        request.mde_percent,
        aql_rate_percent / Decimal::ONE_HUNDRED,
    );

    let presets = BudgetEngine::compute_presets(
        request.monthly_spend,
        cost_per_acquisition,
        duration_weeks,
        max_multiplier,
    )
    .iter()
    .map(|p| preset_response(p.preset, &p.estimate))
    .collect();

    let spend_share = request.total_marketing_spend.map(|total| {
        let share = SpendShare::calculate(request.monthly_spend, total);
        SpendShareResponse {
            share_percent: format_percent(share.share_percent),
            assessment: share.assessment,
        }
    });

    let form_share = request.total_monthly_forms.map(|total_forms| {
        format_percent(form_share_percent(
            request.monthly_spend,
            cost_per_acquisition,
            total_forms,
        ))
    });

    let estimate_id = Uuid::new_v4();
    debug!(
        %estimate_id,
        channel = %request.channel,
        multiplier = %estimate.multiplier,
        is_capped = estimate.is_capped,
        "Estimate computed"
    );

    let response = EstimateResponse {
        estimate_id,
        channel: request.channel.to_string(),
        duration_weeks: request.duration_weeks,
        settings: SettingsResponse {
            mde_percent: format_percent(request.mde_percent),
            power_percent: format_percent(request.power_percent),
            significance: request.significance.to_string(),
        },
        budget: BudgetResponse {
            incremental_budget: format_money(estimate.incremental_budget),
            total_budget: format_money(estimate.total_budget),
            normal_budget: format_money(estimate.normal_budget),
            multiplier: format_multiplier(estimate.multiplier),
            is_capped: estimate.is_capped,
        },
        diagnostics: DiagnosticsResponse {
            required_conversions: format_count(estimate.required_conversions),
            baseline_conversions: format_count(estimate.baseline_conversions),
            observed_conversions: format_count(estimate.observed_conversions),
            statistical_multiplier: format_multiplier(estimate.statistical_multiplier),
            mde_category: estimate.mde_category,
            feasibility: Feasibility::from_multiplier(estimate.multiplier),
        },
        impact: ImpactResponse {
            control_forms: format_count(impact.control_forms),
            treatment_forms: format_count(impact.treatment_forms),
            incremental_forms: format_count(impact.incremental_forms),
            incremental_aqls: format_count(impact.incremental_aqls),
            cost_per_incremental_aql: format_money(impact.cost_per_incremental_aql),
        },
        context: ContextResponse {
            spend_share,
            form_share_percent: form_share,
        },
        presets,
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use liftgauge_shared::AppConfig;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> axum::Router {
        create_router(AppState {
            config: Arc::new(AppConfig::default()),
        })
    }

    async fn post_estimate(body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/estimate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    fn base_request() -> serde_json::Value {
        json!({
            "channel": "google_search",
            "monthly_spend": 30000,
            "cost_per_acquisition": 150,
            "duration_weeks": 8,
            "mde_percent": 10,
            "power_percent": 90,
            "significance": 0.05
        })
    }

    #[tokio::test]
    async fn test_estimate_happy_path() {
        let (status, body) = post_estimate(base_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["channel"], "Google Search");
        assert_eq!(body["budget"]["total_budget"], "57000.00");
        assert_eq!(body["budget"]["normal_budget"], "55427.25");
        assert_eq!(body["budget"]["incremental_budget"], "1572.75");
        assert_eq!(body["budget"]["is_capped"], false);
        assert_eq!(body["diagnostics"]["required_conversions"], "380");
        assert_eq!(body["diagnostics"]["mde_category"], "small");
        assert_eq!(body["diagnostics"]["feasibility"], "high");
        assert!(body["estimate_id"].is_string());
    }

    #[tokio::test]
    async fn test_estimate_presets() {
        let (status, body) = post_estimate(base_request()).await;

        assert_eq!(status, StatusCode::OK);
        let presets = body["presets"].as_array().unwrap();
        assert_eq!(presets.len(), 3);
        assert_eq!(presets[0]["preset"], "high");
        assert_eq!(presets[0]["label"], "High Confidence");
        assert_eq!(presets[0]["mde_percent"], "10.00");
        assert_eq!(presets[0]["power_percent"], "90.00");
        assert_eq!(presets[1]["preset"], "medium");
        assert_eq!(presets[2]["preset"], "low");
        assert_eq!(presets[2]["min_detectable_lift"], "15%");
        assert_eq!(presets[0]["success_probability"], "60-90%");
    }

    #[tokio::test]
    async fn test_default_cpa_from_channel() {
        let mut request = base_request();
        request["channel"] = json!("youtube");
        request.as_object_mut().unwrap().remove("cost_per_acquisition");

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["channel"], "YouTube");
        // 380 required conversions at the default $500 CPA
        assert_eq!(body["budget"]["total_budget"], "190000.00");
    }

    #[tokio::test]
    async fn test_budget_cap_applies() {
        let mut request = base_request();
        request["cost_per_acquisition"] = json!(500);
        request["mde_percent"] = json!(1);
        request["power_percent"] = json!(100);
        request["significance"] = json!(0.01);
        request["budget_cap"] = json!({"enabled": true, "max_multiplier": 3.0});

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["budget"]["is_capped"], true);
        assert_eq!(body["budget"]["multiplier"], "3.00");
        assert_eq!(body["budget"]["total_budget"], "166281.76");
        assert_eq!(body["diagnostics"]["mde_category"], "very_small");
    }

    #[tokio::test]
    async fn test_disabled_budget_cap_ignored() {
        let mut request = base_request();
        request["budget_cap"] = json!({"enabled": false, "max_multiplier": 1.0});

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["budget"]["is_capped"], false);
    }

    #[tokio::test]
    async fn test_context_blocks() {
        let mut request = base_request();
        request["total_marketing_spend"] = json!(100000);
        request["total_monthly_forms"] = json!(4000);

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["context"]["spend_share"]["share_percent"], "30.00");
        assert_eq!(body["context"]["spend_share"]["assessment"], "balanced");
        assert_eq!(body["context"]["form_share_percent"], "5.00");
    }

    #[tokio::test]
    async fn test_context_absent_without_totals() {
        let (status, body) = post_estimate(base_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["context"]["spend_share"].is_null());
        assert!(body["context"]["form_share_percent"].is_null());
    }

    #[tokio::test]
    async fn test_impact_block() {
        let (status, body) = post_estimate(base_request()).await;

        assert_eq!(status, StatusCode::OK);
        // 380 observed conversions, split 190/190, 10% lift, 65% AQL rate
        assert_eq!(body["impact"]["control_forms"], "190");
        assert_eq!(body["impact"]["incremental_forms"], "19");
        assert_eq!(body["impact"]["incremental_aqls"], "12");
    }

    #[tokio::test]
    async fn test_rejects_bad_significance() {
        let mut request = base_request();
        request["significance"] = json!(0.2);

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_significance");
    }

    #[tokio::test]
    async fn test_rejects_duration_out_of_range() {
        let mut request = base_request();
        request["duration_weeks"] = json!(20);

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_duration");
    }

    #[tokio::test]
    async fn test_rejects_mde_out_of_range() {
        let mut request = base_request();
        request["mde_percent"] = json!(0);

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_mde");
    }

    #[tokio::test]
    async fn test_rejects_power_out_of_range() {
        let mut request = base_request();
        request["power_percent"] = json!(40);

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_power");
    }

    #[tokio::test]
    async fn test_rejects_cap_above_ceiling() {
        let mut request = base_request();
        request["budget_cap"] = json!({"enabled": true, "max_multiplier": 50.0});

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_max_multiplier");
    }

    #[tokio::test]
    async fn test_rejects_negative_spend() {
        let mut request = base_request();
        request["monthly_spend"] = json!(-100);

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_monthly_spend");
    }

    #[tokio::test]
    async fn test_zero_spend_allowed() {
        let mut request = base_request();
        request["monthly_spend"] = json!(0);

        let (status, body) = post_estimate(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["budget"]["normal_budget"], "0.00");
        assert_eq!(body["diagnostics"]["statistical_multiplier"], "2.00");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
    }
}
