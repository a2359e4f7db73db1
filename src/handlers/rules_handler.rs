use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::models::common::ApiResponse;
use crate::pool::lifecycle::LIVE_WINDOW_MINUTES;
use crate::pool::lock::LOCK_WINDOW_MINUTES;
use crate::pool::scoring::ScoringRules;

/// The active scoring table and window policies, so clients render the
/// rule sheet from the same configuration the engine scores with.
pub async fn get_rules(rules: web::Data<ScoringRules>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Rules",
        json!({
            "scoring": rules.get_ref(),
            "joker_multiplier": 2,
            "lock_window_minutes": LOCK_WINDOW_MINUTES,
            "live_window_minutes": LIVE_WINDOW_MINUTES,
        }),
    )))
}
