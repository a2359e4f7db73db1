use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::handlers::fixture_handler::build_fixture_view;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::fixture::FixtureView;
use crate::models::prediction::UpsertPredictionRequest;
use crate::pool::lock::ensure_open;
use crate::pool::scoring::ScoringRules;
use crate::pool::validation::validate_score_pair;

#[tracing::instrument(
    name = "Upsert prediction",
    skip(request, pool, claims),
    fields(username = %claims.username)
)]
pub async fn upsert_prediction(
    fixture_id: Uuid,
    request: web::Json<UpsertPredictionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let fixture = match db::fixtures::find_fixture(&pool, fixture_id).await {
        Ok(Some(fixture)) => fixture,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error("Fixture not found")));
        }
        Err(e) => {
            tracing::error!("Failed to load fixture {}: {:?}", fixture_id, e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to save prediction")));
        }
    };

    // The authoritative lock check; the UI hiding the edit button is
    // cosmetic, this is what actually rejects late writes.
    if ensure_open(fixture.kickoff_time, Utc::now()).is_err() {
        tracing::info!(
            "Rejected locked prediction for fixture {} by {}",
            fixture_id,
            claims.username
        );
        return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error_with_code(
            "Predictions are closed for this match",
            "predictions_closed",
        )));
    }

    if let Err(message) = validate_score_pair(request.home_score, request.away_score) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(message)));
    }

    match db::predictions::upsert_prediction(
        &pool,
        user_id,
        fixture_id,
        request.home_score,
        request.away_score,
        request.is_joker,
    )
    .await
    {
        Ok(prediction) => {
            tracing::info!(
                "Saved prediction {}-{} (joker: {}) for fixture {}",
                prediction.home_score,
                prediction.away_score,
                prediction.is_joker,
                fixture_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success("Prediction saved", prediction)))
        }
        Err(e) => {
            tracing::error!("Failed to upsert prediction: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to save prediction")))
        }
    }
}

/// The caller's predictions as annotated fixture views (phase, lock state,
/// earned points per match).
#[tracing::instrument(name = "List my predictions", skip(pool, rules, claims))]
pub async fn list_my_predictions(
    pool: web::Data<PgPool>,
    rules: web::Data<ScoringRules>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let feed = async {
        let fixtures = db::fixtures::list_fixtures(&pool).await?;
        let teams = db::teams::team_map(&pool).await?;
        let predictions = db::predictions::predictions_for_user(&pool, user_id).await?;
        Ok::<_, sqlx::Error>((fixtures, teams, predictions))
    }
    .await;

    match feed {
        Ok((fixtures, teams, predictions)) => {
            let now = Utc::now();
            let views: Vec<FixtureView> = fixtures
                .into_iter()
                .filter(|fixture| predictions.contains_key(&fixture.id))
                .filter_map(|fixture| {
                    build_fixture_view(fixture, &teams, &predictions, &rules, now)
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success("Predictions", views)))
        }
        Err(e) => {
            tracing::error!("Failed to load predictions: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to load predictions")))
        }
    }
}
