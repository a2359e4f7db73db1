use std::collections::HashMap;

use actix_web::{web, HttpResponse, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::fixture::{CreateFixtureRequest, Fixture, FixtureResultRequest, FixtureView};
use crate::models::prediction::Prediction;
use crate::models::team::Team;
use crate::pool::lifecycle::{resolve_phase, seconds_until_kickoff};
use crate::pool::lock::predictions_open;
use crate::pool::scoring::{score, tier_for, ScoringRules};
use crate::pool::validation::validate_score_pair;

/// Join a fixture against team metadata and the caller's prediction into
/// the view the clients render. Returns None when a team reference cannot
/// be resolved; the feed tolerates and skips such rows rather than failing
/// the whole listing.
pub fn build_fixture_view(
    fixture: Fixture,
    teams: &HashMap<String, Team>,
    predictions: &HashMap<Uuid, Prediction>,
    rules: &ScoringRules,
    now: DateTime<Utc>,
) -> Option<FixtureView> {
    let home_team = match teams.get(&fixture.home_team_id) {
        Some(team) => team.clone(),
        None => {
            tracing::warn!("Fixture {} references unknown team {}", fixture.id, fixture.home_team_id);
            return None;
        }
    };
    let away_team = match teams.get(&fixture.away_team_id) {
        Some(team) => team.clone(),
        None => {
            tracing::warn!("Fixture {} references unknown team {}", fixture.id, fixture.away_team_id);
            return None;
        }
    };

    let prediction = predictions.get(&fixture.id).cloned();
    let points = prediction
        .as_ref()
        .and_then(|p| score(p, &fixture, rules));
    let tier = prediction.as_ref().and_then(|p| tier_for(p, &fixture));

    Some(FixtureView {
        phase: resolve_phase(fixture.kickoff_time, now, fixture.has_result()),
        predictions_open: predictions_open(fixture.kickoff_time, now),
        kickoff_in_seconds: seconds_until_kickoff(fixture.kickoff_time, now),
        home_team,
        away_team,
        prediction,
        points,
        tier,
        fixture,
    })
}

#[tracing::instrument(name = "List fixtures", skip(pool, rules, claims))]
pub async fn list_fixtures(
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
                .filter_map(|fixture| {
                    build_fixture_view(fixture, &teams, &predictions, &rules, now)
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success("Fixtures", views)))
        }
        Err(e) => {
            tracing::error!("Failed to load fixture feed: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to load fixtures")))
        }
    }
}

#[tracing::instrument(name = "Get fixture", skip(pool, rules, claims))]
pub async fn get_fixture(
    fixture_id: Uuid,
    pool: web::Data<PgPool>,
    rules: web::Data<ScoringRules>,
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
                .json(ApiResponse::<()>::error("Failed to load fixture")));
        }
    };

    let context = async {
        let teams = db::teams::team_map(&pool).await?;
        let predictions = db::predictions::predictions_for_user(&pool, user_id).await?;
        Ok::<_, sqlx::Error>((teams, predictions))
    }
    .await;

    match context {
        Ok((teams, predictions)) => {
            match build_fixture_view(fixture, &teams, &predictions, &rules, Utc::now()) {
                Some(view) => Ok(HttpResponse::Ok().json(ApiResponse::success("Fixture", view))),
                None => Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::<()>::error("Fixture references unknown teams"))),
            }
        }
        Err(e) => {
            tracing::error!("Failed to load fixture context: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to load fixture")))
        }
    }
}

#[tracing::instrument(
    name = "Create fixture",
    skip(request, pool, claims),
    fields(admin_user = %claims.username)
)]
pub async fn create_fixture(
    request: web::Json<CreateFixtureRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    if request.home_team_id == request.away_team_id {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("A team cannot play itself")));
    }

    for team_id in [&request.home_team_id, &request.away_team_id] {
        match db::teams::find_team(&pool, team_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error(format!("Unknown team: {}", team_id))));
            }
            Err(e) => {
                tracing::error!("Failed to look up team {}: {:?}", team_id, e);
                return Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::<()>::error("Failed to create fixture")));
            }
        }
    }

    match db::fixtures::insert_fixture(&pool, &request).await {
        Ok(fixture) => {
            tracing::info!(
                "Created fixture {} ({} vs {})",
                fixture.id,
                fixture.home_team_id,
                fixture.away_team_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success("Fixture created", fixture)))
        }
        Err(e) => {
            tracing::error!("Failed to create fixture: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to create fixture")))
        }
    }
}

#[tracing::instrument(
    name = "Record fixture result",
    skip(request, pool, claims),
    fields(admin_user = %claims.username)
)]
pub async fn record_fixture_result(
    fixture_id: Uuid,
    request: web::Json<FixtureResultRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    if let Err(message) = validate_score_pair(request.home_score, request.away_score) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(message)));
    }

    match db::fixtures::record_result(&pool, fixture_id, request.home_score, request.away_score)
        .await
    {
        Ok(Some(fixture)) => {
            tracing::info!(
                "Recorded result for fixture {}: {} - {}",
                fixture.id,
                request.home_score,
                request.away_score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success("Result recorded", fixture)))
        }
        Ok(None) => {
            // Either the fixture does not exist, or it already carries a
            // result; results are written once and never retracted.
            match db::fixtures::find_fixture(&pool, fixture_id).await {
                Ok(Some(_)) => Ok(HttpResponse::Conflict()
                    .json(ApiResponse::<()>::error("Result already recorded for this fixture"))),
                Ok(None) => Ok(HttpResponse::NotFound()
                    .json(ApiResponse::<()>::error("Fixture not found"))),
                Err(e) => {
                    tracing::error!("Failed to re-check fixture {}: {:?}", fixture_id, e);
                    Ok(HttpResponse::InternalServerError()
                        .json(ApiResponse::<()>::error("Failed to record result")))
                }
            }
        }
        Err(e) => {
            tracing::error!("Failed to record result for {}: {:?}", fixture_id, e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to record result")))
        }
    }
}
