// src/routes/pool.rs
use actix_web::{get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::{
    fixture_handler, group_handler, leaderboard_handler, prediction_handler, rules_handler,
};
use crate::handlers::leaderboard_handler::LeaderboardQuery;
use crate::middleware::auth::Claims;
use crate::models::group::{CreateGroupRequest, JoinGroupRequest};
use crate::models::prediction::UpsertPredictionRequest;
use crate::pool::scoring::ScoringRules;

/// Fixture feed with phase, lock state and the caller's predictions
#[get("/fixtures")]
async fn get_fixtures(
    pool: web::Data<PgPool>,
    rules: web::Data<ScoringRules>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    fixture_handler::list_fixtures(pool, rules, claims).await
}

/// Single fixture by ID
#[get("/fixtures/{fixture_id}")]
async fn get_fixture(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    rules: web::Data<ScoringRules>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    fixture_handler::get_fixture(fixture_id, pool, rules, claims).await
}

/// Create or overwrite the caller's prediction for a fixture
#[put("/fixtures/{fixture_id}/prediction")]
async fn put_prediction(
    path: web::Path<Uuid>,
    request: web::Json<UpsertPredictionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    prediction_handler::upsert_prediction(fixture_id, request, pool, claims).await
}

/// The caller's predictions with per-match points
#[get("/predictions")]
async fn get_my_predictions(
    pool: web::Data<PgPool>,
    rules: web::Data<ScoringRules>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    prediction_handler::list_my_predictions(pool, rules, claims).await
}

/// Create a new group; the caller becomes its owner
#[post("/groups")]
async fn create_group(
    request: web::Json<CreateGroupRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    group_handler::create_group(request, pool, claims).await
}

/// Join a group by its shareable code
#[post("/groups/join")]
async fn join_group(
    request: web::Json<JoinGroupRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    group_handler::join_group(request, pool, claims).await
}

/// The caller's groups
#[get("/groups")]
async fn get_my_groups(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    group_handler::list_my_groups(pool, claims).await
}

/// Active members of one of the caller's groups
#[get("/groups/{group_id}/members")]
async fn get_group_members(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let group_id = path.into_inner();
    group_handler::list_group_members(group_id, pool, claims).await
}

/// Ranking, group-scoped via ?group_id=
#[get("/leaderboard")]
async fn get_leaderboard(
    query: web::Query<LeaderboardQuery>,
    pool: web::Data<PgPool>,
    rules: web::Data<ScoringRules>,
) -> Result<HttpResponse> {
    leaderboard_handler::get_leaderboard(query, pool, rules).await
}

/// Active scoring table and window policies
#[get("/rules")]
async fn get_rules(rules: web::Data<ScoringRules>) -> Result<HttpResponse> {
    rules_handler::get_rules(rules).await
}
