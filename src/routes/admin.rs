// src/routes/admin.rs
use actix_web::{post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::fixture_handler;
use crate::middleware::auth::Claims;
use crate::models::fixture::{CreateFixtureRequest, FixtureResultRequest};

/// Create a fixture
#[post("/fixtures")]
async fn create_fixture(
    request: web::Json<CreateFixtureRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    fixture_handler::create_fixture(request, pool, claims).await
}

/// Record a fixture's official result (write-once)
#[put("/fixtures/{fixture_id}/result")]
async fn record_fixture_result(
    path: web::Path<Uuid>,
    request: web::Json<FixtureResultRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    fixture_handler::record_fixture_result(fixture_id, request, pool, claims).await
}
