use actix_web::{get, HttpResponse, Result};

#[get("/backend_health")]
async fn backend_health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().finish())
}
