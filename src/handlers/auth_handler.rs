use actix_web::{web, HttpResponse, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::config::jwt::JwtSettings;
use crate::db;
use crate::middleware::auth::Claims;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::utils::password::verify_password;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        email = %login_form.email
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse> {
    let credentials = match db::users::find_credentials_by_email(&pool, &login_form.email).await {
        Ok(Some(credentials)) => credentials,
        Ok(None) => {
            tracing::info!("User not found or invalid credentials");
            return Ok(HttpResponse::Unauthorized().finish());
        }
        Err(e) => {
            tracing::error!("Database error occurred: {:?}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    if !verify_password(login_form.password.expose_secret(), &credentials.password_hash) {
        tracing::info!("Invalid password");
        return Ok(HttpResponse::Unauthorized().finish());
    }

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(jwt_settings.expiration_hours))
        .expect("Valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: credentials.id.to_string(),
        username: credentials.username,
        role: credentials.role,
        exp: expiration,
    };

    let token = match encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Error generating JWT token: {:?}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
