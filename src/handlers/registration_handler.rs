use actix_web::{web, HttpResponse, Result};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::db;
use crate::db::users::NewUser;
use crate::models::common::ApiResponse;
use crate::models::user::RegistrationRequest;
use crate::utils::password::hash_password;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        username = %user_form.username,
        email = %user_form
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    if let Err(message) = validate_registration(&user_form) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(message)));
    }

    // Preferred team is optional, but when given it must reference a seeded team
    if let Some(team_id) = user_form.preferred_team.as_deref() {
        match db::teams::find_team(&pool, team_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error(format!("Unknown team: {}", team_id))));
            }
            Err(e) => {
                tracing::error!("Failed to look up preferred team: {:?}", e);
                return Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::<()>::error("Registration failed")));
            }
        }
    }

    match db::users::find_credentials_by_email(&pool, &user_form.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
                "Email already registered, enter a new email address",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check existing email: {:?}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Registration failed")));
        }
    }

    let password_hash = hash_password(user_form.password.expose_secret());
    let new_user = NewUser {
        username: &user_form.username,
        email: &user_form.email,
        password_hash: &password_hash,
        first_name: &user_form.first_name,
        last_name: &user_form.last_name,
        preferred_team: user_form.preferred_team.as_deref(),
    };

    match db::users::insert_user(&pool, new_user).await {
        Ok(user_id) => {
            tracing::info!("Registered user {} ({})", user_form.username, user_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success("User registered", serde_json::json!({ "id": user_id }))))
        }
        Err(e) => {
            tracing::error!("Failed to insert user: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Registration failed")))
        }
    }
}

fn validate_registration(request: &RegistrationRequest) -> Result<(), String> {
    if request.username.trim().len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if !request.email.contains('@') {
        return Err("Invalid email address".to_string());
    }
    if request.password.expose_secret().len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err("First and last name are required".to_string());
    }
    Ok(())
}
