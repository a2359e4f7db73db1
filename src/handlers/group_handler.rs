use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::common::ApiResponse;
use crate::models::group::{CreateGroupRequest, GroupRole, JoinGroupRequest};
use crate::middleware::auth::Claims;
use crate::pool::validation::{normalize_join_code, validate_group_name};
use crate::utils::join_code::generate_join_code;

/// Collisions on a 36^7 space are rare; a handful of retries is plenty.
const CODE_GENERATION_ATTEMPTS: usize = 5;

#[tracing::instrument(
    name = "Create group",
    skip(request, pool, claims),
    fields(username = %claims.username, group_name = %request.name)
)]
pub async fn create_group(
    request: web::Json<CreateGroupRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let owner_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    if let Err(message) = validate_group_name(&request.name) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(message)));
    }

    let mut code = None;
    for _ in 0..CODE_GENERATION_ATTEMPTS {
        let candidate = generate_join_code();
        match db::groups::code_exists(&pool, &candidate).await {
            Ok(false) => {
                code = Some(candidate);
                break;
            }
            Ok(true) => continue,
            Err(e) => {
                tracing::error!("Failed to check join code: {:?}", e);
                return Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::<()>::error("Failed to create group")));
            }
        }
    }
    let code = match code {
        Some(code) => code,
        None => {
            tracing::error!("Exhausted join code generation attempts");
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to create group")));
        }
    };

    match db::groups::insert_group(
        &pool,
        &code,
        request.name.trim(),
        request.description.as_deref(),
        owner_id,
    )
    .await
    {
        Ok(group) => {
            tracing::info!("Created group {} with code {}", group.id, group.code);
            Ok(HttpResponse::Created().json(ApiResponse::success("Group created", group)))
        }
        Err(e) => {
            tracing::error!("Failed to create group: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to create group")))
        }
    }
}

#[tracing::instrument(
    name = "Join group",
    skip(request, pool, claims),
    fields(username = %claims.username)
)]
pub async fn join_group(
    request: web::Json<JoinGroupRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let code = match normalize_join_code(&request.code) {
        Ok(code) => code,
        Err(message) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(message)));
        }
    };

    let group = match db::groups::find_group_by_code(&pool, &code).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error("Invalid group code")));
        }
        Err(e) => {
            tracing::error!("Failed to look up group code: {:?}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to join group")));
        }
    };

    match db::groups::find_membership(&pool, group.id, user_id).await {
        Ok(Some(membership)) if membership.is_active => {
            return Ok(HttpResponse::Conflict()
                .json(ApiResponse::<()>::error("Already a member of this group")));
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Failed to check membership: {:?}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to join group")));
        }
    }

    match db::groups::insert_membership(&pool, group.id, user_id, GroupRole::Member).await {
        Ok(membership) => {
            tracing::info!("User {} joined group {}", user_id, group.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                "Joined group",
                serde_json::json!({ "group": group, "membership": membership }),
            )))
        }
        Err(e) => {
            tracing::error!("Failed to insert membership: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to join group")))
        }
    }
}

#[tracing::instrument(name = "List my groups", skip(pool, claims))]
pub async fn list_my_groups(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    match db::groups::groups_for_user(&pool, user_id).await {
        Ok(groups) => Ok(HttpResponse::Ok().json(ApiResponse::success("Groups", groups))),
        Err(e) => {
            tracing::error!("Failed to list groups: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to load groups")))
        }
    }
}

#[tracing::instrument(name = "List group members", skip(pool, claims))]
pub async fn list_group_members(
    group_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    // Member lists are visible to members only
    match db::groups::find_membership(&pool, group_id, user_id).await {
        Ok(Some(membership)) if membership.is_active => {}
        Ok(_) => {
            return Ok(HttpResponse::Forbidden()
                .json(ApiResponse::<()>::error("Not a member of this group")));
        }
        Err(e) => {
            tracing::error!("Failed to check membership: {:?}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to load members")));
        }
    }

    match db::groups::list_members(&pool, group_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success("Members", members))),
        Err(e) => {
            tracing::error!("Failed to list members: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to load members")))
        }
    }
}
