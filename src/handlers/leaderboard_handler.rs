use std::collections::HashMap;

use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::common::ApiResponse;
use crate::pool::leaderboard::{rank, Entrant};
use crate::pool::scoring::ScoringRules;

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub group_id: Option<Uuid>,
}

/// Compute the ranking for a group, or for the whole population when no
/// group is given (the ungrouped fallback). Recomputed from a point-in-time
/// snapshot on every request; nothing is persisted.
#[tracing::instrument(name = "Get leaderboard", skip(pool, rules))]
pub async fn get_leaderboard(
    query: web::Query<LeaderboardQuery>,
    pool: web::Data<PgPool>,
    rules: web::Data<ScoringRules>,
) -> Result<HttpResponse> {
    let snapshot = async {
        let users = db::users::list_users_in_registration_order(&pool).await?;
        let mut predictions = db::predictions::predictions_by_user(&pool).await?;
        let fixtures = db::fixtures::list_fixtures(&pool).await?;

        let entrants: Vec<Entrant> = users
            .into_iter()
            .map(|user| Entrant {
                user_id: user.id,
                username: user.username.clone(),
                display_name: user.display_name(),
                preferred_team: user.preferred_team.clone(),
                predictions: predictions.remove(&user.id).unwrap_or_else(HashMap::new),
            })
            .collect();

        // An unknown group id yields an empty member set and therefore an
        // empty ranking; that is a defined outcome, not an error.
        let member_filter = match query.group_id {
            Some(group_id) => Some(db::groups::active_member_ids(&pool, group_id).await?),
            None => None,
        };
        let group = match query.group_id {
            Some(group_id) => db::groups::find_group(&pool, group_id).await?,
            None => None,
        };

        Ok::<_, sqlx::Error>((entrants, fixtures, member_filter, group))
    }
    .await;

    match snapshot {
        Ok((entrants, fixtures, member_filter, group)) => {
            let entries = rank(&entrants, &fixtures, member_filter.as_ref(), &rules);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                "Leaderboard",
                json!({
                    "group": group,
                    "entries": entries,
                    "generated_at": Utc::now(),
                }),
            )))
        }
        Err(e) => {
            tracing::error!("Failed to compute leaderboard: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to compute leaderboard")))
        }
    }
}
