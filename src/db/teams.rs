use std::collections::HashMap;

use sqlx::PgPool;

use crate::models::team::Team;

pub async fn list_teams(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        "SELECT id, name_en, name_pt, name_es, flag, color FROM teams ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_team(pool: &PgPool, team_id: &str) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        "SELECT id, name_en, name_pt, name_es, flag, color FROM teams WHERE id = $1",
    )
    .bind(team_id)
    .fetch_optional(pool)
    .await
}

/// Teams keyed by id, for joining fixture rows against their metadata in
/// one pass instead of a query per fixture.
pub async fn team_map(pool: &PgPool) -> Result<HashMap<String, Team>, sqlx::Error> {
    let teams = list_teams(pool).await?;
    Ok(teams.into_iter().map(|team| (team.id.clone(), team)).collect())
}
