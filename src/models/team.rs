use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Competition team reference data. Seeded by migration, read-only at
/// runtime; `id` is the short FIFA-style code ("BRA", "MEX", ...).
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Team {
    pub id: String,
    pub name_en: String,
    pub name_pt: String,
    pub name_es: String,
    pub flag: String,
    pub color: String,
}
