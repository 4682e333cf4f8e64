//! Diesel row models for project persistence.

use super::schema::projects;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Internal project identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Repository owner login.
    pub repo_owner: String,
    /// Repository name.
    pub repo_name: String,
    /// Protected integration token.
    pub protected_token: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Internal project identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Repository owner login.
    pub repo_owner: String,
    /// Repository name.
    pub repo_name: String,
    /// Protected integration token.
    pub protected_token: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
