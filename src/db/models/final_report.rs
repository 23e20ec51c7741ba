use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::final_reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FinalReport {
    pub id: i32,
    pub project_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub content: String,
    pub attachment: Option<String>,
}

#[derive(Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::final_reports)]
pub struct NewFinalReport {
    pub project_id: i32,
    pub content: String,
    pub attachment: Option<String>,
}
