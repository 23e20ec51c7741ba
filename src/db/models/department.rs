use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub manager_id: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Department {
    /// True when `user_id` is this department's designated manager.
    pub fn is_managed_by(&self, user_id: i32) -> bool {
        self.manager_id == Some(user_id)
    }
}
