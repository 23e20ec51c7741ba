use diesel::prelude::*;

use crate::{
    db::enums::Role,
    db::models::{Department, UserBasicInfo},
    db::repositories::{AuthRepo, DepartmentsRepo},
    error::AppError,
};

/// Reference data for project forms.
pub struct DirectoryService;

impl DirectoryService {
    pub fn departments(conn: &mut PgConnection) -> Result<Vec<Department>, AppError> {
        Ok(DepartmentsRepo::list_all(conn)?)
    }

    pub fn auditors(conn: &mut PgConnection) -> Result<Vec<UserBasicInfo>, AppError> {
        Ok(AuthRepo::list_with_role(conn, Role::Auditor)?
            .into_iter()
            .map(UserBasicInfo::from)
            .collect())
    }
}
