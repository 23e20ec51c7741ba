use diesel::prelude::*;

use crate::db::models::department::Department;

pub struct DepartmentsRepo;

impl DepartmentsRepo {
    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Department>, diesel::result::Error> {
        use crate::schema::departments::dsl::*;
        departments
            .order(name.asc())
            .select(Department::as_select())
            .load(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        department_id: i32,
    ) -> Result<Option<Department>, diesel::result::Error> {
        use crate::schema::departments::dsl::*;
        departments
            .filter(id.eq(department_id))
            .select(Department::as_select())
            .first(conn)
            .optional()
    }

    /// The department a user manages. A user managing several departments
    /// gets the one with the lowest id.
    pub fn find_managed_by(
        conn: &mut PgConnection,
        user_id: i32,
    ) -> Result<Option<Department>, diesel::result::Error> {
        use crate::schema::departments::dsl::*;
        departments
            .filter(manager_id.eq(user_id))
            .order(id.asc())
            .select(Department::as_select())
            .first(conn)
            .optional()
    }
}
