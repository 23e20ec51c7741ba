use diesel::prelude::*;

use crate::db::enums::Role;
use crate::db::models::auth::User;

pub struct AuthRepo;

impl AuthRepo {
    pub fn find_by_username(
        conn: &mut PgConnection,
        target_username: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(username.eq(target_username))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_active_by_id(
        conn: &mut PgConnection,
        user_id: i32,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(user_id))
            .filter(is_active.eq(true))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_ids(
        conn: &mut PgConnection,
        user_ids: &[i32],
    ) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq_any(user_ids))
            .order(id.asc())
            .select(User::as_select())
            .load(conn)
    }

    pub fn roles_for_user(
        conn: &mut PgConnection,
        target_user_id: i32,
    ) -> Result<Vec<Role>, diesel::result::Error> {
        use crate::schema::user_roles::dsl::*;
        user_roles
            .filter(user_id.eq(target_user_id))
            .select(role)
            .load::<Role>(conn)
    }

    pub fn user_has_role(
        conn: &mut PgConnection,
        target_user_id: i32,
        target_role: Role,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::user_roles::dsl::*;
        diesel::select(diesel::dsl::exists(
            user_roles
                .filter(user_id.eq(target_user_id))
                .filter(role.eq(target_role)),
        ))
        .get_result(conn)
    }

    /// Active users holding `target_role`, ordered by name.
    pub fn list_with_role(
        conn: &mut PgConnection,
        target_role: Role,
    ) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::{user_roles, users};
        users::table
            .inner_join(user_roles::table)
            .filter(user_roles::role.eq(target_role))
            .filter(users::is_active.eq(true))
            .order(users::name.asc())
            .select(User::as_select())
            .load(conn)
    }
}
