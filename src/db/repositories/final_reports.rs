use diesel::prelude::*;

use crate::db::models::final_report::{FinalReport, NewFinalReport};

pub struct FinalReportsRepo;

impl FinalReportsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_final_report: &NewFinalReport,
    ) -> Result<FinalReport, diesel::result::Error> {
        diesel::insert_into(crate::schema::final_reports::table)
            .values(new_final_report)
            .returning(FinalReport::as_returning())
            .get_result(conn)
    }

    pub fn find_for_project(
        conn: &mut PgConnection,
        target_project_id: i32,
    ) -> Result<Option<FinalReport>, diesel::result::Error> {
        use crate::schema::final_reports::dsl::*;
        final_reports
            .filter(project_id.eq(target_project_id))
            .select(FinalReport::as_select())
            .first(conn)
            .optional()
    }
}
