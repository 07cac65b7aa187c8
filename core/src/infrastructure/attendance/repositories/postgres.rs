use chrono::Utc;
use sqlx::{PgPool, Row};

use crate::{
    domain::{
        attendance::{entities::Attendance, ports::AttendanceRepository},
        common::{
            CoreError,
            unit_of_work::{Change, ChangeSet},
        },
        gig::entities::GigId,
        user::entities::UserId,
    },
    infrastructure::gig::repositories::postgres::{GIG_COLUMNS, GIG_JOINS, gig_from_row},
};

#[derive(Clone)]
pub struct PostgresAttendanceRepository {
    pool: PgPool,
    changes: ChangeSet,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool, changes: ChangeSet) -> Self {
        Self { pool, changes }
    }
}

impl AttendanceRepository for PostgresAttendanceRepository {
    async fn get_attendance(
        &self,
        gig_id: &GigId,
        attendee_id: &UserId,
    ) -> Result<Option<Attendance>, CoreError> {
        let row = sqlx::query(
            r#"
            SELECT gig_id, attendee_id
            FROM attendances
            WHERE gig_id = $1 AND attendee_id = $2
            "#,
        )
        .bind(gig_id.0)
        .bind(attendee_id.0)
        .fetch_optional(&self.pool)
        .await?;

        let attendance = match row {
            Some(row) => Some(Attendance::new(
                GigId(row.try_get("gig_id")?),
                UserId(row.try_get("attendee_id")?),
            )),
            None => None,
        };

        Ok(attendance)
    }

    async fn get_future_attendances(
        &self,
        attendee_id: &UserId,
    ) -> Result<Vec<Attendance>, CoreError> {
        let sql = format!(
            r#"
            SELECT a.attendee_id, {GIG_COLUMNS}
            FROM attendances a
            JOIN gigs g ON g.id = a.gig_id
            {GIG_JOINS}
            WHERE a.attendee_id = $1 AND g.date_time > $2
            ORDER BY g.date_time ASC
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(attendee_id.0)
            .bind(Utc::now())
            .fetch_all(&self.pool)
            .await?;

        let mut attendances = Vec::with_capacity(rows.len());
        for row in &rows {
            let gig = gig_from_row(row)?;
            attendances.push(Attendance {
                gig_id: gig.id,
                attendee_id: UserId(row.try_get("attendee_id")?),
                gig: Some(gig),
            });
        }

        Ok(attendances)
    }

    async fn get_gig_attendees(&self, gig_id: &GigId) -> Result<Vec<UserId>, CoreError> {
        let attendees: Vec<uuid::Uuid> =
            sqlx::query_scalar("SELECT attendee_id FROM attendances WHERE gig_id = $1")
                .bind(gig_id.0)
                .fetch_all(&self.pool)
                .await?;

        Ok(attendees.into_iter().map(UserId).collect())
    }

    async fn add(&self, attendance: Attendance) {
        self.changes.stage(Change::AddAttendance(attendance)).await;
    }

    async fn remove(&self, attendance: Attendance) {
        self.changes.stage(Change::RemoveAttendance(attendance)).await;
    }
}
