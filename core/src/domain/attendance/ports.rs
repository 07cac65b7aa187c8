use chrono::Utc;

use crate::domain::{
    attendance::entities::Attendance,
    common::{
        CoreError,
        unit_of_work::{Change, ChangeSet, MockDataSource},
    },
    gig::entities::GigId,
    user::entities::UserId,
};

pub trait AttendanceRepository: Send + Sync {
    fn get_attendance(
        &self,
        gig_id: &GigId,
        attendee_id: &UserId,
    ) -> impl Future<Output = Result<Option<Attendance>, CoreError>> + Send;

    /// Attendances of `attendee_id` whose gig starts after now, with the gig loaded.
    fn get_future_attendances(
        &self,
        attendee_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Attendance>, CoreError>> + Send;

    fn get_gig_attendees(
        &self,
        gig_id: &GigId,
    ) -> impl Future<Output = Result<Vec<UserId>, CoreError>> + Send;

    fn add(&self, attendance: Attendance) -> impl Future<Output = ()> + Send;

    fn remove(&self, attendance: Attendance) -> impl Future<Output = ()> + Send;
}

pub trait AttendanceService: Send + Sync {
    /// RSVPs `attendee_id` to a gig.
    ///
    /// # Returns
    ///
    /// - `Ok(Attendance)` - The new attendance
    /// - `Err(CoreError::GigNotFound)` - No gig with this id
    /// - `Err(CoreError::AttendanceAlreadyExists)` - The user already attends
    fn attend(
        &self,
        attendee_id: &UserId,
        gig_id: &GigId,
    ) -> impl Future<Output = Result<Attendance, CoreError>> + Send;

    fn unattend(
        &self,
        attendee_id: &UserId,
        gig_id: &GigId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_future_attendances(
        &self,
        attendee_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Attendance>, CoreError>> + Send;
}

#[derive(Clone)]
pub struct MockAttendanceRepository {
    source: MockDataSource,
    changes: ChangeSet,
}

impl MockAttendanceRepository {
    pub fn new(source: MockDataSource, changes: ChangeSet) -> Self {
        Self { source, changes }
    }
}

impl AttendanceRepository for MockAttendanceRepository {
    async fn get_attendance(
        &self,
        gig_id: &GigId,
        attendee_id: &UserId,
    ) -> Result<Option<Attendance>, CoreError> {
        let data = self.source.lock().await;

        let attendance = data
            .attendances
            .iter()
            .find(|a| &a.gig_id == gig_id && &a.attendee_id == attendee_id)
            .cloned();

        Ok(attendance)
    }

    async fn get_future_attendances(
        &self,
        attendee_id: &UserId,
    ) -> Result<Vec<Attendance>, CoreError> {
        let data = self.source.lock().await;
        let now = Utc::now();

        let attendances = data
            .attendances
            .iter()
            .filter(|a| &a.attendee_id == attendee_id)
            .filter_map(|a| {
                let gig = data.find_gig(&a.gig_id)?;
                gig.starts_after(now).then(|| Attendance {
                    gig: Some(gig),
                    ..a.clone()
                })
            })
            .collect();

        Ok(attendances)
    }

    async fn get_gig_attendees(&self, gig_id: &GigId) -> Result<Vec<UserId>, CoreError> {
        let data = self.source.lock().await;

        let attendees = data
            .attendances
            .iter()
            .filter(|a| &a.gig_id == gig_id)
            .map(|a| a.attendee_id)
            .collect();

        Ok(attendees)
    }

    async fn add(&self, attendance: Attendance) {
        self.changes.stage(Change::AddAttendance(attendance)).await;
    }

    async fn remove(&self, attendance: Attendance) {
        self.changes.stage(Change::RemoveAttendance(attendance)).await;
    }
}
