use crate::domain::{
    attendance::{
        entities::Attendance,
        ports::{AttendanceRepository, AttendanceService},
    },
    common::{
        CoreError,
        services::Service,
        unit_of_work::{UnitOfWork, UnitOfWorkProvider},
    },
    gig::{entities::GigId, ports::GigRepository},
    health::port::HealthRepository,
    user::entities::UserId,
};

impl<P, H> AttendanceService for Service<P, H>
where
    P: UnitOfWorkProvider,
    H: HealthRepository,
{
    #[tracing::instrument(skip(self))]
    async fn attend(&self, attendee_id: &UserId, gig_id: &GigId) -> Result<Attendance, CoreError> {
        let uow = self.provider.begin();

        if uow.gigs().get_gig(gig_id).await?.is_none() {
            return Err(CoreError::GigNotFound { id: *gig_id });
        }

        if uow
            .attendances()
            .get_attendance(gig_id, attendee_id)
            .await?
            .is_some()
        {
            return Err(CoreError::AttendanceAlreadyExists {
                gig_id: *gig_id,
                attendee_id: *attendee_id,
            });
        }

        let attendance = Attendance::new(*gig_id, *attendee_id);
        uow.attendances().add(attendance.clone()).await;
        uow.complete().await?;

        Ok(attendance)
    }

    #[tracing::instrument(skip(self))]
    async fn unattend(&self, attendee_id: &UserId, gig_id: &GigId) -> Result<(), CoreError> {
        let uow = self.provider.begin();

        let attendance = uow
            .attendances()
            .get_attendance(gig_id, attendee_id)
            .await?
            .ok_or(CoreError::AttendanceNotFound {
                gig_id: *gig_id,
                attendee_id: *attendee_id,
            })?;

        uow.attendances().remove(attendance).await;
        uow.complete().await
    }

    async fn get_future_attendances(
        &self,
        attendee_id: &UserId,
    ) -> Result<Vec<Attendance>, CoreError> {
        self.provider
            .begin()
            .attendances()
            .get_future_attendances(attendee_id)
            .await
    }
}
