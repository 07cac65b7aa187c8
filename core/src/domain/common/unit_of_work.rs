use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{
    attendance::{
        entities::Attendance,
        ports::{AttendanceRepository, MockAttendanceRepository},
    },
    common::CoreError,
    following::{
        entities::Following,
        ports::{FollowingRepository, MockFollowingRepository},
    },
    genre::{
        entities::Genre,
        ports::{GenreRepository, MockGenreRepository},
    },
    gig::{
        entities::{Gig, GigId},
        ports::{GigRepository, MockGigRepository},
    },
    notification::{
        entities::{Notification, NotificationId, UserNotification},
        ports::{
            MockNotificationRepository, MockUserNotificationRepository, NotificationRepository,
            UserNotificationRepository,
        },
    },
    user::entities::{ApplicationUser, UserId},
};

/// A set of repositories sharing one context.
///
/// Reads go straight to the backing data source. Writes are staged and only
/// become visible once [`UnitOfWork::complete`] succeeds.
pub trait UnitOfWork: Send + Sync {
    type Gigs: GigRepository;
    type Attendances: AttendanceRepository;
    type Genres: GenreRepository;
    type Followings: FollowingRepository;
    type Notifications: NotificationRepository;
    type UserNotifications: UserNotificationRepository;

    fn gigs(&self) -> &Self::Gigs;
    fn attendances(&self) -> &Self::Attendances;
    fn genres(&self) -> &Self::Genres;
    fn followings(&self) -> &Self::Followings;
    fn notifications(&self) -> &Self::Notifications;
    fn user_notifications(&self) -> &Self::UserNotifications;

    /// Applies every staged change, in staging order, as one transaction.
    /// Staged changes are kept if the commit fails.
    fn complete(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Drops every staged change.
    fn discard(&self) -> impl Future<Output = ()> + Send;
}

/// Hands out a fresh [`UnitOfWork`] per operation.
pub trait UnitOfWorkProvider: Clone + Send + Sync {
    type UnitOfWork: UnitOfWork;

    fn begin(&self) -> Self::UnitOfWork;
}

/// A write waiting for the unit of work to commit.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    AddGig(Gig),
    UpdateGig(Gig),
    AddAttendance(Attendance),
    RemoveAttendance(Attendance),
    AddFollowing(Following),
    RemoveFollowing(Following),
    AddNotification(Notification),
    AddUserNotification(UserNotification),
    MarkUserNotificationRead {
        user_id: UserId,
        notification_id: NotificationId,
    },
}

/// Staged writes shared by every repository of one unit of work.
#[derive(Clone, Default)]
pub struct ChangeSet {
    changes: Arc<Mutex<Vec<Change>>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stage(&self, change: Change) {
        self.changes.lock().await.push(change);
    }

    pub async fn pending(&self) -> Vec<Change> {
        self.changes.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.changes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.changes.lock().await.is_empty()
    }

    /// Removes the first `count` changes, the ones a commit just applied.
    pub async fn acknowledge(&self, count: usize) {
        let mut changes = self.changes.lock().await;
        let count = count.min(changes.len());
        changes.drain(..count);
    }

    pub async fn clear(&self) {
        self.changes.lock().await.clear();
    }
}

/// In-memory tables standing in for the database in tests.
#[derive(Debug, Default, Clone)]
pub struct MockDataSet {
    pub users: Vec<ApplicationUser>,
    pub genres: Vec<Genre>,
    pub gigs: Vec<Gig>,
    pub attendances: Vec<Attendance>,
    pub followings: Vec<Following>,
    pub notifications: Vec<Notification>,
    pub user_notifications: Vec<UserNotification>,
}

impl MockDataSet {
    pub fn find_gig(&self, id: &GigId) -> Option<Gig> {
        self.gigs
            .iter()
            .find(|gig| &gig.id == id)
            .map(|gig| self.load_gig(gig))
    }

    /// Fills in the artist and genre of a stored gig.
    pub fn load_gig(&self, gig: &Gig) -> Gig {
        let mut loaded = gig.clone();
        loaded.artist = self
            .users
            .iter()
            .find(|user| user.id == gig.artist_id)
            .cloned();
        loaded.genre = self
            .genres
            .iter()
            .find(|genre| genre.id == gig.genre_id)
            .cloned();
        loaded
    }

    pub fn apply(&mut self, change: Change) -> Result<(), CoreError> {
        match change {
            Change::AddGig(gig) => {
                if self.gigs.iter().any(|existing| existing.id == gig.id) {
                    return Err(CoreError::ConstraintViolation {
                        msg: format!("duplicate gig {}", gig.id),
                    });
                }
                self.gigs.push(Gig {
                    artist: None,
                    genre: None,
                    ..gig
                });
            }
            Change::UpdateGig(gig) => {
                let existing = self
                    .gigs
                    .iter_mut()
                    .find(|existing| existing.id == gig.id)
                    .ok_or(CoreError::GigNotFound { id: gig.id })?;
                // Cancellation is one-way; a canceled gig takes no further writes.
                if existing.is_canceled {
                    return Err(CoreError::GigAlreadyCanceled { id: gig.id });
                }
                existing.date_time = gig.date_time;
                existing.venue = gig.venue;
                existing.genre_id = gig.genre_id;
                existing.is_canceled |= gig.is_canceled;
            }
            Change::AddAttendance(attendance) => {
                if self.attendances.iter().any(|a| a.same_key(&attendance)) {
                    return Err(CoreError::ConstraintViolation {
                        msg: format!(
                            "duplicate attendance ({}, {})",
                            attendance.gig_id, attendance.attendee_id
                        ),
                    });
                }
                self.attendances.push(Attendance {
                    gig: None,
                    ..attendance
                });
            }
            Change::RemoveAttendance(attendance) => {
                self.attendances.retain(|a| !a.same_key(&attendance));
            }
            Change::AddFollowing(following) => {
                if self.followings.iter().any(|f| f.same_key(&following)) {
                    return Err(CoreError::ConstraintViolation {
                        msg: format!(
                            "duplicate following ({}, {})",
                            following.follower_id, following.followee_id
                        ),
                    });
                }
                self.followings.push(following);
            }
            Change::RemoveFollowing(following) => {
                self.followings.retain(|f| !f.same_key(&following));
            }
            Change::AddNotification(notification) => {
                self.notifications.push(Notification {
                    gig: None,
                    ..notification
                });
            }
            Change::AddUserNotification(user_notification) => {
                if self
                    .user_notifications
                    .iter()
                    .any(|un| un.same_key(&user_notification))
                {
                    return Err(CoreError::ConstraintViolation {
                        msg: format!(
                            "duplicate user notification ({}, {})",
                            user_notification.user_id, user_notification.notification_id
                        ),
                    });
                }
                self.user_notifications.push(UserNotification {
                    notification: None,
                    ..user_notification
                });
            }
            Change::MarkUserNotificationRead {
                user_id,
                notification_id,
            } => {
                if let Some(un) = self
                    .user_notifications
                    .iter_mut()
                    .find(|un| un.user_id == user_id && un.notification_id == notification_id)
                {
                    un.read();
                }
            }
        }
        Ok(())
    }
}

/// Shared handle on a [`MockDataSet`].
#[derive(Clone, Default)]
pub struct MockDataSource {
    data: Arc<Mutex<MockDataSet>>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, MockDataSet> {
        self.data.lock().await
    }

    pub async fn snapshot(&self) -> MockDataSet {
        self.data.lock().await.clone()
    }

    pub async fn set_users(&self, users: Vec<ApplicationUser>) {
        self.data.lock().await.users = users;
    }

    pub async fn set_genres(&self, genres: Vec<Genre>) {
        self.data.lock().await.genres = genres;
    }

    pub async fn set_gigs(&self, gigs: Vec<Gig>) {
        self.data.lock().await.gigs = gigs;
    }

    pub async fn set_attendances(&self, attendances: Vec<Attendance>) {
        self.data.lock().await.attendances = attendances;
    }

    pub async fn set_followings(&self, followings: Vec<Following>) {
        self.data.lock().await.followings = followings;
    }

    pub async fn set_notifications(&self, notifications: Vec<Notification>) {
        self.data.lock().await.notifications = notifications;
    }

    pub async fn set_user_notifications(&self, user_notifications: Vec<UserNotification>) {
        self.data.lock().await.user_notifications = user_notifications;
    }
}

pub struct MockUnitOfWork {
    source: MockDataSource,
    changes: ChangeSet,
    gigs: MockGigRepository,
    attendances: MockAttendanceRepository,
    genres: MockGenreRepository,
    followings: MockFollowingRepository,
    notifications: MockNotificationRepository,
    user_notifications: MockUserNotificationRepository,
}

impl MockUnitOfWork {
    pub fn new(source: MockDataSource) -> Self {
        let changes = ChangeSet::new();
        Self {
            gigs: MockGigRepository::new(source.clone(), changes.clone()),
            attendances: MockAttendanceRepository::new(source.clone(), changes.clone()),
            genres: MockGenreRepository::new(source.clone()),
            followings: MockFollowingRepository::new(source.clone(), changes.clone()),
            notifications: MockNotificationRepository::new(source.clone(), changes.clone()),
            user_notifications: MockUserNotificationRepository::new(
                source.clone(),
                changes.clone(),
            ),
            source,
            changes,
        }
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }
}

impl UnitOfWork for MockUnitOfWork {
    type Gigs = MockGigRepository;
    type Attendances = MockAttendanceRepository;
    type Genres = MockGenreRepository;
    type Followings = MockFollowingRepository;
    type Notifications = MockNotificationRepository;
    type UserNotifications = MockUserNotificationRepository;

    fn gigs(&self) -> &Self::Gigs {
        &self.gigs
    }

    fn attendances(&self) -> &Self::Attendances {
        &self.attendances
    }

    fn genres(&self) -> &Self::Genres {
        &self.genres
    }

    fn followings(&self) -> &Self::Followings {
        &self.followings
    }

    fn notifications(&self) -> &Self::Notifications {
        &self.notifications
    }

    fn user_notifications(&self) -> &Self::UserNotifications {
        &self.user_notifications
    }

    async fn complete(&self) -> Result<(), CoreError> {
        let pending = self.changes.pending().await;

        // Apply on a copy so a failing change leaves the data set untouched.
        let mut data = self.source.lock().await;
        let mut staged = data.clone();
        for change in pending.iter().cloned() {
            staged.apply(change)?;
        }
        *data = staged;

        self.changes.acknowledge(pending.len()).await;
        Ok(())
    }

    async fn discard(&self) {
        self.changes.clear().await;
    }
}

#[derive(Clone, Default)]
pub struct MockUnitOfWorkProvider {
    source: MockDataSource,
}

impl MockUnitOfWorkProvider {
    pub fn new(source: MockDataSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &MockDataSource {
        &self.source
    }
}

impl UnitOfWorkProvider for MockUnitOfWorkProvider {
    type UnitOfWork = MockUnitOfWork;

    fn begin(&self) -> Self::UnitOfWork {
        MockUnitOfWork::new(self.source.clone())
    }
}
