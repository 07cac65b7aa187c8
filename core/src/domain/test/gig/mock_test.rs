use uuid::Uuid;

use crate::domain::{
    attendance::entities::Attendance,
    common::CoreError,
    following::entities::Following,
    genre::entities::GenreId,
    gig::{
        entities::GigId,
        ports::{GigRepository, GigService},
    },
    notification::entities::NotificationType,
    test::{JAZZ, ROCK, fixture, gig_input, stored_gig},
    user::entities::UserId,
};
use crate::domain::common::unit_of_work::{UnitOfWork, UnitOfWorkProvider};

// == Repository filters ==

#[tokio::test]
#[cfg(test)]
async fn test_artist_upcoming_gigs_skip_past_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    fx.source
        .set_gigs(vec![stored_gig(fx.artist, -1, "Blue Note")])
        .await;

    let gigs = fx.service.get_artist_upcoming_gigs(&fx.artist).await?;

    assert!(gigs.is_empty(), "Past gigs are not upcoming");
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_artist_upcoming_gigs_skip_canceled_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let mut gig = stored_gig(fx.artist, 1, "Blue Note");
    gig.cancel()?;
    fx.source.set_gigs(vec![gig]).await;

    let gigs = fx.service.get_artist_upcoming_gigs(&fx.artist).await?;

    assert!(gigs.is_empty(), "Canceled gigs are not upcoming");
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_artist_upcoming_gigs_skip_other_artist() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    fx.source
        .set_gigs(vec![stored_gig(UserId(Uuid::new_v4()), 1, "Blue Note")])
        .await;

    let gigs = fx.service.get_artist_upcoming_gigs(&fx.artist).await?;

    assert!(gigs.is_empty());
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_artist_upcoming_gigs_returns_valid_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 1, "Blue Note");
    fx.source.set_gigs(vec![gig.clone()]).await;

    let gigs = fx.service.get_artist_upcoming_gigs(&fx.artist).await?;

    assert_eq!(gigs.len(), 1);
    assert_eq!(gigs[0].id, gig.id);
    assert_eq!(
        gigs[0].artist.as_ref().map(|a| a.name.as_str()),
        Some("Miles Davis")
    );
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_attending_gigs_skip_past_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, -1, "Blue Note");
    fx.source
        .set_attendances(vec![Attendance::new(gig.id, fx.fan)])
        .await;
    fx.source.set_gigs(vec![gig]).await;

    let gigs = fx.service.get_gigs_user_is_attending(&fx.fan).await?;

    assert!(gigs.is_empty());
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_attending_gigs_skip_gig_attended_by_someone_else()
-> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 1, "Blue Note");
    fx.source
        .set_attendances(vec![Attendance::new(gig.id, UserId(Uuid::new_v4()))])
        .await;
    fx.source.set_gigs(vec![gig]).await;

    let gigs = fx.service.get_gigs_user_is_attending(&fx.fan).await?;

    assert!(gigs.is_empty());
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_attending_gigs_returns_attended_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 1, "Blue Note");
    let mut canceled = stored_gig(fx.artist, 2, "Village Vanguard");
    canceled.cancel()?;
    fx.source
        .set_attendances(vec![
            Attendance::new(gig.id, fx.fan),
            Attendance::new(canceled.id, fx.fan),
        ])
        .await;
    fx.source.set_gigs(vec![canceled.clone(), gig.clone()]).await;

    let gigs = fx.service.get_gigs_user_is_attending(&fx.fan).await?;

    // Canceled gigs stay visible to attendees, soonest first.
    assert_eq!(gigs.len(), 2);
    assert_eq!(gigs[0].id, gig.id);
    assert_eq!(gigs[1].id, canceled.id);
    assert!(gigs[1].is_canceled);
    Ok(())
}

// == Search ==

#[tokio::test]
#[cfg(test)]
async fn test_upcoming_gigs_search_matches_artist_genre_and_venue()
-> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let jazz_gig = stored_gig(fx.artist, 1, "Blue Note");
    let mut rock_gig = stored_gig(fx.artist, 2, "Madison Square Garden");
    rock_gig.genre_id = ROCK;
    fx.source
        .set_gigs(vec![rock_gig.clone(), jazz_gig.clone()])
        .await;

    let all = fx.service.get_upcoming_gigs(None).await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, jazz_gig.id, "Sorted by date ascending");

    let by_artist = fx.service.get_upcoming_gigs(Some("miles")).await?;
    assert_eq!(by_artist.len(), 2);

    let by_genre = fx.service.get_upcoming_gigs(Some("ROCK")).await?;
    assert_eq!(by_genre.len(), 1);
    assert_eq!(by_genre[0].id, rock_gig.id);

    let by_venue = fx.service.get_upcoming_gigs(Some("blue")).await?;
    assert_eq!(by_venue.len(), 1);
    assert_eq!(by_venue[0].id, jazz_gig.id);

    let blank = fx.service.get_upcoming_gigs(Some("   ")).await?;
    assert_eq!(blank.len(), 2, "A blank query does not filter");

    let none = fx.service.get_upcoming_gigs(Some("polka")).await?;
    assert!(none.is_empty());
    Ok(())
}

// == Create ==

#[tokio::test]
#[cfg(test)]
async fn test_create_gig_notifies_followers() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let other_fan = UserId(Uuid::new_v4());
    fx.source
        .set_followings(vec![
            Following::new(fx.fan, fx.artist),
            Following::new(other_fan, fx.artist),
        ])
        .await;

    let gig = fx
        .service
        .create_gig(&fx.artist, gig_input(7, "Blue Note", JAZZ))
        .await?;

    assert_eq!(gig.artist_id, fx.artist);
    assert!(!gig.is_canceled);
    assert_eq!(gig.genre.as_ref().map(|g| g.name.as_str()), Some("Jazz"));

    let data = fx.source.snapshot().await;
    assert_eq!(data.gigs.len(), 1);
    assert_eq!(data.notifications.len(), 1);
    assert_eq!(
        data.notifications[0].notification_type,
        NotificationType::GigCreated
    );
    assert_eq!(data.notifications[0].gig_id, gig.id);
    assert_eq!(data.user_notifications.len(), 2);
    assert!(data.user_notifications.iter().all(|un| !un.is_read));
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_create_gig_rejects_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;

    let blank_venue = fx
        .service
        .create_gig(&fx.artist, gig_input(7, "  ", JAZZ))
        .await;
    assert!(matches!(blank_venue, Err(CoreError::InvalidVenue)));

    let past = fx
        .service
        .create_gig(&fx.artist, gig_input(-7, "Blue Note", JAZZ))
        .await;
    assert!(matches!(past, Err(CoreError::GigDateNotInFuture)));

    let unknown_genre = fx
        .service
        .create_gig(&fx.artist, gig_input(7, "Blue Note", GenreId(42)))
        .await;
    assert!(matches!(
        unknown_genre,
        Err(CoreError::GenreNotFound { id: GenreId(42) })
    ));

    assert!(fx.source.snapshot().await.gigs.is_empty());
    Ok(())
}

// == Update ==

#[tokio::test]
#[cfg(test)]
async fn test_update_gig_notifies_attendees_with_original_values()
-> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 3, "Blue Note");
    let original_date = gig.date_time;
    fx.source
        .set_attendances(vec![Attendance::new(gig.id, fx.fan)])
        .await;
    fx.source.set_gigs(vec![gig.clone()]).await;

    let updated = fx
        .service
        .update_gig(&fx.artist, &gig.id, gig_input(10, "Birdland", ROCK))
        .await?;

    assert_eq!(updated.venue, "Birdland");
    assert_eq!(updated.genre_id, ROCK);
    assert_eq!(updated.genre.as_ref().map(|g| g.name.as_str()), Some("Rock"));

    let data = fx.source.snapshot().await;
    assert_eq!(data.notifications.len(), 1);
    let notification = &data.notifications[0];
    assert_eq!(notification.notification_type, NotificationType::GigUpdated);
    assert_eq!(notification.original_venue.as_deref(), Some("Blue Note"));
    assert_eq!(notification.original_date_time, Some(original_date));
    assert_eq!(data.user_notifications.len(), 1);
    assert_eq!(data.user_notifications[0].user_id, fx.fan);
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_update_gig_by_other_user_is_forbidden() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 3, "Blue Note");
    fx.source.set_gigs(vec![gig.clone()]).await;

    let result = fx
        .service
        .update_gig(&fx.fan, &gig.id, gig_input(10, "Birdland", JAZZ))
        .await;

    assert!(matches!(result, Err(CoreError::NotGigOwner { .. })));
    assert_eq!(fx.source.snapshot().await.gigs[0].venue, "Blue Note");
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_update_missing_gig_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let id = GigId(Uuid::new_v4());

    let result = fx
        .service
        .update_gig(&fx.artist, &id, gig_input(10, "Birdland", JAZZ))
        .await;

    assert!(matches!(result, Err(CoreError::GigNotFound { id: missing }) if missing == id));
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_update_canceled_gig_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let mut gig = stored_gig(fx.artist, 3, "Blue Note");
    gig.cancel()?;
    fx.source.set_gigs(vec![gig.clone()]).await;

    let result = fx
        .service
        .update_gig(&fx.artist, &gig.id, gig_input(10, "Birdland", JAZZ))
        .await;

    assert!(matches!(result, Err(CoreError::GigAlreadyCanceled { .. })));
    Ok(())
}

// == Cancel ==

#[tokio::test]
#[cfg(test)]
async fn test_cancel_gig_notifies_attendees() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 3, "Blue Note");
    let other_fan = UserId(Uuid::new_v4());
    fx.source
        .set_attendances(vec![
            Attendance::new(gig.id, fx.fan),
            Attendance::new(gig.id, other_fan),
        ])
        .await;
    fx.source.set_gigs(vec![gig.clone()]).await;

    fx.service.cancel_gig(&fx.artist, &gig.id).await?;

    let data = fx.source.snapshot().await;
    assert!(data.gigs[0].is_canceled);
    assert_eq!(data.notifications.len(), 1);
    assert_eq!(
        data.notifications[0].notification_type,
        NotificationType::GigCanceled
    );
    assert_eq!(data.user_notifications.len(), 2);

    let upcoming = fx.service.get_upcoming_gigs(None).await?;
    assert!(upcoming.is_empty(), "Canceled gigs leave the listing");
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_cancel_twice_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 3, "Blue Note");
    fx.source
        .set_attendances(vec![Attendance::new(gig.id, fx.fan)])
        .await;
    fx.source.set_gigs(vec![gig.clone()]).await;

    fx.service.cancel_gig(&fx.artist, &gig.id).await?;
    let second = fx.service.cancel_gig(&fx.artist, &gig.id).await;

    assert!(matches!(second, Err(CoreError::GigAlreadyCanceled { .. })));
    assert_eq!(
        fx.source.snapshot().await.notifications.len(),
        1,
        "The second attempt must not notify again"
    );
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_cancel_by_other_user_is_forbidden() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 3, "Blue Note");
    fx.source.set_gigs(vec![gig.clone()]).await;

    let result = fx.service.cancel_gig(&fx.fan, &gig.id).await;

    assert!(matches!(result, Err(CoreError::NotGigOwner { .. })));
    assert!(!fx.source.snapshot().await.gigs[0].is_canceled);
    Ok(())
}

// == Details ==

#[tokio::test]
#[cfg(test)]
async fn test_gig_details_reflect_attendance_and_following()
-> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 3, "Blue Note");
    fx.source.set_gigs(vec![gig.clone()]).await;

    let details = fx.service.get_gig_details(&fx.fan, &gig.id).await?;
    assert!(!details.is_attending);
    assert!(!details.is_following);

    fx.source
        .set_attendances(vec![Attendance::new(gig.id, fx.fan)])
        .await;
    fx.source
        .set_followings(vec![Following::new(fx.fan, fx.artist)])
        .await;

    let details = fx.service.get_gig_details(&fx.fan, &gig.id).await?;
    assert!(details.is_attending);
    assert!(details.is_following);
    assert_eq!(details.gig.venue, "Blue Note");
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_gig_details_of_missing_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;

    let result = fx
        .service
        .get_gig_details(&fx.fan, &GigId(Uuid::new_v4()))
        .await;

    assert!(matches!(result, Err(CoreError::GigNotFound { .. })));
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_repository_reads_ignore_staged_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let uow = fx.service.provider().begin();
    let gig = stored_gig(fx.artist, 3, "Blue Note");

    uow.gigs().add(gig.clone()).await;
    assert!(uow.gigs().get_gig(&gig.id).await?.is_none());

    uow.complete().await?;
    assert!(uow.gigs().get_gig(&gig.id).await?.is_some());
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_stale_update_cannot_revive_canceled_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 3, "Blue Note");
    fx.source.set_gigs(vec![gig.clone()]).await;

    // The editor loads the gig, then a cancellation commits first.
    let uow = fx.service.provider().begin();
    let mut stale = uow
        .gigs()
        .get_gig(&gig.id)
        .await?
        .ok_or(CoreError::GigNotFound { id: gig.id })?;
    fx.service.cancel_gig(&fx.artist, &gig.id).await?;

    stale.modify(gig_input(8, "Village Vanguard", ROCK));
    uow.gigs().update(stale).await;
    let result = uow.complete().await;

    assert!(matches!(result, Err(CoreError::GigAlreadyCanceled { id }) if id == gig.id));
    let data = fx.source.snapshot().await;
    assert!(data.gigs[0].is_canceled, "A canceled gig stays canceled");
    assert_eq!(data.gigs[0].venue, "Blue Note");
    assert!(fx.service.get_upcoming_gigs(None).await?.is_empty());
    assert!(fx.service.get_artist_upcoming_gigs(&fx.artist).await?.is_empty());
    Ok(())
}
