use uuid::Uuid;

use crate::domain::{
    attendance::entities::Attendance,
    gig::ports::GigService,
    notification::{entities::NotificationType, ports::NotificationService},
    test::{fixture, stored_gig},
    user::entities::UserId,
};

#[tokio::test]
#[cfg(test)]
async fn test_new_notifications_carry_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 4, "Blue Note");
    fx.source
        .set_attendances(vec![Attendance::new(gig.id, fx.fan)])
        .await;
    fx.source.set_gigs(vec![gig.clone()]).await;
    fx.service.cancel_gig(&fx.artist, &gig.id).await?;

    let notifications = fx.service.get_new_notifications(&fx.fan).await?;

    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].notification_type,
        NotificationType::GigCanceled
    );
    let loaded = notifications[0].gig.as_ref().ok_or("gig not loaded")?;
    assert_eq!(loaded.id, gig.id);
    assert_eq!(
        loaded.artist.as_ref().map(|a| a.name.as_str()),
        Some("Miles Davis")
    );
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_new_notifications_include_other_users_unread_rows()
-> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 4, "Blue Note");
    fx.source
        .set_attendances(vec![Attendance::new(gig.id, fx.fan)])
        .await;
    fx.source.set_gigs(vec![gig.clone()]).await;
    fx.service.cancel_gig(&fx.artist, &gig.id).await?;

    // A user with no rows of their own still sees the fan's unread one.
    let stranger = UserId(Uuid::new_v4());
    let notifications = fx.service.get_new_notifications(&stranger).await?;
    assert_eq!(notifications.len(), 1);

    fx.service.mark_as_read(&fx.fan).await?;
    assert!(fx.service.get_new_notifications(&stranger).await?.is_empty());

    // Read rows of the caller stay visible to the caller.
    assert_eq!(fx.service.get_new_notifications(&fx.fan).await?.len(), 1);
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_mark_as_read_only_touches_callers_rows() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let other_fan = UserId(Uuid::new_v4());
    let gig = stored_gig(fx.artist, 4, "Blue Note");
    fx.source
        .set_attendances(vec![
            Attendance::new(gig.id, fx.fan),
            Attendance::new(gig.id, other_fan),
        ])
        .await;
    fx.source.set_gigs(vec![gig.clone()]).await;
    fx.service.cancel_gig(&fx.artist, &gig.id).await?;

    let marked = fx.service.mark_as_read(&fx.fan).await?;
    assert_eq!(marked, 1);

    let data = fx.source.snapshot().await;
    for row in &data.user_notifications {
        assert_eq!(row.is_read, row.user_id == fx.fan);
    }

    assert_eq!(fx.service.mark_as_read(&fx.fan).await?, 0);
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_new_notifications_repeat_once_per_unread_row()
-> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let other_fan = UserId(Uuid::new_v4());
    let gig = stored_gig(fx.artist, 4, "Blue Note");
    fx.source
        .set_attendances(vec![
            Attendance::new(gig.id, fx.fan),
            Attendance::new(gig.id, other_fan),
        ])
        .await;
    fx.source.set_gigs(vec![gig.clone()]).await;
    fx.service.cancel_gig(&fx.artist, &gig.id).await?;

    // One notification, two unread rows: the caller sees it twice.
    let notifications = fx.service.get_new_notifications(&fx.fan).await?;
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].id, notifications[1].id);

    let stranger = UserId(Uuid::new_v4());
    assert_eq!(fx.service.get_new_notifications(&stranger).await?.len(), 2);
    Ok(())
}
