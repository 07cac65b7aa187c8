use uuid::Uuid;

use crate::domain::{
    attendance::ports::AttendanceService,
    common::CoreError,
    gig::entities::GigId,
    test::{fixture, stored_gig},
};

#[tokio::test]
#[cfg(test)]
async fn test_attend_gig_success() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 5, "Blue Note");
    fx.source.set_gigs(vec![gig.clone()]).await;

    let attendance = fx.service.attend(&fx.fan, &gig.id).await?;

    assert_eq!(attendance.gig_id, gig.id);
    assert_eq!(attendance.attendee_id, fx.fan);
    assert_eq!(fx.source.snapshot().await.attendances.len(), 1);
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_attend_twice_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 5, "Blue Note");
    fx.source.set_gigs(vec![gig.clone()]).await;

    fx.service.attend(&fx.fan, &gig.id).await?;
    let second = fx.service.attend(&fx.fan, &gig.id).await;

    assert!(matches!(
        second,
        Err(CoreError::AttendanceAlreadyExists { .. })
    ));
    assert_eq!(fx.source.snapshot().await.attendances.len(), 1);
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_attend_missing_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;

    let result = fx.service.attend(&fx.fan, &GigId(Uuid::new_v4())).await;

    assert!(matches!(result, Err(CoreError::GigNotFound { .. })));
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_unattend_removes_attendance() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let gig = stored_gig(fx.artist, 5, "Blue Note");
    fx.source.set_gigs(vec![gig.clone()]).await;
    fx.service.attend(&fx.fan, &gig.id).await?;

    fx.service.unattend(&fx.fan, &gig.id).await?;

    assert!(fx.source.snapshot().await.attendances.is_empty());

    let again = fx.service.unattend(&fx.fan, &gig.id).await;
    assert!(matches!(again, Err(CoreError::AttendanceNotFound { .. })));
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_future_attendances_load_gig() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let upcoming = stored_gig(fx.artist, 5, "Blue Note");
    let past = stored_gig(fx.artist, -5, "Birdland");
    fx.source
        .set_gigs(vec![upcoming.clone(), past.clone()])
        .await;
    fx.service.attend(&fx.fan, &upcoming.id).await?;
    fx.service.attend(&fx.fan, &past.id).await?;

    let attendances = fx.service.get_future_attendances(&fx.fan).await?;

    assert_eq!(attendances.len(), 1);
    assert_eq!(attendances[0].gig_id, upcoming.id);
    assert_eq!(
        attendances[0].gig.as_ref().map(|g| g.venue.as_str()),
        Some("Blue Note")
    );
    Ok(())
}
