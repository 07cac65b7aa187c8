use uuid::Uuid;

use crate::domain::{
    common::{
        CoreError,
        unit_of_work::{MockUnitOfWorkProvider, UnitOfWork, UnitOfWorkProvider},
    },
    following::{entities::Following, ports::FollowingRepository},
    test::fixture,
    user::entities::UserId,
};

#[tokio::test]
#[cfg(test)]
async fn test_staged_writes_are_invisible_until_complete() -> Result<(), Box<dyn std::error::Error>>
{
    let fx = fixture().await;
    let uow = fx.service.provider().begin();

    uow.followings()
        .add(Following::new(fx.fan, fx.artist))
        .await;

    assert_eq!(uow.changes().len().await, 1);
    assert!(
        uow.followings()
            .get_following(&fx.fan, &fx.artist)
            .await?
            .is_none()
    );

    uow.complete().await?;

    assert!(uow.changes().is_empty().await);
    assert!(
        uow.followings()
            .get_following(&fx.fan, &fx.artist)
            .await?
            .is_some()
    );
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_discard_drops_staged_writes() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let uow = fx.service.provider().begin();

    uow.followings()
        .add(Following::new(fx.fan, fx.artist))
        .await;
    uow.discard().await;
    uow.complete().await?;

    assert!(fx.source.snapshot().await.followings.is_empty());
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_failed_commit_applies_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let provider = MockUnitOfWorkProvider::new(fx.source.clone());
    let other_artist = UserId(Uuid::new_v4());
    let uow = provider.begin();

    uow.followings()
        .add(Following::new(fx.fan, other_artist))
        .await;
    uow.followings()
        .add(Following::new(fx.fan, fx.artist))
        .await;
    uow.followings()
        .add(Following::new(fx.fan, fx.artist))
        .await;

    let result = uow.complete().await;

    assert!(matches!(
        result,
        Err(CoreError::ConstraintViolation { .. })
    ));
    assert!(fx.source.snapshot().await.followings.is_empty());
    assert_eq!(uow.changes().len().await, 3, "Staged changes are kept");
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_units_of_work_are_isolated() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let first = fx.service.provider().begin();
    let second = fx.service.provider().begin();

    first
        .followings()
        .add(Following::new(fx.fan, fx.artist))
        .await;
    second.complete().await?;

    assert!(fx.source.snapshot().await.followings.is_empty());
    assert_eq!(first.changes().len().await, 1);
    Ok(())
}
