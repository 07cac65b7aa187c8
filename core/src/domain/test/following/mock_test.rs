use uuid::Uuid;

use crate::domain::{
    common::CoreError,
    following::ports::FollowingService,
    test::fixture,
    user::entities::UserId,
};

#[tokio::test]
#[cfg(test)]
async fn test_follow_artist_success() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;

    let following = fx.service.follow(&fx.fan, &fx.artist).await?;

    assert_eq!(following.follower_id, fx.fan);
    assert_eq!(following.followee_id, fx.artist);

    let artists = fx.service.get_followed_artists(&fx.fan).await?;
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].name, "Miles Davis");
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_follow_twice_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    fx.service.follow(&fx.fan, &fx.artist).await?;

    let second = fx.service.follow(&fx.fan, &fx.artist).await;

    assert!(matches!(
        second,
        Err(CoreError::FollowingAlreadyExists { .. })
    ));
    assert_eq!(fx.source.snapshot().await.followings.len(), 1);
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_unfollow_artist() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    fx.service.follow(&fx.fan, &fx.artist).await?;

    fx.service.unfollow(&fx.fan, &fx.artist).await?;
    assert!(fx.service.get_followed_artists(&fx.fan).await?.is_empty());

    let again = fx.service.unfollow(&fx.fan, &fx.artist).await;
    assert!(matches!(again, Err(CoreError::FollowingNotFound { .. })));
    Ok(())
}

#[tokio::test]
#[cfg(test)]
async fn test_followed_artists_keep_follow_order() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;
    let unknown_artist = UserId(Uuid::new_v4());

    fx.service.follow(&fx.fan, &fx.artist).await?;
    fx.service.follow(&fx.fan, &unknown_artist).await?;

    let artists = fx.service.get_followed_artists(&fx.fan).await?;

    assert_eq!(artists.len(), 2);
    assert_eq!(artists[0].id, fx.artist);
    assert_eq!(artists[1].id, unknown_artist);
    Ok(())
}
