use crate::domain::{common::CoreError, health::port::HealthService, test::fixture};

#[tokio::test]
#[cfg(test)]
async fn test_health_follows_repository() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture().await;

    assert!(fx.service.check_health().await?.value());

    fx.health.set_healthy(false);
    let result = fx.service.check_health().await;
    assert!(matches!(result, Err(CoreError::Unhealthy)));

    fx.health.set_healthy(true);
    assert!(fx.service.check_health().await?.value());
    Ok(())
}
