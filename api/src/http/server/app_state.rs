use gighub_core::{GigHubService, application::GigHubRepositories};

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub service: GigHubService,
}

impl AppState {
    pub fn new(service: GigHubService) -> Self {
        Self { service }
    }

    /// Shutdown the underlying database pool
    pub async fn shutdown(&self) {
        self.service.shutdown_pool().await
    }
}

impl From<GigHubRepositories> for AppState {
    fn from(repositories: GigHubRepositories) -> Self {
        AppState::new(repositories.into())
    }
}
