pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{GigHubRepositories, GigHubService, create_repositories};
pub use domain::common::services::Service;
pub use domain::common::unit_of_work::{
    MockDataSource, MockUnitOfWorkProvider, UnitOfWork, UnitOfWorkProvider,
};
pub use infrastructure::health::repositories::postgres::PostgresHealthRepository;
pub use infrastructure::unit_of_work::postgres::{PostgresUnitOfWork, PostgresUnitOfWorkProvider};
