pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use repository::{MemorySubscriptionRepository, RepositoryError, SubscriptionRepository};
pub use services::{DeliveryClient, DispatchEngine, PushService, StatsAggregator};
