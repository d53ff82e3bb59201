// Core of the "cerebro evolutivo" community dashboard: state store with
// persistence, metric derivations, T12 event bridge and the demo simulation.
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod metrics;
pub mod profile;
pub mod profile_io;
pub mod simulation;
pub mod store;

pub use config::Config;
pub use error::{CerebroError, Result};
pub use events::{EventBridge, EventPublisher, EventSubscriber, T12Event};
pub use metrics::{build_report, DashboardReport};
pub use profile::{
    CerebroState, CommunityMetrics, CommunityMetricsUpdate, EmotionScore, LearningProfile,
    UserIdentity,
};
pub use profile_io::{JsonFileStorage, MemoryStorage, StateStorage};
pub use store::CommunityStore;
