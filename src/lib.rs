// Receipt Points - Core Library
// Exposes the points engine and receipt store for the CLI, API server, and tests

pub mod config;
pub mod error;
pub mod id;
pub mod points;
pub mod processor;
pub mod receipt;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::{ConfigError, LoggingConfig, ServerConfig};
pub use error::{ReceiptError, ReceiptResult};
pub use id::{IdGenerator, RandomIdGenerator};
pub use points::{compute_points, PointsBreakdown, Rule};
pub use processor::ReceiptProcessor;
pub use receipt::{Item, Receipt};
pub use store::{InMemoryReceiptStore, ReceiptStore, StoreEntry};

#[cfg(feature = "server")]
pub use api::{build_router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
