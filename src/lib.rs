pub mod app;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod errors;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod ui;

// Internal modules
pub mod actions;
pub mod event;

// Re-export commonly used types
pub use app::{AppMode, AppState};
pub use config::AppConfig;
pub use coordinator::{ViewCoordinator, ViewFrame};
pub use engine::{EngineEvent, RenderEngine};
