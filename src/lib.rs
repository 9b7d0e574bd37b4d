pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gui;
pub mod logging;
pub mod models;
pub mod routes;
pub mod state;

// Re-export the main error types for convenience
pub use api::{ApiError, ApiResult, ErrorKind};
pub use auth::AuthError;
pub use error::{ConfdeskError, ConfdeskResult};

// Re-export API client and services
pub use api::{AnalyticsService, ApiClient, ConferenceService, KeynoteService};

// Re-export session and route guard
pub use auth::{AuthManager, Session, SessionStatus};
pub use routes::{guard, Route};

// Re-export view state controllers
pub use state::{AnalyticsPoller, ConferenceDetail, CrudController};
