//! Client state and routing core for the qldp household-management console.
//! All state transitions and route decisions live here; shells only render.

pub mod action;
pub mod config;
pub mod logging;
pub mod model;
pub mod reducer;
pub mod route;
pub mod state;
pub mod store;

pub use action::raw::{decode_action, ActionDecodeError};
pub use action::types::{parse_action_type, registry, ActionDomain, ActionType, ActionTypeError};
pub use action::Action;
pub use config::{ClientConfig, ConfigError, RouterConfig};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogSink,
};
pub use model::session::{parse_role, AuthSession, LoginSuccess, Role, RoleParseError};
pub use reducer::{reduce, written_slices};
pub use route::{
    AccessDenied, Landing, Location, Navigation, Navigator, Page, Resolution, RouteTable,
};
pub use state::{initial_state, AppState, SliceKey};
pub use store::{Dispatch, DispatchOutcome, Store, SubscriptionId};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
