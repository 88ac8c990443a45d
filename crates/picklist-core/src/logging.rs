//! Tracing targets.
//!
//! picklist instruments itself with the `tracing` crate and never installs a
//! subscriber. Use these targets in filter directives to select subsystems:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("picklist::controller=debug,picklist_core::timer=trace")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "picklist_core::signal";
    /// Timer system target.
    pub const TIMER: &str = "picklist_core::timer";
    /// Interaction controller target (open state, query, selection).
    pub const CONTROLLER: &str = "picklist::controller";
    /// Keyboard navigation and highlight target.
    pub const NAVIGATION: &str = "picklist::navigation";
    /// Document listener and boundary checks target.
    pub const BOUNDARY: &str = "picklist::boundary";
    /// Debounce window target.
    pub const DEBOUNCE: &str = "picklist::debounce";
    /// Configuration loading target.
    pub const CONFIG: &str = "picklist::config";
}
