//! Process-wide active configuration

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::QueryConfig;

/// Configuration installed by the host, if any
static ACTIVE_CONFIG: Lazy<RwLock<Option<Arc<QueryConfig>>>> = Lazy::new(|| RwLock::new(None));

/// Built-in vocabulary used until a host installs its own
static DEFAULT_CONFIG: Lazy<Arc<QueryConfig>> = Lazy::new(|| Arc::new(QueryConfig::default()));

/// Install the configuration new editors pick up (call once at startup)
///
/// Calling it again replaces the previous configuration. Editors that were
/// already created keep the one they started with.
pub fn install(config: QueryConfig) {
    let mut guard = ACTIVE_CONFIG.write();
    *guard = Some(Arc::new(config));
    tracing::debug!("query configuration installed");
}

/// Check if a configuration was installed
pub fn is_installed() -> bool {
    ACTIVE_CONFIG.read().is_some()
}

/// The installed configuration, or the built-in default
pub fn current() -> Arc<QueryConfig> {
    ACTIVE_CONFIG
        .read()
        .as_ref()
        .map(Arc::clone)
        .unwrap_or_else(|| Arc::clone(&DEFAULT_CONFIG))
}

/// Drop the installed configuration (useful for testing)
pub fn clear() {
    let mut guard = ACTIVE_CONFIG.write();
    *guard = None;
}
