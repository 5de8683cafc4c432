use std::time::Duration;

/// Timeouts and pool sizing for store access
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Upper bound for a single repository lookup or write
    pub db_query: Duration,

    /// How long to wait for a pooled connection
    pub db_acquire: Duration,

    /// Maximum pooled connections
    pub db_max_connections: u32,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        GLOBAL_TIMEOUT_CONFIG.clone()
    }
}

impl TimeoutConfig {
    /// Create a new timeout configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global timeout configuration
    pub fn global() -> &'static Self {
        &GLOBAL_TIMEOUT_CONFIG
    }

    pub fn with_db_query(mut self, timeout: Duration) -> Self {
        self.db_query = timeout;
        self
    }
}

/// Global timeout configuration instance
static GLOBAL_TIMEOUT_CONFIG: TimeoutConfig = TimeoutConfig {
    db_query: Duration::from_secs(10),
    db_acquire: Duration::from_secs(5),
    db_max_connections: 5,
};
