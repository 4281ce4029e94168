//! Configuration for the execution engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wall-clock budget for a compile phase.
pub const DEFAULT_COMPILE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default wall-clock budget for a run phase.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for [`crate::runner::Engine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Compile budget applied to the built-in recipes.
    pub compile_timeout: Duration,
    /// Run budget applied to the built-in recipes.
    pub run_timeout: Duration,
    /// Maximum concurrent executions; 0 means unbounded.
    pub max_concurrent: usize,
}

impl EngineConfig {
    /// Creates a configuration with the documented defaults.
    pub fn new() -> Self {
        Self {
            compile_timeout: DEFAULT_COMPILE_TIMEOUT,
            run_timeout: DEFAULT_RUN_TIMEOUT,
            max_concurrent: 0,
        }
    }

    /// Sets the compile budget.
    pub fn with_compile_timeout(mut self, timeout: Duration) -> Self {
        self.compile_timeout = timeout;
        self
    }

    /// Sets the run budget.
    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    /// Bounds the number of concurrent executions.
    pub fn with_max_concurrent(mut self, limit: usize) -> Self {
        self.max_concurrent = limit;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
