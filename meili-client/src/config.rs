//! Client behaviour switches.

/// Configuration for a [`Client`](crate::Client).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Create an index on first use when the server reports it missing.
    pub auto_create_index: bool,
    /// Refresh the update returned by a write operation once before handing
    /// it back.
    pub refresh_on_submit: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auto_create_index: true,
            refresh_on_submit: true,
        }
    }
}

impl ClientConfig {
    /// Neither create indexes nor refresh updates implicitly.
    pub fn manual() -> Self {
        Self {
            auto_create_index: false,
            refresh_on_submit: false,
        }
    }

    pub fn with_auto_create_index(mut self, enabled: bool) -> Self {
        self.auto_create_index = enabled;
        self
    }

    pub fn with_refresh_on_submit(mut self, enabled: bool) -> Self {
        self.refresh_on_submit = enabled;
        self
    }
}
