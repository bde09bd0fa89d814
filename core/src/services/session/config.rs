//! Configuration for the session service

use crate::repositories::token::DEFAULT_SCAN_LIMIT;

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// Cap on the fallback record scan used by logout when the presented
    /// token does not verify and no subject can be derived. A documented
    /// scalability bound, not a correctness guarantee.
    pub logout_scan_limit: usize,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self {
            logout_scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }
}
