use serde::{Deserialize, Serialize};

/// Upper bound on link hops followed in one resolution.
pub const LINK_DEPTH_LIMIT: usize = 40;

/// Construction options for a [`Filesystem`](crate::Filesystem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesystemOptions {
    /// Total size budget shared by all files
    pub size_limit: u64,
    /// Link chains longer than this are reported as cycles
    #[serde(default = "default_link_depth_limit")]
    pub link_depth_limit: usize,
}

fn default_link_depth_limit() -> usize {
    LINK_DEPTH_LIMIT
}

impl FilesystemOptions {
    pub fn new(size_limit: u64) -> Self {
        Self {
            size_limit,
            link_depth_limit: LINK_DEPTH_LIMIT,
        }
    }

    #[must_use]
    pub fn with_link_depth_limit(mut self, limit: usize) -> Self {
        self.link_depth_limit = limit;
        self
    }
}
