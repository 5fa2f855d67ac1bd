use serde::{Deserialize, Serialize};

/// Handle of the root node. Always live, never recycled.
pub const ROOT_HANDLE: Handle = Handle(0);

/// Integer identity of a node slot in an [`Arena`](crate::arena::Arena).
///
/// A handle stays valid until its node is recycled; after that the same
/// value may be issued again for an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(usize);

impl Handle {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn as_usize(self) -> usize {
        self.0
    }

    pub fn is_root(self) -> bool {
        self == ROOT_HANDLE
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for Handle {
    fn from(index: usize) -> Self {
        Self(index)
    }
}
