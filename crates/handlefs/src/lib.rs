// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory hierarchical filesystem with a size quota.
//!
//! Three pieces work together:
//!
//! - [`arena::Arena`]: a generic tree of nodes addressed by [`Handle`],
//!   recycling freed slots
//! - [`heap::FileSizeHeap`]: a max-heap of `(size, handle)` pairs that
//!   supports removing any handle
//! - [`Filesystem`]: directories, files and links on top of the arena,
//!   with quota accounting kept in sync with the heap
//!
//! ```
//! use handlefs::{Error, Filesystem};
//!
//! let mut fs = Filesystem::new(100);
//! let docs = fs.create_directory("docs")?;
//! let a = fs.create_file_in(50, "a.txt", docs)?;
//!
//! assert_eq!(fs.get_available_size(), 50);
//! assert_eq!(fs.get_absolute_path(a)?, "/docs/a.txt");
//! assert_eq!(fs.get_handle("/docs/a.txt")?, a);
//! assert_eq!(fs.get_largest_file_handle()?, a);
//! assert!(matches!(
//!     fs.create_file_in(60, "b.txt", docs),
//!     Err(Error::ExceedsSize { .. })
//! ));
//! # Ok::<(), Error>(())
//! ```

pub mod arena;
mod entry;
mod entry_type;
mod error;
mod fs;
mod handle;
pub mod heap;
mod options;
pub mod path;
pub mod tree_format;

pub use entry::Entry;
pub use entry_type::EntryType;
pub use error::{Error, Result};
pub use fs::{EntrySnapshot, Filesystem};
pub use handle::{Handle, ROOT_HANDLE};
pub use options::{FilesystemOptions, LINK_DEPTH_LIMIT};

#[cfg(test)]
mod tests;
