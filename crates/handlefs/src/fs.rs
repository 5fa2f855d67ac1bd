// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use diagnostics::*;
use serde::Serialize;

use crate::arena::{Arena, ArenaNode};
use crate::entry::Entry;
use crate::entry_type::EntryType;
use crate::error::{Error, Result};
use crate::handle::{Handle, ROOT_HANDLE};
use crate::heap::FileSizeHeap;
use crate::options::FilesystemOptions;
use crate::path;
use crate::tree_format::{TreeNode, format_layout, format_tree};

/// In-memory filesystem with a fixed size quota.
///
/// The directory tree lives in an [`Arena`] of [`Entry`] payloads. Every
/// file is also tracked in a [`FileSizeHeap`] so the largest one can be
/// found without a scan. Mutation takes `&mut self`; callers sharing a
/// filesystem between threads wrap it in a single lock.
#[derive(Debug, Clone)]
pub struct Filesystem {
    nodes: Arena<Entry>,
    sizes: FileSizeHeap,
    size_limit: u64,
    current_size: u64,
    link_depth_limit: usize,
}

/// Serializable description of one live entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub handle: Handle,
    pub path: String,
    pub kind: EntryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Handle>,
}

impl Filesystem {
    pub fn new(size_limit: u64) -> Self {
        Self::with_options(FilesystemOptions::new(size_limit))
    }

    pub fn with_options(options: FilesystemOptions) -> Self {
        debug!("filesystem created with limit {limit}", limit: options.size_limit);
        Self {
            nodes: Arena::new(),
            sizes: FileSizeHeap::new(),
            size_limit: options.size_limit,
            current_size: 0,
            link_depth_limit: options.link_depth_limit,
        }
    }

    /// True if `handle` names a live node.
    pub fn exists(&self, handle: Handle) -> bool {
        self.nodes.is_live(handle)
    }

    pub fn entry(&self, handle: Handle) -> Result<&Entry> {
        if !self.exists(handle) {
            return Err(Error::invalid_handle(handle));
        }
        self.nodes.node(handle)?.data()
    }

    fn entry_mut(&mut self, handle: Handle) -> Result<&mut Entry> {
        if !self.exists(handle) {
            return Err(Error::invalid_handle(handle));
        }
        self.nodes.node_mut(handle)?.data_mut()
    }

    fn children_of(&self, handle: Handle) -> Result<&[Handle]> {
        self.nodes.node(handle)?.children()
    }

    fn child_named(&self, dir: Handle, name: &str) -> Result<Option<Handle>> {
        for child in self.children_of(dir)? {
            if self.entry(*child)?.name() == name {
                return Ok(Some(*child));
            }
        }
        Ok(None)
    }

    /// Resolves the directory a new entry goes into. Links are followed.
    fn target_directory(&self, parent: Handle) -> Result<Handle> {
        let dir = self.follow(parent)?;
        if self.entry(dir)?.is_directory() {
            Ok(dir)
        } else {
            Err(Error::invalid_handle(parent))
        }
    }

    fn insert(&mut self, parent: Handle, entry: Entry) -> Result<Handle> {
        let handle = self.nodes.allocate(parent)?;
        *self.nodes.node_mut(handle)?.data_mut()? = entry;
        Ok(handle)
    }

    // Creation

    /// Creates a file directly under the root.
    pub fn create_file(&mut self, size: u64, name: &str) -> Result<Handle> {
        self.create_file_in(size, name, ROOT_HANDLE)
    }

    /// Creates a file under `parent`, following `parent` if it is a link.
    pub fn create_file_in(&mut self, size: u64, name: &str, parent: Handle) -> Result<Handle> {
        let dir = self.target_directory(parent)?;
        path::validate_name(name)?;
        if self.child_named(dir, name)?.is_some() {
            return Err(Error::file_exists(name));
        }
        let available = self.get_available_size();
        if size > available {
            warn!("file {name} of size {size} rejected, {available} available", name: name, size: size, available: available);
            return Err(Error::exceeds_size(size, available));
        }

        let handle = self.insert(dir, Entry::file(name, size))?;
        self.current_size += size;
        self.sizes.push(size, handle);

        debug!("created file {name} ({size}) as {handle}", name: name, size: size, handle: handle.as_usize());
        Ok(handle)
    }

    /// Creates a directory directly under the root.
    pub fn create_directory(&mut self, name: &str) -> Result<Handle> {
        self.create_directory_in(name, ROOT_HANDLE)
    }

    pub fn create_directory_in(&mut self, name: &str, parent: Handle) -> Result<Handle> {
        let dir = self.target_directory(parent)?;
        path::validate_name(name)?;
        if self.child_named(dir, name)?.is_some() {
            return Err(Error::directory_exists(name));
        }

        let handle = self.insert(dir, Entry::directory(name))?;
        debug!("created directory {name} as {handle}", name: name, handle: handle.as_usize());
        Ok(handle)
    }

    /// Creates a link to `target` directly under the root.
    ///
    /// A link stores the target's handle, not its path. If the target is
    /// removed the link is broken until that handle is reissued, after
    /// which the link resolves to whatever entry now holds it.
    pub fn create_link(&mut self, target: Handle, name: &str) -> Result<Handle> {
        self.create_link_in(target, name, ROOT_HANDLE)
    }

    pub fn create_link_in(&mut self, target: Handle, name: &str, parent: Handle) -> Result<Handle> {
        if !self.exists(target) {
            return Err(Error::invalid_handle(target));
        }
        let dir = self.target_directory(parent)?;
        path::validate_name(name)?;
        if self.child_named(dir, name)?.is_some() {
            return Err(Error::link_exists(name));
        }

        let handle = self.insert(dir, Entry::link(name, target))?;
        debug!("created link {name} to {to} as {handle}", name: name, to: target.as_usize(), handle: handle.as_usize());
        Ok(handle)
    }

    // Mutation

    /// Removes a file, a link, or an empty directory.
    ///
    /// Returns `false` without changing anything when `handle` is a
    /// directory that still has children.
    pub fn remove(&mut self, handle: Handle) -> Result<bool> {
        if handle.is_root() {
            return Err(Error::invalid_handle(handle));
        }
        let entry = self.entry(handle)?;

        match entry.kind() {
            EntryType::Directory => {
                if !self.children_of(handle)?.is_empty() {
                    debug!("directory {handle} not empty, left in place", handle: handle.as_usize());
                    return Ok(false);
                }
            }
            EntryType::File => {
                let size = entry.file_size().unwrap_or_default();
                self.sizes.remove(handle)?;
                self.current_size -= size;
            }
            EntryType::Link => {}
        }

        self.nodes.remove(handle)?;
        debug!("removed {handle}", handle: handle.as_usize());
        Ok(true)
    }

    /// Renames `handle` in place. Size accounting is unaffected.
    pub fn rename(&mut self, handle: Handle, new_name: &str) -> Result<()> {
        if handle.is_root() || !self.exists(handle) {
            return Err(Error::invalid_handle(handle));
        }
        path::validate_name(new_name)?;

        let parent = self
            .nodes
            .node(handle)?
            .parent()?
            .ok_or_else(|| Error::invalid_handle(handle))?;
        if self.child_named(parent, new_name)?.is_some() {
            return Err(Error::name_exists(new_name));
        }

        self.entry_mut(handle)?.set_name(new_name.to_string());
        debug!("renamed {handle} to {name}", handle: handle.as_usize(), name: new_name);
        Ok(())
    }

    /// Moves `handle` into the directory `new_parent` (links are followed),
    /// keeping its name.
    pub fn move_entry(&mut self, handle: Handle, new_parent: Handle) -> Result<()> {
        if handle.is_root() || !self.exists(handle) {
            return Err(Error::invalid_handle(handle));
        }
        let dir = self.target_directory(new_parent)?;

        let current_parent = self.nodes.node(handle)?.parent()?;
        if current_parent == Some(dir) {
            return Ok(());
        }

        let mut ancestor = Some(dir);
        while let Some(current) = ancestor {
            if current == handle {
                warn!("refused to move {handle} below itself", handle: handle.as_usize());
                return Err(Error::cycle_detected(handle));
            }
            ancestor = self.nodes.node(current)?.parent()?;
        }

        let name = self.entry(handle)?.name();
        if self.child_named(dir, name)?.is_some() {
            return Err(Error::name_exists(name));
        }

        self.nodes.set_parent(handle, dir)?;
        debug!("moved {handle} into {dir}", handle: handle.as_usize(), dir: dir.as_usize());
        Ok(())
    }

    /// Changes the size of a file. Links are followed.
    pub fn resize_file(&mut self, handle: Handle, new_size: u64) -> Result<()> {
        let file = self.follow(handle)?;
        let old_size = self
            .entry(file)?
            .file_size()
            .ok_or_else(|| Error::invalid_handle(handle))?;

        let available = self.get_available_size();
        if new_size > old_size && new_size - old_size > available {
            warn!("resize of {handle} to {size} rejected, {available} available", handle: file.as_usize(), size: new_size, available: available);
            return Err(Error::exceeds_size(new_size - old_size, available));
        }

        self.sizes.remove(file)?;
        self.sizes.push(new_size, file);
        self.current_size = self.current_size - old_size + new_size;
        self.entry_mut(file)?.set_file_size(new_size);

        debug!("resized {handle} from {old} to {new}", handle: file.as_usize(), old: old_size, new: new_size);
        Ok(())
    }

    // Queries

    pub fn get_name(&self, handle: Handle) -> Result<&str> {
        Ok(self.entry(handle)?.name())
    }

    /// Absolute path of `handle`: `/` for the root, `/a/b` otherwise.
    pub fn get_absolute_path(&self, handle: Handle) -> Result<String> {
        if !self.exists(handle) {
            return Err(Error::invalid_handle(handle));
        }

        let mut names = Vec::new();
        let mut current = handle;
        while let Some(parent) = self.nodes.node(current)?.parent()? {
            names.push(self.entry(current)?.name());
            current = parent;
        }
        names.reverse();
        Ok(path::join_absolute(names))
    }

    /// Resolves an absolute path to a handle.
    ///
    /// Links in intermediate components are followed; a link in the last
    /// component is returned as is.
    pub fn get_handle(&self, absolute_path: &str) -> Result<Handle> {
        let components = path::split_absolute(absolute_path)?;
        let Some((last, intermediate)) = components.split_last() else {
            return Ok(ROOT_HANDLE);
        };

        let mut dir = ROOT_HANDLE;
        for name in intermediate {
            let child = self
                .child_named(dir, name)?
                .ok_or_else(|| Error::invalid_path(absolute_path))?;
            let resolved = self.follow(child).map_err(|err| match err {
                Error::CycleDetected(_) => err,
                _ => Error::invalid_path(absolute_path),
            })?;
            if !self.entry(resolved)?.is_directory() {
                return Err(Error::invalid_path(absolute_path));
            }
            dir = resolved;
        }

        self.child_named(dir, last)?
            .ok_or_else(|| Error::invalid_path(absolute_path))
    }

    /// Follows links from `handle` until a non-link node.
    ///
    /// Revisiting a link, or following more than the configured number of
    /// links, fails with `CycleDetected`.
    ///
    /// Targets are compared by handle only: a link whose target was removed
    /// and whose handle was reissued follows to the new entry.
    pub fn follow(&self, handle: Handle) -> Result<Handle> {
        let mut visited = HashSet::new();
        let mut current = handle;
        loop {
            let Some(target) = self.entry(current)?.link_target() else {
                return Ok(current);
            };
            if !visited.insert(current) || visited.len() > self.link_depth_limit {
                warn!("link cycle from {handle}", handle: handle.as_usize());
                return Err(Error::cycle_detected(handle));
            }
            current = target;
        }
    }

    pub fn get_available_size(&self) -> u64 {
        self.size_limit - self.current_size
    }

    /// Size of the file at `handle`, following links.
    pub fn get_file_size(&self, handle: Handle) -> Result<u64> {
        let resolved = self.follow(handle)?;
        self.entry(resolved)?
            .file_size()
            .ok_or_else(|| Error::invalid_handle(handle))
    }

    pub fn get_file_size_path(&self, absolute_path: &str) -> Result<u64> {
        self.get_file_size(self.get_handle(absolute_path)?)
    }

    pub fn get_largest_file_handle(&self) -> Result<Handle> {
        self.sizes.top()
    }

    /// Children of a directory in insertion order. Links are followed.
    pub fn children(&self, handle: Handle) -> Result<&[Handle]> {
        let dir = self.target_directory(handle)?;
        self.children_of(dir)
    }

    /// Every arena slot, recycled ones included.
    pub fn nodes(&self) -> &[ArenaNode<Entry>] {
        self.nodes.nodes()
    }

    pub fn size_limit(&self) -> u64 {
        self.size_limit
    }

    pub fn used_size(&self) -> u64 {
        self.current_size
    }

    pub fn file_count(&self) -> usize {
        self.sizes.len()
    }

    // Rendering

    /// Tab-indented listing of everything below the root.
    ///
    /// ```
    /// let mut fs = handlefs::Filesystem::new(100);
    /// let docs = fs.create_directory("docs").unwrap();
    /// let a = fs.create_file_in(5, "a.txt", docs).unwrap();
    /// fs.create_link(a, "shortcut").unwrap();
    ///
    /// assert_eq!(
    ///     fs.print_layout().unwrap(),
    ///     "[D]docs\n\t[F]a.txt (size = 5)\n[L]shortcut [->/docs/a.txt]\n"
    /// );
    /// ```
    pub fn print_layout(&self) -> Result<String> {
        Ok(format_layout(&self.build_tree()?))
    }

    /// Same tree as [`print_layout`](Self::print_layout), drawn with
    /// box connectors under a `/` root line.
    pub fn print_tree(&self) -> Result<String> {
        Ok(format_tree(&self.build_tree()?))
    }

    fn label(&self, handle: Handle) -> Result<String> {
        if handle.is_root() {
            return Ok(path::SEPARATOR.to_string());
        }
        let entry = self.entry(handle)?;
        let mut label = format!("{}{}", entry.kind().marker(), entry.name());
        match entry.kind() {
            EntryType::File => {
                label.push_str(&format!(" (size = {})", entry.file_size().unwrap_or_default()));
            }
            EntryType::Link => {
                match self.follow(handle).and_then(|t| self.get_absolute_path(t)) {
                    Ok(target) => label.push_str(&format!(" [->{}]", target)),
                    Err(_) => label.push_str(" [invalid]"),
                }
            }
            EntryType::Directory => {}
        }
        Ok(label)
    }

    fn build_tree(&self) -> Result<TreeNode> {
        let mut stack = vec![Frame::new(TreeNode::new(self.label(ROOT_HANDLE)?), self.children_of(ROOT_HANDLE)?)];
        let mut tree = None;

        while let Some(frame) = stack.last_mut() {
            if let Some(&child) = frame.children.get(frame.next) {
                frame.next += 1;
                let child_frame = Frame::new(TreeNode::new(self.label(child)?), self.children_of(child)?);
                stack.push(child_frame);
                continue;
            }
            if let Some(done) = stack.pop() {
                match stack.last_mut() {
                    Some(parent) => parent.node.add_child(done.node),
                    None => tree = Some(done.node),
                }
            }
        }
        tree.ok_or_else(|| Error::invalid_handle(ROOT_HANDLE))
    }

    /// Live entries below the root in pre-order.
    pub fn snapshot(&self) -> Result<Vec<EntrySnapshot>> {
        let mut snapshot = Vec::new();
        let mut pending: Vec<Handle> = self.children_of(ROOT_HANDLE)?.iter().rev().copied().collect();

        while let Some(handle) = pending.pop() {
            let entry = self.entry(handle)?;
            snapshot.push(EntrySnapshot {
                handle,
                path: self.get_absolute_path(handle)?,
                kind: entry.kind(),
                size: entry.file_size(),
                target: entry.link_target(),
            });
            pending.extend(self.children_of(handle)?.iter().rev());
        }
        Ok(snapshot)
    }
}

/// Partially built subtree used while rendering.
struct Frame<'a> {
    node: TreeNode,
    children: &'a [Handle],
    next: usize,
}

impl<'a> Frame<'a> {
    fn new(node: TreeNode, children: &'a [Handle]) -> Self {
        Self {
            node,
            children,
            next: 0,
        }
    }
}
