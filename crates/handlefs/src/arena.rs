//! Handle-addressed node pool with slot recycling.
//!
//! Nodes live in a growable vector indexed by [`Handle`]. Parent and child
//! relations are stored as handles, never as references, so mutating one
//! node never invalidates another. Removing a node recycles its whole
//! subtree; recycled handles are reissued in FIFO order.
//!
//! The arena knows nothing about what the payload means.

use std::collections::VecDeque;

use diagnostics::*;

use crate::error::{Error, Result};
use crate::handle::{Handle, ROOT_HANDLE};

/// One slot of the arena.
#[derive(Debug, Clone)]
pub struct ArenaNode<T> {
    handle: Handle,
    recycled: bool,
    data: T,
    parent: Option<Handle>,
    children: Vec<Handle>,
}

impl<T: Default> ArenaNode<T> {
    fn vacant(handle: Handle) -> Self {
        Self {
            handle,
            recycled: true,
            data: T::default(),
            parent: None,
            children: Vec::new(),
        }
    }
}

impl<T> ArenaNode<T> {
    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn is_recycled(&self) -> bool {
        self.recycled
    }

    pub fn data(&self) -> Result<&T> {
        self.live()?;
        Ok(&self.data)
    }

    pub fn data_mut(&mut self) -> Result<&mut T> {
        self.live()?;
        Ok(&mut self.data)
    }

    /// Parent handle; `None` only for the root.
    pub fn parent(&self) -> Result<Option<Handle>> {
        self.live()?;
        Ok(self.parent)
    }

    /// Child handles in insertion order.
    pub fn children(&self) -> Result<&[Handle]> {
        self.live()?;
        Ok(&self.children)
    }

    fn live(&self) -> Result<()> {
        if self.recycled {
            Err(Error::recycled_node(self.handle))
        } else {
            Ok(())
        }
    }
}

/// Pool of tree nodes addressed by [`Handle`].
#[derive(Debug, Clone)]
pub struct Arena<T> {
    nodes: Vec<ArenaNode<T>>,
    pool: VecDeque<Handle>,
}

impl<T: Default> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> Arena<T> {
    /// Creates an arena holding only the root node.
    pub fn new() -> Self {
        let mut root = ArenaNode::vacant(ROOT_HANDLE);
        root.recycled = false;
        Self {
            nodes: vec![root],
            pool: VecDeque::new(),
        }
    }

    /// Issues a live node as the last child of `parent`.
    ///
    /// Recycled slots are reused before the vector grows. The new node's
    /// payload is `T::default()`; callers fill it in afterwards.
    pub fn allocate(&mut self, parent: Handle) -> Result<Handle> {
        self.check_live(parent)?;

        let handle = match self.pool.pop_front() {
            Some(handle) => handle,
            None => {
                let handle = Handle::new(self.nodes.len());
                self.nodes.push(ArenaNode::vacant(handle));
                handle
            }
        };

        let node = &mut self.nodes[handle.as_usize()];
        node.recycled = false;
        node.parent = Some(parent);
        self.nodes[parent.as_usize()].children.push(handle);

        debug!("arena allocated {handle} under {parent}", handle: handle.as_usize(), parent: parent.as_usize());
        Ok(handle)
    }

    /// Recycles `handle` and every live node below it.
    ///
    /// Descendants are recycled before their parents. The root cannot be
    /// removed.
    pub fn remove(&mut self, handle: Handle) -> Result<()> {
        if handle.is_root() {
            return Err(Error::invalid_handle(handle));
        }
        self.check_live(handle)?;

        if let Some(parent) = self.nodes[handle.as_usize()].parent {
            self.nodes[parent.as_usize()]
                .children
                .retain(|child| *child != handle);
        }

        // (handle, children already pushed)
        let mut pending = vec![(handle, false)];
        while let Some((current, expanded)) = pending.pop() {
            if expanded {
                self.recycle(current);
                continue;
            }
            pending.push((current, true));
            for child in self.nodes[current.as_usize()].children.iter().rev() {
                if !self.nodes[child.as_usize()].recycled {
                    pending.push((*child, false));
                }
            }
        }
        Ok(())
    }

    fn recycle(&mut self, handle: Handle) {
        let node = &mut self.nodes[handle.as_usize()];
        node.recycled = true;
        node.parent = None;
        node.children.clear();
        node.data = T::default();
        self.pool.push_back(handle);
        debug!("arena recycled {handle}", handle: handle.as_usize());
    }
}

impl<T> Arena<T> {
    /// Moves `target` to the end of `new_parent`'s children.
    ///
    /// Fails with `InvalidHandle` for the root as target and when
    /// `new_parent`'s parent is `target`, and with `CycleDetected` when
    /// `new_parent` is `target` or lies anywhere below it.
    pub fn set_parent(&mut self, target: Handle, new_parent: Handle) -> Result<()> {
        if target.is_root() {
            return Err(Error::invalid_handle(target));
        }
        self.check_range(target)?;
        self.check_range(new_parent)?;
        self.check_live(target)?;
        self.check_live(new_parent)?;

        if self.nodes[new_parent.as_usize()].parent == Some(target) {
            return Err(Error::invalid_handle(new_parent));
        }

        let mut ancestor = Some(new_parent);
        while let Some(current) = ancestor {
            if current == target {
                warn!("arena refused to move {node} under its descendant {parent}", node: target.as_usize(), parent: new_parent.as_usize());
                return Err(Error::cycle_detected(target));
            }
            ancestor = self.nodes[current.as_usize()].parent;
        }

        if let Some(old_parent) = self.nodes[target.as_usize()].parent {
            self.nodes[old_parent.as_usize()]
                .children
                .retain(|child| *child != target);
        }
        self.nodes[target.as_usize()].parent = Some(new_parent);
        self.nodes[new_parent.as_usize()].children.push(target);

        debug!("arena moved {node} under {parent}", node: target.as_usize(), parent: new_parent.as_usize());
        Ok(())
    }

    /// All slots, recycled ones included.
    pub fn nodes(&self) -> &[ArenaNode<T>] {
        &self.nodes
    }

    /// The slot for `handle`, whether live or recycled.
    pub fn node(&self, handle: Handle) -> Result<&ArenaNode<T>> {
        self.check_range(handle)?;
        Ok(&self.nodes[handle.as_usize()])
    }

    pub fn node_mut(&mut self, handle: Handle) -> Result<&mut ArenaNode<T>> {
        self.check_range(handle)?;
        Ok(&mut self.nodes[handle.as_usize()])
    }

    pub fn is_live(&self, handle: Handle) -> bool {
        self.nodes
            .get(handle.as_usize())
            .is_some_and(|node| !node.recycled)
    }

    /// Number of slots ever issued, recycled ones included.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn live_count(&self) -> usize {
        self.nodes.len() - self.pool.len()
    }

    fn check_range(&self, handle: Handle) -> Result<()> {
        if handle.as_usize() < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::invalid_handle(handle))
        }
    }

    fn check_live(&self, handle: Handle) -> Result<()> {
        self.check_range(handle)?;
        if self.nodes[handle.as_usize()].recycled {
            Err(Error::recycled_node(handle))
        } else {
            Ok(())
        }
    }
}
