//! Object tree for BlendInt.
//!
//! Provides the arena that every view node lives in:
//! - Stable generational identifiers via slot-map storage
//! - Parent/child containment with an intrusive doubly-linked child list
//! - O(1) insertion and removal anywhere in a sibling list
//! - Cycle-free re-parenting (a node is always unbound from its old parent first)
//!
//! # Key Types
//!
//! - [`ObjectId`] - Generational handle to a node
//! - [`ObjectTree`] - The arena, generic over the per-node payload
//! - [`Children`] - Double-ended iterator over a node's children
//!
//! The tree knows nothing about geometry or behavior. `blendint` stores its
//! view nodes here and layers the update-request protocol on top.
//!
//! # Example
//!
//! ```
//! use blendint_core::ObjectTree;
//!
//! let mut tree = ObjectTree::new();
//! let root = tree.insert("root");
//! let a = tree.insert("a");
//! let b = tree.insert("b");
//!
//! tree.push_back(root, a).unwrap();
//! tree.push_front(root, b).unwrap();
//!
//! let order: Vec<_> = tree.children(root).collect();
//! assert_eq!(order, vec![b, a]);
//! assert_eq!(tree.parent(a), Some(root));
//! ```

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a node in an [`ObjectTree`].
    ///
    /// Identifiers are generational: once the node is removed, the id never
    /// resolves again, even if the slot is reused by a later insertion.
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Errors that can occur during tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// Attempted to make an object its own parent or ancestor.
    CircularParentage,
    /// The operation needs a parent but the object is a root.
    NotAttached,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
            Self::NotAttached => write!(f, "Object has no parent"),
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Intrusive links stored next to every payload.
#[derive(Debug, Clone, Copy, Default)]
struct Links {
    parent: Option<ObjectId>,
    previous: Option<ObjectId>,
    next: Option<ObjectId>,
    first_child: Option<ObjectId>,
    last_child: Option<ObjectId>,
    child_count: usize,
}

struct Slot<T> {
    links: Links,
    data: T,
}

/// Arena of nodes linked into a forest.
///
/// Each parent keeps `first_child`/`last_child`, each child keeps
/// `previous`/`next`. Children later in the list are considered "on top"
/// by callers that care about paint order.
pub struct ObjectTree<T> {
    objects: SlotMap<ObjectId, Slot<T>>,
}

impl<T> Default for ObjectTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObjectTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Insert a detached node and return its id.
    pub fn insert(&mut self, data: T) -> ObjectId {
        let id = self.objects.insert(Slot {
            links: Links::default(),
            data,
        });
        tracing::trace!(target: targets::OBJECT, ?id, "inserted object");
        id
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the tree holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Check if a node exists.
    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Borrow a node's payload.
    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.objects.get(id).map(|slot| &slot.data)
    }

    /// Mutably borrow a node's payload.
    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.objects.get_mut(id).map(|slot| &mut slot.data)
    }

    /// Iterate over every node in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.objects.iter().map(|(id, slot)| (id, &slot.data))
    }

    /// All nodes without a parent.
    pub fn roots(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, slot)| slot.links.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// The node's parent.
    #[inline]
    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(|slot| slot.links.parent)
    }

    /// First (bottom-most) child.
    #[inline]
    pub fn first_child(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(|slot| slot.links.first_child)
    }

    /// Last (top-most) child.
    #[inline]
    pub fn last_child(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(|slot| slot.links.last_child)
    }

    /// Next sibling.
    #[inline]
    pub fn next_sibling(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(|slot| slot.links.next)
    }

    /// Previous sibling.
    #[inline]
    pub fn previous_sibling(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(|slot| slot.links.previous)
    }

    /// Number of direct children. Zero for unknown ids.
    #[inline]
    pub fn child_count(&self, id: ObjectId) -> usize {
        self.objects.get(id).map_or(0, |slot| slot.links.child_count)
    }

    /// Iterate over the direct children, first to last.
    ///
    /// The iterator is double-ended, so `.rev()` walks top-most first.
    pub fn children(&self, id: ObjectId) -> Children<'_, T> {
        let links = self.objects.get(id).map(|slot| slot.links).unwrap_or_default();
        Children {
            tree: self,
            front: links.first_child,
            back: links.last_child,
            remaining: links.child_count,
        }
    }

    /// Position of `id` within its parent's child list.
    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).position(|child| child == id)
    }

    /// The child at `index`, if any.
    pub fn child_at(&self, parent: ObjectId, index: usize) -> Option<ObjectId> {
        self.children(parent).nth(index)
    }

    /// Check if `ancestor` is `id` itself or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == ancestor {
                return true;
            }
            current = self.parent(current_id);
        }
        false
    }

    /// Collect all descendants in depth-first pre-order (parents before children).
    pub fn descendants(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut result = Vec::new();
        let mut stack: Vec<ObjectId> = self.children(id).rev().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).rev());
        }
        result
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// The child is unbound from its current parent first.
    pub fn push_back(&mut self, parent: ObjectId, child: ObjectId) -> ObjectResult<()> {
        self.check_attach(parent, child)?;
        self.unlink(child);
        let previous = self.objects[parent].links.last_child;
        self.link(parent, child, previous, None);
        Ok(())
    }

    /// Prepend `child` as the first child of `parent`.
    pub fn push_front(&mut self, parent: ObjectId, child: ObjectId) -> ObjectResult<()> {
        self.check_attach(parent, child)?;
        self.unlink(child);
        let next = self.objects[parent].links.first_child;
        self.link(parent, child, None, next);
        Ok(())
    }

    /// Insert `child` so that it ends up at `index` in `parent`'s list.
    ///
    /// An index past the end appends.
    pub fn insert_at(&mut self, parent: ObjectId, index: usize, child: ObjectId) -> ObjectResult<()> {
        self.check_attach(parent, child)?;
        self.unlink(child);
        match self.child_at(parent, index) {
            Some(anchor) => {
                let previous = self.objects[anchor].links.previous;
                self.link(parent, child, previous, Some(anchor));
            }
            None => {
                let previous = self.objects[parent].links.last_child;
                self.link(parent, child, previous, None);
            }
        }
        Ok(())
    }

    /// Insert `child` directly after `anchor` in `anchor`'s parent.
    pub fn insert_after(&mut self, anchor: ObjectId, child: ObjectId) -> ObjectResult<()> {
        if anchor == child {
            return if self.contains(child) {
                Ok(())
            } else {
                Err(ObjectError::InvalidObjectId)
            };
        }
        let parent = self.attached_parent(anchor)?;
        self.check_attach(parent, child)?;
        self.unlink(child);
        let next = self.objects[anchor].links.next;
        self.link(parent, child, Some(anchor), next);
        Ok(())
    }

    /// Insert `child` directly before `anchor` in `anchor`'s parent.
    pub fn insert_before(&mut self, anchor: ObjectId, child: ObjectId) -> ObjectResult<()> {
        if anchor == child {
            return if self.contains(child) {
                Ok(())
            } else {
                Err(ObjectError::InvalidObjectId)
            };
        }
        let parent = self.attached_parent(anchor)?;
        self.check_attach(parent, child)?;
        self.unlink(child);
        let previous = self.objects[anchor].links.previous;
        self.link(parent, child, previous, Some(anchor));
        Ok(())
    }

    /// Unbind a node from its parent, returning the former parent.
    pub fn detach(&mut self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        if !self.contains(id) {
            return Err(ObjectError::InvalidObjectId);
        }
        let parent = self.objects[id].links.parent;
        self.unlink(id);
        Ok(parent)
    }

    /// Move a node to the end of its sibling list (top of the z-order).
    pub fn move_to_last(&mut self, id: ObjectId) -> ObjectResult<()> {
        let parent = self.attached_parent(id)?;
        if self.objects[parent].links.last_child == Some(id) {
            return Ok(());
        }
        self.push_back(parent, id)
    }

    /// Move a node to the start of its sibling list (bottom of the z-order).
    pub fn move_to_first(&mut self, id: ObjectId) -> ObjectResult<()> {
        let parent = self.attached_parent(id)?;
        if self.objects[parent].links.first_child == Some(id) {
            return Ok(());
        }
        self.push_front(parent, id)
    }

    /// Remove a node and return its payload.
    ///
    /// The node is unbound from its parent; its children become roots. Callers
    /// that want cascading removal walk [`descendants`](Self::descendants) first.
    pub fn remove(&mut self, id: ObjectId) -> ObjectResult<T> {
        if !self.contains(id) {
            return Err(ObjectError::InvalidObjectId);
        }
        self.unlink(id);

        let mut child = self.objects[id].links.first_child;
        while let Some(child_id) = child {
            let links = &mut self.objects[child_id].links;
            child = links.next;
            links.parent = None;
            links.previous = None;
            links.next = None;
        }

        let slot = self.objects.remove(id).ok_or(ObjectError::InvalidObjectId)?;
        tracing::trace!(target: targets::OBJECT, ?id, "removed object");
        Ok(slot.data)
    }

    // =========================================================================
    // Link maintenance
    // =========================================================================

    fn attached_parent(&self, id: ObjectId) -> ObjectResult<ObjectId> {
        let slot = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        slot.links.parent.ok_or(ObjectError::NotAttached)
    }

    fn check_attach(&self, parent: ObjectId, child: ObjectId) -> ObjectResult<()> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(ObjectError::InvalidObjectId);
        }
        if self.is_ancestor_of(child, parent) {
            return Err(ObjectError::CircularParentage);
        }
        Ok(())
    }

    /// Splice `child` between `previous` and `next` under `parent`.
    fn link(
        &mut self,
        parent: ObjectId,
        child: ObjectId,
        previous: Option<ObjectId>,
        next: Option<ObjectId>,
    ) {
        {
            let links = &mut self.objects[child].links;
            links.parent = Some(parent);
            links.previous = previous;
            links.next = next;
        }
        match previous {
            Some(previous) => self.objects[previous].links.next = Some(child),
            None => self.objects[parent].links.first_child = Some(child),
        }
        match next {
            Some(next) => self.objects[next].links.previous = Some(child),
            None => self.objects[parent].links.last_child = Some(child),
        }
        self.objects[parent].links.child_count += 1;
        tracing::trace!(target: targets::OBJECT, ?parent, ?child, "linked object");
    }

    /// Take `id` out of its parent's list. No-op for roots.
    fn unlink(&mut self, id: ObjectId) {
        let links = self.objects[id].links;
        let Some(parent) = links.parent else {
            return;
        };
        match links.previous {
            Some(previous) => self.objects[previous].links.next = links.next,
            None => self.objects[parent].links.first_child = links.next,
        }
        match links.next {
            Some(next) => self.objects[next].links.previous = links.previous,
            None => self.objects[parent].links.last_child = links.previous,
        }
        let parent_links = &mut self.objects[parent].links;
        parent_links.child_count = parent_links.child_count.saturating_sub(1);

        let own = &mut self.objects[id].links;
        own.parent = None;
        own.previous = None;
        own.next = None;
    }
}

/// Iterator over the direct children of a node.
pub struct Children<'a, T> {
    tree: &'a ObjectTree<T>,
    front: Option<ObjectId>,
    back: Option<ObjectId>,
    remaining: usize,
}

impl<T> Iterator for Children<'_, T> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<ObjectId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.tree.next_sibling(id);
        self.remaining -= 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Children<'_, T> {
    fn next_back(&mut self) -> Option<ObjectId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.tree.previous_sibling(id);
        self.remaining -= 1;
        Some(id)
    }
}

impl<T> ExactSizeIterator for Children<'_, T> {}

static_assertions::assert_impl_all!(ObjectId: Copy, Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn children_of<T>(tree: &ObjectTree<T>, id: ObjectId) -> Vec<ObjectId> {
        tree.children(id).collect()
    }

    #[test]
    fn test_push_back_and_front() {
        let mut tree = ObjectTree::new();
        let root = tree.insert(0);
        let a = tree.insert(1);
        let b = tree.insert(2);
        let c = tree.insert(3);

        tree.push_back(root, a).unwrap();
        tree.push_back(root, b).unwrap();
        tree.push_front(root, c).unwrap();

        assert_eq!(children_of(&tree, root), vec![c, a, b]);
        assert_eq!(tree.child_count(root), 3);
        assert_eq!(tree.first_child(root), Some(c));
        assert_eq!(tree.last_child(root), Some(b));
        assert_eq!(tree.previous_sibling(a), Some(c));
        assert_eq!(tree.next_sibling(a), Some(b));
    }

    #[test]
    fn test_reverse_iteration() {
        let mut tree = ObjectTree::new();
        let root = tree.insert(());
        let ids: Vec<_> = (0..4).map(|_| tree.insert(())).collect();
        for &id in &ids {
            tree.push_back(root, id).unwrap();
        }

        let reversed: Vec<_> = tree.children(root).rev().collect();
        let mut expected = ids.clone();
        expected.reverse();
        assert_eq!(reversed, expected);
        assert_eq!(tree.children(root).len(), 4);
    }

    #[test]
    fn test_reparent_unbinds_first() {
        let mut tree = ObjectTree::new();
        let first = tree.insert("first");
        let second = tree.insert("second");
        let child = tree.insert("child");

        tree.push_back(first, child).unwrap();
        tree.push_back(second, child).unwrap();

        assert_eq!(tree.parent(child), Some(second));
        assert_eq!(tree.child_count(first), 0);
        assert!(children_of(&tree, first).is_empty());
        assert_eq!(children_of(&tree, second), vec![child]);
    }

    #[test]
    fn test_circular_parentage_rejected() {
        let mut tree = ObjectTree::new();
        let a = tree.insert(());
        let b = tree.insert(());
        let c = tree.insert(());
        tree.push_back(a, b).unwrap();
        tree.push_back(b, c).unwrap();

        assert_eq!(tree.push_back(c, a), Err(ObjectError::CircularParentage));
        assert_eq!(tree.push_back(a, a), Err(ObjectError::CircularParentage));
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_insert_at_and_relative() {
        let mut tree = ObjectTree::new();
        let root = tree.insert(());
        let a = tree.insert(());
        let b = tree.insert(());
        let c = tree.insert(());
        let d = tree.insert(());

        tree.push_back(root, a).unwrap();
        tree.push_back(root, b).unwrap();
        tree.insert_at(root, 1, c).unwrap();
        assert_eq!(children_of(&tree, root), vec![a, c, b]);

        tree.insert_after(b, d).unwrap();
        assert_eq!(children_of(&tree, root), vec![a, c, b, d]);

        tree.insert_before(a, d).unwrap();
        assert_eq!(children_of(&tree, root), vec![d, a, c, b]);
        assert_eq!(tree.index_of(c), Some(2));

        tree.insert_at(root, 99, a).unwrap();
        assert_eq!(children_of(&tree, root), vec![d, c, b, a]);
    }

    #[test]
    fn test_insert_after_root_fails() {
        let mut tree = ObjectTree::new();
        let root = tree.insert(());
        let other = tree.insert(());
        assert_eq!(tree.insert_after(root, other), Err(ObjectError::NotAttached));
    }

    #[test]
    fn test_move_to_last_and_first() {
        let mut tree = ObjectTree::new();
        let root = tree.insert(());
        let a = tree.insert(());
        let b = tree.insert(());
        let c = tree.insert(());
        for id in [a, b, c] {
            tree.push_back(root, id).unwrap();
        }

        tree.move_to_last(a).unwrap();
        assert_eq!(children_of(&tree, root), vec![b, c, a]);

        tree.move_to_first(c).unwrap();
        assert_eq!(children_of(&tree, root), vec![c, b, a]);
        assert_eq!(tree.child_count(root), 3);
    }

    #[test]
    fn test_remove_orphans_children() {
        let mut tree = ObjectTree::new();
        let root = tree.insert("root");
        let mid = tree.insert("mid");
        let leaf1 = tree.insert("leaf1");
        let leaf2 = tree.insert("leaf2");
        tree.push_back(root, mid).unwrap();
        tree.push_back(mid, leaf1).unwrap();
        tree.push_back(mid, leaf2).unwrap();

        assert_eq!(tree.remove(mid), Ok("mid"));
        assert!(!tree.contains(mid));
        assert_eq!(tree.child_count(root), 0);
        assert_eq!(tree.parent(leaf1), None);
        assert_eq!(tree.next_sibling(leaf1), None);
        assert_eq!(tree.previous_sibling(leaf2), None);
        assert_eq!(tree.remove(mid), Err(ObjectError::InvalidObjectId));
    }

    #[test]
    fn test_stale_id_after_slot_reuse() {
        let mut tree = ObjectTree::new();
        let old = tree.insert(1);
        tree.remove(old).unwrap();
        let new = tree.insert(2);

        assert!(!tree.contains(old));
        assert_eq!(tree.get(old), None);
        assert_eq!(tree.get(new), Some(&2));
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = ObjectTree::new();
        let root = tree.insert(());
        let a = tree.insert(());
        let a1 = tree.insert(());
        let b = tree.insert(());
        tree.push_back(root, a).unwrap();
        tree.push_back(a, a1).unwrap();
        tree.push_back(root, b).unwrap();

        assert_eq!(tree.descendants(root), vec![a, a1, b]);
        assert!(tree.is_ancestor_of(root, a1));
        assert!(!tree.is_ancestor_of(b, a1));
    }

    #[test]
    fn test_parent_child_consistency() {
        let mut tree = ObjectTree::new();
        let parents: Vec<_> = (0..3).map(|_| tree.insert(())).collect();
        let kids: Vec<_> = (0..6).map(|_| tree.insert(())).collect();

        // Shuffle children around between parents in a fixed pattern.
        for (step, &kid) in kids.iter().cycle().take(30).enumerate() {
            let parent = parents[step % parents.len()];
            match step % 4 {
                0 => tree.push_back(parent, kid).unwrap(),
                1 => tree.push_front(parent, kid).unwrap(),
                2 => tree.insert_at(parent, step % 3, kid).unwrap(),
                _ => {
                    tree.detach(kid).unwrap();
                }
            }

            for &p in &parents {
                let listed = children_of(&tree, p);
                assert_eq!(listed.len(), tree.child_count(p));
                for &k in &kids {
                    assert_eq!(listed.contains(&k), tree.parent(k) == Some(p));
                }
            }
        }
    }
}
