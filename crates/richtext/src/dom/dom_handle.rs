// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

/// The path from the document root to a node, as child indices.
///
/// Handles order like the nodes they point at in a depth-first walk of the
/// document: an ancestor sorts before its descendants.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct DomHandle {
    path: Vec<usize>,
}

impl DomHandle {
    pub fn root() -> Self {
        Self { path: Vec::new() }
    }

    pub fn from_raw(path: Vec<usize>) -> Self {
        Self { path }
    }

    pub fn raw(&self) -> &Vec<usize> {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn has_parent(&self) -> bool {
        !self.is_root()
    }

    /// The root is its own parent.
    pub fn parent_handle(&self) -> DomHandle {
        let mut path = self.path.clone();
        path.pop();
        Self { path }
    }

    pub fn child_handle(&self, index: usize) -> DomHandle {
        let mut path = self.path.clone();
        path.push(index);
        Self { path }
    }

    pub fn index_in_parent(&self) -> usize {
        self.path.last().copied().unwrap_or(0)
    }

    pub fn next_sibling(&self) -> DomHandle {
        let mut path = self.path.clone();
        if let Some(last) = path.last_mut() {
            *last += 1;
        }
        Self { path }
    }

    pub fn prev_sibling(&self) -> Option<DomHandle> {
        let mut path = self.path.clone();
        let last = path.last_mut()?;
        *last = last.checked_sub(1)?;
        Some(Self { path })
    }

    /// Strict ancestry: a handle is not its own ancestor.
    pub fn is_ancestor_of(&self, other: &DomHandle) -> bool {
        other.path.len() > self.path.len() && other.path.starts_with(&self.path)
    }

    pub fn common_prefix_len(&self, other: &DomHandle) -> usize {
        self.path
            .iter()
            .zip(other.path.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }

    pub fn ancestor_at_depth(&self, depth: usize) -> DomHandle {
        Self {
            path: self.path[..depth.min(self.path.len())].to_vec(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::DomHandle;

    #[test]
    fn navigating_between_relatives() {
        let handle = DomHandle::from_raw(vec![2, 0, 3]);
        assert_eq!(handle.parent_handle().raw(), &vec![2, 0]);
        assert_eq!(handle.child_handle(1).raw(), &vec![2, 0, 3, 1]);
        assert_eq!(handle.next_sibling().raw(), &vec![2, 0, 4]);
        assert_eq!(handle.prev_sibling().unwrap().raw(), &vec![2, 0, 2]);
        assert_eq!(handle.index_in_parent(), 3);
    }

    #[test]
    fn first_child_has_no_previous_sibling() {
        assert_eq!(DomHandle::from_raw(vec![1, 0]).prev_sibling(), None);
        assert_eq!(DomHandle::root().prev_sibling(), None);
    }

    #[test]
    fn ancestry_is_strict() {
        let parent = DomHandle::from_raw(vec![1]);
        assert!(parent.is_ancestor_of(&DomHandle::from_raw(vec![1, 0])));
        assert!(!parent.is_ancestor_of(&parent));
        assert!(!parent.is_ancestor_of(&DomHandle::from_raw(vec![2, 0])));
        assert!(DomHandle::root().is_ancestor_of(&parent));
    }

    #[test]
    fn handles_sort_in_document_order() {
        let mut handles = vec![
            DomHandle::from_raw(vec![1]),
            DomHandle::from_raw(vec![0, 1]),
            DomHandle::from_raw(vec![0]),
        ];
        handles.sort();
        assert_eq!(
            handles,
            vec![
                DomHandle::from_raw(vec![0]),
                DomHandle::from_raw(vec![0, 1]),
                DomHandle::from_raw(vec![1]),
            ]
        );
    }

    #[test]
    fn common_prefix() {
        let a = DomHandle::from_raw(vec![0, 2, 1]);
        let b = DomHandle::from_raw(vec![0, 2, 5, 0]);
        assert_eq!(a.common_prefix_len(&b), 2);
        assert_eq!(a.ancestor_at_depth(2), DomHandle::from_raw(vec![0, 2]));
    }
}
