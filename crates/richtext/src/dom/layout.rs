// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Linear locations over a document.
//!
//! Every character counts one location, every void counts one, and so does
//! the boundary between two consecutive text blocks. Structural rules
//! (splitting runs, wrapping or unwrapping elements, merging runs) never
//! change those counts, so a selection captured as locations before a rule
//! can be resolved back into paths afterwards.

use super::nodes::Node;
use super::{Document, DomHandle, Point, Selection};

/// Which run wins when a location sits on the boundary between two runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Affinity {
    Backward,
    Forward,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LeafSpan {
    pub handle: DomHandle,
    pub start: usize,
    pub end: usize,
    pub is_void: bool,
}

/// A block that directly holds text, or a block-level void.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BlockSpan {
    pub handle: DomHandle,
    pub start: usize,
    pub end: usize,
    pub is_void: bool,
}

impl BlockSpan {
    pub fn contains(&self, location: usize) -> bool {
        self.start <= location && location <= self.end
    }
}

#[derive(Debug, Default)]
pub(crate) struct Layout {
    pub leaves: Vec<LeafSpan>,
    pub blocks: Vec<BlockSpan>,
}

impl Layout {
    pub fn of(document: &Document) -> Self {
        let mut layout = Self::default();
        let mut position = 0;
        layout.walk_blocks(document.children(), &DomHandle::root(), &mut position);
        layout
    }

    fn walk_blocks(
        &mut self,
        nodes: &[Node],
        parent: &DomHandle,
        position: &mut usize,
    ) {
        for (index, node) in nodes.iter().enumerate() {
            let Node::Element(element) = node else {
                continue;
            };
            if element.is_inline() {
                continue;
            }
            let handle = parent.child_handle(index);
            if element.is_void() || element.has_inline_content() {
                if !self.blocks.is_empty() {
                    *position += 1;
                }
                let start = *position;
                if element.is_void() {
                    self.push_void(handle.child_handle(0), position);
                } else {
                    self.walk_inline(element.children(), &handle, position);
                }
                self.blocks.push(BlockSpan {
                    handle,
                    start,
                    end: *position,
                    is_void: element.is_void(),
                });
            } else {
                self.walk_blocks(element.children(), &handle, position);
            }
        }
    }

    fn walk_inline(
        &mut self,
        nodes: &[Node],
        parent: &DomHandle,
        position: &mut usize,
    ) {
        for (index, node) in nodes.iter().enumerate() {
            let handle = parent.child_handle(index);
            match node {
                Node::Text(text) => {
                    let len = text.char_len();
                    self.leaves.push(LeafSpan {
                        handle,
                        start: *position,
                        end: *position + len,
                        is_void: false,
                    });
                    *position += len;
                }
                Node::Element(element) if element.is_void() => {
                    self.push_void(handle.child_handle(0), position)
                }
                Node::Element(element) => {
                    self.walk_inline(element.children(), &handle, position)
                }
            }
        }
    }

    fn push_void(&mut self, handle: DomHandle, position: &mut usize) {
        self.leaves.push(LeafSpan {
            handle,
            start: *position,
            end: *position + 1,
            is_void: true,
        });
        *position += 1;
    }

    pub fn len(&self) -> usize {
        self.blocks.last().map_or(0, |block| block.end)
    }

    pub fn location_of(&self, point: &Point) -> Option<usize> {
        let leaf = self.leaves.iter().find(|leaf| leaf.handle == point.path)?;
        if leaf.is_void {
            Some(leaf.start)
        } else {
            Some(leaf.start + point.offset.min(leaf.end - leaf.start))
        }
    }

    /// Resolve a location to a point in a text run. Voids are only chosen
    /// when no text run touches the location.
    pub fn point_at(&self, location: usize, affinity: Affinity) -> Option<Point> {
        let mut candidates = self.leaves.iter().filter(|leaf| {
            !leaf.is_void && leaf.start <= location && location <= leaf.end
        });
        let text_leaf = match affinity {
            Affinity::Backward => candidates.next(),
            Affinity::Forward => candidates.last(),
        };
        if let Some(leaf) = text_leaf {
            return Some(Point::new(leaf.handle.clone(), location - leaf.start));
        }
        if let Some(leaf) = self.leaves.iter().find(|leaf| {
            leaf.is_void && leaf.start <= location && location <= leaf.end
        }) {
            return Some(Point::new(leaf.handle.clone(), 0));
        }
        // Past the end, or in a block without runs: clamp to the closest
        // preceding run.
        let leaf = self
            .leaves
            .iter()
            .rev()
            .find(|leaf| leaf.start <= location)
            .or_else(|| self.leaves.first())?;
        let offset = if leaf.is_void { 0 } else { leaf.end - leaf.start };
        Some(Point::new(leaf.handle.clone(), offset))
    }

    /// `(start, end)` locations of a selection, whatever its direction.
    pub fn range_of(&self, selection: &Selection) -> Option<(usize, usize)> {
        let anchor = self.location_of(&selection.anchor)?;
        let focus = self.location_of(&selection.focus)?;
        Some((anchor.min(focus), anchor.max(focus)))
    }

    pub fn block_at(&self, location: usize) -> Option<&BlockSpan> {
        self.blocks.iter().find(|block| block.contains(location))
    }

    /// Blocks intersecting `[start, end]`. A block that only begins exactly
    /// where an expanded range ends is left out.
    pub fn blocks_touching(&self, start: usize, end: usize) -> Vec<&BlockSpan> {
        self.blocks
            .iter()
            .filter(|block| block.start <= end && block.end >= start)
            .filter(|block| !(start < end && block.start == end))
            .collect()
    }
}

/// A selection measured in locations, to be restored after a rule has
/// restructured the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SelectionLocations {
    pub anchor: usize,
    pub focus: usize,
}

impl SelectionLocations {
    pub fn capture(document: &Document, selection: &Selection) -> Option<Self> {
        let layout = Layout::of(document);
        Some(Self {
            anchor: layout.location_of(&selection.anchor)?,
            focus: layout.location_of(&selection.focus)?,
        })
    }

    pub fn collapsed(location: usize) -> Self {
        Self {
            anchor: location,
            focus: location,
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.focus)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// An expanded range keeps hold of the runs it covers: its start prefers
    /// the following run and its end the preceding one.
    pub fn restore(&self, document: &Document) -> Option<Selection> {
        if self.is_collapsed() {
            return self.restore_with(document, Affinity::Backward);
        }
        let layout = Layout::of(document);
        let start = layout.point_at(self.start(), Affinity::Forward)?;
        let end = layout.point_at(self.end(), Affinity::Backward)?;
        if self.anchor <= self.focus {
            Some(Selection::new(start, end))
        } else {
            Some(Selection::new(end, start))
        }
    }

    /// Restore as a caret at the anchor location.
    pub fn restore_with(
        &self,
        document: &Document,
        affinity: Affinity,
    ) -> Option<Selection> {
        Layout::of(document)
            .point_at(self.anchor, affinity)
            .map(Selection::collapsed)
    }
}

/// Make sure a run boundary exists at `location`, splitting the run that
/// straddles it.
pub(crate) fn split_text_at_location(document: &mut Document, location: usize) {
    let layout = Layout::of(document);
    let straddling = layout.leaves.iter().find(|leaf| {
        !leaf.is_void && leaf.start < location && location < leaf.end
    });
    if let Some(leaf) = straddling {
        document.split_text(&leaf.handle, location - leaf.start);
    }
}
