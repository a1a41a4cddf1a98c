//! Decoration layout: pagination and slot placement.
//!
//! Posts are split into fixed-size pages in arrival order. Within a page a
//! post's position depends only on its index, cycling through a slot table,
//! so appending a post never moves an earlier one.

use serde::Serialize;

use crate::error::CoreError;
use crate::post::Post;

/// Posts per page on the gallery.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Pixel offset of a decoration on the tree canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SlotPosition {
    pub x: i32,
    pub y: i32,
}

const DEFAULT_SLOTS: [SlotPosition; 9] = [
    SlotPosition { x: 130, y: 60 },
    SlotPosition { x: 200, y: 60 },
    SlotPosition { x: 70, y: 150 },
    SlotPosition { x: 160, y: 150 },
    SlotPosition { x: 240, y: 150 },
    SlotPosition { x: 40, y: 230 },
    SlotPosition { x: 130, y: 230 },
    SlotPosition { x: 210, y: 230 },
    SlotPosition { x: 280, y: 230 },
];

// ---------------------------------------------------------------------------
// Slot table
// ---------------------------------------------------------------------------

/// Ordered slot coordinates, indexed cyclically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    slots: Vec<SlotPosition>,
}

impl Default for SlotTable {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS.to_vec(),
        }
    }
}

impl SlotTable {
    /// Custom table. Must hold at least one slot.
    pub fn new(slots: Vec<SlotPosition>) -> Result<Self, CoreError> {
        if slots.is_empty() {
            return Err(CoreError::Validation(
                "Slot table must contain at least one position".to_string(),
            ));
        }
        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot for an intra-page index, `index mod len`.
    pub fn position_for(&self, index: usize) -> SlotPosition {
        self.slots[index % self.slots.len()]
    }
}

/// Position from the default 9-slot table.
pub fn position_for(index: usize) -> SlotPosition {
    DEFAULT_SLOTS[index % DEFAULT_SLOTS.len()]
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A derived, non-persistent group of posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    /// 1-based page number.
    pub number: usize,
    pub posts: &'a [Post],
}

/// A post paired with where it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub post: &'a Post,
    pub slot: usize,
    pub position: SlotPosition,
}

impl<'a> Page<'a> {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Every post on this page with its slot. Unused slots are not listed.
    pub fn placements(&self, table: &SlotTable) -> Vec<Placement<'a>> {
        self.posts
            .iter()
            .enumerate()
            .map(|(slot, post)| Placement {
                post,
                slot,
                position: table.position_for(slot),
            })
            .collect()
    }
}

/// `max(ceil(post_count / page_size), 1)`.
pub fn page_count(post_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    post_count.div_ceil(page_size).max(1)
}

/// Split posts into pages of `page_size`, preserving order.
///
/// An empty list still yields one empty page so the tree shell renders.
pub fn paginate(posts: &[Post], page_size: usize) -> Result<Vec<Page<'_>>, CoreError> {
    if page_size == 0 {
        return Err(CoreError::Validation(
            "Page size must be at least 1".to_string(),
        ));
    }
    if posts.is_empty() {
        return Ok(vec![Page {
            number: 1,
            posts: &[],
        }]);
    }
    Ok(posts
        .chunks(page_size)
        .enumerate()
        .map(|(i, chunk)| Page {
            number: i + 1,
            posts: chunk,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Page cursor
// ---------------------------------------------------------------------------

/// Current-page cursor for the gallery.
///
/// `current` always lies in `[1, page_count]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    page_count: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            current: 1,
            page_count: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Result<Self, CoreError> {
        if page_size == 0 {
            return Err(CoreError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            page_size,
            ..Self::default()
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Recompute the page count for a new post total and clamp `current`.
    pub fn set_post_count(&mut self, post_count: usize) {
        self.page_count = page_count(post_count, self.page_size);
        self.current = self.current.clamp(1, self.page_count);
    }

    /// Advance one page, saturating at the last page.
    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1).min(self.page_count);
        self.current
    }

    /// Go back one page, saturating at page 1.
    pub fn prev(&mut self) -> usize {
        self.current = self.current.saturating_sub(1).max(1);
        self.current
    }

    pub fn has_next(&self) -> bool {
        self.current < self.page_count
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// `"{current} / {page_count}"`, as shown between the arrows.
    pub fn indicator(&self) -> String {
        format!("{} / {}", self.current, self.page_count)
    }
}
