//! Ownership and visibility policy for a viewed tree.
//!
//! Letter bodies are only ever revealed to the tree owner. Non-owners get
//! the "decorate" action, owners get "share".

use serde::Serialize;

use crate::post::Post;
use crate::routing::TreeTarget;
use crate::types::UserId;

/// Why the viewer was (or was not) considered the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerDecision {
    /// Viewer id matches the tree owner id.
    IdMatch,
    /// Both ids are known and differ.
    IdMismatch,
    /// No explicit owner id; the viewer is on their own default tree.
    OwnerFallback,
    /// No explicit owner id and not the default tree, or no viewer id.
    Unknown,
}

impl OwnerDecision {
    pub fn is_owner(self) -> bool {
        matches!(self, Self::IdMatch | Self::OwnerFallback)
    }
}

/// Decide ownership for `viewer` looking at `target`.
///
/// `owner_id` is the explicit owner id when one is known. Without it, a
/// viewer on their own default tree counts as the owner. That fallback
/// also covers an anonymous link to the default route; it is kept as a
/// named rule rather than folded into the id comparison.
pub fn decide_owner(
    viewer: Option<UserId>,
    owner_id: Option<UserId>,
    target: TreeTarget,
) -> OwnerDecision {
    match (viewer, owner_id.or(target.owner_id())) {
        (Some(v), Some(o)) if v == o => OwnerDecision::IdMatch,
        (Some(_), Some(_)) => OwnerDecision::IdMismatch,
        (_, None) if target.is_default() => OwnerDecision::OwnerFallback,
        _ => OwnerDecision::Unknown,
    }
}

/// `true` if the viewer owns the tree.
pub fn is_owner(viewer: Option<UserId>, owner_id: Option<UserId>, target: TreeTarget) -> bool {
    decide_owner(viewer, owner_id, target).is_owner()
}

/// Outcome of clicking a decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostReveal {
    Revealed {
        sender: String,
        img_name: String,
        content: String,
    },
    /// Viewer is not the owner. Nothing from the letter is exposed.
    Denied,
    /// Viewer is the owner but the body was not delivered.
    Unavailable,
}

impl PostReveal {
    /// Notice text for the non-revealed outcomes.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Revealed { .. } => None,
            Self::Denied => Some("Only the owner of this tree can read its letters."),
            Self::Unavailable => Some("This letter cannot be displayed."),
        }
    }
}

/// Apply the content-reveal rule to a clicked post.
pub fn open_post(post: &Post, is_owner: bool) -> PostReveal {
    if !is_owner {
        return PostReveal::Denied;
    }
    match post.content.as_deref() {
        Some(content) if !content.is_empty() => PostReveal::Revealed {
            sender: post.sender_name.clone(),
            img_name: post.img_name.clone(),
            content: content.to_string(),
        },
        _ => PostReveal::Unavailable,
    }
}

/// Strip letter bodies from posts a non-owner will see.
pub fn visible_posts(posts: Vec<Post>, is_owner: bool) -> Vec<Post> {
    if is_owner {
        return posts;
    }
    posts
        .into_iter()
        .map(|post| Post {
            content: None,
            ..post
        })
        .collect()
}

/// The main call-to-action under the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum PrimaryAction {
    Share,
    /// Enter the wizard against the viewed tree, not the viewer's own.
    Decorate { tree_id: UserId },
}

/// Pick the primary action for the viewer.
pub fn primary_action(is_owner: bool, tree_id: UserId) -> PrimaryAction {
    if is_owner {
        PrimaryAction::Share
    } else {
        PrimaryAction::Decorate { tree_id }
    }
}
