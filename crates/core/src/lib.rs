//! Domain logic for composing trees and laying out decoration posts.
//!
//! Everything in this crate is pure: no network, no clock reads outside
//! [`session`]. The `yuletree-client` crate wires these types to the backend.

pub mod assets;
pub mod error;
pub mod layout;
pub mod ownership;
pub mod post;
pub mod routing;
pub mod session;
pub mod tree_config;
pub mod types;
pub mod wizard;
