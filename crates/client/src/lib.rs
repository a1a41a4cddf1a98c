//! Backend-facing half of the tree engine.
//!
//! [`backend::Backend`] is the seam: [`http::HttpBackend`] talks REST,
//! tests plug in an in-memory fake. The flows ([`config_manager`],
//! [`gallery`], [`decorate`]) only ever see the trait.

pub mod backend;
pub mod config;
pub mod config_manager;
pub mod decorate;
pub mod error;
pub mod gallery;
pub mod http;
pub mod resolver;
pub mod wire;

pub use backend::{Backend, TreeView};
pub use config::ClientConfig;
pub use http::HttpBackend;
