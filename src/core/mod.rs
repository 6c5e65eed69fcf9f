// src/core/mod.rs
pub mod html;
pub mod sanitize;
pub mod selector;

pub use html::{Document, NodeId};
pub use selector::{Selector, SelectorError};
