// src/engine/mod.rs
//! Runs the declarative page rules in `specs` against a parsed document.
pub mod engine;
pub mod types;

pub use engine::{eval_rule, read_fields, section_items};
pub use types::*;
