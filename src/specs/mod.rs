// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific lookup tables** for profile pages.
//! Each spec describes *where the ground truth lives in the HTML* as plain
//! `'static` data; the `engine` module runs it and `scrape` shapes the result.
//!
//! ## What lives here
//! - **Selectors** for the header card and for each repeated card
//!   (experience, education, skills, certifications).
//! - **Landmarks**: the element id each card anchors on.
//! - **Per-field extraction**: whole text, an attribute, the text before a
//!   separator, or one comma-separated part, plus content guards (e.g. “this
//!   line must not look like a date”).
//!
//! ## What does **not** live here
//! - **Tree walking / selector matching** – `core::html`, `core::selector`, `engine`.
//! - **Item acceptance, ids and date normalization** – `scrape` and `dates`.
//! - **Merging with the stored record / persistence** – `merge`, `store`, `sync`.
//!
//! ## Typical call chain
//! ```text
//! cli / sync::SyncCoordinator → scrape::Extractor::extract_report()
//!                                   ↘ engine::{read_fields, section_items}(specs::PROFILE_PAGE)
//!                               → merge::merge → store::ProfileStore::persist
//! ```
//!
//! ## Conventions & invariants
//! - Rules are **data, not code**: when the page markup changes, edit the
//!   table, not the extractor.
//! - A rule that finds nothing yields a tagged `Field::Missing(reason)`; it
//!   never aborts the section or the page.
//! - Selectors are compiled once (`ProfileSpec::compile`); a typo surfaces as
//!   a `SelectorError` at startup.
//!
//! ## Current specs
//! - `profile_page` – the rendered profile page as saved from a browser.
//!
//! ## Testing notes
//! - Specs are tested **offline** against captured fixtures (`tests/fixtures/`).
//! - Keep selectors resilient to whitespace, attribute order and wrapper divs.
pub mod profile_page;

pub use profile_page::PROFILE_PAGE;
