// src/engine/types.rs
use std::fmt;

use crate::core::selector::{Selector, SelectorError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section { Personal, Experience, Education, Skills, Certifications }

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Personal => "personal",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Certifications => "certifications",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name, Title, Location, Bio, Photo,
    Position, Company, DateRange, Description,
    School, Degree, StudyField,
    Issuer, Date, Url,
}

impl FieldKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Title => "title",
            FieldKey::Location => "location",
            FieldKey::Bio => "bio",
            FieldKey::Photo => "photo",
            FieldKey::Position => "position",
            FieldKey::Company => "company",
            FieldKey::DateRange => "dates",
            FieldKey::Description => "description",
            FieldKey::School => "school",
            FieldKey::Degree => "degree",
            FieldKey::StudyField => "field",
            FieldKey::Issuer => "issuer",
            FieldKey::Date => "date",
            FieldKey::Url => "url",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* Rule data (plain 'static tables, see specs/) */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extract {
    /// Trimmed visible text.
    Text,
    /// Attribute value, e.g. an image `src`.
    Attr(&'static str),
    /// Text before the first `sep` (whole text when `sep` is absent).
    Before(&'static str),
    /// `index`-th piece of the text split on `sep`.
    Part { sep: char, index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Reject text shaped like a date range or duration.
    NotDateLike,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRule {
    pub key: FieldKey,
    pub selector: &'static str,
    pub nth: usize, // which match inside the scope, 0 = first
    pub extract: Extract,
    pub guard: Option<Guard>,
}

impl FieldRule {
    pub const fn text(key: FieldKey, selector: &'static str) -> Self {
        Self { key, selector, nth: 0, extract: Extract::Text, guard: None }
    }

    pub const fn attr(key: FieldKey, selector: &'static str, name: &'static str) -> Self {
        Self { key, selector, nth: 0, extract: Extract::Attr(name), guard: None }
    }

    pub const fn before(key: FieldKey, selector: &'static str, sep: &'static str) -> Self {
        Self { key, selector, nth: 0, extract: Extract::Before(sep), guard: None }
    }

    pub const fn part(key: FieldKey, selector: &'static str, sep: char, index: usize) -> Self {
        Self { key, selector, nth: 0, extract: Extract::Part { sep, index }, guard: None }
    }

    pub const fn nth(self, nth: usize) -> Self {
        Self { nth, ..self }
    }

    pub const fn guard(self, guard: Guard) -> Self {
        Self { guard: Some(guard), ..self }
    }
}

/// A repeated section: `landmark` is an element id, `items` are matched
/// under the landmark's parent.
#[derive(Clone, Copy, Debug)]
pub struct SectionSpec {
    pub section: Section,
    pub landmark: &'static str,
    pub items: &'static str,
    pub fields: &'static [FieldRule],
}

/// Whole-page spec. Personal rules run against the document root.
#[derive(Clone, Copy, Debug)]
pub struct ProfileSpec {
    pub personal: &'static [FieldRule],
    pub sections: &'static [SectionSpec],
}

impl ProfileSpec {
    /// Parse every selector once. A malformed rule is an error, never a panic.
    pub fn compile(&self) -> Result<CompiledSpec, SelectorError> {
        super::engine::compile(self)
    }
}

/* Compiled forms */

#[derive(Clone, Debug)]
pub struct CompiledRule {
    pub key: FieldKey,
    pub selector: Selector,
    pub nth: usize,
    pub extract: Extract,
    pub guard: Option<Guard>,
}

#[derive(Clone, Debug)]
pub struct CompiledSection {
    pub section: Section,
    pub landmark: &'static str,
    pub items: Selector,
    pub fields: Vec<CompiledRule>,
}

#[derive(Clone, Debug)]
pub struct CompiledSpec {
    pub personal: Vec<CompiledRule>,
    pub sections: Vec<CompiledSection>,
}

impl CompiledSpec {
    pub fn section(&self, section: Section) -> Option<&CompiledSection> {
        self.sections.iter().find(|s| s.section == section)
    }
}

/* Outcomes */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaultReason {
    NodeNotFound,
    EmptyText,
    AttrMissing,
    PartMissing,
    Rejected(&'static str),
}

impl fmt::Display for FaultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultReason::NodeNotFound => f.write_str("no matching node"),
            FaultReason::EmptyText => f.write_str("empty text"),
            FaultReason::AttrMissing => f.write_str("attribute missing"),
            FaultReason::PartMissing => f.write_str("separator part missing"),
            FaultReason::Rejected(why) => write!(f, "rejected: {why}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Found(String),
    Missing(FaultReason),
}

impl Field {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Found(v) => Some(v),
            Field::Missing(_) => None,
        }
    }
}

/// Evaluated rules for one item, in rule order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemFields {
    pub fields: Vec<(FieldKey, Field)>,
}

impl ItemFields {
    pub fn get(&self, key: FieldKey) -> Option<&Field> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, f)| f)
    }

    /// Found value, or "" for a missing field or unknown key.
    pub fn value(&self, key: FieldKey) -> &str {
        self.get(key).and_then(Field::as_str).unwrap_or("")
    }

    pub fn faults(&self) -> impl Iterator<Item = (FieldKey, &FaultReason)> + '_ {
        self.fields.iter().filter_map(|(k, f)| match f {
            Field::Missing(reason) => Some((*k, reason)),
            Field::Found(_) => None,
        })
    }
}
