// src/scrape/personal.rs
use super::Diagnostics;
use crate::core::html::Document;
use crate::engine::{CompiledRule, FieldKey, Section};
use crate::profile::PersonalInfo;

/// Header card fields. Contact details and tagline are never on the page.
pub(super) fn build(doc: &Document, rules: &[CompiledRule], diags: &mut Diagnostics) -> PersonalInfo {
    let fields = super::read_item(doc, doc.root(), Section::Personal, 0, rules, diags);

    PersonalInfo {
        name: s!(fields.value(FieldKey::Name)),
        title: s!(fields.value(FieldKey::Title)),
        location: s!(fields.value(FieldKey::Location)),
        bio: s!(fields.value(FieldKey::Bio)),
        photo: s!(fields.value(FieldKey::Photo)),
        ..Default::default()
    }
}
