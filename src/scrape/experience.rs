// src/scrape/experience.rs
use super::{Diagnostics, IdSource};
use crate::dates;
use crate::engine::{FieldKey, ItemFields, Section};
use crate::profile::ExperienceEntry;

/// An entry needs both a company and a position.
pub(super) fn build(items: Vec<ItemFields>, ids: &dyn IdSource, diags: &mut Diagnostics) -> Vec<ExperienceEntry> {
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let company = item.value(FieldKey::Company);
        let position = item.value(FieldKey::Position);
        if company.is_empty() || position.is_empty() {
            diags.reject(Section::Experience, idx, "company or position missing");
            continue;
        }

        let span = dates::normalize(dates::strip_duration(item.value(FieldKey::DateRange)));
        out.push(ExperienceEntry {
            id: ids.next_id(),
            company: s!(company),
            position: s!(position),
            location: s!(item.value(FieldKey::Location)),
            start_date: span.start,
            end_date: span.end,
            current: span.is_current,
            description: s!(item.value(FieldKey::Description)),
            ..Default::default()
        });
    }
    out
}
