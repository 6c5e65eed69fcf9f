// src/scrape/education.rs
use super::{Diagnostics, IdSource};
use crate::dates;
use crate::engine::{FieldKey, ItemFields, Section};
use crate::profile::EducationEntry;

pub(super) fn build(items: Vec<ItemFields>, ids: &dyn IdSource, diags: &mut Diagnostics) -> Vec<EducationEntry> {
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let school = item.value(FieldKey::School);
        if school.is_empty() {
            diags.reject(Section::Education, idx, "school missing");
            continue;
        }

        // No `current` flag here; an ongoing degree keeps end "Present".
        let span = dates::normalize(item.value(FieldKey::DateRange));
        out.push(EducationEntry {
            id: ids.next_id(),
            school: s!(school),
            degree: s!(item.value(FieldKey::Degree)),
            field: s!(item.value(FieldKey::StudyField)),
            start_date: span.start,
            end_date: span.end,
            ..Default::default()
        });
    }
    out
}
