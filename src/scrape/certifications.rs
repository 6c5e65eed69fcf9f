// src/scrape/certifications.rs
use super::Diagnostics;
use crate::engine::{FieldKey, ItemFields, Section};
use crate::profile::Certification;

/// Date is kept as displayed ("Issued Mar 2021"); only the name is required.
pub(super) fn build(items: Vec<ItemFields>, diags: &mut Diagnostics) -> Vec<Certification> {
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let name = item.value(FieldKey::Name);
        if name.is_empty() {
            diags.reject(Section::Certifications, idx, "name missing");
            continue;
        }
        out.push(Certification {
            name: s!(name),
            issuer: s!(item.value(FieldKey::Issuer)),
            date: s!(item.value(FieldKey::Date)),
            url: s!(item.value(FieldKey::Url)),
        });
    }
    out
}
