// src/scrape/skills.rs
use super::Diagnostics;
use crate::engine::{FieldKey, ItemFields, Section};
use crate::profile::{Skill, SkillMap};

/// All skills land in one category; the page carries no levels.
pub(super) fn build(items: Vec<ItemFields>, category: &str, diags: &mut Diagnostics) -> SkillMap {
    let mut map = SkillMap::new();
    for (idx, item) in items.iter().enumerate() {
        let name = item.value(FieldKey::Name);
        if name.is_empty() {
            diags.reject(Section::Skills, idx, "skill name missing");
            continue;
        }
        map.entry(s!(category)).or_default().push(Skill::with_default_level(name));
    }
    map
}
