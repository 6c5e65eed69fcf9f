// src/engine/engine.rs
use crate::core::html::{Document, NodeId};
use crate::core::selector::{Selector, SelectorError};
use crate::dates;
use crate::engine::types::*;

pub fn compile(spec: &ProfileSpec) -> Result<CompiledSpec, SelectorError> {
    let personal = compile_rules(spec.personal)?;
    let mut sections = Vec::with_capacity(spec.sections.len());
    for s in spec.sections {
        sections.push(CompiledSection {
            section: s.section,
            landmark: s.landmark,
            items: Selector::parse(s.items)?,
            fields: compile_rules(s.fields)?,
        });
    }
    Ok(CompiledSpec { personal, sections })
}

fn compile_rules(rules: &[FieldRule]) -> Result<Vec<CompiledRule>, SelectorError> {
    rules
        .iter()
        .map(|r| {
            Ok(CompiledRule {
                key: r.key,
                selector: Selector::parse(r.selector)?,
                nth: r.nth,
                extract: r.extract,
                guard: r.guard,
            })
        })
        .collect()
}

/// Items of a repeated section, or `None` when its landmark is absent.
pub fn section_items(doc: &Document, section: &CompiledSection) -> Option<Vec<NodeId>> {
    let landmark = doc.element_by_id(section.landmark)?;
    // A landmark is an anchor inside its card; the items are the card's.
    let container = doc.parent(landmark).unwrap_or(landmark);
    Some(section.items.all(doc, container))
}

pub fn read_fields(doc: &Document, scope: NodeId, rules: &[CompiledRule]) -> ItemFields {
    ItemFields {
        fields: rules.iter().map(|r| (r.key, eval_rule(doc, scope, r))).collect(),
    }
}

pub fn eval_rule(doc: &Document, scope: NodeId, rule: &CompiledRule) -> Field {
    let Some(node) = rule.selector.nth(doc, scope, rule.nth) else {
        return Field::Missing(FaultReason::NodeNotFound);
    };

    let value = match rule.extract {
        Extract::Text => doc.text(node),
        Extract::Attr(name) => match doc.attr(node, name) {
            Some(v) => s!(v.trim()),
            None => return Field::Missing(FaultReason::AttrMissing),
        },
        Extract::Before(sep) => {
            let text = doc.text(node);
            s!(text.split(sep).next().unwrap_or("").trim())
        }
        Extract::Part { sep, index } => {
            let text = doc.text(node);
            match text.split(sep).nth(index) {
                Some(part) => s!(part.trim()),
                None => return Field::Missing(FaultReason::PartMissing),
            }
        }
    };

    if value.is_empty() {
        return Field::Missing(FaultReason::EmptyText);
    }

    match rule.guard {
        Some(Guard::NotDateLike) if dates::looks_like_date(&value) => {
            Field::Missing(FaultReason::Rejected("looks like a date"))
        }
        _ => Field::Found(value),
    }
}
