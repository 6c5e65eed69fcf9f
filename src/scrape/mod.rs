// src/scrape/mod.rs
//! Extractor: one parsed profile page → `ProfileSnapshot`.
//!
//! Extraction never fails. Every rule that finds nothing is recorded as a
//! `Diagnostic` (and logged at debug level) and the field stays empty.
mod certifications;
mod education;
mod experience;
mod ids;
mod personal;
mod skills;

use std::fmt;

use crate::core::html::{Document, NodeId};
use crate::core::selector::SelectorError;
use crate::engine::{self, CompiledSpec, FaultReason, FieldKey, ItemFields, Section};
use crate::profile::ProfileSnapshot;
use crate::specs::PROFILE_PAGE;

pub use ids::{IdSource, SequenceIds};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    LandmarkMissing { section: Section },
    FieldFault { section: Section, item: usize, field: FieldKey, reason: FaultReason },
    ItemRejected { section: Section, item: usize, reason: &'static str },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LandmarkMissing { section } => write!(f, "{section}: section not on page"),
            Diagnostic::FieldFault { section, item, field, reason } => {
                write!(f, "{section}[{item}].{field}: {reason}")
            }
            Diagnostic::ItemRejected { section, item, reason } => {
                write!(f, "{section}[{item}] skipped: {reason}")
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub snapshot: ProfileSnapshot,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Extractor {
    spec: CompiledSpec,
    ids: Box<dyn IdSource>,
    skills_category: String,
}

impl Extractor {
    pub fn new(spec: CompiledSpec, ids: Box<dyn IdSource>, skills_category: impl Into<String>) -> Self {
        Self { spec, ids, skills_category: skills_category.into() }
    }

    /// Built-in profile page rules, clock-seeded ids.
    pub fn for_profile_page(skills_category: impl Into<String>) -> Result<Self, SelectorError> {
        Ok(Self::new(
            PROFILE_PAGE.compile()?,
            Box::new(SequenceIds::from_clock()),
            skills_category,
        ))
    }

    pub fn extract(&self, doc: &Document) -> ProfileSnapshot {
        self.extract_report(doc).snapshot
    }

    pub fn extract_report(&self, doc: &Document) -> Extraction {
        let mut diags = Diagnostics::default();
        let ids = self.ids.as_ref();

        let personal = personal::build(doc, &self.spec.personal, &mut diags);
        let experience = experience::build(self.items(doc, Section::Experience, &mut diags), ids, &mut diags);
        let education = education::build(self.items(doc, Section::Education, &mut diags), ids, &mut diags);
        let skills = skills::build(self.items(doc, Section::Skills, &mut diags), &self.skills_category, &mut diags);
        let certifications =
            certifications::build(self.items(doc, Section::Certifications, &mut diags), &mut diags);

        logd!(
            "extracted {} experience, {} education, {} skills, {} certifications ({} diagnostics)",
            experience.len(),
            education.len(),
            skills.values().map(Vec::len).sum::<usize>(),
            certifications.len(),
            diags.0.len()
        );

        Extraction {
            snapshot: ProfileSnapshot { personal, experience, education, skills, certifications },
            diagnostics: diags.0,
        }
    }

    /// Evaluated fields for every item of `section`; empty when the section
    /// is absent from the page or has no rules.
    fn items(&self, doc: &Document, section: Section, diags: &mut Diagnostics) -> Vec<ItemFields> {
        let Some(spec) = self.spec.section(section) else {
            return Vec::new();
        };
        let Some(nodes) = engine::section_items(doc, spec) else {
            diags.push(Diagnostic::LandmarkMissing { section });
            return Vec::new();
        };
        nodes
            .into_iter()
            .enumerate()
            .map(|(idx, node)| read_item(doc, node, section, idx, &spec.fields, diags))
            .collect()
    }
}

fn read_item(
    doc: &Document,
    node: NodeId,
    section: Section,
    item: usize,
    rules: &[engine::CompiledRule],
    diags: &mut Diagnostics,
) -> ItemFields {
    let fields = engine::read_fields(doc, node, rules);
    for (field, reason) in fields.faults() {
        diags.push(Diagnostic::FieldFault { section, item, field, reason: reason.clone() });
    }
    fields
}

#[derive(Default)]
struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    fn push(&mut self, d: Diagnostic) {
        logd!("{d}");
        self.0.push(d);
    }

    fn reject(&mut self, section: Section, item: usize, reason: &'static str) {
        self.push(Diagnostic::ItemRejected { section, item, reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
      <main>
        <section class="pv-top-card">
          <h1 class="text-heading-xlarge">Grace Hopper</h1>
          <div class="text-body-medium break-words">Rear Admiral &amp; Compiler Pioneer</div>
          <span class="text-body-small inline t-black--light break-words">Arlington, Virginia</span>
        </section>
        <section>
          <div id="experience"></div>
          <ul>
            <li class="artdeco-list__item">
              <div class="mr1 t-bold"><span aria-hidden="true">Director</span></div>
              <span class="t-14 t-normal"><span aria-hidden="true">US Navy · Full-time</span></span>
              <span class="t-14 t-normal t-black--light"><span aria-hidden="true">Jan 1967 - Present · 19 yrs</span></span>
              <span class="t-14 t-normal t-black--light"><span aria-hidden="true">Washington, D.C.</span></span>
            </li>
            <li class="artdeco-list__item">
              <span class="t-14 t-normal"><span aria-hidden="true">No Position Inc</span></span>
            </li>
            <li class="artdeco-list__item">
              <div class="mr1 t-bold"><span aria-hidden="true">Consultant</span></div>
              <span class="t-14 t-normal"><span aria-hidden="true"></span></span>
            </li>
          </ul>
        </section>
        <section>
          <div id="skills"></div>
          <ul>
            <li class="artdeco-list__item"><div class="mr1 hoverable-link-text t-bold"><span aria-hidden="true">COBOL</span></div></li>
            <li class="artdeco-list__item"><div class="mr1 hoverable-link-text t-bold"><span aria-hidden="true">FLOW-MATIC</span></div></li>
          </ul>
        </section>
      </main>
    "#;

    fn extractor() -> Extractor {
        Extractor::new(PROFILE_PAGE.compile().unwrap(), Box::new(SequenceIds::starting_at(100)), "Languages")
    }

    #[test]
    fn extracts_sections_present_on_the_page() {
        let doc = Document::parse(PAGE);
        let snap = extractor().extract(&doc);

        assert_eq!(snap.personal.name, "Grace Hopper");
        assert_eq!(snap.personal.title, "Rear Admiral & Compiler Pioneer");
        assert_eq!(snap.personal.location, "Arlington, Virginia");
        assert!(snap.personal.email.is_empty());

        assert_eq!(snap.experience.len(), 1);
        let job = &snap.experience[0];
        assert_eq!(job.id, 100);
        assert_eq!(job.company, "US Navy");
        assert_eq!(job.position, "Director");
        assert_eq!((job.start_date.as_str(), job.end_date.as_str(), job.current), ("1967-01", "Present", true));
        assert_eq!(job.location, "Washington, D.C.");

        let langs = &snap.skills["Languages"];
        assert_eq!(langs.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), ["COBOL", "FLOW-MATIC"]);
        assert!(langs.iter().all(|s| s.level == 80));
    }

    #[test]
    fn absent_sections_and_rejects_are_reported() {
        let doc = Document::parse(PAGE);
        let report = extractor().extract_report(&doc);

        assert!(report.snapshot.education.is_empty());
        assert!(report.snapshot.certifications.is_empty());
        assert!(report.diagnostics.contains(&Diagnostic::LandmarkMissing { section: Section::Education }));
        assert!(report.diagnostics.contains(&Diagnostic::LandmarkMissing { section: Section::Certifications }));
        assert!(report.diagnostics.contains(&Diagnostic::ItemRejected {
            section: Section::Experience,
            item: 1,
            reason: "company or position missing",
        }));
        assert!(report.diagnostics.contains(&Diagnostic::ItemRejected {
            section: Section::Experience,
            item: 2,
            reason: "company or position missing",
        }));
        assert!(report.snapshot.experience.iter().all(|job| job.position != "Consultant"));
        assert!(report.diagnostics.contains(&Diagnostic::FieldFault {
            section: Section::Personal,
            item: 0,
            field: FieldKey::Photo,
            reason: FaultReason::NodeNotFound,
        }));
    }

    #[test]
    fn empty_page_gives_empty_snapshot() {
        let doc = Document::parse("");
        let snap = extractor().extract(&doc);
        assert_eq!(snap, ProfileSnapshot::default());
    }

    #[test]
    fn diagnostics_read_as_paths() {
        let d = Diagnostic::FieldFault {
            section: Section::Experience,
            item: 2,
            field: FieldKey::Location,
            reason: FaultReason::Rejected("looks like a date"),
        };
        assert_eq!(d.to_string(), "experience[2].location: rejected: looks like a date");
    }
}
