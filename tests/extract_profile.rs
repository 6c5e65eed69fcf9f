// tests/extract_profile.rs
use profile_sync::engine::{FaultReason, FieldKey, Section};
use profile_sync::scrape::{Diagnostic, Extractor, SequenceIds};
use profile_sync::specs::PROFILE_PAGE;
use profile_sync::Document;

const FIXTURE: &str = include_str!("fixtures/profile.html");

fn extractor() -> Extractor {
    Extractor::new(
        PROFILE_PAGE.compile().unwrap(),
        Box::new(SequenceIds::starting_at(1000)),
        "Technical Skills",
    )
}

#[test]
fn personal_header_is_read() {
    let snap = extractor().extract(&Document::parse(FIXTURE));
    let p = &snap.personal;
    assert_eq!(p.name, "Jordan Rivera");
    assert_eq!(p.title, "Staff Software Engineer · Distributed Systems & Storage");
    assert_eq!(p.location, "Lisbon, Portugal");
    assert_eq!(p.bio, "I build storage engines and the tooling around them. Previously databases at two startups.");
    assert_eq!(p.photo, "https://media.example.net/profile-displayphoto/jr-200.jpg");
    assert!(p.email.is_empty() && p.phone.is_empty() && p.tagline.is_empty() && p.resume.is_empty());
}

#[test]
fn experience_entries_are_normalized() {
    let snap = extractor().extract(&Document::parse(FIXTURE));
    assert_eq!(snap.experience.len(), 2, "entry without a position is dropped");

    let first = &snap.experience[0];
    assert_eq!(first.id, 1000);
    assert_eq!(first.position, "Staff Software Engineer");
    assert_eq!(first.company, "Tidewater Data");
    assert_eq!(first.start_date, "2021-03");
    assert_eq!(first.end_date, "Present");
    assert!(first.current);
    assert_eq!(first.location, "", "'Lisbon, Portugal · Hybrid' has a duration dot");
    assert_eq!(first.description, "Led the write-ahead log rewrite.");
    assert!(first.highlights.is_empty() && first.technologies.is_empty());

    let second = &snap.experience[1];
    assert_eq!(second.id, 1001);
    assert_eq!(second.company, "Northwind Labs");
    assert_eq!((second.start_date.as_str(), second.end_date.as_str()), ("2017-06", "2021-02"));
    assert!(!second.current);
    assert_eq!(second.location, "Porto, Portugal");
}

#[test]
fn education_splits_degree_and_field() {
    let snap = extractor().extract(&Document::parse(FIXTURE));
    assert_eq!(snap.education.len(), 2);

    let ms = &snap.education[0];
    assert_eq!(ms.school, "Universidade do Porto");
    assert_eq!(ms.degree, "Master of Science - MS");
    assert_eq!(ms.field, "Computer Science");
    assert_eq!((ms.start_date.as_str(), ms.end_date.as_str()), ("2013-01", "2015-01"));

    let school = &snap.education[1];
    assert_eq!(school.school, "Escola Secundária");
    assert!(school.degree.is_empty() && school.start_date.is_empty());
}

#[test]
fn skills_go_to_one_category() {
    let snap = extractor().extract(&Document::parse(FIXTURE));
    assert_eq!(snap.skills.len(), 1);
    let names: Vec<_> = snap.skills["Technical Skills"].iter().map(|s| (s.name.as_str(), s.level)).collect();
    assert_eq!(names, [("Rust", 80), ("Distributed Systems", 80), ("PostgreSQL", 80)]);
}

#[test]
fn certifications_keep_raw_date_and_credential_link() {
    let snap = extractor().extract(&Document::parse(FIXTURE));
    assert_eq!(snap.certifications.len(), 1);
    let cka = &snap.certifications[0];
    assert_eq!(cka.name, "Certified Kubernetes Administrator");
    assert_eq!(cka.issuer, "Cloud Native Computing Foundation");
    assert_eq!(cka.date, "Issued Jan 2022 · Expires Jan 2025");
    assert_eq!(cka.url, "https://certs.example.org/verify/abc123");
}

#[test]
fn faults_are_reported_not_raised() {
    let report = extractor().extract_report(&Document::parse(FIXTURE));
    let d = &report.diagnostics;

    assert!(d.contains(&Diagnostic::FieldFault {
        section: Section::Experience,
        item: 0,
        field: FieldKey::Location,
        reason: FaultReason::Rejected("looks like a date"),
    }));
    assert!(d.contains(&Diagnostic::ItemRejected {
        section: Section::Experience,
        item: 2,
        reason: "company or position missing",
    }));
    assert!(d.contains(&Diagnostic::ItemRejected {
        section: Section::Certifications,
        item: 1,
        reason: "name missing",
    }));
    assert!(!d.iter().any(|x| matches!(x, Diagnostic::LandmarkMissing { .. })));
}

#[test]
fn script_contents_are_not_mistaken_for_markup() {
    let snap = extractor().extract(&Document::parse(FIXTURE));
    assert_ne!(snap.personal.name, "Fake");
}

#[test]
fn extraction_is_repeatable() {
    let doc = Document::parse(FIXTURE);
    let a = Extractor::new(PROFILE_PAGE.compile().unwrap(), Box::new(SequenceIds::starting_at(1)), "S").extract(&doc);
    let b = Extractor::new(PROFILE_PAGE.compile().unwrap(), Box::new(SequenceIds::starting_at(1)), "S").extract(&doc);
    assert_eq!(a, b);
}
