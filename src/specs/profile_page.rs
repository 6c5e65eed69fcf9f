// src/specs/profile_page.rs
//! Scraping *spec* for a saved profile page.
//!
//! Layout assumptions (all observed on the rendered page, none guaranteed):
//! - Header card: name in `h1.text-heading-xlarge`, headline and location in
//!   `break-words` text blocks, photo in `img.pv-top-card-profile-picture__image`.
//! - Each card (Experience, Education, Skills, Licenses & certifications) holds
//!   an empty anchor `<div id="...">`; its items are `li.artdeco-list__item`
//!   under the anchor's parent.
//! - Visible text is duplicated for screen readers; the copy we want is the
//!   `span[aria-hidden="true"]`.
//! - Inside an item, the first `.t-14.t-normal` line is the organisation
//!   (company, degree or issuer) and the `t-black--light` lines carry dates,
//!   then location.
//!
//! Shapes:
//! - Experience company is cut at `" · "` ("Acme · Full-time" → "Acme").
//! - Experience dates are read whole; the builder drops "· 2 yrs" with
//!   `dates::strip_duration` before normalizing.
//! - Experience location is the second light line, rejected when it looks
//!   like a date.
//! - Education "Degree, Field" splits on the first comma.
//! - Certification date stays as displayed ("Issued Mar 2021").

use crate::engine::{FieldKey::*, FieldRule, Guard, ProfileSpec, Section, SectionSpec};

const ITEMS: &str = "li.artdeco-list__item";
const BOLD: &str = r#".mr1.t-bold span[aria-hidden="true"]"#;
const BOLD_LINK: &str = r#".mr1.hoverable-link-text.t-bold span[aria-hidden="true"]"#;
const META: &str = r#".t-14.t-normal span[aria-hidden="true"]"#;
const META_LIGHT: &str = r#".t-14.t-normal.t-black--light span[aria-hidden="true"]"#;
const SHOW_MORE: &str = r#".inline-show-more-text span[aria-hidden="true"]"#;
const CREDENTIAL_LINK: &str = r#"a[aria-label^="Show credential"]"#;

pub static PROFILE_PAGE: ProfileSpec = ProfileSpec {
    personal: &[
        FieldRule::text(Name, "h1.text-heading-xlarge"),
        FieldRule::text(Title, ".text-body-medium.break-words"),
        FieldRule::text(Location, ".text-body-small.inline.t-black--light.break-words"),
        FieldRule::text(Bio, r#"#about ~ .display-flex .inline-show-more-text span[aria-hidden="true"]"#),
        FieldRule::attr(Photo, "img.pv-top-card-profile-picture__image", "src"),
    ],
    sections: &[
        SectionSpec {
            section: Section::Experience,
            landmark: "experience",
            items: ITEMS,
            fields: &[
                FieldRule::text(Position, BOLD),
                FieldRule::before(Company, META, " · "),
                FieldRule::text(DateRange, META_LIGHT),
                FieldRule::text(Location, META_LIGHT).nth(1).guard(Guard::NotDateLike),
                FieldRule::text(Description, SHOW_MORE),
            ],
        },
        SectionSpec {
            section: Section::Education,
            landmark: "education",
            items: ITEMS,
            fields: &[
                FieldRule::text(School, BOLD_LINK),
                FieldRule::part(Degree, META, ',', 0),
                FieldRule::part(StudyField, META, ',', 1),
                FieldRule::text(DateRange, META_LIGHT),
            ],
        },
        SectionSpec {
            section: Section::Skills,
            landmark: "skills",
            items: ITEMS,
            fields: &[FieldRule::text(Name, BOLD_LINK)],
        },
        SectionSpec {
            section: Section::Certifications,
            landmark: "licenses_and_certifications",
            items: ITEMS,
            fields: &[
                FieldRule::text(Name, BOLD_LINK),
                FieldRule::text(Issuer, META),
                FieldRule::text(Date, META_LIGHT),
                FieldRule::attr(Url, CREDENTIAL_LINK, "href"),
            ],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_compiles() {
        let spec = PROFILE_PAGE.compile().unwrap();
        assert_eq!(spec.personal.len(), 5);
        for section in [Section::Experience, Section::Education, Section::Skills, Section::Certifications] {
            assert!(spec.section(section).is_some(), "{section} missing");
        }
    }
}
