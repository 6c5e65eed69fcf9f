// src/profile.rs
//! Profile record and its parts, in the JSON shape the portfolio backend stores.
//!
//! Every field carries a serde default: stored records written by older tools
//! or edited by hand may omit keys, and loading them must still succeed.
//! An explicit `null` loads the same way as a missing key.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Proficiency assigned when the source gives none.
pub const DEFAULT_SKILL_LEVEL: u8 = 80;
pub const MAX_SKILL_LEVEL: u8 = 100;

/// Opaque entry id, stable across edits once assigned.
pub type EntryId = i64;

/// Category name → skills, kept sorted so serialized records are stable.
pub type SkillMap = BTreeMap<String, Vec<Skill>>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub personal: PersonalInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub social: Vec<SocialLink>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "skill_map")]
    pub skills: SkillMap,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
}

impl ProfileRecord {
    /// Canonical empty record: every key present, every value empty.
    pub fn skeleton() -> Self {
        Self::default()
    }

    /// Minimum fields a record needs before the dashboard accepts it.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.personal.name.trim().is_empty() {
            missing.push("personal.name");
        }
        if self.personal.title.trim().is_empty() {
            missing.push("personal.title");
        }
        missing
    }
}

/// Draft produced by one extraction pass, not yet reconciled with stored state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub personal: PersonalInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "skill_map")]
    pub skills: SkillMap,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tagline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(deserialize_with = "null_as_default")]
    pub photo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resume: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    Linkedin,
    Github,
    Twitter,
    Facebook,
    Instagram,
    Email,
    #[default]
    #[serde(other)]
    Link,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: SocialIcon,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntryId,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntryId,
    #[serde(deserialize_with = "null_as_default")]
    pub school: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub field: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gpa: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default = "default_skill_level", deserialize_with = "clamped_level")]
    pub level: u8,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self { name: name.into(), level: level.min(MAX_SKILL_LEVEL) }
    }

    pub fn with_default_level(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_SKILL_LEVEL)
    }
}

fn default_skill_level() -> u8 {
    DEFAULT_SKILL_LEVEL
}

// Hand-edited records sometimes carry 120 or -5; clamp rather than reject.
// A NaN written by the dashboard arrives as null.
fn clamped_level<'de, D>(de: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<i64>::deserialize(de)? {
        Some(raw) => raw.clamp(0, MAX_SKILL_LEVEL as i64) as u8,
        None => DEFAULT_SKILL_LEVEL,
    })
}

/// Reads `null` as the field's empty value. The backend writes nil slices
/// and unset strings as `null`.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

// Same for a category whose skill list is null.
fn skill_map<'de, D>(de: D) -> Result<SkillMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<Vec<Skill>>>> = Option::deserialize(de)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(category, skills)| (category, skills.unwrap_or_default()))
        .collect())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub issuer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Portfolio project. Never extracted; only carried through merges.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub id: EntryId,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub github: String,
    #[serde(deserialize_with = "null_as_default")]
    pub demo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_serializes_every_top_level_key() {
        let json = serde_json::to_value(ProfileRecord::skeleton()).unwrap();
        for key in ["personal", "social", "experience", "education", "skills", "projects", "certifications"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["personal"]["resume"], "");
    }

    #[test]
    fn wire_names_are_camel_case() {
        let entry = ExperienceEntry { start_date: s!("2020-01"), ..Default::default() };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["startDate"], "2020-01");
        assert!(json.get("start_date").is_none());
    }

    #[test]
    fn partial_records_load_with_defaults() {
        let rec: ProfileRecord =
            serde_json::from_str(r#"{"personal":{"name":"Ada","email":"a@b.com"}}"#).unwrap();
        assert_eq!(rec.personal.email, "a@b.com");
        assert!(rec.experience.is_empty());
        assert_eq!(rec.missing_required(), vec!["personal.title"]);
    }

    #[test]
    fn unknown_icons_fall_back_to_link() {
        let link: SocialLink =
            serde_json::from_str(r#"{"name":"Blog","icon":"mastodon","url":"https://x"}"#).unwrap();
        assert_eq!(link.icon, SocialIcon::Link);
        let gh: SocialLink = serde_json::from_str(r#"{"icon":"github"}"#).unwrap();
        assert_eq!(gh.icon, SocialIcon::Github);
        assert_eq!(serde_json::to_value(gh.icon).unwrap(), "github");
    }

    #[test]
    fn skill_levels_default_and_clamp() {
        let s: Skill = serde_json::from_str(r#"{"name":"Rust"}"#).unwrap();
        assert_eq!(s.level, DEFAULT_SKILL_LEVEL);
        let s: Skill = serde_json::from_str(r#"{"name":"Rust","level":140}"#).unwrap();
        assert_eq!(s.level, 100);
        let s: Skill = serde_json::from_str(r#"{"name":"Rust","level":-3}"#).unwrap();
        assert_eq!(s.level, 0);
        assert_eq!(Skill::new("Go", 250).level, 100);
    }

    #[test]
    fn nulls_load_as_empty_values() {
        let rec: ProfileRecord = serde_json::from_str(
            r#"{
              "personal": {"name": "Jo", "title": null, "email": "jo@x.com", "resume": null},
              "social": [{"name": "GitHub", "icon": null, "url": "https://github.com/jo"}],
              "experience": [{"id": 7, "company": "Acme", "position": "Dev", "current": null,
                              "highlights": null, "technologies": null}],
              "education": null,
              "skills": {"Technical Skills": [{"name": "Go", "level": null}], "Soft Skills": null},
              "projects": null,
              "certifications": null
            }"#,
        )
        .unwrap();
        assert_eq!(rec.personal.email, "jo@x.com");
        assert_eq!(rec.personal.title, "");
        assert_eq!(rec.social[0].icon, SocialIcon::Link);
        assert!(rec.experience[0].highlights.is_empty());
        assert!(!rec.experience[0].current);
        assert!(rec.education.is_empty() && rec.projects.is_empty());
        assert_eq!(rec.skills["Technical Skills"], vec![Skill::new("Go", DEFAULT_SKILL_LEVEL)]);
        assert!(rec.skills["Soft Skills"].is_empty());

        let rec: ProfileRecord = serde_json::from_str(r#"{"personal": null, "skills": null}"#).unwrap();
        assert_eq!(rec, ProfileRecord::skeleton());
    }

    #[test]
    fn empty_project_highlights_are_omitted() {
        let json = serde_json::to_value(Project::default()).unwrap();
        assert!(json.get("highlights").is_none());
    }
}
