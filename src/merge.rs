// src/merge.rs
//! Combines a fresh snapshot with the stored record.
//!
//! Precedence per part of the record:
//! - `personal`: page value when non-empty, else stored. Email, phone and
//!   resume always come from the stored record. Tagline keeps the stored
//!   value and falls back to the page headline.
//! - `experience`, `education`, `certifications`: replaced wholesale by the
//!   snapshot lists, even when those are empty.
//! - `skills`: categories in the snapshot replace same-named stored ones;
//!   other stored categories stay.
//! - `social`, `projects`: carried over from the stored record.
//!
//! `merge` is pure and idempotent: `merge(d, Some(&merge(d, e))) == merge(d, e)`.

use crate::profile::{PersonalInfo, ProfileRecord, ProfileSnapshot};

pub fn merge(draft: &ProfileSnapshot, existing: Option<&ProfileRecord>) -> ProfileRecord {
    let skeleton;
    let existing = match existing {
        Some(rec) => rec,
        None => {
            skeleton = ProfileRecord::skeleton();
            &skeleton
        }
    };

    let mut skills = existing.skills.clone();
    for (category, list) in &draft.skills {
        skills.insert(category.clone(), list.clone());
    }

    ProfileRecord {
        personal: merge_personal(&draft.personal, &existing.personal),
        social: existing.social.clone(),
        experience: draft.experience.clone(),
        education: draft.education.clone(),
        skills,
        projects: existing.projects.clone(),
        certifications: draft.certifications.clone(),
    }
}

fn merge_personal(page: &PersonalInfo, stored: &PersonalInfo) -> PersonalInfo {
    PersonalInfo {
        name: prefer(&page.name, &stored.name),
        title: prefer(&page.title, &stored.title),
        location: prefer(&page.location, &stored.location),
        bio: prefer(&page.bio, &stored.bio),
        photo: prefer(&page.photo, &stored.photo),
        email: stored.email.clone(),
        phone: stored.phone.clone(),
        tagline: prefer(&stored.tagline, &page.title),
        resume: stored.resume.clone(),
    }
}

fn prefer(first: &str, fallback: &str) -> String {
    if first.is_empty() { s!(fallback) } else { s!(first) }
}
