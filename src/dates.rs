// src/dates.rs
//! Free-text date ranges → partial ISO dates.
//!
//! Best effort by contract: a segment that is not `"<Mon> <YYYY>"` or a bare
//! year comes back verbatim, so stored date fields may hold non-ISO text.

use std::sync::LazyLock;

use regex::Regex;

/// Sentinel end date for an ongoing position.
pub const PRESENT: &str = "Present";

/// Separates the date range from a trailing duration ("· 2 yrs 1 mo").
pub const DURATION_SEPARATOR: char = '·';

/// Hyphen plus the en/em dashes profile pages render between dates.
pub const RANGE_SEPARATORS: [char; 3] = ['-', '–', '—'];

const MONTHS: [(&str, &str); 12] = [
    ("jan", "01"), ("feb", "02"), ("mar", "03"), ("apr", "04"),
    ("may", "05"), ("jun", "06"), ("jul", "07"), ("aug", "08"),
    ("sep", "09"), ("oct", "10"), ("nov", "11"), ("dec", "12"),
];

static MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]{3})\s+(\d{4})$").expect("month-year pattern"));
static BARE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("year pattern"));
static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("year token pattern"));

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DateSpan {
    pub start: String,
    /// Partial ISO, `PRESENT`, raw fallback text, or empty.
    pub end: String,
    pub is_current: bool,
}

/// `"Jan 2020 - Present"` → `{ start: "2020-01", end: "Present", is_current: true }`
pub fn normalize(raw: &str) -> DateSpan {
    let mut span = DateSpan::default();

    if raw.contains(PRESENT) {
        span.is_current = true;
        span.end = s!(PRESENT);
    }

    let mut parts = raw.splitn(2, RANGE_SEPARATORS).map(str::trim);

    if let Some(first) = parts.next().filter(|p| !p.is_empty()) {
        span.start = to_partial_iso(first);
    }
    if !span.is_current {
        if let Some(second) = parts.next().filter(|p| !p.is_empty()) {
            span.end = to_partial_iso(second);
        }
    }

    span
}

/// `"Mar 2019"` → `"2019-03"`, `"2019"` → `"2019-01"`, anything else unchanged.
pub fn to_partial_iso(segment: &str) -> String {
    let seg = segment.trim();

    if let Some(caps) = MONTH_YEAR.captures(seg) {
        let month = caps[1].to_ascii_lowercase();
        if let Some((_, mm)) = MONTHS.iter().find(|(abbr, _)| *abbr == month) {
            return join!(&caps[2], "-", mm);
        }
    }
    if BARE_YEAR.is_match(seg) {
        return join!(seg, "-01");
    }

    s!(seg)
}

/// Text before the duration annotation: `"Jan 2020 - Present · 4 yrs"` → `"Jan 2020 - Present"`.
pub fn strip_duration(raw: &str) -> &str {
    raw.split(DURATION_SEPARATOR).next().unwrap_or(raw).trim()
}

/// Content-shape test used to tell a date line from a location line:
/// a 4-digit run, a duration separator, or a spaced range separator.
pub fn looks_like_date(text: &str) -> bool {
    YEAR_TOKEN.is_match(text)
        || text.contains(DURATION_SEPARATOR)
        || RANGE_SEPARATORS.iter().any(|&sep| text.contains(&format!(" {sep} ")))
}
