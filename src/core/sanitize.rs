// src/core/sanitize.rs

/// Decode the handful of entities profile pages actually emit, plus numeric
/// references. Unknown named entities are left as-is.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        // entities are short; don't scan far for the ';'
        let semi = tail
            .char_indices()
            .take(12)
            .find(|&(_, c)| c == ';')
            .map(|(i, _)| i);
        let decoded = semi.and_then(|end| decode_entity(&tail[1..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "middot" => Some('·'),
        "ndash" => Some('–'),
        "mdash" => Some('—'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            // non-breaking space behaves like a plain space for our purposes
            if code == 0xA0 { Some(' ') } else { char::from_u32(code) }
        }
    }
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(normalize_entities("R&amp;D &lt;Lab&gt;"), "R&D <Lab>");
        assert_eq!(normalize_entities("Jan 2020 &#183; 2 yrs"), "Jan 2020 · 2 yrs");
        assert_eq!(normalize_entities("caf&#xE9;"), "café");
        assert_eq!(normalize_entities("a&nbsp;b"), "a b");
    }

    #[test]
    fn leaves_bare_ampersands_alone() {
        assert_eq!(normalize_entities("Smith & Sons"), "Smith & Sons");
        assert_eq!(normalize_entities("AT&T;"), "AT&T;");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_ws("  Senior \n\t Engineer  "), "Senior Engineer");
    }
}
