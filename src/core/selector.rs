// src/core/selector.rs
//! The CSS subset the page specs are written in.
//!
//! Supported: `tag`, `*`, `#id`, `.class` (any number), `[attr]`,
//! `[attr="v"]`, `[attr^="v"]`, `[attr*="v"]`, and the descendant (` `),
//! child (`>`) and general-sibling (`~`) combinators.
//!
//! Matching follows `querySelectorAll`: results are descendants of the scope
//! node in document order, but the left-hand context of a combinator may sit
//! anywhere in the document.

use super::html::{Document, NodeId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector {selector:?}: {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Contains(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrOp)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
    Sibling,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    source: String,
    // Left to right; the combinator links a step to the one before it.
    steps: Vec<(Combinator, Compound)>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Selector, SelectorError> {
        let fail = |reason: &'static str| SelectorError { selector: s!(source), reason };

        let src = source.trim();
        let b = src.as_bytes();
        let n = b.len();
        let mut i = 0usize;
        let mut steps: Vec<(Combinator, Compound)> = Vec::new();
        let mut pending: Option<Combinator> = None;

        while i < n {
            match b[i] {
                c if c.is_ascii_whitespace() => {
                    if !steps.is_empty() && pending.is_none() {
                        pending = Some(Combinator::Descendant);
                    }
                    i += 1;
                }
                b'>' | b'~' => {
                    if steps.is_empty() {
                        return Err(fail("leading combinator"));
                    }
                    if matches!(pending, Some(Combinator::Child | Combinator::Sibling)) {
                        return Err(fail("two combinators in a row"));
                    }
                    pending = Some(if b[i] == b'>' { Combinator::Child } else { Combinator::Sibling });
                    i += 1;
                }
                _ => {
                    let (compound, next) = parse_compound(src, i).map_err(fail)?;
                    let comb = if steps.is_empty() {
                        Combinator::Descendant
                    } else {
                        pending.take().ok_or_else(|| fail("missing combinator"))?
                    };
                    steps.push((comb, compound));
                    i = next;
                }
            }
        }

        if steps.is_empty() {
            return Err(fail("empty selector"));
        }
        if matches!(pending, Some(Combinator::Child | Combinator::Sibling)) {
            return Err(fail("trailing combinator"));
        }

        Ok(Selector { source: s!(src), steps })
    }

    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        self.match_at(doc, id, self.steps.len() - 1)
    }

    /// Every match under `scope`, in document order.
    pub fn all(&self, doc: &Document, scope: NodeId) -> Vec<NodeId> {
        doc.descendants(scope)
            .into_iter()
            .filter(|&d| self.matches(doc, d))
            .collect()
    }

    pub fn first(&self, doc: &Document, scope: NodeId) -> Option<NodeId> {
        self.nth(doc, scope, 0)
    }

    pub fn nth(&self, doc: &Document, scope: NodeId, n: usize) -> Option<NodeId> {
        doc.descendants(scope)
            .into_iter()
            .filter(|&d| self.matches(doc, d))
            .nth(n)
    }

    fn match_at(&self, doc: &Document, id: NodeId, step: usize) -> bool {
        let (comb, compound) = &self.steps[step];
        if !compound.matches(doc, id) {
            return false;
        }
        if step == 0 {
            return true;
        }
        match comb {
            Combinator::Descendant => {
                let mut cur = doc.parent(id);
                while let Some(p) = cur {
                    if self.match_at(doc, p, step - 1) {
                        return true;
                    }
                    cur = doc.parent(p);
                }
                false
            }
            Combinator::Child => doc
                .parent(id)
                .map(|p| self.match_at(doc, p, step - 1))
                .unwrap_or(false),
            Combinator::Sibling => {
                let Some(parent) = doc.parent(id) else { return false };
                doc.children(parent)
                    .iter()
                    .take_while(|&&sib| sib != id)
                    .any(|&sib| self.match_at(doc, sib, step - 1))
            }
        }
    }
}

impl Compound {
    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(tag) = doc.tag(id) else { return false };
        if let Some(want) = &self.tag {
            if want != tag {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if doc.attr(id, "id") != Some(want.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| doc.has_class(id, c)) {
            return false;
        }
        self.attrs.iter().all(|(name, op)| match (doc.attr(id, name), op) {
            (None, _) => false,
            (Some(_), AttrOp::Exists) => true,
            (Some(v), AttrOp::Equals(want)) => v == want,
            (Some(v), AttrOp::Prefix(want)) => v.starts_with(want.as_str()),
            (Some(v), AttrOp::Contains(want)) => v.contains(want.as_str()),
        })
    }
}

fn is_ident_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_'
}

fn read_ident(src: &str, from: usize) -> (&str, usize) {
    let b = src.as_bytes();
    let mut end = from;
    while end < b.len() && is_ident_byte(b[end]) {
        end += 1;
    }
    (&src[from..end], end)
}

fn parse_compound(src: &str, from: usize) -> Result<(Compound, usize), &'static str> {
    let b = src.as_bytes();
    let n = b.len();
    let mut i = from;
    let mut out = Compound::default();
    let mut universal = false;

    if b[i] == b'*' {
        universal = true;
        i += 1;
    } else if b[i].is_ascii_alphabetic() {
        let (tag, next) = read_ident(src, i);
        out.tag = Some(tag.to_ascii_lowercase());
        i = next;
    }

    while i < n {
        match b[i] {
            b'#' => {
                let (id, next) = read_ident(src, i + 1);
                if id.is_empty() {
                    return Err("empty id");
                }
                out.id = Some(s!(id));
                i = next;
            }
            b'.' => {
                let (class, next) = read_ident(src, i + 1);
                if class.is_empty() {
                    return Err("empty class");
                }
                out.classes.push(s!(class));
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_attr(src, i + 1)?;
                out.attrs.push(attr);
                i = next;
            }
            c if c.is_ascii_whitespace() || c == b'>' || c == b'~' => break,
            _ => return Err("unexpected character"),
        }
    }

    if !universal && out == Compound::default() {
        return Err("unexpected character");
    }
    Ok((out, i))
}

/// Parses the inside of `[...]`; `from` points just past the '['.
fn parse_attr(src: &str, from: usize) -> Result<((String, AttrOp), usize), &'static str> {
    let b = src.as_bytes();
    let n = b.len();
    let skip_ws = |mut i: usize| {
        while i < n && b[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    let mut i = skip_ws(from);
    let (name, next) = read_ident(src, i);
    if name.is_empty() {
        return Err("empty attribute name");
    }
    let name = name.to_ascii_lowercase();
    i = skip_ws(next);

    if i < n && b[i] == b']' {
        return Ok(((name, AttrOp::Exists), i + 1));
    }

    let op: fn(String) -> AttrOp = match (b.get(i), b.get(i + 1)) {
        (Some(b'='), _) => {
            i += 1;
            AttrOp::Equals
        }
        (Some(b'^'), Some(b'=')) => {
            i += 2;
            AttrOp::Prefix
        }
        (Some(b'*'), Some(b'=')) => {
            i += 2;
            AttrOp::Contains
        }
        _ => return Err("unsupported attribute operator"),
    };

    i = skip_ws(i);
    let value = match b.get(i) {
        Some(&q) if q == b'"' || q == b'\'' => {
            let start = i + 1;
            let end = b[start..]
                .iter()
                .position(|&c| c == q)
                .map(|p| start + p)
                .ok_or("unterminated attribute value")?;
            i = end + 1;
            &src[start..end]
        }
        _ => {
            let (v, next) = read_ident(src, i);
            i = next;
            v
        }
    };

    i = skip_ws(i);
    if i >= n || b[i] != b']' {
        return Err("unterminated attribute selector");
    }
    Ok(((name, op(s!(value))), i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <section>
          <div id="about"></div>
          <div class="pvs-header">About</div>
          <div class="display-flex ph5">
            <div class="inline-show-more-text">
              <span aria-hidden="true">Visible bio</span>
              <span class="visually-hidden">Screen reader bio</span>
            </div>
          </div>
        </section>
        <ul class="list">
          <li class="artdeco-list__item"><a href="https://x.test/cred/1">one</a></li>
          <li class="artdeco-list__item other"><b>two</b></li>
        </ul>
    "#;

    fn texts(doc: &Document, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| doc.text(id)).collect()
    }

    #[test]
    fn matches_tag_and_classes() {
        let doc = Document::parse(PAGE);
        let sel = Selector::parse("li.artdeco-list__item").unwrap();
        assert_eq!(texts(&doc, &sel.all(&doc, doc.root())), vec!["one", "two"]);
        let sel = Selector::parse(".artdeco-list__item.other").unwrap();
        assert_eq!(texts(&doc, &sel.all(&doc, doc.root())), vec!["two"]);
    }

    #[test]
    fn sibling_then_descendant_chain() {
        let doc = Document::parse(PAGE);
        let sel =
            Selector::parse(r#"#about ~ .display-flex .inline-show-more-text span[aria-hidden="true"]"#)
                .unwrap();
        let hit = sel.first(&doc, doc.root()).unwrap();
        assert_eq!(doc.text(hit), "Visible bio");
    }

    #[test]
    fn child_combinator_requires_direct_parent() {
        let doc = Document::parse(PAGE);
        assert!(Selector::parse("ul > li").unwrap().first(&doc, doc.root()).is_some());
        assert!(Selector::parse("section > span").unwrap().first(&doc, doc.root()).is_none());
    }

    #[test]
    fn attribute_operators() {
        let doc = Document::parse(PAGE);
        let prefix = Selector::parse(r#"a[href^="https://x.test"]"#).unwrap();
        let contains = Selector::parse("a[href*=cred]").unwrap();
        let exists = Selector::parse("[aria-hidden]").unwrap();
        assert!(prefix.first(&doc, doc.root()).is_some());
        assert!(contains.first(&doc, doc.root()).is_some());
        assert_eq!(exists.all(&doc, doc.root()).len(), 1);
    }

    #[test]
    fn scope_limits_results_but_not_context() {
        let doc = Document::parse(PAGE);
        let second = Selector::parse("li.other").unwrap().first(&doc, doc.root()).unwrap();
        let sel = Selector::parse("ul b").unwrap();
        assert_eq!(texts(&doc, &sel.all(&doc, second)), vec!["two"]);
        let a = Selector::parse("a").unwrap();
        assert!(a.first(&doc, second).is_none());
    }

    #[test]
    fn nth_picks_later_matches() {
        let doc = Document::parse(PAGE);
        let sel = Selector::parse("li").unwrap();
        assert_eq!(doc.text(sel.nth(&doc, doc.root(), 1).unwrap()), "two");
        assert!(sel.nth(&doc, doc.root(), 2).is_none());
    }

    #[test]
    fn rejects_malformed_selectors() {
        for bad in ["", "> li", "li >", "li > > a", "li[", "a[href$=x]", "li!", ".", "#"] {
            let err = Selector::parse(bad).unwrap_err();
            assert_eq!(err.selector, bad.trim());
        }
    }
}
