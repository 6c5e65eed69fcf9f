// src/core/html.rs
//! Tolerant HTML reader.
//!
//! Turns a saved page into a small read-only node tree. It is not a conforming
//! HTML5 parser; it only has to survive what profile pages throw at it:
//! unclosed tags, stray closers, comments, inline `<script>`/`<style>`, void
//! elements written without `/>`, and `<li>`/`<p>` left open.
//!
//! Nodes are stored in an arena in document order, so a node id is also its
//! pre-order position. Nothing mutates the tree after `parse` returns.

use super::sanitize::{normalize_entities, normalize_ws};

pub type NodeId = usize;

const ROOT_TAG: &str = "#document";

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

// Contents are skipped entirely.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

// Opening one of these closes a dangling <p>.
const CLOSES_P: &[&str] = &[
    "p", "div", "ul", "ol", "li", "section", "table", "h1", "h2", "h3", "h4", "h5", "h6",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String, attrs: Vec<(String, String)> },
    Text(String),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn parse(html: &str) -> Document {
        let mut doc = Document {
            nodes: vec![Node {
                kind: NodeKind::Element { tag: s!(ROOT_TAG), attrs: Vec::new() },
                parent: None,
                children: Vec::new(),
            }],
        };
        // Open elements; the root is never popped.
        let mut stack: Vec<NodeId> = vec![0];

        let bytes = html.as_bytes();
        let n = bytes.len();
        let mut i = 0usize;

        while i < n {
            let lt = match html[i..].find('<') {
                Some(p) => i + p,
                None => {
                    doc.push_text(top(&stack), &html[i..]);
                    break;
                }
            };
            if lt > i {
                doc.push_text(top(&stack), &html[i..lt]);
            }

            let rest = &html[lt..];
            if rest.starts_with("<!--") {
                i = rest.find("-->").map_or(n, |e| lt + e + 3);
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                i = rest.find('>').map_or(n, |e| lt + e + 1);
                continue;
            }

            match bytes.get(lt + 1) {
                Some(b'/') => {
                    let gt = find_tag_end(bytes, lt + 2);
                    let name = leading_name(&html[lt + 2..gt]).to_ascii_lowercase();
                    doc.close(&mut stack, &name);
                    i = (gt + 1).min(n);
                }
                Some(c) if c.is_ascii_alphabetic() => {
                    let gt = find_tag_end(bytes, lt + 1);
                    let (name, attrs, self_closing) = parse_open_tag(&html[lt + 1..gt]);
                    i = (gt + 1).min(n);

                    doc.close_implied(&mut stack, &name);

                    if RAW_TEXT_TAGS.contains(&name.as_str()) {
                        doc.push_element(top(&stack), name.clone(), attrs);
                        i = skip_raw_text(html, i, &name);
                        continue;
                    }

                    let is_void = VOID_TAGS.contains(&name.as_str());
                    let id = doc.push_element(top(&stack), name, attrs);
                    if !is_void && !self_closing {
                        stack.push(id);
                    }
                }
                _ => {
                    // a lone '<' in text
                    doc.push_text(top(&stack), "<");
                    i = lt + 1;
                }
            }
        }

        doc
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].kind, NodeKind::Element { .. })
    }

    /// Lower-case tag name; `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .map(|v| v.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id].children.iter().copied().filter(|&c| self.is_element(c))
    }

    /// All descendants in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut todo: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(next) = todo.pop() {
            out.push(next);
            todo.extend(self.nodes[next].children.iter().rev().copied());
        }
        out
    }

    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        (0..self.nodes.len()).find(|&id| self.attr(id, "id") == Some(value))
    }

    /// Visible text under `id`, whitespace collapsed and trimmed.
    pub fn text(&self, id: NodeId) -> String {
        let mut raw = s!();
        if let NodeKind::Text(t) = &self.nodes[id].kind {
            raw.push_str(t);
        }
        for d in self.descendants(id) {
            if let NodeKind::Text(t) = &self.nodes[d].kind {
                raw.push_str(t);
            }
        }
        normalize_ws(&raw)
    }

    /* ---------- tree building ---------- */

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node { kind, parent: Some(parent), children: Vec::new() });
        self.nodes[parent].children.push(id);
        id
    }

    fn push_element(&mut self, parent: NodeId, tag: String, attrs: Vec<(String, String)>) -> NodeId {
        self.push_node(parent, NodeKind::Element { tag, attrs })
    }

    fn push_text(&mut self, parent: NodeId, raw: &str) {
        let decoded = normalize_entities(raw);
        let text = if decoded.trim().is_empty() { s!(" ") } else { decoded };

        // merge with a preceding text sibling (e.g. after a lone '<')
        if let Some(&last) = self.nodes[parent].children.last() {
            if let NodeKind::Text(prev) = &mut self.nodes[last].kind {
                prev.push_str(&text);
                return;
            }
        }
        self.push_node(parent, NodeKind::Text(text));
    }

    fn close(&self, stack: &mut Vec<NodeId>, name: &str) {
        // Stray closers (no matching open element) are ignored.
        if let Some(pos) = stack.iter().rposition(|&id| id != 0 && self.tag(id) == Some(name)) {
            stack.truncate(pos);
        }
    }

    fn close_implied(&self, stack: &mut Vec<NodeId>, opening: &str) {
        if opening == "li" {
            for pos in (1..stack.len()).rev() {
                match self.tag(stack[pos]) {
                    Some("li") => {
                        stack.truncate(pos);
                        break;
                    }
                    Some("ul") | Some("ol") => break,
                    _ => {}
                }
            }
        }
        if CLOSES_P.contains(&opening) && stack.len() > 1 && self.tag(top(stack.as_slice())) == Some("p") {
            stack.pop();
        }
    }
}

fn top(stack: &[NodeId]) -> NodeId {
    stack.last().copied().unwrap_or(0)
}

/// Index of the '>' closing the tag that starts before `from`, honoring quotes.
/// Returns `bytes.len()` when the tag is never closed.
fn find_tag_end(bytes: &[u8], from: usize) -> usize {
    let mut in_s = false; // '
    let mut in_d = false; // "
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return i,
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

fn leading_name(s: &str) -> &str {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(s.len());
    &s[..end]
}

/// `div class="a b" id=x hidden /` → ("div", [("class","a b"),("id","x"),("hidden","")], true)
fn parse_open_tag(inner: &str) -> (String, Vec<(String, String)>, bool) {
    let name = leading_name(inner);
    let tag = name.to_ascii_lowercase();
    let rest = &inner[inner.find(name).map_or(inner.len(), |p| p + name.len())..];

    let b = rest.as_bytes();
    let n = b.len();
    let mut i = 0usize;
    let mut attrs = Vec::new();
    let mut self_closing = false;

    while i < n {
        let c = b[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if c == b'/' {
            self_closing = true;
            i += 1;
            continue;
        }
        self_closing = false;

        // attribute name
        let start = i;
        while i < n && !b[i].is_ascii_whitespace() && b[i] != b'=' && b[i] != b'/' {
            i += 1;
        }
        if i == start {
            // a lone '=' with no name; skip it
            i += 1;
            continue;
        }
        let key = rest[start..i].to_ascii_lowercase();

        while i < n && b[i].is_ascii_whitespace() {
            i += 1;
        }
        let mut value = s!();
        if i < n && b[i] == b'=' {
            i += 1;
            while i < n && b[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < n && (b[i] == b'"' || b[i] == b'\'') {
                let quote = b[i];
                let vstart = i + 1;
                let vend = b[vstart..].iter().position(|&x| x == quote).map_or(n, |p| vstart + p);
                value = normalize_entities(&rest[vstart..vend]);
                i = (vend + 1).min(n);
            } else {
                let vstart = i;
                while i < n && !b[i].is_ascii_whitespace() {
                    i += 1;
                }
                value = normalize_entities(&rest[vstart..i]);
            }
        }
        attrs.push((key, value));
    }

    (tag, attrs, self_closing)
}

/// Skip past `</name ...>` starting at `from`; returns the index after it.
fn skip_raw_text(html: &str, from: usize, name: &str) -> usize {
    let close = join!("</", name);
    let lc = html[from..].to_ascii_lowercase();
    match lc.find(&close) {
        Some(rel) => {
            let start = from + rel;
            find_tag_end(html.as_bytes(), start + close.len()).saturating_add(1).min(html.len())
        }
        None => html.len(),
    }
}
