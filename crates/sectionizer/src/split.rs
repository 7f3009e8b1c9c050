use crate::fence::MaskedText;
use crate::section::Section;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#+ .*").expect("heading regex is valid"));

/// Split `markdown` into sections in document order.
///
/// Text before the first heading is dropped, and a document without headings
/// yields no sections. Every heading line outside a code fence starts exactly
/// one section; a heading with nothing under it gets empty content.
pub fn sectionize(markdown: &str) -> Vec<Section> {
    let masked = MaskedText::new(markdown);
    let text = masked.text.as_str();

    let mut sections = Vec::new();
    let mut current: Option<&str> = None;
    let mut body_start = 0;

    for heading in HEADING_RE.find_iter(text) {
        if let Some(prev) = current.take() {
            sections.push(finish(&masked, prev, &text[body_start..heading.start()]));
        }
        current = Some(heading.as_str());
        body_start = heading.end();
    }
    if let Some(prev) = current {
        sections.push(finish(&masked, prev, &text[body_start..]));
    }

    sections
}

fn finish(masked: &MaskedText, heading: &str, body: &str) -> Section {
    Section {
        heading: masked.restore(heading.trim()),
        content: masked.restore(body.trim()),
    }
}
