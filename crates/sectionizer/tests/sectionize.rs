use pretty_assertions::assert_eq;
use vectormd_sectionizer::{sectionize, Section};

const FENCED_DOC: &str = r"# Shell snippets

Run this:

```bash
# this is a comment, not a heading
echo hello
## neither is this
```

Done.
";

#[test]
fn two_headings_pair_with_their_bodies() {
    let sections = sectionize("# A\ncode\n# B\nmore");
    assert_eq!(
        sections,
        vec![Section::new("# A", "code"), Section::new("# B", "more")]
    );
}

#[test]
fn hash_lines_inside_fences_do_not_split() {
    let sections = sectionize(FENCED_DOC);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].heading, "# Shell snippets");
    let fence = "```bash\n# this is a comment, not a heading\necho hello\n## neither is this\n```";
    assert!(
        sections[0].content.contains(fence),
        "fence must survive verbatim, got {:?}",
        sections[0].content
    );
    assert!(sections[0].content.ends_with("Done."));
}

#[test]
fn one_section_per_heading_line_in_order() {
    let doc = "# One\nbody 1\n## Two\n### Three\nbody 3\n# Four\n";
    let sections = sectionize(doc);

    let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
    assert_eq!(headings, vec!["# One", "## Two", "### Three", "# Four"]);
    assert_eq!(sections[1].content, "");
    assert_eq!(sections[3].content, "");
}

#[test]
fn preamble_before_first_heading_is_dropped() {
    let sections = sectionize("intro text\n\n# Real\nbody");
    assert_eq!(sections, vec![Section::new("# Real", "body")]);
}

#[test]
fn document_without_headings_is_empty() {
    assert!(sectionize("just text\nmore text\n").is_empty());
    assert!(sectionize("").is_empty());
    assert!(sectionize("```\n# fenced only\n```").is_empty());
}

#[test]
fn hash_without_space_is_not_a_heading() {
    let sections = sectionize("# Tags\n#rust #markdown\n");
    assert_eq!(sections, vec![Section::new("# Tags", "#rust #markdown")]);
}

#[test]
fn concatenation_reproduces_document_modulo_whitespace() {
    let doc = "# Setup\n\nInstall it.\n\n```sh\n# not a heading\ncargo install vmd\n```\n\n## Usage\nRun `vmd`.\n\n# FAQ\n\nNone yet.\n";
    let rebuilt: String = sectionize(doc)
        .iter()
        .map(|s| format!("{}{}", s.heading, s.content))
        .collect();

    let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    assert_eq!(squash(&rebuilt), squash(doc));
}

#[test]
fn identical_fences_restore_to_their_own_sections() {
    let doc = "# First\n```\nsame\n```\n# Second\n```\nsame\n```\n";
    let sections = sectionize(doc);
    assert_eq!(
        sections,
        vec![
            Section::new("# First", "```\nsame\n```"),
            Section::new("# Second", "```\nsame\n```"),
        ]
    );
}

#[test]
fn sections_serialize_with_plain_field_names() {
    let json = serde_json::to_value(Section::new("# A", "b")).expect("serialize");
    assert_eq!(json, serde_json::json!({ "heading": "# A", "content": "b" }));
}
