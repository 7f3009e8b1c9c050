use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("fence regex is valid"));

/// Placeholder delimiter. Never produced by ordinary markdown and not `#`, so a
/// masked fence can neither look like a heading nor collide with another token.
const MARK: char = '\u{1A}';

/// Markdown with every fenced code block replaced by a numbered token.
#[derive(Debug)]
pub(crate) struct MaskedText {
    pub text: String,
    blocks: Vec<String>,
}

impl MaskedText {
    pub fn new(markdown: &str) -> Self {
        let mut blocks = Vec::new();
        let text = FENCE_RE
            .replace_all(markdown, |caps: &Captures| {
                let token = placeholder(blocks.len());
                blocks.push(caps[0].to_string());
                token
            })
            .into_owned();
        Self { text, blocks }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Put the original fence text back into `piece`.
    pub fn restore(&self, piece: &str) -> String {
        if self.blocks.is_empty() || !piece.contains(MARK) {
            return piece.to_string();
        }
        let mut out = piece.to_string();
        for (i, block) in self.blocks.iter().enumerate() {
            let token = placeholder(i);
            if out.contains(&token) {
                out = out.replace(&token, block);
            }
        }
        out
    }
}

fn placeholder(index: usize) -> String {
    format!("{MARK}CODE_BLOCK_{index}{MARK}")
}
