//! Lightweight doc comment tag parsing.
//!
//! Only the structure needed for re-emission is recovered: a description
//! block and a flat tag list. Tag payloads are not validated; `@param`
//! and `@property` get their name split off, everything else keeps its
//! text verbatim.

use std::sync::Arc;

/// A parsed doc comment: leading description plus tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocComment {
    pub description: String,
    pub tags: Vec<DocTag>,
}

/// One `@tag` line (with continuation lines folded in).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocTag {
    pub title: Arc<str>,
    /// The named target for name-bearing tags (`@param foo`, `@property bar`).
    pub name: Option<String>,
    pub description: Option<String>,
}

impl DocComment {
    /// Parse the body of a `/** */` comment (text between the markers).
    pub fn parse(raw: &str) -> Self {
        let mut description_lines: Vec<&str> = Vec::new();
        let mut tags: Vec<DocTag> = Vec::new();
        let mut current: Option<(String, String)> = None;

        for line in raw.lines() {
            let line = unwrap_line(line);
            if let Some(rest) = line.strip_prefix('@') {
                if let Some((title, text)) = current.take() {
                    tags.push(DocTag::from_parts(&title, &text));
                }
                let (title, text) = match rest.split_once(char::is_whitespace) {
                    Some((title, text)) => (title.to_string(), text.trim().to_string()),
                    None => (rest.to_string(), String::new()),
                };
                current = Some((title, text));
            } else if let Some((_, text)) = current.as_mut() {
                if !line.is_empty() {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(line);
                }
            } else {
                description_lines.push(line);
            }
        }
        if let Some((title, text)) = current.take() {
            tags.push(DocTag::from_parts(&title, &text));
        }

        while description_lines.last().is_some_and(|l| l.is_empty()) {
            description_lines.pop();
        }
        while description_lines.first().is_some_and(|l| l.is_empty()) {
            description_lines.remove(0);
        }

        Self {
            description: description_lines.join("\n"),
            tags,
        }
    }

    /// Whether the comment hides its declaration from documentation.
    pub fn is_hidden(&self) -> bool {
        self.tags
            .iter()
            .any(|tag| matches!(tag.title.as_ref(), "internal" | "private"))
    }

    /// Find a tag by title.
    pub fn tag(&self, title: &str) -> Option<&DocTag> {
        self.tags.iter().find(|tag| tag.title.as_ref() == title)
    }
}

impl DocTag {
    fn from_parts(title: &str, text: &str) -> Self {
        // Name-bearing tags: skip an optional {type} block, then split the
        // target name off the description.
        let named = matches!(title, "param" | "property" | "arg" | "argument");
        if !named {
            return Self {
                title: title.into(),
                name: None,
                description: non_empty(text),
            };
        }

        let mut rest = text.trim_start();
        if rest.starts_with('{') {
            match rest.find('}') {
                Some(end) => rest = rest[end + 1..].trim_start(),
                None => rest = "",
            }
        }
        let (name, description) = match rest.split_once(char::is_whitespace) {
            Some((name, description)) => (name, description.trim()),
            None => (rest, ""),
        };
        Self {
            title: title.into(),
            name: non_empty(name),
            description: non_empty(description),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Strip the leading `*` decoration of one comment line.
fn unwrap_line(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_prefix('*').unwrap_or(line);
    line.strip_prefix(' ').unwrap_or(line)
}
