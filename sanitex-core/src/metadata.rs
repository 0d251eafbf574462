//! Metadata stripping
//!
//! Lesson text may start with a front-matter header and end with a metadata
//! footer. The rest of the pipeline only ever sees the body. Callers with
//! their own conventions plug in any [`MetadataStripper`], including a bare
//! `Fn(&str) -> String`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Removes structural metadata, returning body-only text.
pub trait MetadataStripper {
    fn strip(&self, text: &str) -> String;
}

impl<F> MetadataStripper for F
where
    F: Fn(&str) -> String,
{
    fn strip(&self, text: &str) -> String {
        self(text)
    }
}

/// Syntax of a recognised front-matter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterKind {
    Yaml,
    Toml,
}

/// A front-matter header split off the body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub kind: FrontMatterKind,
    /// Text between the delimiter lines.
    pub raw: String,
    /// Parsed mapping for YAML headers; `None` for TOML.
    pub value: Option<serde_yaml::Value>,
}

static YAML_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A---[ \t]*\r?\n").unwrap());
static YAML_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:---|\.\.\.)[ \t]*(?:\r?\n|\z)").unwrap());
static TOML_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\+\+\+[ \t]*\r?\n").unwrap());
static TOML_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\+\+\+[ \t]*(?:\r?\n|\z)").unwrap());
static RULE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^---[ \t]*\r?$").unwrap());

/// Split a leading front-matter block off `text`.
///
/// A UTF-8 byte-order mark and blank lines before the opening delimiter are
/// tolerated. Without a closing delimiter nothing is split, and a `---` block
/// only counts when its content is a YAML mapping, so a lesson opening with a
/// horizontal rule keeps its first section.
pub fn split_front_matter(text: &str) -> (Option<FrontMatter>, &str) {
    let trimmed = text.trim_start_matches('\u{FEFF}');
    let start = trimmed.len() - trimmed.trim_start_matches(['\n', '\r', ' ', '\t']).len();
    let candidate = &trimmed[start..];

    for (kind, open, close) in [
        (FrontMatterKind::Yaml, &*YAML_OPEN, &*YAML_CLOSE),
        (FrontMatterKind::Toml, &*TOML_OPEN, &*TOML_CLOSE),
    ] {
        let Some(opening) = open.find(candidate) else {
            continue;
        };
        let rest = &candidate[opening.end()..];
        let Some(closing) = close.find(rest) else {
            return (None, text);
        };

        let raw = rest[..closing.start()].trim_end_matches(['\r', '\n']).to_string();
        let value = match kind {
            FrontMatterKind::Yaml => match serde_yaml::from_str(&raw) {
                Ok(value @ serde_yaml::Value::Mapping(_)) => Some(value),
                _ => return (None, text),
            },
            FrontMatterKind::Toml => None,
        };
        let body = &rest[closing.end()..];
        return (Some(FrontMatter { kind, raw, value }), body);
    }

    (None, text)
}

/// Split a trailing `---` fenced metadata block off `text`.
///
/// The block is delimited by the last two `---` lines, the second of which
/// may only be followed by whitespace. Only blocks whose content parses as a
/// non-empty YAML mapping count, so a closing horizontal rule around prose
/// survives.
pub fn split_footer(text: &str) -> (&str, Option<serde_yaml::Mapping>) {
    let mut opening = None;
    let mut closing = None;
    for rule in RULE_LINE.find_iter(text) {
        opening = closing.replace(rule);
    }
    let (Some(opening), Some(closing)) = (opening, closing) else {
        return (text, None);
    };
    if !text[closing.end()..].trim().is_empty() {
        return (text, None);
    }

    match serde_yaml::from_str::<serde_yaml::Value>(&text[opening.end()..closing.start()]) {
        Ok(serde_yaml::Value::Mapping(map)) if !map.is_empty() => {
            (&text[..opening.start()], Some(map))
        }
        _ => (text, None),
    }
}

/// Default stripper: front-matter header and metadata footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatterStripper {
    pub header: bool,
    pub footer: bool,
}

impl Default for FrontMatterStripper {
    fn default() -> Self {
        FrontMatterStripper {
            header: true,
            footer: true,
        }
    }
}

impl MetadataStripper for FrontMatterStripper {
    fn strip(&self, text: &str) -> String {
        let mut body = text;
        if self.header {
            if let (Some(front), rest) = split_front_matter(body) {
                tracing::debug!(kind = ?front.kind, "stripped front matter");
                body = rest;
            }
        }
        if self.footer {
            if let (rest, Some(map)) = split_footer(body) {
                tracing::debug!(keys = map.len(), "stripped metadata footer");
                body = rest;
            }
        }
        body.to_string()
    }
}

/// Strip metadata with the default [`FrontMatterStripper`].
pub fn strip_metadata(text: &str) -> String {
    FrontMatterStripper::default().strip(text)
}
