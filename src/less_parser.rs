use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Swift keywords that cannot be used as bare member names
const RESERVED_WORDS: [&str; 3] = ["repeat", "subscript", "try"];

/// Body of a declaration: everything after the first marker, up to the next one
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-var-(?P<body>.*?)(?:-var-|$)").unwrap());

/// Normalized `name:codepoint` pair; a second colon ends the codepoint
static DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>[^:]*):(?P<codepoint>[^:]*)").unwrap());

static CODEPOINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{1,8}$").unwrap());

/// A single glyph constant extracted from a LESS file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Swift member name (e.g., "arrowLeftBold" from "arrow-left-bold")
    pub identifier: String,
    /// Hex codepoint exactly as written in the source, without the escape
    pub codepoint: String,
}

/// All glyphs declared by one LESS file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    /// Struct name, taken from the file name up to the first `.`
    pub name: String,
    pub glyphs: Vec<Glyph>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing '-var-' marker")]
    MissingMarker,
    #[error("missing ':' between name and codepoint in '{0}'")]
    MissingSeparator(String),
    #[error("empty glyph name")]
    EmptyName,
    #[error("invalid codepoint '{codepoint}' for '{identifier}'")]
    InvalidCodepoint {
        identifier: String,
        codepoint: String,
    },
}

/// Parse a LESS constants file from `input_dir` into a font
pub fn parse_less_file(input_dir: &Path, file_name: &str) -> Result<Font> {
    let path = input_dir.join(file_name);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let font = parse_less_str(&font_name(file_name), &contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    log::debug!(
        "Parsed {} -> struct {} ({} glyphs)",
        path.display(),
        font.name,
        font.glyphs.len()
    );

    Ok(font)
}

/// Parse LESS source text into a font named `name`
pub fn parse_less_str(name: &str, contents: &str) -> Result<Font> {
    let mut glyphs = Vec::new();
    let mut seen = HashSet::new();

    for (index, line) in contents.lines().enumerate() {
        if !line.contains("var") {
            continue;
        }

        let glyph = parse_declaration(line).with_context(|| format!("line {}", index + 1))?;
        log::trace!("  {} -> U+{}", glyph.identifier, glyph.codepoint);

        if !seen.insert(glyph.identifier.clone()) {
            log::warn!(
                "Duplicate constant {}.{} on line {}",
                name,
                glyph.identifier,
                index + 1
            );
        }

        glyphs.push(glyph);
    }

    Ok(Font {
        name: name.to_string(),
        glyphs,
    })
}

/// Parse one declaration line such as `@icon-var-arrow-left: "\f101";`
pub fn parse_declaration(line: &str) -> Result<Glyph, ParseError> {
    let captures = MARKER_RE.captures(line).ok_or(ParseError::MissingMarker)?;
    let body = normalize(&captures["body"]);

    let captures = DECLARATION_RE
        .captures(&body)
        .ok_or_else(|| ParseError::MissingSeparator(body.clone()))?;

    let name = &captures["name"];
    if name.is_empty() {
        return Err(ParseError::EmptyName);
    }

    let identifier = name_to_identifier(name);
    let codepoint = captures["codepoint"].to_string();

    if !is_valid_codepoint(&codepoint) {
        return Err(ParseError::InvalidCodepoint {
            identifier,
            codepoint,
        });
    }

    Ok(Glyph {
        identifier,
        codepoint,
    })
}

/// Struct name for a file: everything before the first `.`
pub fn font_name(file_name: &str) -> String {
    file_name
        .split('.')
        .next()
        .unwrap_or(file_name)
        .to_string()
}

/// Replace dashes with underscores and drop quoting and spacing characters
fn normalize(body: &str) -> String {
    body.chars()
        .filter(|c| !matches!(c, ' ' | '"' | '\\' | ';'))
        .map(|c| if c == '-' { '_' } else { c })
        .collect()
}

/// Convert an underscore-separated name to a valid Swift identifier
fn name_to_identifier(name: &str) -> String {
    let mut identifier = String::new();

    for (index, segment) in name.split('_').enumerate() {
        if index == 0 {
            identifier.push_str(segment);
        } else {
            identifier.push_str(&capitalize(segment));
        }
    }

    if RESERVED_WORDS.contains(&identifier.as_str()) {
        identifier.push('_');
    }

    if identifier
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false)
    {
        identifier.insert(0, '_');
    }

    identifier
}

/// Uppercase the first character and lowercase the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn is_valid_codepoint(codepoint: &str) -> bool {
    CODEPOINT_RE.is_match(codepoint)
        && u32::from_str_radix(codepoint, 16)
            .ok()
            .and_then(char::from_u32)
            .is_some()
}
