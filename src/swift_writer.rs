use crate::less_parser::Font;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::Path;

/// Format of the "Last updated" banner line
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// SwiftLint rules the generated constants would otherwise trip
const LINT_RULES: [&str; 3] = ["variable_name", "type_body_length", "file_length"];

const RULE_LINE: &str = "------------------------------";

/// Write the rendered Swift document, replacing any existing file
pub fn write_document(output_path: &Path, contents: &str) -> Result<()> {
    let mut file = std::fs::File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;

    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(())
}

/// Render the complete Swift source for all fonts, in order
pub fn render_document(file_label: &str, fonts: &[Font], generated_at: NaiveDateTime) -> String {
    let mut contents = format!(
        r#"//
//  {file_label}
//
//  Generated by font-constants from LESS icon-font variables. Do not edit.
//  Last updated on {timestamp}.
//
"#,
        timestamp = generated_at.format(TIMESTAMP_FORMAT)
    );

    contents.push_str(&lint_directives("disable"));

    for font in fonts {
        contents.push_str(&render_font(font));
    }

    contents.push_str(&lint_directives("enable"));

    contents
}

/// Render one font as a banner comment followed by a struct of constants
pub fn render_font(font: &Font) -> String {
    let mut members = String::new();

    for glyph in &font.glyphs {
        members.push_str(&format!(
            "\tpublic static let {} = \"\\u{{{}}}\"\n",
            glyph.identifier, glyph.codepoint
        ));
    }

    format!(
        "\n/*\n{rule}\n{name}\n{rule}\n*/\n\npublic struct {name} {{\n{members}}}\n",
        rule = RULE_LINE,
        name = font.name,
    )
}

fn lint_directives(action: &str) -> String {
    let mut lines = String::from("\n");
    for rule in LINT_RULES {
        lines.push_str(&format!("// swiftlint:{action} {rule}\n"));
    }
    lines
}
