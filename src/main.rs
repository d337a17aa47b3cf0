mod inputs;
mod less_parser;
mod swift_writer;

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "font-constants")]
#[command(about = "Generate Swift icon-font constants from LESS variable files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Swift constants file
    Generate {
        /// Space-separated LESS file names inside the input directory
        /// (all `.less` files when omitted)
        fonts: Option<String>,

        /// Directory containing the LESS constants files
        #[arg(short, long, default_value = "LessConstantsFiles")]
        input: PathBuf,

        /// Swift file to write
        #[arg(short, long, default_value = "FontConstants.swift")]
        output: PathBuf,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            fonts,
            input,
            output,
            verbose,
        } => {
            init_logging(verbose);

            let file_names = match fonts {
                Some(list) => inputs::split_file_names(&list),
                None => inputs::discover_less_files(&input)?,
            };

            if file_names.is_empty() {
                anyhow::bail!("No LESS files given or found in {}", input.display());
            }

            let glyphs = generate_constants(
                &input,
                &file_names,
                &output,
                Local::now().naive_local(),
            )?;

            log::info!(
                "Generated {} ({} fonts, {} constants)",
                output.display(),
                file_names.len(),
                glyphs
            );
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Parse every named LESS file and write one Swift document to `output`.
///
/// All files are parsed before the output is touched, so a malformed input
/// leaves any previously generated file in place. Returns the number of
/// constants written.
fn generate_constants(
    input: &Path,
    file_names: &[String],
    output: &Path,
    generated_at: NaiveDateTime,
) -> Result<usize> {
    log::debug!("Reading LESS files from: {}", input.display());

    let fonts = file_names
        .iter()
        .map(|name| less_parser::parse_less_file(input, name))
        .collect::<Result<Vec<_>>>()?;

    let file_label = output
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("FontConstants.swift");
    let document = swift_writer::render_document(file_label, &fonts, generated_at);

    swift_writer::write_document(output, &document)?;

    Ok(fonts.iter().map(|font| font.glyphs.len()).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn names(list: &str) -> Vec<String> {
        inputs::split_file_names(list)
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("LessConstantsFiles");
        fs::create_dir(&input).unwrap();
        fs::write(
            input.join("icons.less"),
            ".icon-home-var-icon_home: \"\\f101\";\n.icon-arrow-var-arrow-left-bold: \"\\f102\";\n",
        )
        .unwrap();
        fs::write(
            input.join("badges.less"),
            "@badge-var-try: \"\\e001\";\n@badge-var-1x: \"\\E002\";\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_generate_single_font() {
        let dir = fixture();
        let input = dir.path().join("LessConstantsFiles");
        let output = dir.path().join("FontConstants.swift");

        let count = generate_constants(&input, &names("icons.less"), &output, at(12)).unwrap();
        assert_eq!(count, 2);

        let swift = fs::read_to_string(&output).unwrap();
        assert!(swift.contains("public struct icons {\n"));
        assert!(swift.contains("\tpublic static let iconHome = \"\\u{f101}\"\n"));
        assert!(swift.contains("\tpublic static let arrowLeftBold = \"\\u{f102}\"\n"));
        assert!(!swift.contains("badges"));
    }

    #[test]
    fn test_generate_keeps_input_order() {
        let dir = fixture();
        let input = dir.path().join("LessConstantsFiles");
        let output = dir.path().join("FontConstants.swift");

        generate_constants(&input, &names("icons.less badges.less"), &output, at(12)).unwrap();

        let swift = fs::read_to_string(&output).unwrap();
        let icons = swift.find("public struct icons {").unwrap();
        let badges = swift.find("public struct badges {").unwrap();
        assert!(icons < badges);

        let badges_block = &swift[badges..];
        assert!(badges_block.contains("public static let try_ = \"\\u{e001}\""));
        assert!(badges_block.contains("public static let _1x = \"\\u{E002}\""));
        assert!(!badges_block.contains("iconHome"));
    }

    #[test]
    fn test_generate_differs_only_in_timestamp() {
        let dir = fixture();
        let input = dir.path().join("LessConstantsFiles");
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::create_dir(&first).unwrap();
        fs::create_dir(&second).unwrap();
        let list = names("icons.less badges.less");

        generate_constants(&input, &list, &first.join("FontConstants.swift"), at(8)).unwrap();
        generate_constants(&input, &list, &second.join("FontConstants.swift"), at(9)).unwrap();

        let first = fs::read_to_string(first.join("FontConstants.swift")).unwrap();
        let second = fs::read_to_string(second.join("FontConstants.swift")).unwrap();
        let differing: Vec<_> = first
            .lines()
            .zip(second.lines())
            .filter(|(a, b)| a != b)
            .collect();

        assert_eq!(first.lines().count(), second.lines().count());
        assert_eq!(differing.len(), 1);
        assert!(differing.iter().any(|(a, _)| a.contains("Last updated on")));
    }

    #[test]
    fn test_malformed_line_writes_nothing() {
        let dir = fixture();
        let input = dir.path().join("LessConstantsFiles");
        let output = dir.path().join("FontConstants.swift");
        fs::write(input.join("broken.less"), "@variable-icon: \"\\f101\";\n").unwrap();

        let err = generate_constants(&input, &names("icons.less broken.less"), &output, at(12))
            .unwrap_err();

        assert!(format!("{:#}", err).contains("missing '-var-' marker"));
        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_line_keeps_previous_output() {
        let dir = fixture();
        let input = dir.path().join("LessConstantsFiles");
        let output = dir.path().join("FontConstants.swift");
        fs::write(&output, "previous").unwrap();
        fs::write(input.join("broken.less"), "@icon-var-home \"\\f101\";\n").unwrap();

        assert!(generate_constants(&input, &names("broken.less"), &output, at(12)).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = fixture();
        let input = dir.path().join("LessConstantsFiles");
        let output = dir.path().join("FontConstants.swift");

        let err = generate_constants(&input, &names("icons.less nope.less"), &output, at(12))
            .unwrap_err();

        assert!(err.to_string().starts_with("Failed to read"));
        assert!(!output.exists());
    }
}
