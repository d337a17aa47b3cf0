use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Split the space-separated font list into file names, keeping their order
pub fn split_file_names(arg: &str) -> Vec<String> {
    arg.split(' ')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// List every `.less` file directly inside `dir`
pub fn discover_less_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_less = entry
            .path()
            .extension()
            .map(|ext| ext == "less")
            .unwrap_or(false);
        if !is_less {
            continue;
        }

        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    // Sort so the generated file is stable across filesystems
    names.sort();

    Ok(names)
}
