// ABOUTME: Shell helpers shared by the interactive menus - file listing, choices, parsing.
// ABOUTME: Also hands files to the OS default viewer through the open crate.

use std::path::{Path, PathBuf};

use crate::error::ShellError;

/// Extensions offered by the "open a file" menu.
pub const OPENABLE_EXTENSIONS: [&str; 4] = ["xlsx", "docx", "pdf", "txt"];

const DEFAULT_HEADER_COUNT: usize = 3;

/// Sorted names of the files in `dir` whose extension is one of `extensions`.
///
/// Extensions are compared case-insensitively and given without the dot.
pub fn list_files(dir: impl AsRef<Path>, extensions: &[&str]) -> Result<Vec<String>, ShellError> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)));
        if matches {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    files.sort();
    Ok(files)
}

/// Turn menu input into a file name.
///
/// Digits pick from `files` (1-based). Anything else is taken as a name,
/// with `.{default_ext}` appended when it has no such suffix.
pub fn resolve_choice(input: &str, files: &[String], default_ext: &str) -> Result<String, ShellError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ShellError::InvalidChoice("no file given".to_string()));
    }

    if input.chars().all(|c| c.is_ascii_digit()) {
        return input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| files.get(i))
            .cloned()
            .ok_or_else(|| {
                ShellError::InvalidChoice(format!("{input} is not between 1 and {}", files.len()))
            });
    }

    let suffix = format!(".{default_ext}");
    if default_ext.is_empty() || input.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
        Ok(input.to_string())
    } else {
        Ok(format!("{input}{suffix}"))
    }
}

pub fn is_exit(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "exit" | "quit" | "q")
}

/// End of a manual-entry loop: `done`, `end`, or any exit word.
pub fn is_done(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "done" | "end") || is_exit(input)
}

pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Open `path` in the operating system's default application.
pub fn open_file(path: impl AsRef<Path>) -> Result<(), ShellError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ShellError::NotFound(path.to_path_buf()));
    }

    open::that(path).map_err(|source| ShellError::Launch {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "opened file");
    Ok(())
}

/// Split a comma-separated line into exactly `width` trimmed values.
pub fn parse_row(line: &str, width: usize) -> Vec<String> {
    let mut values: Vec<String> = line.split(',').map(|v| v.trim().to_string()).collect();
    values.resize(width, String::new());
    values
}

/// Split a comma-separated header line, or give `Column 1..3` when blank.
pub fn parse_headers(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return (1..=DEFAULT_HEADER_COUNT).map(|i| format!("Column {i}")).collect();
    }
    line.split(',').map(|h| h.trim().to_string()).collect()
}

/// `{name}.{ext}`, or `{fallback}.{ext}` when `name` is blank.
pub fn file_name_or(name: &str, fallback: &str, ext: &str) -> PathBuf {
    let name = name.trim();
    let stem = if name.is_empty() { fallback } else { name };
    PathBuf::from(format!("{stem}.{ext}"))
}
