//! @dose
//! purpose: Resolves command inputs (inline text, files, or stdin) into text plus the
//!     root-relative path used for config override matching.
//!
//! invariants:
//!     - "-" and an absent path both mean stdin
//!     - Relative paths are resolved against the project root, not the process cwd
//!
//! gotchas:
//!     - An absolute path outside the root has no relative path, so only the config
//!       defaults apply to it

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// One piece of text to analyze
#[derive(Debug)]
pub struct Input {
    /// Display name: the path as given, "<stdin>" or "<text>"
    pub label: String,
    /// Path relative to the project root, when the input is a file under it
    pub relative: Option<PathBuf>,
    pub text: String,
}

impl Input {
    pub fn inline(text: &str) -> Self {
        Self {
            label: "<text>".to_string(),
            relative: None,
            text: text.to_string(),
        }
    }

    pub fn stdin() -> Result<Self> {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(Self {
            label: "<stdin>".to_string(),
            relative: None,
            text: buffer,
        })
    }

    /// Read a path argument, treating "-" as stdin
    pub fn from_path(input: &Path, root: &Path) -> Result<Self> {
        if input.as_os_str() == "-" {
            return Self::stdin();
        }

        let (path, relative) = if input.is_absolute() {
            let relative = input.strip_prefix(root).ok().map(Path::to_path_buf);
            (input.to_path_buf(), relative)
        } else {
            (root.join(input), Some(input.to_path_buf()))
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;

        Ok(Self {
            label: input.display().to_string(),
            relative,
            text,
        })
    }
}

/// Collect inputs from --text or path arguments, defaulting to stdin
pub fn collect_inputs(text: Option<&str>, paths: &[PathBuf], root: &Path) -> Result<Vec<Input>> {
    if let Some(text) = text {
        return Ok(vec![Input::inline(text)]);
    }
    if paths.is_empty() {
        return Ok(vec![Input::stdin()?]);
    }
    paths.iter().map(|p| Input::from_path(p, root)).collect()
}
