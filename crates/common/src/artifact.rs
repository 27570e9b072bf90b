//! Diagnostic artifact recording
//!
//! Every evaluated prompt and browser test leaves its raw material on
//! disk (bot responses, judgments, step logs, screenshots) for post-hoc
//! inspection. Pass/fail alone is not enough to debug a flaky judge.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Writes per-test text attachments and suite metadata under one
/// output directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Write one UTF-8 attachment for a test case.
    pub fn attach_text(&self, test: &str, name: &str, content: &str) -> Result<PathBuf> {
        let test_dir = self.dir.join(sanitize(test));
        fs::create_dir_all(&test_dir)?;

        let path = test_dir.join(format!("{}.txt", sanitize(name)));
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Record suite environment metadata as a properties file.
    pub fn write_environment(&self, entries: &[(&str, String)]) -> Result<PathBuf> {
        let path = self.dir.join("environment.properties");
        let mut body = String::new();
        for (key, value) in entries {
            body.push_str(key);
            body.push('=');
            body.push_str(value);
            body.push('\n');
        }
        fs::write(&path, body)?;
        Ok(path)
    }

    /// Root directory of this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
