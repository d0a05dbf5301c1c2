//! Destinations for report artifacts

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Stores named report artifacts (text reports, JSON dumps, diagnostics).
pub trait ArtifactSink: Send + Sync {
    fn write(&self, name: &str, contents: &str) -> Result<()>;
}

/// Writes each artifact as a file in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Use `root`, creating it if needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create artifact directory {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.root.join(name);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write artifact {}", path.display()))?;
        debug!(path = %path.display(), "Artifact written");
        Ok(())
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<String, String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.files
            .lock()
            .ok()
            .and_then(|files| files.get(name).cloned())
    }

    /// Artifact names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.files
            .lock()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&self, name: &str, contents: &str) -> Result<()> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| anyhow::anyhow!("Artifact store poisoned"))?;
        files.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}
