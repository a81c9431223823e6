//! Domain models for remotes, file references, selections, and resolved links.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Host marker a push URL must contain for its remote to count as GitHub-backed.
pub const GITHUB_HOST: &str = "github.com";

/// A git remote as configured in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub push_url: String,
}

impl Remote {
    pub fn new(name: impl Into<String>, push_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            push_url: push_url.into(),
        }
    }

    pub fn is_github(&self) -> bool {
        self.push_url.contains(GITHUB_HOST)
    }

    /// Label used when the remote is offered in a picker.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.push_url)
    }
}

/// A line range, stored 1-indexed with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSelection {
    start: usize,
    end: usize,
}

impl LineSelection {
    /// Build a selection from 0-indexed editor positions. Reversed selections are swapped.
    /// Returns `None` when a position has no 1-indexed line number.
    pub fn from_editor(start: usize, end: usize) -> Option<Self> {
        Some(Self {
            start: start.min(end).checked_add(1)?,
            end: start.max(end).checked_add(1)?,
        })
    }

    /// Build a selection from 1-indexed line numbers. Returns `None` when either line is zero.
    pub fn from_one_based(start: usize, end: usize) -> Option<Self> {
        if start == 0 || end == 0 {
            return None;
        }
        Self::from_editor(start - 1, end - 1)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// URL fragment pointing at the selection, e.g. `#L4` or `#L4-L9`.
    pub fn anchor(&self) -> String {
        if self.start == self.end {
            format!("#L{}", self.start)
        } else {
            format!("#L{}-L{}", self.start, self.end)
        }
    }
}

/// A file inside a repository working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Path relative to the repository root, always `/`-separated.
    pub relative: String,
}

impl FileReference {
    /// Returns `None` when `absolute` does not lie strictly below `root`.
    pub fn new(absolute: &Path, root: &Path) -> Option<Self> {
        let relative = absolute.strip_prefix(root).ok()?;
        let segments: Vec<_> = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect();
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            relative: segments.join("/"),
        })
    }
}

/// Everything the host knows at the moment the command is invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRequest {
    /// Path of the active file, if any.
    pub file: Option<PathBuf>,
    pub selection: Option<LineSelection>,
    /// Remote to use instead of resolving one.
    pub remote: Option<String>,
    /// Branch to use instead of prompting.
    pub branch: Option<String>,
}

/// Final artifact of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub url: String,
    pub remote: String,
    pub branch: String,
    pub path: String,
}
