//! In-memory collaborators for driving the pipeline in tests.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};

use crate::domain::model::Remote;
use crate::infra::clipboard::ClipboardWriter;
use crate::infra::git::RepositoryAccess;
use crate::ui::prompt::Host;

#[derive(Debug, Default, Clone)]
pub struct FakeRepo {
    root: PathBuf,
    remotes: Vec<Remote>,
    remote_branches: BTreeMap<String, Vec<String>>,
    current: Option<String>,
    files: BTreeSet<(String, String)>,
    broken_refs: bool,
}

impl FakeRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remotes.push(Remote::new(name, url));
        self
    }

    pub fn with_remote_branches(mut self, remote: &str, branches: &[&str]) -> Self {
        self.remote_branches.insert(
            remote.to_owned(),
            branches.iter().map(|name| name.to_string()).collect(),
        );
        self
    }

    pub fn with_current_branch(mut self, branch: &str) -> Self {
        self.current = Some(branch.to_owned());
        self
    }

    pub fn with_file(mut self, branch: &str, path: &str) -> Self {
        self.files.insert((branch.to_owned(), path.to_owned()));
        self
    }

    pub fn with_broken_refs(mut self) -> Self {
        self.broken_refs = true;
        self
    }
}

impl RepositoryAccess for FakeRepo {
    fn root(&self) -> &Path {
        &self.root
    }

    fn remotes(&self) -> Result<Vec<Remote>> {
        Ok(self.remotes.clone())
    }

    fn remote_branches(&self, remote: &str) -> Result<Vec<String>> {
        if self.broken_refs {
            bail!("packed-refs is corrupt");
        }
        Ok(self.remote_branches.get(remote).cloned().unwrap_or_default())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.current.clone())
    }

    fn check_path_at(&self, reference: &str, path: &str) -> Result<()> {
        if self
            .files
            .contains(&(reference.to_owned(), path.to_owned()))
        {
            Ok(())
        } else {
            Err(anyhow!("{reference}:{path} not found"))
        }
    }
}

/// A prompt the host was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub options: Vec<String>,
}

/// Host that answers prompts from a script and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    answers: VecDeque<Option<String>>,
    pub prompts: Vec<Prompt>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

impl ScriptedHost {
    /// Every prompt is cancelled.
    pub fn declining() -> Self {
        Self::default()
    }

    pub fn answering<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|answer| Some(answer.into())).collect(),
            ..Self::default()
        }
    }
}

impl Host for ScriptedHost {
    fn choose(&mut self, options: &[String], title: &str) -> Result<Option<String>> {
        self.prompts.push(Prompt {
            title: title.to_owned(),
            options: options.to_vec(),
        });
        Ok(self.answers.pop_front().flatten())
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_owned());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }
}

#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub writes: Vec<String>,
    pub fail: bool,
}

impl ClipboardWriter for RecordingClipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        if self.fail {
            bail!("no clipboard backend");
        }
        self.writes.push(text.to_owned());
        Ok(())
    }
}
