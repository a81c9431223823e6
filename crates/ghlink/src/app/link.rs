//! The link pipeline: from an active file to a GitHub URL on the clipboard.

use std::path::Path;

use anyhow::Result;

use crate::app::branches::BranchLister;
use crate::app::remote::RemoteResolver;
use crate::app::{url, validate};
use crate::domain::errors::LinkError;
use crate::domain::model::{FileReference, LinkRequest, ResolvedLink};
use crate::infra::clipboard::ClipboardWriter;
use crate::infra::config::Config;
use crate::infra::git::RepositoryAccess;
use crate::ui::prompt::Host;

const BRANCH_PICKER_TITLE: &str = "Select the branch to link to";
const COPIED_MESSAGE: &str = "Copied GitHub URL for current file to clipboard";
const CLIPBOARD_FAILED_MESSAGE: &str = "Failed to copy GitHub URL to clipboard";

/// Pipeline checkpoints, in the order a successful run passes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    RepoResolved,
    RemoteResolved,
    BranchesListed,
    BranchChosen,
    FileValidated,
    BranchValidated,
    UrlBuilt,
    Copied,
}

/// How a run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// URL built and written to the clipboard.
    Copied(ResolvedLink),
    /// URL built; copying was disabled.
    Resolved(ResolvedLink),
    /// URL built but the clipboard rejected it.
    ClipboardFailed(ResolvedLink),
    /// The user declined a prompt.
    Cancelled,
    Failed(LinkError),
}

impl Outcome {
    pub fn link(&self) -> Option<&ResolvedLink> {
        match self {
            Outcome::Copied(link) | Outcome::Resolved(link) | Outcome::ClipboardFailed(link) => {
                Some(link)
            }
            Outcome::Cancelled | Outcome::Failed(_) => None,
        }
    }
}

/// Settings the pipeline reads from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    pub preferred_remote: String,
    pub default_branches: Vec<String>,
    pub copy: bool,
}

impl LinkOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            preferred_remote: config.remote.preferred.clone(),
            default_branches: config.branches.defaults.clone(),
            copy: config.output.copy(),
        }
    }
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Runs one invocation against the host, clipboard, and repository collaborators.
pub struct Linker<'a> {
    host: &'a mut dyn Host,
    clipboard: &'a mut dyn ClipboardWriter,
    options: LinkOptions,
}

impl<'a> Linker<'a> {
    pub fn new(
        host: &'a mut dyn Host,
        clipboard: &'a mut dyn ClipboardWriter,
        options: LinkOptions,
    ) -> Self {
        Self {
            host,
            clipboard,
            options,
        }
    }

    /// Execute the whole pipeline. Errors are reported to the host and never escape.
    ///
    /// `open` binds repository access to the directory containing the active file.
    pub fn run<R, F>(&mut self, request: &LinkRequest, open: F) -> Outcome
    where
        R: RepositoryAccess,
        F: FnOnce(&Path) -> Result<R>,
    {
        let link = match self.resolve(request, open) {
            Ok(Some(link)) => link,
            Ok(None) => {
                tracing::debug!("cancelled by user");
                return Outcome::Cancelled;
            }
            Err(err) => {
                tracing::debug!(error = ?err, "link failed");
                self.host.error(&err.to_string());
                return Outcome::Failed(err);
            }
        };

        if !self.options.copy {
            return Outcome::Resolved(link);
        }

        match self.clipboard.write(&link.url) {
            Ok(()) => {
                tracing::debug!(stage = ?Stage::Copied, url = %link.url);
                self.host.info(COPIED_MESSAGE);
                Outcome::Copied(link)
            }
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "clipboard write failed");
                self.host.error(CLIPBOARD_FAILED_MESSAGE);
                Outcome::ClipboardFailed(link)
            }
        }
    }

    /// Resolve the link without copying it. `Ok(None)` means a prompt was declined.
    pub fn resolve<R, F>(
        &mut self,
        request: &LinkRequest,
        open: F,
    ) -> Result<Option<ResolvedLink>, LinkError>
    where
        R: RepositoryAccess,
        F: FnOnce(&Path) -> Result<R>,
    {
        tracing::debug!(stage = ?Stage::Start, ?request);
        let file = request.file.as_deref().ok_or(LinkError::NoFileOpen)?;
        let directory = file.parent().ok_or(LinkError::FileNotInRepository)?;

        let repo = open(directory).map_err(|err| {
            tracing::debug!(error = %format!("{err:#}"), "repository discovery failed");
            LinkError::FileNotInRepository
        })?;
        let file = FileReference::new(file, repo.root()).ok_or(LinkError::FileNotInRepository)?;
        tracing::debug!(stage = ?Stage::RepoResolved, root = %repo.root().display(), path = %file.relative);

        let Some(remote) = RemoteResolver::new(&self.options.preferred_remote).resolve(
            &repo,
            &mut *self.host,
            request.remote.as_deref(),
        )?
        else {
            return Ok(None);
        };
        tracing::debug!(stage = ?Stage::RemoteResolved, remote = %remote.name);

        let candidates = BranchLister::new(&self.options.default_branches)
            .list(&repo, &remote)
            .map_err(|err| LinkError::RepositoryQuery(format!("{err:#}")))?;
        tracing::debug!(stage = ?Stage::BranchesListed, branches = ?candidates.ordered);

        let Some(branch) = self.choose_branch(request, &candidates.ordered) else {
            return Ok(None);
        };
        tracing::debug!(stage = ?Stage::BranchChosen, %branch);

        if !validate::file_exists_at(&repo, &branch, &file.relative) {
            return Err(LinkError::FileNotInSelectedBranch);
        }
        tracing::debug!(stage = ?Stage::FileValidated);

        if !validate::exists_remotely(&branch, &candidates.remote) {
            return Err(LinkError::BranchDoesntExistRemotely);
        }
        tracing::debug!(stage = ?Stage::BranchValidated);

        let base = url::base_url(&remote.push_url);
        let url = url::build(&base, &branch, &file.relative, request.selection);
        tracing::debug!(stage = ?Stage::UrlBuilt, %url);

        Ok(Some(ResolvedLink {
            url,
            remote: remote.name,
            branch,
            path: file.relative,
        }))
    }

    fn choose_branch(&mut self, request: &LinkRequest, ordered: &[String]) -> Option<String> {
        if let Some(branch) = &request.branch {
            return Some(branch.clone());
        }

        match self.host.choose(ordered, BRANCH_PICKER_TITLE) {
            Ok(choice) => choice,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "branch picker failed");
                None
            }
        }
    }
}
