//! Git integration utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::domain::model::Remote;

/// Read-only queries the link pipeline issues against a local repository.
pub trait RepositoryAccess {
    /// Root of the working tree.
    fn root(&self) -> &Path;

    /// All configured remotes with the URL used for pushing.
    fn remotes(&self) -> Result<Vec<Remote>>;

    /// Remote-tracking branch names of `remote`, without the `<remote>/` prefix.
    fn remote_branches(&self, remote: &str) -> Result<Vec<String>>;

    /// Short name of the checked-out branch, or `None` when HEAD is detached or the branch has
    /// no commits yet.
    fn current_branch(&self) -> Result<Option<String>>;

    /// Succeeds when `path` resolves to an entry in the tree of `reference`.
    fn check_path_at(&self, reference: &str, path: &str) -> Result<()>;
}

/// Wrapper around a discovered [`gix::Repository`] with a working tree.
pub struct GitClient {
    repo: gix::Repository,
    root: PathBuf,
}

impl GitClient {
    /// Locate the repository enclosing `path`.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = gix::discover(path)
            .with_context(|| format!("no git repository encloses {}", path.display()))?;

        let work_dir = repo
            .work_dir()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("repository at {} has no working tree", path.display()))?;
        let root = fs::canonicalize(&work_dir).unwrap_or(work_dir);

        tracing::debug!(root = %root.display(), "discovered repository");
        Ok(Self { repo, root })
    }
}

impl RepositoryAccess for GitClient {
    fn root(&self) -> &Path {
        &self.root
    }

    fn remotes(&self) -> Result<Vec<Remote>> {
        let mut remotes = Vec::new();
        for name in self.repo.remote_names() {
            let remote = self
                .repo
                .find_remote(&*name)
                .with_context(|| format!("failed to load remote {name}"))?;
            let Some(url) = remote.url(gix::remote::Direction::Push) else {
                tracing::debug!(remote = %name, "remote has no url");
                continue;
            };
            remotes.push(Remote::new(name.to_string(), url.to_bstring().to_string()));
        }
        Ok(remotes)
    }

    fn remote_branches(&self, remote: &str) -> Result<Vec<String>> {
        let prefix = format!("refs/remotes/{remote}/");
        let platform = self
            .repo
            .references()
            .context("failed to open reference store")?;
        let iter = platform
            .remote_branches()
            .context("failed to list remote-tracking branches")?;

        let mut branches = Vec::new();
        for reference in iter {
            let reference = reference.map_err(|err| anyhow!(err))?;
            let full_name = reference.name().as_bstr().to_string();
            match full_name.strip_prefix(&prefix) {
                Some("HEAD") | None => {}
                Some(branch) => branches.push(branch.to_owned()),
            }
        }

        tracing::debug!(remote, count = branches.len(), "listed remote-tracking branches");
        Ok(branches)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let head = self.repo.head().context("failed to read HEAD")?;
        if head.is_unborn() {
            return Ok(None);
        }
        Ok(head.referent_name().map(|name| name.shorten().to_string()))
    }

    fn check_path_at(&self, reference: &str, path: &str) -> Result<()> {
        let spec = format!("{reference}:{path}");
        self.repo
            .rev_parse_single(spec.as_str())
            .with_context(|| format!("{spec} does not resolve"))?;
        Ok(())
    }
}
