//! Checks a chosen branch must pass before a link is built.

use crate::infra::git::RepositoryAccess;

/// Whether `relative_path` exists in the tree at the tip of `branch`. Lookup failures count as
/// absence.
pub fn file_exists_at(repo: &impl RepositoryAccess, branch: &str, relative_path: &str) -> bool {
    match repo.check_path_at(branch, relative_path) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(
                branch,
                path = relative_path,
                error = %format!("{err:#}"),
                "path lookup failed"
            );
            false
        }
    }
}

pub fn exists_remotely(branch: &str, remote_branches: &[String]) -> bool {
    remote_branches.iter().any(|name| name == branch)
}
