//! Selecting the GitHub remote a link points at.

use crate::domain::errors::LinkError;
use crate::domain::model::Remote;
use crate::infra::git::RepositoryAccess;
use crate::ui::prompt::Host;

const REMOTE_PICKER_TITLE: &str = "Select the remote to use for the GitHub URL";

/// Picks a GitHub-backed remote, preferring a conventional name before asking the user.
#[derive(Debug, Clone)]
pub struct RemoteResolver<'a> {
    preferred: &'a str,
}

impl<'a> RemoteResolver<'a> {
    pub fn new(preferred: &'a str) -> Self {
        Self { preferred }
    }

    /// Returns `Ok(None)` when the user declines to choose.
    ///
    /// `requested` names a remote chosen up front; it must be one of the GitHub remotes.
    pub fn resolve(
        &self,
        repo: &impl RepositoryAccess,
        host: &mut dyn Host,
        requested: Option<&str>,
    ) -> Result<Option<Remote>, LinkError> {
        let remotes = repo.remotes().map_err(|err| {
            tracing::debug!(error = %format!("{err:#}"), "listing remotes failed");
            LinkError::FileNotInGitHubRepository
        })?;

        let mut github: Vec<Remote> = remotes.into_iter().filter(Remote::is_github).collect();
        if github.is_empty() {
            return Err(LinkError::FileNotInGitHubRepository);
        }

        if let Some(name) = requested {
            return github
                .into_iter()
                .find(|remote| remote.name == name)
                .map(Some)
                .ok_or(LinkError::FileNotInGitHubRepository);
        }

        if let Some(index) = github
            .iter()
            .position(|remote| remote.name == self.preferred)
        {
            return Ok(Some(github.swap_remove(index)));
        }

        let labels: Vec<String> = github.iter().map(Remote::label).collect();
        let choice = match host.choose(&labels, REMOTE_PICKER_TITLE) {
            Ok(choice) => choice,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "remote picker failed");
                None
            }
        };

        Ok(choice.and_then(|label| {
            labels
                .iter()
                .position(|candidate| *candidate == label)
                .map(|index| github.swap_remove(index))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{FakeRepo, ScriptedHost};

    fn repo_with(remotes: &[(&str, &str)]) -> FakeRepo {
        let mut repo = FakeRepo::new("/repo");
        for (name, url) in remotes {
            repo = repo.with_remote(name, url);
        }
        repo
    }

    #[test]
    fn prefers_origin_without_prompting() {
        let repo = repo_with(&[
            ("fork", "git@github.com:me/widget.git"),
            ("origin", "git@github.com:acme/widget.git"),
        ]);
        let mut host = ScriptedHost::declining();

        let remote = RemoteResolver::new("origin")
            .resolve(&repo, &mut host, None)
            .expect("resolves");

        assert_eq!(remote.map(|r| r.name), Some("origin".into()));
        assert!(host.prompts.is_empty());
    }

    #[test]
    fn asks_when_no_preferred_remote() {
        let repo = repo_with(&[
            ("fork", "git@github.com:me/widget.git"),
            ("upstream", "https://github.com/acme/widget"),
            ("lab", "git@gitlab.com:acme/widget.git"),
        ]);
        let mut host = ScriptedHost::answering(["upstream (https://github.com/acme/widget)"]);

        let remote = RemoteResolver::new("origin")
            .resolve(&repo, &mut host, None)
            .expect("resolves")
            .expect("chosen");

        assert_eq!(remote.name, "upstream");
        assert_eq!(
            host.prompts[0].options,
            vec![
                "fork (git@github.com:me/widget.git)".to_string(),
                "upstream (https://github.com/acme/widget)".to_string(),
            ]
        );
    }

    #[test]
    fn declined_prompt_selects_nothing() {
        let repo = repo_with(&[("fork", "git@github.com:me/widget.git")]);
        let mut host = ScriptedHost::declining();

        let remote = RemoteResolver::new("origin")
            .resolve(&repo, &mut host, None)
            .expect("resolves");
        assert_eq!(remote, None);
    }

    #[test]
    fn no_github_remote_is_an_error() {
        let repo = repo_with(&[("origin", "git@gitlab.com:acme/widget.git")]);
        let mut host = ScriptedHost::declining();

        let err = RemoteResolver::new("origin")
            .resolve(&repo, &mut host, None)
            .unwrap_err();
        assert_eq!(err, LinkError::FileNotInGitHubRepository);
    }

    #[test]
    fn requested_remote_must_be_on_github() {
        let repo = repo_with(&[
            ("origin", "git@github.com:acme/widget.git"),
            ("lab", "git@gitlab.com:acme/widget.git"),
        ]);
        let mut host = ScriptedHost::declining();
        let resolver = RemoteResolver::new("origin");

        let err = resolver.resolve(&repo, &mut host, Some("lab")).unwrap_err();
        assert_eq!(err, LinkError::FileNotInGitHubRepository);

        let remote = resolver
            .resolve(&repo, &mut host, Some("origin"))
            .expect("resolves");
        assert_eq!(remote.map(|r| r.name), Some("origin".into()));
    }
}
