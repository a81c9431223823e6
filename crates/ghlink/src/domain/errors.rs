//! Domain-specific errors.

use thiserror::Error;

const NOT_ON_GITHUB: &str = "This file must be in a GitHub repository and have been pushed upstream";

/// Terminal failures of a single link run. The `Display` text is the message shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("{}", NOT_ON_GITHUB)]
    NoFileOpen,
    #[error("{}", NOT_ON_GITHUB)]
    FileNotInRepository,
    #[error("{}", NOT_ON_GITHUB)]
    FileNotInGitHubRepository,
    #[error("This file does not exist in the branch you selected")]
    FileNotInSelectedBranch,
    #[error("The branch you selected does not exist in remote repository")]
    BranchDoesntExistRemotely,
    #[error("Failed to read repository: {0}")]
    RepositoryQuery(String),
}
