//! Building the ordered list of branch candidates offered to the user.

use std::cmp::Ordering;

use anyhow::Result;

use crate::domain::model::Remote;
use crate::infra::git::RepositoryAccess;

/// Branch names known for one remote plus the order they are offered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCandidates {
    /// Remote-tracking branch names, as reported by the repository.
    pub remote: Vec<String>,
    /// Checked-out branch, if HEAD points at one.
    pub current: Option<String>,
    /// Picker order: current branch, then default branches, then everything else, each group
    /// collated with [`collate`].
    pub ordered: Vec<String>,
}

/// Lists remote-tracking branches and merges in the current local branch.
#[derive(Debug, Clone)]
pub struct BranchLister<'a> {
    default_branches: &'a [String],
}

impl<'a> BranchLister<'a> {
    pub fn new(default_branches: &'a [String]) -> Self {
        Self { default_branches }
    }

    pub fn list(&self, repo: &impl RepositoryAccess, remote: &Remote) -> Result<BranchCandidates> {
        let remote_branches = repo.remote_branches(&remote.name)?;
        let current = repo.current_branch()?;
        let ordered = self.order(&remote_branches, current.as_deref());

        Ok(BranchCandidates {
            remote: remote_branches,
            current,
            ordered,
        })
    }

    /// Merge `current` into `remote_branches` and sort for presentation.
    pub fn order(&self, remote_branches: &[String], current: Option<&str>) -> Vec<String> {
        let mut branches = remote_branches.to_vec();
        if let Some(current) = current
            && !branches.iter().any(|name| name == current)
        {
            branches.insert(0, current.to_owned());
        }

        branches.sort_by(|a, b| self.compare(a, b, current));
        branches.dedup();
        branches
    }

    fn compare(&self, a: &str, b: &str, current: Option<&str>) -> Ordering {
        self.rank(a, current)
            .cmp(&self.rank(b, current))
            .then_with(|| collate(a, b))
    }

    fn rank(&self, name: &str, current: Option<&str>) -> u8 {
        if current == Some(name) {
            0
        } else if self.default_branches.iter().any(|default| default == name) {
            1
        } else {
            2
        }
    }
}

/// ASCII punctuation and symbols in root collation order.
const PUNCTUATION: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Compare branch names the way a root-locale collator does: whitespace, then punctuation,
/// then digits, then letters ignoring case. Ties fall back to lowercase before uppercase, then
/// to byte order so the result stays total.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn primary_weight(ch: char) -> (u8, u32) {
    if ch.is_whitespace() {
        (0, ch as u32)
    } else if let Some(index) = PUNCTUATION.find(ch) {
        (1, index as u32)
    } else if ch.is_numeric() {
        (3, ch as u32)
    } else if ch.is_alphabetic() {
        (4, ch.to_lowercase().next().unwrap_or(ch) as u32)
    } else {
        (2, ch as u32)
    }
}
