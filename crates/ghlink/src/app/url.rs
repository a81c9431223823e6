//! GitHub web URL construction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::LineSelection;

static SSH_REMOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^git@github\.com:(.*)\.git$").expect("ssh remote pattern compiles"));

/// Derive the repository's web root from a push URL.
///
/// Only the SSH form `git@github.com:<owner>/<repo>.git` is rewritten; any other URL is returned
/// as is, so an HTTPS remote ending in `.git` keeps its suffix.
pub fn base_url(push_url: &str) -> String {
    SSH_REMOTE
        .replace(push_url, "https://github.com/$1")
        .into_owned()
}

/// Assemble `<base>/blob/<branch>/<path>` with an optional line anchor.
pub fn build(
    base_url: &str,
    branch: &str,
    relative_path: &str,
    selection: Option<LineSelection>,
) -> String {
    let mut url = format!("{base_url}/blob/{branch}/{relative_path}");
    if let Some(selection) = selection {
        url.push_str(&selection.anchor());
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssh_remote_becomes_https() {
        assert_eq!(
            base_url("git@github.com:acme/widget.git"),
            "https://github.com/acme/widget"
        );
        assert_eq!(
            base_url("git@github.com:acme/dotted.name.git"),
            "https://github.com/acme/dotted.name"
        );
    }

    #[test]
    fn other_forms_pass_through() {
        for url in [
            "https://github.com/acme/widget",
            "https://github.com/acme/widget.git",
            "ssh://git@github.com/acme/widget.git",
            "git@gitlab.com:acme/widget.git",
        ] {
            assert_eq!(base_url(url), url);
        }
    }

    #[test]
    fn rewrite_is_idempotent() {
        let once = base_url("git@github.com:acme/widget.git");
        assert_eq!(base_url(&once), once);
    }

    #[test]
    fn single_line_anchor() {
        let selection = LineSelection::from_editor(4, 4).expect("valid positions");
        assert_eq!(
            build("https://github.com/acme/widget", "main", "src/a.ts", Some(selection)),
            "https://github.com/acme/widget/blob/main/src/a.ts#L5"
        );
    }

    #[test]
    fn range_anchor() {
        let selection = LineSelection::from_editor(10, 12).expect("valid positions");
        assert_eq!(
            build("https://github.com/acme/widget", "main", "src/a.ts", Some(selection)),
            "https://github.com/acme/widget/blob/main/src/a.ts#L11-L13"
        );
    }

    #[test]
    fn no_selection_means_no_anchor() {
        assert_eq!(
            build("https://github.com/acme/widget", "feature/x", "README.md", None),
            "https://github.com/acme/widget/blob/feature/x/README.md"
        );
    }
}
