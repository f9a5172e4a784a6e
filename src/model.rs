use std::fmt::Display;

use serde::{ser::SerializeStruct, Serialize, Serializer};

/// Branch every descriptor reports, regardless of the provider's configured default.
pub(crate) const DEFAULT_BRANCH: &str = "master";

/// Refspec that makes every pull request merge ref fetchable.
pub(crate) const PULL_REQUEST_REFSPEC: &str = "+refs/pull-requests/*:refs/remotes/origin/pr/*";

/// Longest author label a build may carry.
pub(crate) const AUTHOR_LABEL_MAX: usize = 40;
const ELLIPSIS: &str = "...";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RepoKind {
    Git,
}

/// Canonical repository descriptor.
///
/// The full name is not stored: it is derived from `owner` and `name` whenever it is read or
/// serialized, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Repo {
    /// Repository slug
    pub name: String,
    /// Project key
    pub owner: String,
    pub branch: String,
    pub kind: RepoKind,
    pub is_private: bool,
    /// Clone URL without user info
    pub clone: String,
    pub link: String,
}

impl Repo {
    pub(crate) fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Repo {
            name: name.into(),
            owner: owner.into(),
            branch: DEFAULT_BRANCH.to_owned(),
            kind: RepoKind::Git,
            // cloning always goes through credentials, so treat every repo as private
            is_private: true,
            clone: String::new(),
            link: String::new(),
        }
    }

    pub(crate) fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl Serialize for Repo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Repo", 8)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("owner", &self.owner)?;
        state.serialize_field("full_name", &self.full_name())?;
        state.serialize_field("branch", &self.branch)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("is_private", &self.is_private)?;
        state.serialize_field("clone", &self.clone)?;
        state.serialize_field("link", &self.link)?;
        state.end()
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum BuildEvent {
    Push,
    Tag,
    PullRequest,
}

impl Display for BuildEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BuildEvent::Push => "push",
            BuildEvent::Tag => "tag",
            BuildEvent::PullRequest => "pull_request",
        })
    }
}

/// Canonical build trigger.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Build {
    pub event: BuildEvent,
    pub commit: String,
    pub branch: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Only set for pull requests
    #[serde(skip_serializing_if = "String::is_empty")]
    pub refspec: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub author: String,
    pub email: String,
    pub avatar: String,
    /// Processing time in UTC epoch seconds
    pub timestamp: i64,
    pub link: String,
}

/// A repository and the build it should run, as produced by one webhook delivery.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hook {
    pub repo: Repo,
    pub build: Build,
}

impl Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}@{} ({})",
            self.build.event,
            self.repo.full_name(),
            self.build.branch,
            self.build.commit
        )
    }
}

/// Clamp an author name to [`AUTHOR_LABEL_MAX`] characters, marking the cut with `...`.
pub(crate) fn author_label(name: &str) -> String {
    if name.chars().count() <= AUTHOR_LABEL_MAX {
        return name.to_owned();
    }
    let mut label: String = name
        .chars()
        .take(AUTHOR_LABEL_MAX - ELLIPSIS.len())
        .collect();
    label.push_str(ELLIPSIS);
    label
}

pub(crate) fn avatar_link(base_url: &str, slug: &str) -> String {
    format!("{base_url}/users/{slug}/avatar.png")
}
