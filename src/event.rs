use std::fmt::Display;

use crate::constants::{HOOK_PULL_REQUEST_COMMENT, HOOK_PULL_REQUEST_OPENED, HOOK_PUSH};

mod bitbucket;

pub(crate) use bitbucket::{Change, ChangeType, PullRequestHook, PushHook, Repository};
#[cfg(test)]
pub(crate) use bitbucket::{CloneLink, Link, Project, RepositoryLinks};

/// The webhook events that can lead to a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKey {
    /// A push created, updated or deleted refs
    RefsChanged,
    PullRequestOpened,
    PullRequestCommentAdded,
}

impl EventKey {
    /// Look up the value of an `X-Event-Key` header. Keys we don't handle map to `None`.
    pub(crate) fn from_header(key: &str) -> Option<Self> {
        match key {
            HOOK_PUSH => Some(EventKey::RefsChanged),
            HOOK_PULL_REQUEST_OPENED => Some(EventKey::PullRequestOpened),
            HOOK_PULL_REQUEST_COMMENT => Some(EventKey::PullRequestCommentAdded),
            _ => None,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            EventKey::RefsChanged => HOOK_PUSH,
            EventKey::PullRequestOpened => HOOK_PULL_REQUEST_OPENED,
            EventKey::PullRequestCommentAdded => HOOK_PULL_REQUEST_COMMENT,
        }
    }
}

impl Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
