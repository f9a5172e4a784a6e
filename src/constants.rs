/// Header carrying the event key of a Bitbucket Server webhook delivery.
pub(crate) const EVENT_KEY_HEADER: &str = "X-Event-Key";

pub(crate) const HOOK_PUSH: &str = "repo:refs_changed";
pub(crate) const HOOK_PULL_REQUEST_OPENED: &str = "pr:opened";
pub(crate) const HOOK_PULL_REQUEST_COMMENT: &str = "pr:comment:added";

pub(crate) const REF_HEADS_PREFIX: &str = "refs/heads/";
pub(crate) const REF_TAGS_PREFIX: &str = "refs/tags/";
