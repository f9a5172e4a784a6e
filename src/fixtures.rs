pub(crate) const PUSH: &str = include_str!("fixtures/push.json");
pub(crate) const PR_OPENED: &str = include_str!("fixtures/pr_opened.json");
pub(crate) const PR_COMMENT: &str = include_str!("fixtures/pr_comment.json");
/// A repository as returned by `GET /rest/api/1.0/projects/{key}/repos/{slug}`
pub(crate) const REPO: &str = include_str!("fixtures/repo.json");
