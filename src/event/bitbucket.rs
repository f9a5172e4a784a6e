//! Bitbucket Server payload shapes, as delivered by webhooks and returned by the REST API.
//!
//! Only the fields we read are required; everything else defaults so that payloads from
//! different server versions still decode.
#![allow(dead_code)]

use serde::Deserialize;

/// A user as it appears anywhere in a payload: actor, PR author, reviewer, participant.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Person {
    /// Login name
    pub name: String,
    pub email_address: String,
    pub id: u64,
    pub display_name: String,
    pub active: bool,
    /// URL-safe version of the login name
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Person {
    /// Name to show for this user, the display name when the server sent one.
    pub(crate) fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// Slug used in user URLs, falling back to the login name.
    pub(crate) fn url_slug(&self) -> &str {
        if self.slug.is_empty() {
            &self.name
        } else {
            &self.slug
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Link {
    #[serde(default)]
    pub href: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CloneLink {
    #[serde(default)]
    pub href: String,
    /// Protocol of the link, `http` or `ssh`
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct RepositoryLinks {
    pub clone: Vec<CloneLink>,
    #[serde(rename = "self")]
    pub self_links: Vec<Link>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Project {
    pub key: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Only present for personal projects
    #[serde(default)]
    pub owner: Option<Person>,
}

/// A repository, either embedded in a webhook or as a full API resource.
///
/// Webhook sub-documents usually lack `links`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Repository {
    pub slug: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub scm_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub forkable: bool,
    pub project: Project,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub links: Option<RepositoryLinks>,
    /// The repository this one was forked from
    #[serde(default)]
    pub origin: Option<Box<Repository>>,
}

/// Payload of `repo:refs_changed`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PushHook {
    #[serde(default)]
    pub event_key: String,
    #[serde(default)]
    pub date: String,
    pub actor: Person,
    pub repository: Repository,
    /// Ref changes in this push, one or more
    pub changes: Vec<Change>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Change {
    #[serde(default, rename = "ref")]
    pub git_ref: Option<RefDetails>,
    /// Fully qualified ref, e.g. `refs/heads/master`
    pub ref_id: String,
    #[serde(default)]
    pub from_hash: String,
    pub to_hash: String,
    #[serde(rename = "type")]
    pub kind: ChangeType,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RefDetails {
    pub id: String,
    pub display_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ChangeType {
    Add,
    Update,
    Delete,
    #[serde(other)]
    Other,
}

/// Payload of `pr:opened` and `pr:comment:added`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestHook {
    #[serde(default)]
    pub event_key: String,
    #[serde(default)]
    pub date: String,
    pub actor: Person,
    pub pull_request: PullRequest,
    /// Only present for comment events
    #[serde(default)]
    pub comment: Option<Comment>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequest {
    pub id: u64,
    #[serde(default)]
    pub version: u64,
    pub title: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub created_date: i64,
    #[serde(default)]
    pub updated_date: i64,
    pub from_ref: PullRequestRef,
    pub to_ref: PullRequestRef,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub author: Participant,
    #[serde(default)]
    pub reviewers: Vec<Participant>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestRef {
    /// Fully qualified ref, e.g. `refs/heads/feature`
    pub id: String,
    /// Branch name without the `refs/heads/` prefix
    #[serde(default)]
    pub display_id: String,
    pub latest_commit: String,
    pub repository: Repository,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Participant {
    pub user: Person,
    pub role: String,
    pub approved: bool,
    pub status: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Comment {
    pub id: u64,
    pub text: String,
    pub author: Option<Person>,
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{PR_COMMENT, PR_OPENED, PUSH, REPO};

    use super::*;

    #[test]
    fn test_deserialize_push() {
        let hook = serde_json::from_str::<PushHook>(PUSH).unwrap();
        assert_eq!(hook.event_key, "repo:refs_changed");
        assert_eq!(hook.actor.slug, "admin");
        assert_eq!(hook.repository.project.key, "PROJ");
        let [change] = hook.changes.as_slice() else {
            panic!("expected one change, got {:?}", hook.changes);
        };
        assert_eq!(change.ref_id, "refs/heads/master");
        assert_eq!(change.kind, ChangeType::Update);
        assert_eq!(change.to_hash, "a00945762949b7787ecabc388c0e20b1b85f0364");
    }

    #[test]
    fn test_deserialize_pull_request() {
        let hook = serde_json::from_str::<PullRequestHook>(PR_OPENED).unwrap();
        assert_eq!(hook.pull_request.id, 1);
        assert_eq!(hook.pull_request.to_ref.display_id, "master");
        assert_eq!(hook.pull_request.author.user.name, "admin");
        assert_eq!(hook.pull_request.reviewers[0].user.slug, "reviewer");
        assert!(hook.comment.is_none());
    }

    #[test]
    fn test_deserialize_comment() {
        let hook = serde_json::from_str::<PullRequestHook>(PR_COMMENT).unwrap();
        let comment = hook.comment.unwrap();
        assert_eq!(comment.text, "Retest please");
        assert_eq!(comment.author.unwrap().slug, "admin");
    }

    #[test]
    fn test_deserialize_api_repository() {
        let repo = serde_json::from_str::<Repository>(REPO).unwrap();
        let links = repo.links.unwrap();
        assert_eq!(links.clone.len(), 2);
        assert_eq!(links.self_links.len(), 1);
    }

    #[test]
    fn test_unknown_change_type() {
        let change: Change = serde_json::from_value(serde_json::json!({
            "refId": "refs/heads/x",
            "toHash": "abc",
            "type": "SOMETHING_NEW",
        }))
        .unwrap();
        assert_eq!(change.kind, ChangeType::Other);
    }

    #[test]
    fn test_person_fallbacks() {
        let person = Person {
            name: "jdoe".to_owned(),
            ..Person::default()
        };
        assert_eq!(person.label(), "jdoe");
        assert_eq!(person.url_slug(), "jdoe");
    }
}
