use std::time::Duration;

use chrono::Utc;

use crate::constants::{REF_HEADS_PREFIX, REF_TAGS_PREFIX};
use crate::event::{Change, PullRequestHook, PushHook};
use crate::model::{author_label, avatar_link, Build, BuildEvent, PULL_REQUEST_REFSPEC};

mod repo;

pub(crate) use repo::convert_repo;

/// Build for one ref change of a push. Callers pick the change and filter out deletions.
pub(crate) fn convert_push_hook(hook: &PushHook, change: &Change, base_url: &str) -> Build {
    let project = &hook.repository.project.key;
    let slug = &hook.repository.slug;
    let branch = strip_ref_prefix(&change.ref_id);
    let event = if change.ref_id.starts_with(REF_TAGS_PREFIX) {
        BuildEvent::Tag
    } else {
        BuildEvent::Push
    };

    Build {
        event,
        commit: change.to_hash.clone(),
        branch: branch.to_owned(),
        git_ref: change.ref_id.clone(),
        refspec: String::new(),
        // the push payload carries no commit message
        message: format!("{project}/{slug} - {branch} - pipeline"),
        title: String::new(),
        author: author_label(hook.actor.label()),
        email: hook.actor.email_address.clone(),
        avatar: avatar_link(base_url, hook.actor.url_slug()),
        timestamp: Utc::now().timestamp(),
        link: format!(
            "{base_url}/projects/{project}/repos/{slug}/commits/{}",
            change.to_hash
        ),
    }
}

/// Build for a pull request, fetched through its merge ref.
///
/// Bitbucket Server creates `refs/pull-requests/{id}/merge` asynchronously, so it may not exist
/// yet when the webhook arrives. We wait `grace` before returning to give the server time to
/// catch up.
pub(crate) async fn convert_pull_request_hook(
    hook: &PullRequestHook,
    base_url: &str,
    grace: Duration,
) -> Build {
    if !grace.is_zero() {
        tracing::debug!(
            "Waiting {grace:?} for the merge ref of PR {}",
            hook.pull_request.id
        );
        tokio::time::sleep(grace).await;
    }

    let pr = &hook.pull_request;
    let target = &pr.to_ref;
    let branch = if target.display_id.is_empty() {
        strip_ref_prefix(&target.id)
    } else {
        &target.display_id
    };

    Build {
        event: BuildEvent::PullRequest,
        commit: pr.from_ref.latest_commit.clone(),
        branch: branch.to_owned(),
        git_ref: format!("refs/pull-requests/{}/merge", pr.id),
        refspec: PULL_REQUEST_REFSPEC.to_owned(),
        message: pr.title.clone(),
        title: pr.title.clone(),
        author: author_label(hook.actor.label()),
        email: hook.actor.email_address.clone(),
        avatar: avatar_link(base_url, hook.actor.url_slug()),
        timestamp: Utc::now().timestamp(),
        link: format!(
            "{base_url}/projects/{}/repos/{}/pull-requests/{}",
            target.repository.project.key, target.repository.slug, pr.id
        ),
    }
}

/// Branch or tag name of a fully qualified ref.
fn strip_ref_prefix(ref_id: &str) -> &str {
    ref_id
        .strip_prefix(REF_HEADS_PREFIX)
        .or_else(|| ref_id.strip_prefix(REF_TAGS_PREFIX))
        .unwrap_or(ref_id)
}
