//! Turning Bitbucket Server webhook deliveries into builds.
//!
//! [`parse_hook`] looks at the `X-Event-Key` header, decodes the body into the matching payload
//! and hands it to the converter for that event. A delivery results in one of:
//!
//! - `Ok(Some(hook))`: build `hook.build` for `hook.repo`
//! - `Ok(None)`: nothing to do (unhandled event, deleted ref, comment without a command)
//! - `Err(_)`: the payload is broken
//!
//! Only the error case should alert anyone.

use std::io::Read;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::commands::{CommandCase, CommandFilter};
use crate::convert::{convert_pull_request_hook, convert_push_hook, convert_repo};
use crate::event::{ChangeType, EventKey, PullRequestHook, PushHook};
use crate::model::{Hook, Repo};

/// How long to wait for Bitbucket Server to create a pull request's merge ref.
pub(crate) const DEFAULT_MERGE_REF_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub(crate) enum HookError {
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("push payload has no ref changes")]
    NoChanges,
    #[error("invalid clone link {href}: {source}")]
    CloneLink {
        href: String,
        source: url::ParseError,
    },
    #[error("clone link {href} cannot carry credentials")]
    NoUserInfo { href: String },
}

/// Credentials of the account used to clone repositories.
#[derive(Debug)]
pub(crate) struct LegacyAuth {
    pub username: String,
    pub password: SecretString,
}

impl LegacyAuth {
    /// The clone URL of `repo` with these credentials as its user info.
    ///
    /// Meant to be handed straight to the fetch step. Descriptors themselves never carry
    /// credentials.
    pub(crate) fn authenticated_clone_url(&self, repo: &Repo) -> Result<SecretString, HookError> {
        let clone_link_error = |source| HookError::CloneLink {
            href: repo.clone.clone(),
            source,
        };
        let mut url = Url::parse(&repo.clone).map_err(clone_link_error)?;
        if url.set_username(&self.username).is_err()
            || url.set_password(Some(self.password.expose_secret().as_str())).is_err()
        {
            return Err(HookError::NoUserInfo {
                href: repo.clone.clone(),
            });
        }
        Ok(SecretString::new(url.into()))
    }
}

/// Everything a conversion needs besides the delivery itself.
#[derive(Debug)]
pub(crate) struct HookConfig {
    /// Bitbucket Server URL, used to build links
    pub base_url: String,
    /// Commands that let a pull request comment trigger a build
    pub commands: CommandFilter,
    pub merge_ref_grace: Duration,
    pub legacy_auth: Option<LegacyAuth>,
}

impl HookConfig {
    pub(crate) fn new(base_url: &str, allowed_commands: &str) -> Self {
        HookConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
            commands: CommandFilter::new(allowed_commands, CommandCase::default()),
            merge_ref_grace: DEFAULT_MERGE_REF_GRACE,
            legacy_auth: None,
        }
    }

    pub(crate) fn with_command_case(mut self, case: CommandCase) -> Self {
        let allowed = self.commands.commands().join(",");
        self.commands = CommandFilter::new(&allowed, case);
        self
    }

    pub(crate) fn with_merge_ref_grace(mut self, grace: Duration) -> Self {
        self.merge_ref_grace = grace;
        self
    }

    pub(crate) fn with_legacy_auth(mut self, auth: Option<LegacyAuth>) -> Self {
        self.legacy_auth = auth;
        self
    }
}

/// Convert one webhook delivery. See the module docs for the possible outcomes.
pub(crate) async fn parse_hook<R: Read>(
    body: R,
    event_key: &str,
    config: &HookConfig,
) -> Result<Option<Hook>, HookError> {
    let Some(key) = EventKey::from_header(event_key) else {
        tracing::debug!("Ignoring event {event_key:?}");
        return Ok(None);
    };
    tracing::debug!("Decoding {key} payload");
    match key {
        EventKey::RefsChanged => {
            let hook: PushHook = serde_json::from_reader(body)?;
            parse_push_hook(&hook, config)
        }
        EventKey::PullRequestOpened => {
            let hook: PullRequestHook = serde_json::from_reader(body)?;
            parse_pull_request_hook(&hook, config).await
        }
        EventKey::PullRequestCommentAdded => {
            let hook: PullRequestHook = serde_json::from_reader(body)?;
            let text = hook.comment.as_ref().map_or("", |c| c.text.as_str());
            if !config.commands.allows(text) {
                tracing::debug!(
                    "Comment on PR {} has no allowed command",
                    hook.pull_request.id
                );
                return Ok(None);
            }
            parse_pull_request_hook(&hook, config).await
        }
    }
}

fn parse_push_hook(hook: &PushHook, config: &HookConfig) -> Result<Option<Hook>, HookError> {
    // a push can change several refs, only the first one is built
    let change = hook.changes.first().ok_or(HookError::NoChanges)?;
    if change.kind == ChangeType::Delete {
        tracing::debug!("Ignoring deletion of {}", change.ref_id);
        return Ok(None);
    }
    let build = convert_push_hook(hook, change, &config.base_url);
    let repo = convert_repo(&hook.repository, &config.base_url)?;
    Ok(Some(Hook { repo, build }))
}

async fn parse_pull_request_hook(
    hook: &PullRequestHook,
    config: &HookConfig,
) -> Result<Option<Hook>, HookError> {
    let repo = convert_repo(&hook.pull_request.to_ref.repository, &config.base_url)?;
    let build = convert_pull_request_hook(hook, &config.base_url, config.merge_ref_grace).await;
    Ok(Some(Hook { repo, build }))
}
