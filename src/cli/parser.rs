use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use url::Url;

use crate::commands::CommandCase;
use crate::hook::{HookConfig, LegacyAuth};
use crate::utils::get_credential;

/// systemd credential holding the password if none is passed
const PASSWORD_CREDENTIAL: &str = "bitbucket_password";

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start web hook server
    Serve(ServeArgs),
    /// Convert a single webhook payload and print the result
    Convert(ConvertArgs),
    /// Print the Bitbucket build status document for a CI status
    Status(StatusArgs),
}

#[derive(Args)]
pub(crate) struct ServeArgs {
    /// IP and port to listen on
    #[arg(default_value = "0.0.0.0:3000")]
    pub(crate) addr: String,
    #[command(flatten)]
    pub(crate) hook: HookArgs,
}

#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Event key, as sent in the X-Event-Key header
    #[arg(long, short)]
    pub(crate) event: String,
    /// Payload file (default: stdin)
    pub(crate) file: Option<PathBuf>,
    /// Only print the URL to clone the repository from, including credentials if configured
    #[arg(long)]
    pub(crate) clone_url: bool,
    #[command(flatten)]
    pub(crate) hook: HookArgs,
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    /// CI build status, e.g. running or success
    pub(crate) status: String,
    /// Key identifying the build status on the commit
    #[arg(long)]
    pub(crate) key: String,
    /// URL of the build
    #[arg(long)]
    pub(crate) url: String,
    #[arg(long, default_value = "")]
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct HookArgs {
    /// Bitbucket Server URL, used to build links
    #[arg(long, env = "BITBUCKET_URL")]
    pub(crate) base_url: String,
    /// Comma separated pull request comment commands that trigger a build
    #[arg(long, env, default_value = "")]
    pub(crate) allowed_commands: String,
    /// Lower-case the allowed commands too, not only the comments
    #[arg(long, env)]
    pub(crate) case_insensitive_commands: bool,
    /// Seconds to wait for a pull request's merge ref before converting
    #[arg(long, env, default_value_t = 5)]
    pub(crate) merge_ref_grace: u64,
    /// User to clone repositories as
    #[arg(long, env = "BITBUCKET_USERNAME")]
    pub(crate) username: Option<String>,
    /// Password of that user (default: systemd credential `bitbucket_password`)
    #[arg(long, env = "BITBUCKET_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
}

impl HookArgs {
    pub(crate) fn try_into_config(self) -> Result<HookConfig> {
        Url::parse(&self.base_url)
            .with_context(|| format!("invalid Bitbucket URL {:?}", self.base_url))?;

        let case = if self.case_insensitive_commands {
            CommandCase::Insensitive
        } else {
            CommandCase::Verbatim
        };
        let legacy_auth = match (self.username, self.password) {
            (Some(username), Some(password)) => Some(LegacyAuth {
                username,
                password: SecretString::new(password),
            }),
            (Some(username), None) => {
                let password = get_credential(PASSWORD_CREDENTIAL)
                    .with_context(|| format!("no password for {username}"))?;
                Some(LegacyAuth { username, password })
            }
            (None, Some(_)) => bail!("a password needs a username"),
            (None, None) => None,
        };

        Ok(HookConfig::new(&self.base_url, &self.allowed_commands)
            .with_command_case(case)
            .with_merge_ref_grace(Duration::from_secs(self.merge_ref_grace))
            .with_legacy_auth(legacy_auth))
    }
}
