//! Mapping of CI build statuses onto Bitbucket Server commit statuses.
//!
//! Only the document is built here. Posting it to
//! `/rest/build-status/1.0/commits/{commit}` is up to the caller.

use serde::Serialize;

const STATUS_PENDING: &str = "INPROGRESS";
const STATUS_SUCCESS: &str = "SUCCESSFUL";
const STATUS_FAILURE: &str = "FAILED";

const DESC_PENDING: &str = "this build is pending";
const DESC_SUCCESS: &str = "the build was successful";
const DESC_FAILURE: &str = "the build failed";
const DESC_ERROR: &str = "oops, something went wrong";

/// CI build statuses with a dedicated mapping. Everything else counts as a failure.
pub(crate) const CI_PENDING: &str = "pending";
pub(crate) const CI_RUNNING: &str = "running";
pub(crate) const CI_SUCCESS: &str = "success";
pub(crate) const CI_FAILURE: &str = "failure";

pub(crate) fn convert_status(status: &str) -> &'static str {
    match status {
        CI_PENDING | CI_RUNNING => STATUS_PENDING,
        CI_SUCCESS => STATUS_SUCCESS,
        _ => STATUS_FAILURE,
    }
}

pub(crate) fn convert_desc(status: &str) -> &'static str {
    match status {
        CI_PENDING | CI_RUNNING => DESC_PENDING,
        CI_SUCCESS => DESC_SUCCESS,
        CI_FAILURE => DESC_FAILURE,
        _ => DESC_ERROR,
    }
}

/// Body of a Bitbucket Server build status.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildStatus {
    pub state: &'static str,
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub url: String,
    #[serde(rename = "description")]
    pub desc: &'static str,
}

impl BuildStatus {
    pub(crate) fn new(
        status: &str,
        key: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        BuildStatus {
            state: convert_status(status),
            key: key.into(),
            name: name.into(),
            url: url.into(),
            desc: convert_desc(status),
        }
    }
}
