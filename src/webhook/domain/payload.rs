//! Parsing of `issues` event bodies.

use super::WebhookPayloadError;
use crate::project::domain::RepositoryCoordinates;
use crate::task::domain::IssueNumber;
use serde::Deserialize;
use serde_json::Value;

/// Issue action carried by an `issues` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueAction {
    /// The issue was closed.
    Closed,
    /// The issue was reopened.
    Reopened,
    /// The issue title or body was edited.
    Edited,
    /// Any other or absent action.
    Other,
}

impl IssueAction {
    /// Parses an action, trimming and ignoring case.
    #[must_use]
    pub fn parse(action: Option<&str>) -> Self {
        let Some(value) = action.map(str::trim) else {
            return Self::Other;
        };
        if value.eq_ignore_ascii_case("closed") {
            Self::Closed
        } else if value.eq_ignore_ascii_case("reopened") {
            Self::Reopened
        } else if value.eq_ignore_ascii_case("edited") {
            Self::Edited
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    action: Option<String>,
    issue: Option<RawIssue>,
    repository: Option<RawRepository>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    #[serde(default)]
    number: i64,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    name: Option<String>,
    owner: Option<RawOwner>,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: Option<String>,
}

/// Lower-cases every object key so field lookup ignores case.
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key.to_lowercase(), fold_keys(inner)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

/// The fields of an `issues` event that drive synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEvent {
    action: IssueAction,
    issue_number: IssueNumber,
    title: Option<String>,
    repository: RepositoryCoordinates,
}

impl IssueEvent {
    /// Parses an event body. Keys are matched without regard to case.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookPayloadError`] when the body is not JSON, lacks the
    /// issue or repository objects, carries a blank owner or name, or an
    /// issue number that is not positive.
    pub fn from_slice(body: &[u8]) -> Result<Self, WebhookPayloadError> {
        let document: Value = serde_json::from_slice(body)
            .map_err(|err| WebhookPayloadError::Malformed(err.to_string()))?;
        let raw: RawPayload = serde_json::from_value(fold_keys(document))
            .map_err(|err| WebhookPayloadError::Malformed(err.to_string()))?;
        let issue = raw.issue.ok_or(WebhookPayloadError::MissingIssue)?;
        let repository = raw.repository.ok_or(WebhookPayloadError::MissingRepository)?;
        let owner = repository
            .owner
            .ok_or(WebhookPayloadError::MissingRepository)?;

        let coordinates = RepositoryCoordinates::new(
            owner.login.as_deref().unwrap_or_default(),
            repository.name.as_deref().unwrap_or_default(),
        )
        .map_err(WebhookPayloadError::InvalidRepository)?;
        let issue_number = IssueNumber::new(issue.number)
            .map_err(|_| WebhookPayloadError::InvalidIssueNumber(issue.number))?;
        let title = issue
            .title
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            action: IssueAction::parse(raw.action.as_deref()),
            issue_number,
            title,
            repository: coordinates,
        })
    }

    /// Returns the issue action.
    #[must_use]
    pub const fn action(&self) -> IssueAction {
        self.action
    }

    /// Returns the issue number.
    #[must_use]
    pub const fn issue_number(&self) -> IssueNumber {
        self.issue_number
    }

    /// Returns the trimmed issue title when present and non-blank.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the repository the issue belongs to.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryCoordinates {
        &self.repository
    }
}
