use crate::authentication::AuthError;
use crate::booker_client::ClientError;
use crate::scenarios::{Group, ScenarioError, Tag};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Network,
    Auth,
    Assertion,
    Parse,
    Timeout,
    Setup,
    Panic,
}

impl From<&ScenarioError> for FailureKind {
    fn from(e: &ScenarioError) -> Self {
        match e {
            ScenarioError::Client(ClientError::Network(_)) => FailureKind::Network,
            ScenarioError::Auth(AuthError::Client(ClientError::Network(_))) => {
                FailureKind::Network
            }
            ScenarioError::Auth(_) => FailureKind::Auth,
            ScenarioError::Assertion(_) => FailureKind::Assertion,
            ScenarioError::Parse(_) => FailureKind::Parse,
            ScenarioError::TimedOut(_) => FailureKind::Timeout,
            ScenarioError::Client(_) | ScenarioError::MissingSession => FailureKind::Setup,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioStatus {
    Passed,
    Failed { kind: FailureKind, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub group: Group,
    pub tags: &'static [Tag],
    #[serde(flatten)]
    pub status: ScenarioStatus,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn new(started_at: DateTime<Utc>, outcomes: Vec<ScenarioOutcome>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            outcomes,
        }
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

impl std::fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut current_group = None;
        for outcome in &self.outcomes {
            if current_group != Some(outcome.group) {
                writeln!(f, "{}", outcome.group)?;
                current_group = Some(outcome.group);
            }
            let tags: Vec<String> = outcome.tags.iter().map(Tag::to_string).collect();
            let mark = if outcome.passed() { "ok  " } else { "FAIL" };
            writeln!(
                f,
                "  {} {} {} ({} ms)",
                mark,
                outcome.name,
                tags.join(" "),
                outcome.elapsed.as_millis()
            )?;
            if let ScenarioStatus::Failed { kind, message } = &outcome.status {
                for line in message.lines().filter(|l| !l.trim().is_empty()) {
                    writeln!(f, "       [{:?}] {}", kind, line)?;
                }
            }
        }
        write!(
            f,
            "\n{} passed, {} failed, {} total",
            self.passed(),
            self.failed(),
            self.outcomes.len()
        )
    }
}
