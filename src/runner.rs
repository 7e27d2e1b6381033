use crate::authentication::{Credentials, authenticate};
use crate::booker_client::{BookerClient, ClientError};
use crate::configuration::Settings;
use crate::report::{FailureKind, ScenarioOutcome, ScenarioStatus, SuiteReport};
use crate::scenarios::{Scenario, ScenarioContext, ScenarioError, Tag};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

/// Which scenarios of the catalog to run.
#[derive(Debug, Default, Clone)]
pub struct ScenarioSelection {
    tags: Vec<Tag>,
    name: Option<String>,
}

impl ScenarioSelection {
    pub fn new(tags: Vec<Tag>, name: Option<String>) -> Self {
        Self {
            tags,
            name: name.map(|n| n.to_lowercase()),
        }
    }

    /// No tags selects every tag; the name matches as a case-insensitive substring.
    pub fn matches(&self, scenario: &dyn Scenario) -> bool {
        let tag_match =
            self.tags.is_empty() || scenario.tags().iter().any(|t| self.tags.contains(t));
        let name_match = self
            .name
            .as_ref()
            .is_none_or(|n| scenario.name().to_lowercase().contains(n));
        tag_match && name_match
    }

    pub fn apply(&self, scenarios: Vec<Arc<dyn Scenario>>) -> Vec<Arc<dyn Scenario>> {
        scenarios
            .into_iter()
            .filter(|s| self.matches(s.as_ref()))
            .collect()
    }
}

pub struct SuiteRunner {
    client: BookerClient,
    credentials: Credentials,
    max_concurrency: usize,
    scenario_timeout: Duration,
}

impl SuiteRunner {
    pub fn new(
        client: BookerClient,
        credentials: Credentials,
        max_concurrency: usize,
        scenario_timeout: Duration,
    ) -> Self {
        Self {
            client,
            credentials,
            max_concurrency: max_concurrency.max(1),
            scenario_timeout,
        }
    }

    pub fn build(configuration: &Settings) -> Result<Self, ClientError> {
        let client = BookerClient::new(
            configuration.target.base_url.clone(),
            configuration.target.timeout(),
        )?;
        Ok(Self::new(
            client,
            configuration.credentials.credentials(),
            configuration.runner.max_concurrency,
            configuration.runner.scenario_timeout(),
        ))
    }

    /// Run every scenario in its own task and collect the outcomes in input order.
    ///
    /// A scenario that fails, times out or panics only fails itself.
    #[tracing::instrument(name = "Running suite", skip_all, fields(scenarios = scenarios.len()))]
    pub async fn run(&self, scenarios: Vec<Arc<dyn Scenario>>) -> SuiteReport {
        let started_at = chrono::Utc::now();
        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();
        let mut task_indices = HashMap::new();
        let mut outcomes: Vec<Option<ScenarioOutcome>> = vec![None; scenarios.len()];

        for (index, scenario) in scenarios.iter().enumerate() {
            let scenario = Arc::clone(scenario);
            let client = self.client.clone();
            let credentials = self.credentials.clone();
            let permits = Arc::clone(&permits);
            let timeout = self.scenario_timeout;
            let handle = tasks.spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail.
                let _permit = permits.acquire_owned().await.ok();
                (index, run_scenario(scenario, client, credentials, timeout).await)
            });
            task_indices.insert(handle.id(), index);
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(e) => {
                    let index = task_indices.get(&e.id()).copied();
                    let message = join_failure_message(e);
                    tracing::error!("{}", message);
                    if let Some(index) = index {
                        outcomes[index] = Some(panicked_outcome(scenarios[index].as_ref(), message));
                    }
                }
            }
        }

        let outcomes = outcomes
            .into_iter()
            .zip(&scenarios)
            .map(|(outcome, scenario)| {
                outcome.unwrap_or_else(|| {
                    panicked_outcome(scenario.as_ref(), "Scenario panicked.".into())
                })
            })
            .collect();

        SuiteReport::new(started_at, outcomes)
    }
}

#[tracing::instrument(
    name = "Running scenario",
    skip_all,
    fields(scenario = scenario.name(), group = %scenario.group())
)]
async fn run_scenario(
    scenario: Arc<dyn Scenario>,
    client: BookerClient,
    credentials: Credentials,
    timeout: Duration,
) -> ScenarioOutcome {
    let started = Instant::now();
    let result = tokio::time::timeout(timeout, execute(scenario.as_ref(), client, credentials))
        .await
        .unwrap_or(Err(ScenarioError::TimedOut(timeout)));

    let status = match result {
        Ok(()) => {
            tracing::info!("Scenario passed");
            ScenarioStatus::Passed
        }
        Err(e) => {
            tracing::error!("Scenario failed: {}", e);
            ScenarioStatus::Failed {
                kind: FailureKind::from(&e),
                message: format!("{:?}", e),
            }
        }
    };

    ScenarioOutcome {
        name: scenario.name(),
        group: scenario.group(),
        tags: scenario.tags(),
        status,
        elapsed: started.elapsed(),
    }
}

fn panicked_outcome(scenario: &dyn Scenario, message: String) -> ScenarioOutcome {
    ScenarioOutcome {
        name: scenario.name(),
        group: scenario.group(),
        tags: scenario.tags(),
        status: ScenarioStatus::Failed {
            kind: FailureKind::Panic,
            message,
        },
        elapsed: Duration::ZERO,
    }
}

/// Describe a task that did not return, including the panic payload when it is text.
fn join_failure_message(e: JoinError) -> String {
    if e.is_cancelled() {
        return "Scenario task was cancelled.".into();
    }
    match e.try_into_panic() {
        Ok(payload) => match payload.downcast::<String>() {
            Ok(message) => format!("Scenario panicked: {}", message),
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => format!("Scenario panicked: {}", message),
                Err(_) => "Scenario panicked.".into(),
            },
        },
        Err(e) => format!("Scenario task failed: {}", e),
    }
}

async fn execute(
    scenario: &dyn Scenario,
    client: BookerClient,
    credentials: Credentials,
) -> Result<(), ScenarioError> {
    let session = if scenario.requires_auth() {
        Some(authenticate(&client, &credentials).await?)
    } else {
        None
    };
    let ctx = ScenarioContext::new(client, credentials, session);
    scenario.run(&ctx).await
}
