use super::{Group, Scenario, ScenarioContext, ScenarioError, Tag};
use crate::assertions::{assert_status, assert_status_text};

const PING_REPETITIONS: usize = 3;

pub struct HealthCheck;

#[async_trait::async_trait]
impl Scenario for HealthCheck {
    fn name(&self) -> &'static str {
        "Ping - HealthCheck"
    }

    fn group(&self) -> Group {
        Group::Health
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Ping]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let response = ctx.client().ping().await?;
        assert_status(&response, 201)?;
        assert_status_text(&response, "Created")?;
        Ok(())
    }
}

/// Pinging is idempotent: every repetition answers 201.
pub struct RepeatedHealthCheck;

#[async_trait::async_trait]
impl Scenario for RepeatedHealthCheck {
    fn name(&self) -> &'static str {
        "Ping - Repeated HealthCheck"
    }

    fn group(&self) -> Group {
        Group::Health
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Ping]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        for _ in 0..PING_REPETITIONS {
            let response = ctx.client().ping().await?;
            assert_status(&response, 201)?;
        }
        Ok(())
    }
}
