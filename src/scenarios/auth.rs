use super::{Group, Scenario, ScenarioContext, ScenarioError, Tag};
use crate::assertions::{AssertionError, assert_has_property, assert_ok, assert_status};
use crate::authentication::{AuthError, Credentials, authenticate};
use secrecy::Secret;

pub struct CreateToken;

#[async_trait::async_trait]
impl Scenario for CreateToken {
    fn name(&self) -> &'static str {
        "Auth - CreateToken"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let response = ctx.client().create_token(ctx.credentials()).await?;
        assert_ok(&response)?;
        assert_status(&response, 200)?;

        let body = response.json_value()?;
        let token = assert_has_property(&body, "token")?;
        if token.as_str().is_none_or(str::is_empty) {
            return Err(AssertionError::WrongType {
                path: "token".into(),
                expected_type: "a non-empty string",
                actual: token.clone(),
            }
            .into());
        }
        Ok(())
    }
}

/// A wrong password must not be exchanged for a token.
pub struct CreateTokenWithBadCredentials;

#[async_trait::async_trait]
impl Scenario for CreateTokenWithBadCredentials {
    fn name(&self) -> &'static str {
        "Auth - CreateToken with bad credentials"
    }

    fn group(&self) -> Group {
        Group::Booker
    }

    fn tags(&self) -> &'static [Tag] {
        &[Tag::Booking, Tag::Negative]
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let credentials = Credentials {
            username: ctx.credentials().username.clone(),
            password: Secret::new(uuid::Uuid::new_v4().to_string()),
        };
        match authenticate(ctx.client(), &credentials).await {
            Err(AuthError::MissingToken { .. }) | Err(AuthError::UnexpectedStatus(_)) => Ok(()),
            Ok(_) => Err(AssertionError::UnexpectedProperty {
                path: "token".into(),
            }
            .into()),
            Err(e) => Err(e.into()),
        }
    }
}
