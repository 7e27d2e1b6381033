use super::{Credentials, SessionToken};
use crate::booker_client::{BookerClient, ClientError, ParseError};

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Auth endpoint answered with status {0} instead of 200.")]
    UnexpectedStatus(u16),
    #[error("No token was issued (reason: {reason:?}).")]
    MissingToken { reason: Option<String> },
    #[error("Auth response could not be parsed.")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    token: Option<String>,
    reason: Option<String>,
}

/// Log in once and hand back the session token.
///
/// The service answers bad credentials with a 200 and a `reason`, so a
/// missing or empty `token` is what marks the failure.
#[tracing::instrument(name = "Authenticate", skip(client, credentials), fields(username = %credentials.username))]
pub async fn authenticate(
    client: &BookerClient,
    credentials: &Credentials,
) -> Result<SessionToken, AuthError> {
    let response = client.create_token(credentials).await?;
    if response.status() != 200 {
        return Err(AuthError::UnexpectedStatus(response.status()));
    }
    let body: TokenResponse = response.json()?;
    match body.token {
        Some(token) if !token.is_empty() => Ok(SessionToken::new(token)),
        _ => {
            tracing::warn!("Auth endpoint issued no token: {:?}", body.reason);
            Err(AuthError::MissingToken {
                reason: body.reason,
            })
        }
    }
}
