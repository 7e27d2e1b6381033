//! The scenario catalog.
//!
//! A scenario is one self-contained test case: it creates whatever bookings
//! it needs, issues its requests and checks the responses. Scenarios tagged
//! `auth` get a fresh session token from the runner before they start.

mod auth;
mod bookings;
pub mod fixtures;
mod health;
mod listing;
mod mutations;

use crate::assertions::AssertionError;
use crate::authentication::{AuthError, Credentials, SessionToken};
use crate::booker_client::{BookerClient, ClientError, ParseError};
use crate::utils::error_chain_fmt;
use std::sync::Arc;
use std::time::Duration;

pub use auth::{CreateToken, CreateTokenWithBadCredentials};
pub use bookings::{CreateBooking, CreateThenFetchBooking, GetBooking, GetUnknownBooking};
pub use health::{HealthCheck, RepeatedHealthCheck};
pub use listing::{FilterBookingIdsByDate, FilterBookingIdsByName, GetBookingIds};
pub use mutations::{
    DeleteBooking, DeletedBookingIsGone, MutationsWithoutTokenAreRejected, PartialUpdateBooking,
    PartialUpdateKeepsOtherFields, UpdateBooking,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Ping,
    Booking,
    Auth,
    Negative,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Ping => "ping",
            Tag::Booking => "booking",
            Tag::Auth => "auth",
            Tag::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("`{0}` is not a known tag. Use one of ping, booking, auth, negative.")]
pub struct UnknownTag(String);

impl std::str::FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('@').to_lowercase().as_str() {
            "ping" => Ok(Tag::Ping),
            "booking" => Ok(Tag::Booking),
            "auth" => Ok(Tag::Auth),
            "negative" => Ok(Tag::Negative),
            _ => Err(UnknownTag(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Group {
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "booker API")]
    Booker,
    #[serde(rename = "with auth")]
    WithAuth,
}

impl Group {
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Health => "health",
            Group::Booker => "booker API",
            Group::WithAuth => "with auth",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Assertion(#[from] AssertionError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Scenario did not finish within {0:?}.")]
    TimedOut(Duration),
    #[error("Scenario needs a session token but was started without one.")]
    MissingSession,
}

impl std::fmt::Debug for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Everything a scenario may touch while it runs. One per scenario run.
pub struct ScenarioContext {
    client: BookerClient,
    credentials: Credentials,
    session: Option<SessionToken>,
}

impl ScenarioContext {
    pub fn new(
        client: BookerClient,
        credentials: Credentials,
        session: Option<SessionToken>,
    ) -> Self {
        Self {
            client,
            credentials,
            session,
        }
    }

    pub fn client(&self) -> &BookerClient {
        &self.client
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn session(&self) -> Result<&SessionToken, ScenarioError> {
        self.session.as_ref().ok_or(ScenarioError::MissingSession)
    }
}

#[async_trait::async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &'static str;

    fn group(&self) -> Group;

    fn tags(&self) -> &'static [Tag];

    fn requires_auth(&self) -> bool {
        self.tags().contains(&Tag::Auth)
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError>;
}

/// All scenarios, in reporting order.
pub fn catalog() -> Vec<Arc<dyn Scenario>> {
    vec![
        Arc::new(HealthCheck),
        Arc::new(RepeatedHealthCheck),
        Arc::new(CreateToken),
        Arc::new(CreateTokenWithBadCredentials),
        Arc::new(GetBookingIds),
        Arc::new(FilterBookingIdsByDate),
        Arc::new(FilterBookingIdsByName),
        Arc::new(GetBooking),
        Arc::new(GetUnknownBooking),
        Arc::new(CreateBooking),
        Arc::new(CreateThenFetchBooking),
        Arc::new(MutationsWithoutTokenAreRejected),
        Arc::new(UpdateBooking),
        Arc::new(PartialUpdateBooking),
        Arc::new(PartialUpdateKeepsOtherFields),
        Arc::new(DeleteBooking),
        Arc::new(DeletedBookingIsGone),
    ]
}
