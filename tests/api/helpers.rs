use crate::fake_booker::{FakeBooker, PASSWORD, Quirks, USERNAME};
use booker_suite::authentication::{Credentials, authenticate};
use booker_suite::booker_client::BookerClient;
use booker_suite::runner::SuiteRunner;
use booker_suite::scenarios::{Scenario, ScenarioContext, ScenarioError};
use booker_suite::telemetry::{get_subscriber, init_subscriber};
use secrecy::Secret;
use std::sync::LazyLock;
use std::time::Duration;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer};

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    // The sink is part of the subscriber's type, hence the two branches.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber("test", "debug", std::io::stdout).unwrap();
        init_subscriber(subscriber).unwrap();
    } else {
        let subscriber = get_subscriber("test", "info", std::io::sink).unwrap();
        init_subscriber(subscriber).unwrap();
    }
});

pub struct TestApp {
    pub address: String,
    pub booker: FakeBooker,
    pub client: BookerClient,
    pub credentials: Credentials,
    // Keeps the mock server alive for as long as the test runs
    _server: MockServer,
}

impl TestApp {
    /// Run one scenario the way the suite runner does, but hand back the raw error.
    pub async fn run(&self, scenario: &dyn Scenario) -> Result<(), ScenarioError> {
        let session = if scenario.requires_auth() {
            Some(authenticate(&self.client, &self.credentials).await?)
        } else {
            None
        };
        let ctx = ScenarioContext::new(self.client.clone(), self.credentials.clone(), session);
        scenario.run(&ctx).await
    }

    pub fn runner(&self) -> SuiteRunner {
        SuiteRunner::new(
            self.client.clone(),
            self.credentials.clone(),
            4,
            Duration::from_secs(10),
        )
    }
}

pub fn admin_credentials() -> Credentials {
    Credentials {
        username: USERNAME.into(),
        password: Secret::new(PASSWORD.into()),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Quirks::default()).await
}

pub async fn spawn_app_with(quirks: Quirks) -> TestApp {
    LazyLock::force(&TRACING);

    let server = MockServer::start().await;
    let booker = FakeBooker::new(quirks);
    Mock::given(any())
        .respond_with(booker.clone())
        .mount(&server)
        .await;

    let address = server.uri();
    let client = BookerClient::new(address.clone(), Some(Duration::from_secs(5)))
        .expect("Failed to build the booking client.");

    TestApp {
        address,
        booker,
        client,
        credentials: admin_credentials(),
        _server: server,
    }
}
