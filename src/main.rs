use anyhow::Context;
use booker_suite::configuration::get_configuration;
use booker_suite::runner::{ScenarioSelection, SuiteRunner};
use booker_suite::scenarios::{Tag, catalog};
use booker_suite::telemetry::{DEFAULT_DIRECTIVES, get_subscriber, init_subscriber};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Runs the booking API scenarios against the configured service
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Only run scenarios carrying this tag (ping, booking, auth, negative); repeatable
    #[arg(short, long = "tag")]
    tags: Vec<Tag>,

    /// Only run scenarios whose name contains this text (case-insensitive)
    #[arg(short, long)]
    name: Option<String>,

    /// How to print the report
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// List the selected scenarios without running them
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = get_subscriber("booker_suite", DEFAULT_DIRECTIVES, std::io::stderr)?;
    init_subscriber(subscriber)?;

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let scenarios = ScenarioSelection::new(cli.tags, cli.name).apply(catalog());

    if cli.list {
        for scenario in &scenarios {
            let tags: Vec<String> = scenario.tags().iter().map(Tag::to_string).collect();
            println!("[{}] {} {}", scenario.group(), scenario.name(), tags.join(" "));
        }
        return Ok(());
    }

    let runner = SuiteRunner::build(&configuration).context("Failed to set up the HTTP client.")?;
    tracing::info!(
        "Running {} scenarios against {}",
        scenarios.len(),
        configuration.target.base_url
    );
    let report = runner.run(scenarios).await;

    match cli.format {
        ReportFormat::Text => println!("{}", report),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
