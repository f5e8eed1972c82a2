use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use reqwest::StatusCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod canvas;
mod config;
mod error;
mod models;
mod overlap;
mod pagination;
mod report;

use canvas::CanvasClient;
use config::{Config, DEFAULT_BASE_URL, DEFAULT_OUTPUT};

#[derive(Parser)]
#[command(name = "roster-overlap")]
#[command(
    about = "Find students shared across your active Canvas courses",
    long_about = None
)]
struct Cli {
    /// Canvas API access token
    #[arg(long, env = "CANVAS_API_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Canvas API root, including the /api/v1 prefix
    #[arg(long, env = "CANVAS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Where to write the HTML report
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,
    /// Count your own enrollments when looking for overlap
    #[arg(long)]
    include_self: bool,
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env is fine; the token may come from the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new(&cli.base_url, cli.token, cli.out, cli.include_self)?;
    run(&config).await
}

async fn run(config: &Config) -> anyhow::Result<()> {
    debug!("Using Canvas API at {}", config.base_url);
    let client = CanvasClient::new(config).context("failed to set up the Canvas client")?;

    let current_user_id = match client.current_user_id().await {
        Ok(id) => id,
        Err(err) => {
            error!("{}", err);
            if err.status_code() == Some(StatusCode::UNAUTHORIZED) {
                error!("Check that CANVAS_API_TOKEN holds a valid access token");
            }
            return Err(err).context("Cannot continue without a valid user ID");
        }
    };
    info!("Signed in as user {}", current_user_id);

    let courses = client.current_courses().await;
    let course_ids: Vec<i64> = courses.iter().map(|course| course.id).collect();
    let course_names = models::course_names(&courses);

    let rosters = client.rosters(&course_ids).await;

    let overlapping = overlap::find_overlap(&rosters, config.excluded_id(current_user_id));
    if overlapping.is_empty() {
        info!("No students are shared between your courses.");
    } else {
        info!("{} students appear in more than one course", overlapping.len());
    }
    for (student, records) in overlapping.iter() {
        let course_list = records
            .iter()
            .map(|record| record.course_id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        info!("{} is enrolled in multiple courses: {}", student, course_list);
    }

    let html = report::build_report(&course_names, &overlapping);
    report::write_report(&config.output, &html)?;
    println!("Results have been saved to {}", config.output.display());

    Ok(())
}
