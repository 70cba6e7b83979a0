// s3metrics: Report S3 bucket size and object count from CloudWatch.
#![forbid(unsafe_code)]
use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod cloudwatch;
mod common;
mod report;
mod s3;

// Environment variable holding the log filter directives.
const LOG_ENV: &str = "S3METRICS_LOG";

// Logs go to stderr so that stdout only carries the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = cli::parse_args()?;

    debug!("Client config: {:?}", config);

    let sdk_config = common::load_sdk_config(&config).await?;

    let s3_client         = s3::Client::new(&sdk_config, config.bucket_name);
    let cloudwatch_client = cloudwatch::Client::new(&sdk_config);

    let report = report::collect(&s3_client, &cloudwatch_client).await?;

    print!("{}", report.render(&config.unit));

    Ok(())
}
