// Command line interface parsing
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    anyhow,
    Result,
};
use clap::{
    crate_description,
    crate_name,
    crate_version,
    Arg,
    ArgMatches,
    Command,
};
use crate::common::{
    ClientConfig,
    Region,
    SizeUnit,
    VALID_SIZE_UNITS,
};
use std::ffi::OsString;
use std::str::FromStr;
use tracing::debug;

// Default unit for bucket sizes
const DEFAULT_UNIT: &str = "bytes";

// Crate clap app
fn create_app() -> Command {
    debug!("Creating CLI app");

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("PROFILE")
                .env("AWS_PROFILE")
                .hide_env_values(true)
                .long("profile")
                .short('p')
                .value_name("TEXT")
                .help("AWS cli profile set in ~/.aws/config file.")
                .num_args(1)
        )
        .arg(
            Arg::new("BUCKET")
                .long("bucket")
                .short('b')
                .value_name("TEXT")
                .help(
                    "Select a specific S3 bucket, if this is not set all \
                     buckets in the AWS account are queried."
                )
                .num_args(1)
        )
        .arg(
            Arg::new("REGION")
                .env("AWS_REGION")
                .hide_env_values(true)
                .long("region")
                .short('r')
                .value_name("REGION")
                .help("Set the AWS region to create the clients in.")
                .num_args(1)
        )
        .arg(
            Arg::new("UNIT")
                .env("S3METRICS_UNIT")
                .hide_env_values(true)
                .long("unit")
                .short('u')
                .value_name("UNIT")
                .help("Sets the unit to use for size display")
                .num_args(1)
                .default_value(DEFAULT_UNIT)
                .value_parser(VALID_SIZE_UNITS.to_vec())
        )
}

// Turn the matches into our ClientConfig
fn client_config(matches: &ArgMatches) -> Result<ClientConfig> {
    let bucket_name = matches.get_one::<String>("BUCKET").cloned();
    let profile     = matches.get_one::<String>("PROFILE").cloned();

    let region = match matches.get_one::<String>("REGION") {
        Some(region) => Region::default().set_region(region),
        None         => Region::default(),
    };

    // The value has a default and has been validated against
    // VALID_SIZE_UNITS by clap.
    let unit = matches.get_one::<String>("UNIT")
        .map(String::as_str)
        .unwrap_or(DEFAULT_UNIT);

    let unit = SizeUnit::from_str(unit)
        .map_err(|e| anyhow!("invalid unit '{unit}': {e}"))?;

    Ok(ClientConfig {
        bucket_name,
        profile,
        region,
        unit,
    })
}

/// Parse the given command line arguments into a `ClientConfig`.
///
/// `--help` and `--version` are handled by clap, which exits the process.
pub fn parse_args_from<I, T>(args: I) -> Result<ClientConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    debug!("Parsing command line arguments");

    let matches = create_app().get_matches_from(args);

    client_config(&matches)
}

/// Parse the process's command line arguments into a `ClientConfig`.
pub fn parse_args() -> Result<ClientConfig> {
    parse_args_from(std::env::args_os())
}
