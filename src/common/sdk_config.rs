// Loading the shared AWS SDK configuration
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    anyhow,
    Context,
    Result,
};
use aws_config::default_provider::region::DefaultRegionChain;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_types::region;
use aws_types::SdkConfig;
use super::{
    ClientConfig,
    DEFAULT_REGION,
};
use tracing::{
    debug,
    info,
};

/// Load the `SdkConfig` shared by the S3 and CloudWatch clients.
///
/// The region is taken from `--region` if given, then the selected
/// profile's default chain, then `DEFAULT_REGION`.
///
/// Credentials are resolved eagerly so that an unknown profile or missing
/// credentials are reported before any API call is attempted.
pub async fn load_sdk_config(config: &ClientConfig) -> Result<SdkConfig> {
    let profile = config.profile.as_deref();

    debug!(
        "load_sdk_config: profile '{}', region '{}'",
        profile.unwrap_or("default"),
        config.region.name(),
    );

    let mut default_chain = DefaultRegionChain::builder();
    if let Some(profile) = profile {
        default_chain = default_chain.profile_name(profile);
    }

    let region_provider = RegionProviderChain::first_try(config.region.clone())
        .or_else(default_chain.build())
        .or_else(region::Region::new(DEFAULT_REGION));

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider);

    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }

    let sdk_config = loader.load().await;

    info!(
        "Using region '{}'",
        sdk_config.region().map_or("unknown", |r| r.as_ref()),
    );

    let provider = sdk_config.credentials_provider()
        .ok_or_else(|| anyhow!("No AWS credentials provider is configured"))?;

    provider.provide_credentials()
        .await
        .with_context(|| {
            match profile {
                Some(profile) => {
                    format!("Failed to load credentials for profile '{profile}'")
                },
                None => "Failed to load default AWS credentials".to_string(),
            }
        })?;

    Ok(sdk_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Region;
    use std::env;
    use std::fs;

    // Point the SDK at empty shared config files and strip every other
    // credential source, so only the named profile can provide credentials.
    fn isolate_aws_environment() {
        let dir = env::temp_dir().join(format!(
            "s3metrics-sdk-config-{}",
            std::process::id(),
        ));
        fs::create_dir_all(&dir).unwrap();

        let config_file      = dir.join("config");
        let credentials_file = dir.join("credentials");
        fs::write(&config_file, "[profile known]\nregion = eu-west-1\n").unwrap();
        fs::write(&credentials_file, "").unwrap();

        env::set_var("AWS_CONFIG_FILE", &config_file);
        env::set_var("AWS_SHARED_CREDENTIALS_FILE", &credentials_file);
        env::set_var("AWS_EC2_METADATA_DISABLED", "true");

        let credential_vars = [
            "AWS_ACCESS_KEY_ID",
            "AWS_SECRET_ACCESS_KEY",
            "AWS_SESSION_TOKEN",
            "AWS_WEB_IDENTITY_TOKEN_FILE",
            "AWS_CONTAINER_CREDENTIALS_RELATIVE_URI",
            "AWS_CONTAINER_CREDENTIALS_FULL_URI",
        ];

        for var in credential_vars {
            env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_sdk_config_unknown_profile() {
        isolate_aws_environment();

        let config = ClientConfig {
            profile: Some("does-not-exist".into()),
            region:  Region::default().set_region("eu-west-1"),
            ..Default::default()
        };

        let ret = load_sdk_config(&config).await;

        let err = ret.unwrap_err();
        let msg = format!("{err:#}");

        assert!(
            msg.contains("Failed to load credentials for profile 'does-not-exist'"),
            "{msg}",
        );
    }
}
