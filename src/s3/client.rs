// Implements the S3 Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use aws_sdk_s3::client::Client as S3Client;
use aws_types::SdkConfig;
use crate::common::{
    Bucket,
    Buckets,
    Region,
};
use tracing::debug;

/// The S3 `Client`.
pub struct Client {
    /// The AWS SDK `S3Client`.
    pub client: S3Client,

    /// Selected bucket name, if any.
    pub bucket_name: Option<String>,
}

impl Client {
    /// Return a new S3 `Client` from the shared `SdkConfig`.
    pub fn new(config: &SdkConfig, bucket_name: Option<String>) -> Self {
        debug!(
            "new: Creating S3Client in region '{}'",
            config.region().map_or("unknown", |r| r.as_ref()),
        );

        let client = S3Client::new(config);

        Self {
            client,
            bucket_name,
        }
    }

    /// Returns every bucket in the account.
    ///
    /// Each `Bucket` carries its region when S3 includes it in the listing.
    pub async fn list_buckets(&self) -> Result<Buckets> {
        debug!("list_buckets: Listing...");

        let mut buckets            = Buckets::new();
        let mut continuation_token = None;

        // Loop until all pages are processed.
        loop {
            let output = self.client.list_buckets()
                .set_continuation_token(continuation_token)
                .send()
                .await
                .context("Failed to list S3 buckets")?;

            let page = output.buckets()
                .iter()
                .filter_map(|b| {
                    let name   = b.name()?;
                    let bucket = Bucket::new(name);

                    let bucket = match b.bucket_region() {
                        Some(region) => {
                            bucket.with_region(Region::default().set_region(region))
                        },
                        None => bucket,
                    };

                    Some(bucket)
                });

            buckets.extend(page);

            match output.continuation_token() {
                Some(t) => continuation_token = Some(t.to_string()),
                None    => break,
            }
        }

        debug!("list_buckets: Found {} buckets", buckets.len());

        Ok(buckets)
    }

    /// Return the bucket location (`Region`) for the given `bucket`.
    ///
    /// This method will properly handle the case of the `null` (empty) and
    /// `EU` location constraints, by replacing them with `us-east-1` and
    /// `eu-west-1` respectively.
    pub async fn get_bucket_location(&self, bucket: &str) -> Result<Region> {
        debug!("get_bucket_location for '{}'", bucket);

        let output = self.client.get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .with_context(|| format!("Failed to get location of '{bucket}'"))?;

        let location = output.location_constraint()
            .map_or("", |l| l.as_str());

        debug!("GetBucketLocation API returned '{}'", location);

        Ok(Region::from_location_constraint(location))
    }
}
