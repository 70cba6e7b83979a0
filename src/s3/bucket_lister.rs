// Implement the BucketLister trait for the s3::Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use crate::common::{
    Bucket,
    Buckets,
    BucketLister,
};
use super::client::Client;
use tracing::{
    debug,
    warn,
};

impl Client {
    // Fill in the bucket region via GetBucketLocation if the listing didn't
    // provide it. Buckets we can't locate are still reported, their metrics
    // are read from the default region.
    async fn locate(&self, bucket: Bucket) -> Bucket {
        if bucket.region.is_some() {
            return bucket;
        }

        match self.get_bucket_location(&bucket.name).await {
            Ok(region) => bucket.with_region(region),
            Err(e)     => {
                warn!("Using default region for '{}': {:#}", bucket.name, e);

                bucket
            },
        }
    }
}

#[async_trait]
impl BucketLister for Client {
    /// Return the `Buckets` to report on.
    ///
    /// If a bucket was given on the command line only that bucket is
    /// returned and S3 isn't asked to list the account's buckets.
    async fn buckets(&self) -> Result<Buckets> {
        if let Some(bucket_name) = self.bucket_name.as_ref() {
            debug!("buckets: Using selected bucket '{}'", bucket_name);

            let bucket = self.locate(Bucket::new(bucket_name)).await;

            return Ok(vec![bucket]);
        }

        debug!("buckets: Listing...");

        let listed      = self.list_buckets().await?;
        let mut buckets = Buckets::with_capacity(listed.len());

        // No iterator here since we need to call an async method.
        for bucket in listed {
            buckets.push(self.locate(bucket).await);
        }

        Ok(buckets)
    }
}
