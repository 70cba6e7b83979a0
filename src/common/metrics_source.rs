// BucketLister and MetricsReader traits
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use super::{
    Bucket,
    BucketMetrics,
    Buckets,
};

/// `BucketLister` represents the required methods to discover the S3
/// buckets that should be reported on.
#[async_trait]
pub trait BucketLister {
    /// Returns the buckets to query.
    async fn buckets(&self) -> Result<Buckets>;
}

/// `MetricsReader` represents the required methods to read the storage
/// metrics of a bucket.
#[async_trait]
pub trait MetricsReader {
    /// Returns the size and object count of the given `bucket`.
    async fn bucket_metrics(&self, bucket: &Bucket) -> Result<BucketMetrics>;
}
