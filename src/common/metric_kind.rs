// MetricKind
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use std::fmt;

/// CloudWatch namespace that S3 publishes its daily storage metrics to.
pub const S3_NAMESPACE: &str = "AWS/S3";

/// The S3 storage metrics that we report on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MetricKind {
    /// Amount of data stored in the bucket, in bytes.
    ///
    /// Published once per storage type in use by the bucket.
    BucketSizeBytes,

    /// Number of objects stored in the bucket, across all storage types.
    NumberOfObjects,
}

impl MetricKind {
    /// The CloudWatch `MetricName`.
    pub fn metric_name(&self) -> &'static str {
        match self {
            Self::BucketSizeBytes => "BucketSizeBytes",
            Self::NumberOfObjects => "NumberOfObjects",
        }
    }

    /// The CloudWatch unit the metric is published in.
    pub fn unit_name(&self) -> &'static str {
        match self {
            Self::BucketSizeBytes => "Bytes",
            Self::NumberOfObjects => "Count",
        }
    }

    /// `StorageType` dimension value, when the metric has only one.
    ///
    /// `BucketSizeBytes` has one series per storage type, which must be
    /// discovered per bucket.
    pub fn fixed_storage_type(&self) -> Option<&'static str> {
        match self {
            Self::BucketSizeBytes => None,
            Self::NumberOfObjects => Some("AllStorageTypes"),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.metric_name())
    }
}
