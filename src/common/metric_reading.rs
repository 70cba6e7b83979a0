// Metric readings returned from CloudWatch
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::{
    DateTime,
    Utc,
};
use super::{
    Bucket,
    MetricKind,
};

/// A single point-in-time value of one metric for one bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricReading {
    /// Name of the bucket the reading is for.
    pub bucket: String,

    /// Which metric was read.
    pub kind: MetricKind,

    /// The value of the metric.
    pub value: u64,

    /// Timestamp of the datapoint the value came from.
    ///
    /// `None` when CloudWatch returned no datapoints, in which case `value`
    /// is `0`.
    pub timestamp: Option<DateTime<Utc>>,
}

impl MetricReading {
    /// A reading for a metric that CloudWatch had no datapoints for.
    pub fn missing(bucket: &str, kind: MetricKind) -> Self {
        Self {
            bucket:    bucket.to_string(),
            kind,
            value:     0,
            timestamp: None,
        }
    }

    /// Returns `true` if CloudWatch returned a datapoint for this reading.
    pub fn is_present(&self) -> bool {
        self.timestamp.is_some()
    }
}

/// Size and object count readings for a single bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketMetrics {
    /// The bucket that was queried.
    pub bucket: Bucket,

    /// `BucketSizeBytes`, summed over every storage type.
    pub size: MetricReading,

    /// `NumberOfObjects` across all storage types.
    pub objects: MetricReading,
}

impl BucketMetrics {
    /// Timestamp of the newest datapoint behind this bucket's readings.
    pub fn last_datapoint(&self) -> Option<DateTime<Utc>> {
        self.size.timestamp.max(self.objects.timestamp)
    }
}
