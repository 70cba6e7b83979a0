// Implements the MetricsReader trait for CloudWatch Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_cloudwatch::types::Datapoint;
use aws_smithy_types_convert::date_time::DateTimeExt;
use crate::common::{
    Bucket,
    BucketMetrics,
    MetricKind,
    MetricReading,
    MetricsReader,
};
use super::client::{
    latest_datapoint,
    Client,
};
use tracing::{
    debug,
    warn,
};

// Turn the latest datapoint of a query into a reading.
fn reading(
    bucket:    &str,
    kind:      MetricKind,
    datapoint: Option<&Datapoint>,
) -> Result<MetricReading> {
    let datapoint = match datapoint {
        Some(d) => d,
        None    => return Ok(MetricReading::missing(bucket, kind)),
    };

    // We only ask for the Average statistic, a datapoint without one
    // counts as zero.
    let value = datapoint.average().unwrap_or_default();

    let timestamp = datapoint.timestamp()
        .map(|t| t.to_chrono_utc())
        .transpose()?;

    Ok(MetricReading {
        bucket: bucket.to_string(),
        kind,
        value: value as u64,
        timestamp,
    })
}

impl Client {
    /// Return the `BucketSizeBytes` of `bucket`, summed over every storage
    /// type.
    async fn bucket_size(&self, bucket: &str) -> Result<MetricReading> {
        let kind          = MetricKind::BucketSizeBytes;
        let storage_types = self.list_storage_types(bucket).await?;

        let mut size = MetricReading::missing(bucket, kind);

        for storage_type in &storage_types {
            let output = self.get_metric_statistics(
                bucket,
                kind,
                storage_type,
            ).await?;

            let datapoint = latest_datapoint(output.datapoints());

            // If we don't get any datapoints, proceed to the next storage
            // type.
            if datapoint.is_none() {
                debug!(
                    "bucket_size: No datapoints for '{}' ({})",
                    bucket,
                    storage_type,
                );

                continue;
            }

            let st_size = reading(bucket, kind, datapoint)?;

            // Add up the size of each storage type
            size.value     += st_size.value;
            size.timestamp  = size.timestamp.max(st_size.timestamp);
        }

        Ok(size)
    }

    /// Return the `NumberOfObjects` in `bucket`.
    async fn object_count(&self, bucket: &str) -> Result<MetricReading> {
        let kind         = MetricKind::NumberOfObjects;
        let storage_type = kind.fixed_storage_type().unwrap_or_default();

        let output = self.get_metric_statistics(
            bucket,
            kind,
            storage_type,
        ).await?;

        reading(bucket, kind, latest_datapoint(output.datapoints()))
    }
}

#[async_trait]
impl MetricsReader for Client {
    /// Get the size and object count of a given bucket.
    ///
    /// Queries go to the bucket's own region when it is known.
    async fn bucket_metrics(&self, bucket: &Bucket) -> Result<BucketMetrics> {
        let bucket_name = &bucket.name;
        let client      = self.regional(bucket.region.as_ref());

        debug!(
            "bucket_metrics: Reading metrics for '{}' in '{}'",
            bucket_name,
            client.region().name(),
        );

        let size    = client.bucket_size(bucket_name).await?;
        let objects = client.object_count(bucket_name).await?;

        for metric in [&size, &objects] {
            if !metric.is_present() {
                warn!(
                    "No {} datapoints for '{}', reporting 0",
                    metric.kind,
                    bucket_name,
                );
            }
        }

        debug!(
            "bucket_metrics: '{}' is {} bytes in {} objects",
            bucket_name,
            size.value,
            objects.value,
        );

        Ok(BucketMetrics {
            bucket: bucket.clone(),
            size,
            objects,
        })
    }
}
