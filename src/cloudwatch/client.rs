// Implement the CloudWatch Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use aws_sdk_cloudwatch::client::Client as CloudWatchClient;
use aws_sdk_cloudwatch::operation::get_metric_statistics::GetMetricStatisticsOutput;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{
    Datapoint,
    Dimension,
    DimensionFilter,
    StandardUnit,
    Statistic,
};
use aws_types::SdkConfig;
use crate::common::{
    MetricKind,
    Region,
    S3_NAMESPACE,
};
use std::time::{
    Duration,
    SystemTime,
};
use tracing::debug;

const ONE_DAY: Duration = Duration::from_secs(86_400);

/// A `CloudWatch` `Client`
#[derive(Clone, Debug)]
pub struct Client {
    /// The AWS SDK `CloudWatchClient`.
    pub client: CloudWatchClient,
}

impl Client {
    /// Return a new `Client` from the shared `SdkConfig`.
    pub fn new(config: &SdkConfig) -> Self {
        debug!(
            "new: Creating CloudWatchClient in region '{}'",
            config.region().map_or("unknown", |r| r.as_ref()),
        );

        let client = CloudWatchClient::new(config);

        Self {
            client,
        }
    }

    /// Returns the region this client sends requests to.
    pub fn region(&self) -> Region {
        self.client.config()
            .region()
            .cloned()
            .map(Region::from)
            .unwrap_or_default()
    }

    /// Return a `Client` for `region`.
    ///
    /// S3 storage metrics only exist in the bucket's own region. The
    /// returned client shares everything else with `self`.
    pub fn regional(&self, region: Option<&Region>) -> Self {
        let region = match region.and_then(Region::aws_region) {
            Some(region) => region,
            None         => return self.clone(),
        };

        if self.client.config().region() == Some(&region) {
            return self.clone();
        }

        debug!("regional: Creating CloudWatchClient in region '{}'", region);

        let config = self.client.config()
            .to_builder()
            .region(region)
            .build();

        Self {
            client: CloudWatchClient::from_conf(config),
        }
    }

    /// Returns the `StorageType`s that `BucketSizeBytes` is published for in
    /// the given `bucket`.
    ///
    /// The returned list is sorted and free of duplicates.
    pub async fn list_storage_types(&self, bucket: &str) -> Result<Vec<String>> {
        debug!("list_storage_types: Listing for '{}'", bucket);

        let mut storage_types = Vec::new();
        let mut next_token    = None;

        let filter = DimensionFilter::builder()
            .name("BucketName")
            .value(bucket)
            .build();

        // We loop until we've processed everything.
        loop {
            let output = self.client.list_metrics()
                .namespace(S3_NAMESPACE)
                .metric_name(MetricKind::BucketSizeBytes.metric_name())
                .dimensions(filter.clone())
                .set_next_token(next_token)
                .send()
                .await
                .with_context(|| format!("Failed to list metrics for '{bucket}'"))?;

            debug!("list_storage_types: API returned: {:#?}", output);

            let found = output.metrics()
                .iter()
                .flat_map(|metric| metric.dimensions())
                .filter(|dimension| dimension.name() == Some("StorageType"))
                .filter_map(|dimension| dimension.value())
                .map(String::from);

            storage_types.extend(found);

            // If there was a next token, use it, otherwise the loop is done.
            match output.next_token() {
                Some(t) => next_token = Some(t.to_string()),
                None    => break,
            }
        }

        storage_types.sort();
        storage_types.dedup();

        debug!(
            "list_storage_types: '{}' has storage types {:?}",
            bucket,
            storage_types,
        );

        Ok(storage_types)
    }

    /// Returns the daily statistics of `kind` for `bucket` over the last two
    /// days.
    ///
    /// S3 publishes its storage metrics once a day, so a two day window
    /// always includes the most recent datapoint.
    pub async fn get_metric_statistics(
        &self,
        bucket:       &str,
        kind:         MetricKind,
        storage_type: &str,
    ) -> Result<GetMetricStatisticsOutput> {
        debug!(
            "get_metric_statistics: {} for '{}' ({})",
            kind,
            bucket,
            storage_type,
        );

        let now        = SystemTime::now();
        let start_time = DateTime::from(now - (ONE_DAY * 2));

        let period = i32::try_from(ONE_DAY.as_secs())
            .context("period")?;

        let dimensions = vec![
            Dimension::builder()
                .name("BucketName")
                .value(bucket)
                .build(),
            Dimension::builder()
                .name("StorageType")
                .value(storage_type)
                .build(),
        ];

        let input = self.client.get_metric_statistics()
            .end_time(DateTime::from(now))
            .metric_name(kind.metric_name())
            .namespace(S3_NAMESPACE)
            .period(period)
            .set_dimensions(Some(dimensions))
            .start_time(start_time)
            .statistics(Statistic::Average)
            .unit(StandardUnit::from(kind.unit_name()));

        debug!("{:?}", input);

        let output = input
            .send()
            .await
            .with_context(|| format!("Failed to get {kind} for '{bucket}'"))?;

        Ok(output)
    }
}

/// Returns the most recent `Datapoint`, if there are any.
///
/// CloudWatch doesn't guarantee the order of returned datapoints.
/// Datapoints without a timestamp are never preferred.
pub fn latest_datapoint(datapoints: &[Datapoint]) -> Option<&Datapoint> {
    datapoints.iter()
        .max_by_key(|datapoint| {
            datapoint.timestamp()
                .map(|t| (t.secs(), t.subsec_nanos()))
        })
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use aws_credential_types::Credentials;
    use aws_sdk_cloudwatch::config::Config as CloudWatchConfig;
    use aws_sdk_cloudwatch::config::retry::RetryConfig;
    use aws_sdk_cloudwatch::primitives::DateTimeFormat;
    use aws_smithy_http_client::test_util::{
        ReplayEvent,
        StaticReplayClient,
    };
    use aws_smithy_types::body::SdkBody;
    use pretty_assertions::assert_eq;

    // Create a mock CloudWatch client, returning the given CBOR bodies in
    // order.
    pub fn mock_client(responses: Vec<Vec<u8>>) -> Client {
        let events = responses
            .into_iter()
            .map(|cbor_data| {
                ReplayEvent::new(
                    http::Request::builder()
                        .body(SdkBody::empty())
                        .unwrap(),

                    http::Response::builder()
                        .status(200)
                        .body(SdkBody::from(cbor_data))
                        .unwrap(),
                )
            })
            .collect();

        let http_client = StaticReplayClient::new(events);
        let creds       = Credentials::for_tests_with_session_token();

        let conf = CloudWatchConfig::builder()
            .behavior_version_latest()
            .credentials_provider(creds)
            .http_client(http_client)
            .region(aws_sdk_cloudwatch::config::Region::new("eu-west-1"))
            .retry_config(RetryConfig::disabled())
            .build();

        Client {
            client: CloudWatchClient::from_conf(conf),
        }
    }

    pub fn timestamp(s: &str) -> DateTime {
        DateTime::from_str(s, DateTimeFormat::DateTime).unwrap()
    }

    // CloudWatch tests in other modules import this too.
    //
    // Each datapoint is an (average, timestamp) pair.
    pub fn cloudwatch_get_metric_statistics(
        kind:       MetricKind,
        datapoints: &[(f64, &str)],
    ) -> Vec<u8> {
        let mut encoder = aws_smithy_cbor::Encoder::new(Vec::<u8>::new());

        encoder
            .begin_map()
                .str("Label").str(kind.metric_name())
                .str("Datapoints").array(datapoints.len());

        for (average, ts) in datapoints {
            encoder
                .begin_map()
                    .str("Average").double(*average)
                    .str("Timestamp").timestamp(&timestamp(ts))
                    .str("Unit").str(kind.unit_name())
                .end();
        }

        // end map
        encoder.end();

        encoder.into_writer()
    }

    // CloudWatch tests in other modules import this too.
    pub fn cloudwatch_list_metrics(
        bucket:        &str,
        storage_types: &[&str],
    ) -> Vec<u8> {
        let mut encoder = aws_smithy_cbor::Encoder::new(Vec::<u8>::new());

        encoder
            .begin_map()
                .str("Metrics").array(storage_types.len());

        for storage_type in storage_types {
            encoder
                .begin_map()
                    .str("MetricName").str("BucketSizeBytes")
                    .str("Namespace").str("AWS/S3")
                    .str("Dimensions").array(2)
                        .begin_map()
                            .str("Name").str("BucketName")
                            .str("Value").str(bucket)
                        .end()
                        .begin_map()
                            .str("Name").str("StorageType")
                            .str("Value").str(storage_type)
                        .end()
                    // end array
                .end();
        }

        // end map
        encoder.end();

        encoder.into_writer()
    }

    #[tokio::test]
    async fn test_get_metric_statistics() {
        let cbor = cloudwatch_get_metric_statistics(
            MetricKind::BucketSizeBytes,
            &[(123_456_789.0, "2020-03-01T20:59:00Z")],
        );
        let client = mock_client(vec![cbor]);

        let ret = client.get_metric_statistics(
            "test-bucket",
            MetricKind::BucketSizeBytes,
            "StandardStorage",
        )
        .await
        .unwrap();

        let expected = vec![
            Datapoint::builder()
                .average(123_456_789.0)
                .timestamp(timestamp("2020-03-01T20:59:00Z"))
                .unit(StandardUnit::Bytes)
                .build(),
        ];

        assert_eq!(ret.datapoints(), expected.as_slice());
        assert_eq!(ret.label(), Some("BucketSizeBytes"));
    }

    #[tokio::test]
    async fn test_list_storage_types() {
        let cbor = cloudwatch_list_metrics(
            "a-bucket-name",
            &["StandardStorage", "StandardIAStorage", "StandardStorage"],
        );
        let client = mock_client(vec![cbor]);

        let ret = client.list_storage_types("a-bucket-name")
            .await
            .unwrap();

        let expected = vec![
            "StandardIAStorage",
            "StandardStorage",
        ];

        assert_eq!(ret, expected);
    }

    #[test]
    fn test_latest_datapoint() {
        let datapoints = vec![
            Datapoint::builder()
                .average(1.0)
                .timestamp(timestamp("2020-03-01T00:00:00Z"))
                .build(),
            Datapoint::builder()
                .average(3.0)
                .timestamp(timestamp("2020-03-03T00:00:00Z"))
                .build(),
            Datapoint::builder()
                .average(2.0)
                .timestamp(timestamp("2020-03-02T00:00:00Z"))
                .build(),
        ];

        let ret = latest_datapoint(&datapoints).unwrap();

        assert_eq!(ret.average(), Some(3.0));
        assert!(latest_datapoint(&[]).is_none());
    }

    #[test]
    fn test_regional() {
        let client = mock_client(Vec::new());

        let same = client.regional(
            Some(&Region::default().set_region("eu-west-1")),
        );
        let other = client.regional(
            Some(&Region::default().set_region("ap-southeast-2")),
        );
        let unknown = client.regional(None);

        assert_eq!(same.region().name(), "eu-west-1");
        assert_eq!(other.region().name(), "ap-southeast-2");
        assert_eq!(unknown.region().name(), "eu-west-1");
    }
}
