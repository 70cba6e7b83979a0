// Collecting and rendering bucket metrics
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use crate::common::{
    BucketLister,
    BucketMetrics,
    HumanSize,
    MetricsReader,
    SizeUnit,
};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{
    Alignment,
    Modify,
    Panel,
    Style,
};
use tracing::{
    debug,
    info,
};

const TABLE_TITLE: &str = "S3 bucket metrics";
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// The metrics of every bucket that was queried.
#[derive(Debug, Default, PartialEq)]
pub struct Report {
    /// One entry per bucket, sorted by bucket name.
    pub rows: Vec<BucketMetrics>,
}

/// Query `reader` for the metrics of every bucket returned by `lister`.
///
/// Buckets are queried one after another. The first error aborts the
/// whole report.
pub async fn collect<L, R>(lister: &L, reader: &R) -> Result<Report>
where
    L: BucketLister + ?Sized,
    R: MetricsReader + ?Sized,
{
    let buckets = lister.buckets().await?;

    info!("Querying metrics for {} buckets", buckets.len());

    let mut rows = Vec::with_capacity(buckets.len());

    for bucket in &buckets {
        rows.push(reader.bucket_metrics(bucket).await?);
    }

    rows.sort_by(|a, b| a.bucket.name.cmp(&b.bucket.name));

    Ok(Report {
        rows,
    })
}

impl Report {
    /// Sum of the size of every bucket, in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.rows.iter().map(|r| r.size.value).sum()
    }

    /// Sum of the object count of every bucket.
    pub fn total_objects(&self) -> u64 {
        self.rows.iter().map(|r| r.objects.value).sum()
    }

    /// Render the table of buckets followed by the grand total.
    pub fn render(&self, unit: &SizeUnit) -> String {
        debug!("render: {} rows with unit {:?}", self.rows.len(), unit);

        let mut builder = Builder::default();

        builder.push_record([
            "Bucket name",
            unit.label(),
            "Object count",
            "Last datapoint",
        ]);

        for row in &self.rows {
            let last_datapoint = match row.last_datapoint() {
                Some(ts) => ts.format("%Y-%m-%d").to_string(),
                None     => "-".to_string(),
            };

            builder.push_record([
                row.bucket.name.clone(),
                row.size.value.humansize(unit),
                row.objects.value.to_string(),
                last_datapoint,
            ]);
        }

        let mut table = builder.build();

        table
            .with(Style::ascii())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .with(Panel::header(TABLE_TITLE));

        let gigabytes = self.total_bytes() as f64 / GIB;

        format!(
            "{table}\n\
             \n\
             Grand total:\n\
             \n\
             Storage space used (GB).: {gigabytes:.2}\n\
             Objects count...........: {objects}\n",
            objects = self.total_objects(),
        )
    }
}
