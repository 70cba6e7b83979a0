// Definition of a bucket
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::Region;

/// Represents an S3 bucket.
///
/// This will always have a `name` and optionally the `Region` that the
/// bucket lives in. CloudWatch only holds S3 metrics in the bucket's own
/// region, so a missing region means the default client region is used.
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    /// The bucket name.
    pub name: String,

    /// The region the bucket was created in, if known.
    pub region: Option<Region>,
}

impl Bucket {
    /// Return a `Bucket` with no known region.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            region: None,
        }
    }

    /// Set the bucket's region.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }
}

/// Convenience type for a list of `Bucket`.
pub type Buckets = Vec<Bucket>;
