// ClientConfig
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::{
    Region,
    SizeUnit,
};

/// Client configuration.
#[derive(Debug, Default)]
pub struct ClientConfig {
    /// The bucket name that the client should report the metrics of.
    ///
    /// If this isn't given, all S3 buckets in the account will be reported.
    pub bucket_name: Option<String>,

    /// Named profile from the AWS shared config files.
    ///
    /// If this isn't given, the default credential chain is used.
    pub profile: Option<String>,

    /// The region that our AWS clients should be created in.
    ///
    /// CloudWatch queries for buckets in other regions are sent to the
    /// bucket's own region.
    pub region: Region,

    /// How bucket sizes are displayed.
    pub unit: SizeUnit,
}
