// Handles region things
use aws_config::meta::region::future;
use aws_config::meta::region::ProvideRegion;
use aws_types::region;
use tracing::debug;

/// Region used when neither the command line, the environment nor the
/// selected profile provide one.
pub const DEFAULT_REGION: &str = "ap-southeast-2";

/// An optional AWS region.
///
/// `None` means that the region should be discovered by the AWS SDK's default
/// region chain for the selected profile, falling back to `DEFAULT_REGION`.
/// `AWS_REGION` is read by the command line parser, so only an explicit
/// region ends up here.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Region {
    region: Option<region::Region>,
}

impl Region {
    /// Return a `Region` from an S3 bucket location constraint.
    ///
    /// Location constraints for sufficiently old buckets may be empty or
    /// `EU`; these are mapped the same way the S3 console does.
    pub fn from_location_constraint(location: &str) -> Self {
        let location = match location {
            ""   => "us-east-1",
            "EU" => "eu-west-1",
            _    => location,
        };

        Self::default().set_region(location)
    }

    /// Returns the region name
    pub fn name(&self) -> &str {
        match &self.region {
            Some(region) => region.as_ref(),
            None         => "default",
        }
    }

    /// Returns the AWS SDK region, if any.
    pub fn aws_region(&self) -> Option<region::Region> {
        self.region.clone()
    }

    /// Set the region by name.
    pub fn set_region(mut self, region: &str) -> Self {
        debug!("Region set to: {:?}", region);

        let region = region::Region::new(region.to_string());
        self.region = Some(region);
        self
    }
}

impl From<region::Region> for Region {
    fn from(region: region::Region) -> Self {
        Self {
            region: Some(region),
        }
    }
}

impl ProvideRegion for Region {
    // Takes our region string and returns a proper AWS Region, this should
    // allow us to pass our Region into AWS SDK functions expecting an AWS
    // Region.
    fn region(&self) -> future::ProvideRegion<'_> {
        future::ProvideRegion::ready(self.region.to_owned())
    }
}
