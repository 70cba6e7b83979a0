// Common traits and types
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bucket;
mod client_config;
mod human_size;
mod metric_kind;
mod metric_reading;
mod metrics_source;
mod region;
mod sdk_config;
mod size_unit;

pub use bucket::*;
pub use client_config::*;
pub use human_size::*;
pub use metric_kind::*;
pub use metric_reading::*;
pub use metrics_source::*;
pub use region::*;
pub use sdk_config::*;
pub use size_unit::*;
