//! Service layer for business logic.

pub mod label_aggregator;
pub mod release;
pub mod term_resolver;

pub use label_aggregator::{AggregatedLabels, LabelAggregator};
pub use release::ReleaseResolver;
pub use term_resolver::TermResolver;
