//! Shared test fixtures for pipeline hygiene crates.
//!
//! This crate provides record builders and a fixed reference date.
//! It does NOT depend on `pipeline-hygiene-rules` to avoid circular dependencies.
//!
//! - [`opportunity`] - `OpportunityBuilder` for concise record setup
//! - [`dates`] - fixed "today" and relative date helpers
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! pipeline-hygiene-test = { workspace = true }
//! ```
//!
//! Then build records relative to the reference date:
//!
//! ```
//! use pipeline_hygiene_core::Stage;
//! use pipeline_hygiene_test::{dataset, OpportunityBuilder};
//!
//! let data = dataset([
//!     OpportunityBuilder::new("OPP1").partner_stage(Stage::Launched),
//!     OpportunityBuilder::new("OPP2").launch_in(-5),
//! ]);
//! assert_eq!(data.len(), 2);
//! ```

pub mod dates;
pub mod opportunity;

use pipeline_hygiene_core::OpportunityDataset;

// Re-export commonly used items at crate root for convenience
pub use dates::{days_from_reference, reference_date};
pub use opportunity::OpportunityBuilder;

/// Builds a dataset from builders, in order.
pub fn dataset<I>(builders: I) -> OpportunityDataset
where
    I: IntoIterator<Item = OpportunityBuilder>,
{
    OpportunityDataset::new(builders.into_iter().map(OpportunityBuilder::build).collect())
}
