//! Domain model for opportunity records.
//!
//! - [`OpportunityRecord`] - one typed row of the exported CRM sheet
//! - [`RawOpportunity`] - the string-typed shape produced by ingestion
//! - [`NoPartnerOpportunity`] - deal without a partner, from a secondary export
//! - [`OpportunityDataset`] - read-only collection indexed by opportunity id
//! - [`Stage`], [`StageValue`], [`StageOrder`] - stage domain and ordering
//! - [`AceOpportunityType`], [`PartnerType`] - categorical fields

mod categories;
pub mod coerce;
mod dataset;
mod no_partner;
mod record;
mod stage;


pub use categories::{AceOpportunityType, PartnerType};
pub use dataset::OpportunityDataset;
pub use no_partner::{NoPartnerOpportunity, RawNoPartnerOpportunity};
pub use record::{OpportunityRecord, RawOpportunity, RowKey};
pub use stage::{Stage, StageOrder, StageValue};
