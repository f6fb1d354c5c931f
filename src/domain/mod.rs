//! Domain layer for the SkillSearch widget.
//!
//! Plain value types shared by every other layer, free of runtime or
//! transport concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`filter`]: Facet selections and badge derivation
//! - [`query`]: Search payload and the pure query builder
//! - [`skill`]: Search hits and skill details

pub mod error;
pub mod filter;
pub mod query;
pub mod skill;

pub use error::{FetchErrorKind, Result, SkillSearchError};
pub use filter::{
    Badge, Category, DeliveryChoice, FacetKind, FacetValue, FilterState, Location, RateChoice,
};
pub use query::{build_query, SearchQuery};
pub use skill::{CategoryRef, SkillDetail, SkillImage, SkillSummary};
