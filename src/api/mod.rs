//! Remote search service access.
//!
//! - `backend`: the [`SkillApi`] trait every transport implements
//! - `http`: reqwest implementation used in production

pub mod backend;
pub mod http;

pub use backend::SkillApi;
pub use http::HttpSkillApi;
