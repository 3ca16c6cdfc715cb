//! Single-field extractors: stateless pattern lookups over the whole document.
//!
//! Each returns `None` (or an empty list) on a miss; none of them can fail.

pub mod contact;
pub mod profile;
pub mod skills;

pub use contact::{extract_email, extract_linkedin, extract_location, extract_phone};
pub use profile::{extract_name, extract_title};
pub use skills::extract_skills;
