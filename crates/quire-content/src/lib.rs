//! Runtime content service for quire.
//!
//! Loads the artifacts written by the index builder and answers the questions a
//! documentation site asks of its content:
//! - Page lookup by version and slug, with `latest` route resolution
//! - Per-version navigation trees
//! - The version list, newest first
//! - Ranked prefix search, deduplicated across fields and grouped by category
//!
//! Artifacts come from an [`ArtifactSource`]: a local directory or an HTTP base URL. Loading
//! happens once; afterwards the loaded state is read-only.
//!
//! # Example
//!
//! ```no_run
//! use quire_content::{ContentService, DirSource};
//!
//! let mut service = ContentService::new();
//! service.load(&DirSource::new("public"));
//!
//! for doc in service.search("surround") {
//!     println!("{} / {}: {}", doc.version, doc.slug, doc.title);
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod grouping;
mod nav;
mod route;
mod service;
mod source;
mod store;
#[cfg(test)]
mod test_support;
mod throttle;
mod version;

pub use error::ContentError;
pub use grouping::{ResultGroup, group_by_category};
pub use nav::{NavCategory, NavLeaf, build_navigation, first_page, nav_order_cmp};
pub use route::{LATEST_ALIAS, Route};
pub use service::{ContentService, LoadState};
pub use source::{ArtifactSource, DirSource, HttpSource, is_url, join_url, source_for};
pub use store::{ContentStore, DEFAULT_SEARCH_LIMIT};
pub use throttle::{Debouncer, MinLengthGate, QueryGate};
pub use version::{natural_cmp, sort_versions_desc};
