//! quire: versioned documentation content
//!
//! quire turns a tree of versioned `.mdx` pages into three static artifacts (page metadata,
//! full page content and a serialized prefix search index) and serves lookups, navigation
//! and search over them. The `quire` binary drives both halves: `quire build` produces the
//! artifacts, and the query commands load them back the way a documentation site would.

#![warn(missing_docs)]

pub mod cli;
