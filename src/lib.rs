//! The library code for the `arkiv` date-based archive generator. The
//! architecture can be generally broken down into three distinct steps:
//!
//! 1. Grouping the site's posts by publish year and month ([`crate::archive`])
//! 2. Paginating each group into archive pages ([`crate::pager`],
//!    [`crate::page`])
//! 3. Rendering the pages against the site's `archive_index` layout and
//!    writing them to disk ([`crate::write`])
//!
//! The second step carries most of the design: each (year, month) group
//! becomes one or more pages based on the configured page size, with page 1
//! at `{archive_dir}/{year}/{month}/index.html` and page N at
//! `{archive_dir}/{year}/{month}/page/{N}/index.html`.
//!
//! Around the core sit the pieces templates see: the archive count table is
//! layered into the site payload as `site.archives` ([`crate::payload`]),
//! and the `archive_links`/`archive_selects` formatters ([`crate::filters`])
//! turn that table into navigation markup from within a layout.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod archive;
pub mod build;
pub mod config;
pub mod filters;
pub mod layout;
pub mod page;
pub mod pager;
pub mod payload;
pub mod post;
pub mod write;
