#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Transactional order emails: rendering, delivery with bounded retry, and
//! send outcome counters

pub mod domain;
pub mod infrastructure;
