//! regtools - maintenance tools for the customer registration app
//!
//! This library provides the two utilities behind the `regtools` binary:
//! a fixer that strips redundant default imports from a source tree, and a
//! verifier that reports on the completeness of a stored customer record.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod fixer;
pub mod output;
pub mod paths;
pub mod verifier;
