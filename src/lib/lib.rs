#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Courier: compose templated emails and deliver them over SMTP.

pub mod domain;
pub mod infrastructure;

pub use domain::{
    deliver::{deliver, deliver_with, DeliverError},
    params::{EnvelopeParams, MessageParams, Parameters},
};
