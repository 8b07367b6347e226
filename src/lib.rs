//! Autoname — stable labels and grouped annotations for captured HTTP traffic.
//!
//! Derives short request labels by collapsing variable path segments,
//! computes request origins for scope management, and annotates batches of
//! transactions routed to triage. Host integrations plug in through the
//! collaborator traits in [`dispatch`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod annotation;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod logging;
pub mod types;
