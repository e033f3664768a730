//! Jswp - A terminal job discovery library
//!
//! This crate provides the core functionality for the Jswp application:
//! a swipe-style decision queue over a job catalog, with every decision
//! recorded to an append-only ledger. Companies review the resulting
//! applications and admins get an overview of the whole ledger.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod logging;
pub mod session;
pub mod tui;

// Re-export primary types for convenience
pub use config::UserConfig;
pub use domain::{
    classify, filter_jobs, ApplicationStatus, Candidate, Decision, DecisionEvent, DecisionQueue,
    DecisionSink, DecisionStatistics, GestureConfig, GestureState, Job, JobFilter, JobType,
    SwipeLedger,
};
pub use error::{JswpError, Result};
pub use session::{SessionContext, UserRole};
