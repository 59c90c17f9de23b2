//! Jira mirror CLI - one-way sync of Jira epics/tasks into local project folders
//!
//! This crate provides the core functionality for the `jm` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Settings persistence and validation
//! - [`jira`] - Authenticated, paginating Jira REST client
//! - [`mapping`] - Pure tracker-record → domain-type conversions
//! - [`model`] - Domain types (Status, Project, Task, SyncReport)
//! - [`sync`] - Reconciliation engine and run lock
//! - [`workspace`] - Local folder/project state API
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod jira;
pub mod mapping;
pub mod model;
pub mod sync;
pub mod workspace;

pub use error::{Error, Result};
