//! Core domain concepts shared across all subdomains.
//!
//! - [`backend::BackendId`]: identifier of a text-generation backend
//! - [`topic::Topic`]: a validated debate topic
//! - [`error::DomainError`]: domain-level errors

pub mod backend;
pub mod error;
pub mod string;
pub mod topic;
