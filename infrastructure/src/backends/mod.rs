//! CLI-backed text generation backends
//!
//! Every backend is an external command-line program that reads a prompt
//! on stdin and prints its answer on stdout.
//!
//! - [`catalog::BackendCatalog`]: which programs exist and how to call them
//! - [`registry::CliBackendRegistry`]: which of them work on this machine
//! - [`gateway::CliLlmGateway`]: runs one prompt through one backend

pub mod cache;
pub mod catalog;
pub mod error;
pub mod gateway;
pub mod registry;

pub use cache::AvailabilityCache;
pub use catalog::{BackendCatalog, BackendSpec};
pub use error::RegistryError;
pub use gateway::CliLlmGateway;
pub use registry::{CliBackendRegistry, ProbeSettings};
