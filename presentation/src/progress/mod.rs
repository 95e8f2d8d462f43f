//! Progress display while a debate runs

pub mod reporter;
