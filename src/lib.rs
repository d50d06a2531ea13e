//! # Library Crate Root
//!
//! This file (`lib.rs`) serves as the root of the library crate.
//! Its primary purpose is to declare the module structure of the application,
//! making the resolver core and the shared utilities accessible under a
//! common crate namespace.

pub mod core;
pub mod utils;
