//! Core domain concepts shared across all subdomains.
//!
//! - [`problem::Problem`] : the word problem under debate
//! - [`error::DomainError`] : domain-level errors

pub mod error;
pub mod problem;
