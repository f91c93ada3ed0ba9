//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Fixed trailing-window rate limiting
//! - Bearer credential extraction from request headers

pub mod bearer;
pub mod rate_limit;
