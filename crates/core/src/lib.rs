//! Page logic of the SmartCity admin dashboard.
//!
//! Each page owns its collection fetched through an [`smartcity_client::AdminApi`],
//! and the review workflows hold a working copy of one record until it is
//! submitted.

pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use services::*;
