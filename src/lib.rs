// Library exports for the import core and its host seams

pub mod catalog;
pub mod config;
pub mod identity;
pub mod import;
pub mod models;
pub mod provider;

// Test support (available to unit tests and, with the test-utils feature,
// to integration tests)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;
