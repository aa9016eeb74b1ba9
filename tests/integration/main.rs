//! Integration tests for the discovery engine
//!
//! These tests use wiremock to create mock HTTP servers and drive full
//! enumeration and listing runs end-to-end.

mod enumerate_tests;
mod listing_tests;
