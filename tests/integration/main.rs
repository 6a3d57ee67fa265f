//! Integration tests: cache, catalog and extraction wired together

mod common;
mod fetch_tests;
mod summary_tests;
