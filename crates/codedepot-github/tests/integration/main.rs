//! Integration tests for codedepot-github
//!
//! Uses wiremock to simulate the GitHub contents API and verifies the
//! requests the adapter sends and how it maps responses to store errors.

mod common;

mod test_contents;
mod test_errors;
