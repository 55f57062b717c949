//! Lifecycle and package creation tests against a fake build tool.

mod common;
mod create_tests;
mod descriptor_tests;
