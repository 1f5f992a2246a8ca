//! Unit tests for cropbox.

mod mapping_tests;
mod settings_tests;
