//! Single test binary entry point.
//!
//! Structure:
//! - integration: editor workflows driven through pointer and layout events
//! - unit: single-component checks (settings, mapping properties)

mod helpers;
mod integration;
mod unit;
