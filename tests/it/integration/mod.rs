//! Integration tests for complete editing workflows.

mod resize_workflow_tests;
