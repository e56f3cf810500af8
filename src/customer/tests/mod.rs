//! Unit tests for the customer context.
