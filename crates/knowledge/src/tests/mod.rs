//! Cross-module tests for answer resolution.
