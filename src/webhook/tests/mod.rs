//! Unit tests for the webhook bounded context.
