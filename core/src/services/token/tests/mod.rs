//! Unit tests for the token services

mod support;
