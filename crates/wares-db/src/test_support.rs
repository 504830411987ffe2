//! Shared test utilities for wares-db tests.
