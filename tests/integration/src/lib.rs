//! Integration test crate for mdfence; see `tests/`.
