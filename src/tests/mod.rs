//! Integration-style tests that exercise the public entry points end to end.
//!
//! Module-level unit tests live next to the code they cover; these check the
//! published reference values and the scalar/sequence contract.
