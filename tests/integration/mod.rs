//! Integration test suite: full build passes over an on-disk fixture
//! tree, driven through the real Tera renderer and, for the smoke test,
//! the compiled binary.

mod common;

mod build_pass;
mod cli_smoke;
