//! Stacker (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the driver, the
//! integration tests and the benches share a single import path. The
//! implementation lives in the dedicated crates under `crates/`.

pub mod cli;

pub use stacker_core as core;
pub use stacker_input as input;
pub use stacker_term as term;
pub use stacker_types as types;
