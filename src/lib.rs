//! A minimal content-addressed version control engine
//!
//! Open a [`Repository`](areas::repository::Repository) on a directory and call
//! operations on it (`init`, `add`, `commit`, `checkout`, `merge`, ...). Typed
//! failures are raised as [`RepoError`](errors::RepoError) inside `anyhow::Error`.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
