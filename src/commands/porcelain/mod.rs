//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands compose the storage areas and artifacts into the
//! workflows a user runs day to day.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Create a new commit
//! - `status`: Show working tree status
//! - `log`: Show commit history
//! - `branch`: Create or list branches
//! - `checkout`: Switch branches or detach HEAD at a commit
//! - `merge`: Fast-forward or three-way merge a branch
//! - `reset`: Move the current position (soft, mixed or hard)

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod status;
