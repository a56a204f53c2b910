//! Git module for gitbridge.
//!
//! Everything here works on the output of the external `git` executable:
//! - Running git and mapping failures ([`GitCli`])
//! - Status classification ([`status`])
//! - Commit history links ([`history`])
//! - Branch list parsing ([`branches`])

pub mod branches;
pub mod client;
pub mod error;
pub mod history;
pub mod status;

pub use branches::BranchList;
pub use client::{GitCli, DEFAULT_GIT};
pub use error::GitError;
pub use history::History;
pub use status::{RepoSnapshot, RepoState};
