//! Small cli for recording fitness activity and keeping an eye on a daily step goal.
//! Entries are kept in memory while the application runs and written to a single local file
//! when the user asks for it.
//!

pub mod cli;
pub mod fs;
pub mod storage;
pub mod tracker;
pub mod utils;
