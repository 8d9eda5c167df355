//! Command implementations for the CLI.

pub mod fetch;
pub mod info;
pub mod init;
pub mod kv;
pub mod ls;
pub mod watch;
