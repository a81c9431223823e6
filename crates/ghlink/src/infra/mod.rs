//! Infrastructure adapters for git, the clipboard, and configuration.

pub mod clipboard;
pub mod config;
pub mod git;
