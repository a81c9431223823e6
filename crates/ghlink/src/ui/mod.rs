//! Terminal front end standing in for the editor host.

pub mod picker;
pub mod prompt;
