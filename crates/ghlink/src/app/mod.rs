//! Application layer: the remote/branch resolution pipeline and its pieces.

pub mod branches;
pub mod link;
pub mod output;
pub mod remote;
pub mod url;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;
