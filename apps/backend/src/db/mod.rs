//! Transaction plumbing shared by every public entrypoint.

pub mod txn;
pub mod txn_policy;
