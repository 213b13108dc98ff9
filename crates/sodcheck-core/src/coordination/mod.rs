//! Main coordination logic

pub mod approval;
pub mod policy;

pub use approval::ApprovalChecker;
pub use policy::{approvers_of, committers_of, find_violation};
