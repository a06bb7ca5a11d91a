//! File access control.

pub mod checker;

pub use checker::AccessChecker;
