//! Filesystem helpers used by staging steps.

pub mod fs;
