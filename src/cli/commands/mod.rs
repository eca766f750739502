//! Command execution functions for framework rule operations.

mod inspect;
mod stage;

pub use inspect::{print_link_input, print_preprocessor_input, print_slice};
pub use stage::stage;
