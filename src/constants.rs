//! Crate constants, see `constants.rs` at the crate root.

include!("../constants.rs");
