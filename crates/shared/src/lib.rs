//! Wire contracts, domain identifiers, and the error taxonomy shared by the
//! CodeMorph client crates.

pub mod domain;
pub mod error;
pub mod protocol;
