//! Convenience facade over the [`filigree`] engine crate.
//!
//! Depend on this crate to get the whole public API under one roof:
//!
//! ```
//! use filigree_rs::{Filigree, filigree};
//!
//! let parsed = filigree().parse("<bold>hi</bold>").unwrap();
//! assert_eq!(parsed.plain_text(), "hi");
//!
//! let strict = Filigree::builder().strict(true).build();
//! assert!(strict.parse("<no_such_tag>").is_err());
//! ```

pub use filigree::*;
