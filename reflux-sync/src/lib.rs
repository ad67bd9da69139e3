//! Shared-state building blocks for reflux.
//!
//! Every other reflux crate that needs state mutated from more than one
//! thread builds it out of the two types in this crate:
//!
//! - [`AtomicCell`]: a read/write-locked value slot with get, set, swap,
//!   in-place modification and copy-on-write modification.
//! - [`TokenBag`]: an unordered collection handing out a [`RemovalToken`] per
//!   insertion. Removal scans from the newest element backwards.
//!
//! `TokenBag` is not synchronized on its own. It is meant to live inside an
//! `AtomicCell`, whose write lock serializes every mutation.
//!
//! # Example
//!
//! ```rust
//! use reflux_sync::{AtomicCell, TokenBag};
//!
//! let cell = AtomicCell::new(Some(TokenBag::new()));
//!
//! let token = cell.modify(|bag| bag.as_mut().map(|bag| bag.insert("listener")));
//! assert_eq!(cell.read(|bag| bag.as_ref().map(TokenBag::len)), Some(1));
//!
//! if let Some(token) = token {
//!     cell.modify(|bag| {
//!         if let Some(bag) = bag.as_mut() {
//!             bag.remove(&token);
//!         }
//!     });
//! }
//! assert_eq!(cell.read(|bag| bag.as_ref().map(TokenBag::is_empty)), Some(true));
//! ```

#![warn(missing_docs)]

mod bag;
mod cell;

pub use bag::{Iter, RemovalToken, TokenBag};
pub use cell::AtomicCell;
