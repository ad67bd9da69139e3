//! `TokenBag<E>`: an unordered collection addressed by removal tokens.
//!
//! Every insertion returns a [`RemovalToken`]. The token is the only way to
//! remove that particular element: removal never compares values or uses
//! positions. Consuming a token is idempotent.
//!
//! Elements are kept in insertion order internally. Nothing in the public
//! contract depends on that, except that [`TokenBag::iter`] yields the
//! surviving elements in their original relative order.
//!
//! # Identifier exhaustion
//!
//! Identifiers come from a counter bounded by an identifier limit (2^31 - 1
//! by default). When the counter reaches the limit, every live element is
//! renumbered densely from zero before the next token is issued. Tokens share
//! their identifier slot with the element they address, so outstanding tokens
//! stay valid across a reindex.

use core::fmt;
use core::iter::FusedIterator;
use core::slice;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Sentinel stored in a token slot once the token has been consumed.
const CONSUMED: u32 = u32::MAX;

/// Identifier space matching a signed 32-bit counter.
const DEFAULT_IDENTIFIER_LIMIT: u32 = i32::MAX as u32;

/// A single-use token for removing one element from the [`TokenBag`] that
/// issued it.
///
/// Clones share the same identifier slot. Removing through any clone
/// consumes all of them.
#[derive(Clone)]
pub struct RemovalToken {
    identifier: Arc<AtomicU32>,
}

impl RemovalToken {
    fn new(identifier: u32) -> Self {
        Self {
            identifier: Arc::new(AtomicU32::new(identifier)),
        }
    }

    #[inline]
    fn load(&self) -> Option<u32> {
        match self.identifier.load(Ordering::Acquire) {
            CONSUMED => None,
            identifier => Some(identifier),
        }
    }

    /// Returns `true` while the token still addresses a live element.
    pub fn is_live(&self) -> bool {
        self.load().is_some()
    }
}

impl fmt::Debug for RemovalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.load() {
            Some(identifier) => write!(f, "RemovalToken({})", identifier),
            None => f.write_str("RemovalToken(consumed)"),
        }
    }
}

struct BagElement<E> {
    value: E,
    identifier: u32,
    token: Arc<AtomicU32>,
}

/// An unordered collection yielding a [`RemovalToken`] per insertion.
///
/// Insertion is O(1). Removal scans backwards from the most recent element,
/// which makes removing recently added elements cheap.
///
/// The bag does no synchronization of its own. Wrap it in an
/// [`AtomicCell`](crate::AtomicCell) to share it between threads.
pub struct TokenBag<E> {
    elements: Vec<BagElement<E>>,
    next_identifier: u32,
    identifier_limit: u32,
}

impl<E> TokenBag<E> {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::with_identifier_limit(DEFAULT_IDENTIFIER_LIMIT)
    }

    /// Creates an empty bag whose identifiers wrap at `limit`.
    pub(crate) fn with_identifier_limit(limit: u32) -> Self {
        debug_assert!(limit > 0 && limit < CONSUMED);
        Self {
            elements: Vec::new(),
            next_identifier: 0,
            identifier_limit: limit,
        }
    }

    /// Inserts `value` and returns the token that removes it.
    pub fn insert(&mut self, value: E) -> RemovalToken {
        if self.next_identifier >= self.identifier_limit {
            self.reindex();
        }

        let identifier = self.next_identifier;
        let token = RemovalToken::new(identifier);
        self.elements.push(BagElement {
            value,
            identifier,
            token: Arc::clone(&token.identifier),
        });
        self.next_identifier += 1;

        token
    }

    /// Removes the element addressed by `token` and consumes the token.
    ///
    /// Does nothing if the token was already consumed or does not address an
    /// element of this bag. Returns the removed element.
    pub fn remove(&mut self, token: &RemovalToken) -> Option<E> {
        let identifier = token.load()?;

        // Removals overwhelmingly target recent insertions.
        let index = self.elements.iter().rposition(|element| {
            element.identifier == identifier && Arc::ptr_eq(&element.token, &token.identifier)
        })?;

        let element = self.elements.remove(index);
        element.token.store(CONSUMED, Ordering::Release);
        Some(element.value)
    }

    /// Renumbers all live elements from zero, updating their tokens in place.
    fn reindex(&mut self) {
        tracing::debug!(
            elements = self.elements.len(),
            limit = self.identifier_limit,
            "token bag identifiers exhausted, reindexing"
        );

        for (index, element) in self.elements.iter_mut().enumerate() {
            let identifier = index as u32;
            element.identifier = identifier;
            element.token.store(identifier, Ordering::Release);
        }
        self.next_identifier = self.elements.len() as u32;
    }

    /// Returns `true` if the bag holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of elements in the bag.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns the element at `index` in iteration order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&E> {
        self.elements.get(index).map(|element| &element.value)
    }

    /// Returns a read-only iterator over the elements.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            inner: self.elements.iter(),
        }
    }
}

impl<E> Default for TokenBag<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> FromIterator<E> for TokenBag<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut bag = TokenBag::new();
        for value in iter {
            bag.insert(value);
        }
        bag
    }
}

impl<E: fmt::Debug> fmt::Debug for TokenBag<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, E> IntoIterator for &'a TokenBag<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`TokenBag`].
pub struct Iter<'a, E> {
    inner: slice::Iter<'a, BagElement<E>>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|element| &element.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> DoubleEndedIterator for Iter<'_, E> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|element| &element.value)
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}
