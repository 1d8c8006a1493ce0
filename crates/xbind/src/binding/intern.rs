// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-local name interning.
//!
//! Element and attribute names are canonicalized into [`NameToken`]s so
//! that every cache keyed by name shares one allocation per distinct name.
//! Interning is an atomic insert-if-absent: concurrent callers interning the
//! same content all observe the token of the first successful insertion.

use dashmap::DashMap;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Canonical interned schema-local name.
///
/// Equality short-circuits on pointer identity and falls back to content,
/// so tokens can also be compared against names interned by another
/// context. Hashing is by content and agrees with `str`, which allows
/// maps keyed by `NameToken` to be queried with a plain `&str`.
#[derive(Clone)]
pub struct NameToken(Arc<str>);

impl NameToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when both tokens are the same interned instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for NameToken {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for NameToken {}

impl Hash for NameToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for NameToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for NameToken {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NameToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameToken({:?})", &*self.0)
    }
}

impl fmt::Display for NameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Concurrent interner for schema-local names.
#[derive(Debug, Default)]
pub struct NameInterner {
    tokens: DashMap<Arc<str>, NameToken>,
}

impl NameInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical token for `name`, creating it on first use.
    pub fn intern(&self, name: &str) -> NameToken {
        if let Some(token) = self.tokens.get(name) {
            return token.value().clone();
        }

        let key: Arc<str> = Arc::from(name);
        self.tokens
            .entry(key.clone())
            .or_insert_with(|| NameToken(key))
            .value()
            .clone()
    }

    /// Canonical token for `name`, if it was interned before.
    pub fn get(&self, name: &str) -> Option<NameToken> {
        self.tokens.get(name).map(|token| token.value().clone())
    }

    /// Number of distinct names interned.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
