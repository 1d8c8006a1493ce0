// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binding constants and cache mode.
//!
//! Every naming convention the scanner relies on lives here: the
//! `##default` marker, accessor prefixes, the value-member name and the
//! object-factory conventions. Do not hardcode them elsewhere.

use std::fmt;

/// Marker meaning "no explicit value" in names and namespaces.
pub const DEFAULT_MARKER: &str = "##default";

/// Namespace of types with no resolvable namespace declaration.
pub const DEFAULT_NAMESPACE: &str = DEFAULT_MARKER;

/// Prefix of zero-argument getters.
pub const GETTER_PREFIX: &str = "get";

/// Prefix of zero-argument getters of boolean-valued members.
pub const PREDICATE_PREFIX: &str = "is";

/// Prefix of one-argument setters.
pub const SETTER_PREFIX: &str = "set";

/// Schema name used to locate the accessor of a value member.
pub const VALUE_NAME: &str = "value";

/// Simple name of the conventional per-package object factory.
pub const OBJECT_FACTORY_NAME: &str = "ObjectFactory";

/// Producer methods of custom factories are invoked only when their name
/// contains this marker.
pub const PRODUCER_MARKER: &str = "create";

/// Direction a binding context serves.
///
/// Readers resolve setters and discover object factories; writers resolve
/// getters and keep reverse (accessor -> name) tables for emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CacheMode {
    #[default]
    Reader,
    Writer,
}

impl CacheMode {
    pub fn is_reader(self) -> bool {
        self == Self::Reader
    }

    pub fn is_writer(self) -> bool {
        self == Self::Writer
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reader => write!(f, "reader"),
            Self::Writer => write!(f, "writer"),
        }
    }
}
