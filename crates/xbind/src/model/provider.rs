// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lookup of host types by key.
//!
//! The binding context never inspects types on its own; every type it
//! touches is resolved through a [`TypeProvider`]. [`TypeUniverse`] is the
//! `HashMap`-backed implementation, suitable when the whole model is known
//! up front.

use crate::model::{PackageInfo, TypeInfo, TypeKey};
use std::collections::HashMap;

/// Resolves [`TypeKey`] values to their [`TypeInfo`].
pub trait TypeProvider: Send + Sync {
    /// Look up a type by key.
    ///
    /// Returns `None` if the key is unknown.
    fn lookup(&self, key: &TypeKey) -> Option<&TypeInfo>;

    /// Look up package-level annotations by package name.
    fn package(&self, name: &str) -> Option<&PackageInfo>;
}

/// Simple [`HashMap`]-backed [`TypeProvider`].
#[derive(Debug, Default, Clone)]
pub struct TypeUniverse {
    types: HashMap<TypeKey, TypeInfo>,
    packages: HashMap<String, PackageInfo>,
}

impl TypeUniverse {
    /// Create an empty universe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any previous type with the same key.
    pub fn register(&mut self, info: TypeInfo) {
        self.types.insert(info.key.clone(), info);
    }

    /// Register package-level annotations.
    pub fn register_package(&mut self, package: PackageInfo) {
        self.packages.insert(package.name.clone(), package);
    }

    /// Chaining form of [`TypeUniverse::register`].
    #[must_use]
    pub fn with_type(mut self, info: TypeInfo) -> Self {
        self.register(info);
        self
    }

    /// Chaining form of [`TypeUniverse::register_package`].
    #[must_use]
    pub fn with_package(mut self, package: PackageInfo) -> Self {
        self.register_package(package);
        self
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeProvider for TypeUniverse {
    fn lookup(&self, key: &TypeKey) -> Option<&TypeInfo> {
        self.types.get(key)
    }

    fn package(&self, name: &str) -> Option<&PackageInfo> {
        self.packages.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeInfoBuilder;

    #[test]
    fn test_register_and_lookup() {
        let universe = TypeUniverse::new()
            .with_type(TypeInfoBuilder::class("com.acme.Order").root_element("order").build())
            .with_package(PackageInfo::new("com.acme", "urn:acme"));

        assert_eq!(universe.len(), 1);
        assert!(universe.lookup(&TypeKey::new("com.acme.Order")).is_some());
        assert!(universe.lookup(&TypeKey::new("com.acme.Missing")).is_none());
        assert_eq!(
            universe
                .package("com.acme")
                .and_then(|p| p.namespace.as_deref()),
            Some("urn:acme")
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut universe = TypeUniverse::new();
        universe.register(TypeInfoBuilder::class("com.acme.Order").build());
        universe.register(TypeInfoBuilder::class("com.acme.Order").root_element("order").build());

        assert_eq!(universe.len(), 1);
        let info = universe.lookup(&TypeKey::new("com.acme.Order")).expect("order");
        assert!(info.is_schema_bound());
    }
}
