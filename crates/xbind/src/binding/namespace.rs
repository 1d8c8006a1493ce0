// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Namespace derivation per type.

use crate::config::{DEFAULT_MARKER, DEFAULT_NAMESPACE};
use crate::model::{TypeInfo, TypeKey, TypeProvider};
use dashmap::DashMap;
use std::sync::Arc;

/// Derives and caches the XML namespace of each type.
///
/// Precedence: explicit schema-type namespace, then root-element namespace,
/// then the enclosing package's default namespace. Types with none of these
/// fall into [`DEFAULT_NAMESPACE`]. A resolved namespace never changes.
#[derive(Debug, Default)]
pub struct NamespaceResolver {
    cache: DashMap<TypeKey, Arc<str>>,
}

impl NamespaceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace of `info`, resolving it on first use.
    pub fn resolve(&self, info: &TypeInfo, provider: &dyn TypeProvider) -> Arc<str> {
        if let Some(cached) = self.cache.get(&info.key) {
            return Arc::clone(cached.value());
        }

        let namespace: Arc<str> = Arc::from(derive(info, provider));
        Arc::clone(
            self.cache
                .entry(info.key.clone())
                .or_insert(namespace)
                .value(),
        )
    }

    /// Previously resolved namespace of `key`.
    pub fn get(&self, key: &TypeKey) -> Option<Arc<str>> {
        self.cache.get(key).map(|ns| Arc::clone(ns.value()))
    }
}

fn explicit(namespace: Option<&str>) -> Option<&str> {
    namespace.filter(|ns| *ns != DEFAULT_MARKER)
}

fn derive<'a>(info: &'a TypeInfo, provider: &'a dyn TypeProvider) -> &'a str {
    if let Some(ns) = explicit(info.xml_type.as_ref().and_then(|t| t.namespace.as_deref())) {
        return ns;
    }
    if let Some(ns) = explicit(
        info.root_element
            .as_ref()
            .and_then(|r| r.namespace.as_deref()),
    ) {
        return ns;
    }
    provider
        .package(info.key.package())
        .and_then(|p| explicit(p.namespace.as_deref()))
        .unwrap_or(DEFAULT_NAMESPACE)
}
