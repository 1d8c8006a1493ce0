// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type graph registration.
//!
//! Registration walks the members of a type (and of its schema-bound
//! ancestors), recursing into every schema-bound host type it finds before
//! scanning the type itself. The `seen` set is the only guard: a type is
//! scanned by whoever wins its claim, so cycles and shared subtrees are
//! visited once.

use super::descriptor::Member;
use super::BindingContext;
use crate::error::Result;
use crate::model::{FieldBinding, FieldInfo, TypeInfo, TypeKey, ValueType};
use std::collections::HashSet;
use std::sync::Arc;

impl BindingContext {
    /// Scan the root type and every type reachable from it.
    ///
    /// Calling this again after a successful registration is a no-op.
    /// A fatal failure is sticky: the types it claimed stay marked as seen
    /// without descriptors, so every later call returns the same error.
    pub fn register(&self) -> Result<()> {
        let mut failure = self.registration.lock();
        if let Some(err) = failure.as_ref() {
            return Err(err.clone());
        }
        if self.descriptors.contains_key(&self.root) {
            return Ok(());
        }

        log::debug!("[xbind::scan] registering {} ({} mode)", self.root, self.mode);
        let root = self.root.clone();
        if let Err(err) = self.register_context(&root, self.skip_factory_default()) {
            log::debug!("[xbind::scan] registration of {} failed: {}", self.root, err);
            *failure = Some(err.clone());
            return Err(err);
        }
        log::debug!(
            "[xbind::scan] {} registered, {} types scanned",
            self.root,
            self.descriptors.len()
        );
        Ok(())
    }

    pub(crate) fn skip_factory_default(&self) -> bool {
        self.mode.is_writer() || self.skip_factory_discovery
    }

    /// Atomically mark `key` as seen. Returns `false` if it already was.
    pub(crate) fn claim(&self, key: &TypeKey) -> bool {
        self.seen.insert(key.clone())
    }

    /// Register the types reachable from `key`'s members, then scan `key`.
    pub(crate) fn register_context(&self, key: &TypeKey, skip_factory: bool) -> Result<()> {
        let members = self.declared_members(key)?;

        for member in members.iter() {
            if member.field.binding == FieldBinding::Transient {
                continue;
            }
            let payload = self.generics.field_payload(&member.owner, &member.field)?;
            self.register_nested(&payload, skip_factory)?;
        }

        let info = self.type_info(key)?;
        self.scan(info, &members, skip_factory)
    }

    /// Register a schema-bound named type if nobody claimed it yet.
    ///
    /// Returns `true` when this call performed the registration.
    pub(crate) fn register_nested(&self, value_type: &ValueType, skip_factory: bool) -> Result<bool> {
        let Some(key) = value_type.as_named() else {
            return Ok(false);
        };
        let info = self.type_info(key)?;
        if !info.is_schema_bound() || !self.claim(key) {
            return Ok(false);
        }
        self.register_context(key, skip_factory)?;
        Ok(true)
    }

    /// Structural members of `key` and its schema-bound ancestors, furthest
    /// ancestor first. Each type's own members follow its declared property
    /// order; members it does not list keep declaration order after them.
    pub(crate) fn declared_members(&self, key: &TypeKey) -> Result<Arc<[Arc<Member>]>> {
        if let Some(cached) = self.declared_members.get(key) {
            return Ok(Arc::clone(cached.value()));
        }

        let mut chain: Vec<&TypeInfo> = Vec::new();
        let mut visited: HashSet<&TypeKey> = HashSet::new();
        let mut current = Some(key);
        while let Some(k) = current {
            let info = self.type_info(k)?;
            if !visited.insert(&info.key) {
                break;
            }
            if info.is_schema_bound() {
                chain.push(info);
            }
            current = info.super_type.as_ref();
        }

        let members: Arc<[Arc<Member>]> = chain
            .iter()
            .rev()
            .flat_map(|info| {
                ordered_fields(info).into_iter().map(|field| {
                    Arc::new(Member {
                        owner: info.key.clone(),
                        field: field.clone(),
                    })
                })
            })
            .collect();

        Ok(Arc::clone(
            self.declared_members
                .entry(key.clone())
                .or_insert(members)
                .value(),
        ))
    }
}

fn ordered_fields(info: &TypeInfo) -> Vec<&FieldInfo> {
    let order = match &info.xml_type {
        Some(xml_type) if !xml_type.prop_order.is_empty() => &xml_type.prop_order,
        _ => return info.fields.iter().collect(),
    };

    let mut fields: Vec<&FieldInfo> = order.iter().filter_map(|name| info.field(name)).collect();
    for field in &info.fields {
        if !order.contains(&field.name) {
            fields.push(field);
        }
    }
    fields
}
