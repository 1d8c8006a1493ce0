// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Payload type resolution for container members and accessors.

use crate::error::{Error, Result};
use crate::model::{FieldInfo, MethodInfo, TypeKey, ValueType};
use dashmap::DashMap;

/// Resolves and caches the element type of list-typed members and the
/// payload type of zero-argument accessors.
///
/// A list of `T` resolves to `T`; any other declared type resolves to
/// itself. A list declared without an element type is a
/// [`Error::MalformedGenericDeclaration`].
#[derive(Debug, Default)]
pub struct GenericTypeResolver {
    fields: DashMap<(TypeKey, String), ValueType>,
    methods: DashMap<(TypeKey, String), ValueType>,
}

impl GenericTypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload type of a member declared on `owner`.
    pub fn field_payload(&self, owner: &TypeKey, field: &FieldInfo) -> Result<ValueType> {
        if !field.value_type.is_collection() {
            return Ok(field.value_type.clone());
        }

        let key = (owner.clone(), field.name.clone());
        if let Some(cached) = self.fields.get(&key) {
            return Ok(cached.value().clone());
        }

        let payload = element_of(&field.value_type).ok_or_else(|| {
            Error::MalformedGenericDeclaration {
                owner: owner.clone(),
                member: field.name.clone(),
            }
        })?;
        Ok(self.fields.entry(key).or_insert(payload).value().clone())
    }

    /// Payload type of a zero-argument accessor declared on `owner`.
    ///
    /// Accessors with parameters or without a return have no payload and
    /// are reported as malformed.
    pub fn method_payload(&self, owner: &TypeKey, method: &MethodInfo) -> Result<ValueType> {
        let malformed = || Error::MalformedGenericDeclaration {
            owner: owner.clone(),
            member: method.name.clone(),
        };
        if !method.is_nullary() {
            return Err(malformed());
        }
        let returns = method.returns.as_ref().ok_or_else(malformed)?;
        if !returns.is_collection() {
            return Ok(returns.clone());
        }

        let key = (owner.clone(), method.name.clone());
        if let Some(cached) = self.methods.get(&key) {
            return Ok(cached.value().clone());
        }

        let payload = element_of(returns).ok_or_else(malformed)?;
        Ok(self.methods.entry(key).or_insert(payload).value().clone())
    }

    /// Number of cached container resolutions.
    pub fn len(&self) -> usize {
        self.fields.len() + self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn element_of(value_type: &ValueType) -> Option<ValueType> {
    match value_type {
        ValueType::List(Some(element)) => Some((**element).clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BuiltinType;

    fn owner() -> TypeKey {
        TypeKey::new("com.acme.Items")
    }

    #[test]
    fn test_list_member_resolves_element() {
        let resolver = GenericTypeResolver::new();
        let field = FieldInfo::element("item", ValueType::list_of(ValueType::named("com.acme.Item")));

        let payload = resolver.field_payload(&owner(), &field).expect("payload");
        assert_eq!(payload, ValueType::named("com.acme.Item"));
        assert_eq!(resolver.len(), 1);

        // Second lookup is served from the cache.
        let again = resolver.field_payload(&owner(), &field).expect("payload");
        assert_eq!(again, payload);
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_scalar_member_is_its_own_payload() {
        let resolver = GenericTypeResolver::new();
        let field = FieldInfo::element("comment", BuiltinType::String);

        let payload = resolver.field_payload(&owner(), &field).expect("payload");
        assert_eq!(payload, ValueType::Builtin(BuiltinType::String));
        assert!(resolver.is_empty());
    }

    #[test]
    fn test_raw_list_is_malformed() {
        let resolver = GenericTypeResolver::new();
        let field = FieldInfo::element("anything", ValueType::raw_list());

        match resolver.field_payload(&owner(), &field) {
            Err(Error::MalformedGenericDeclaration { member, .. }) => assert_eq!(member, "anything"),
            other => panic!("expected malformed declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_method_payload() {
        let resolver = GenericTypeResolver::new();
        let getter = MethodInfo::getter(
            "getItem",
            ValueType::list_of(ValueType::named("com.acme.Item")),
        );
        assert_eq!(
            resolver.method_payload(&owner(), &getter).expect("payload"),
            ValueType::named("com.acme.Item")
        );

        let setter = MethodInfo::setter("setItem", BuiltinType::String);
        assert!(resolver.method_payload(&owner(), &setter).is_err());
    }
}
