// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Accessor resolution across the supertype chain.
//!
//! Accessors are located by schema name using the bean naming convention:
//! `get<Name>`/`is<Name>` for zero-argument reads and `set<Name>(T)` for
//! writes. Writers, and any collection-valued member, always bind to the
//! zero-argument form; readers bind scalars to the setter whose parameter
//! matches the member's declared type.

use crate::binding::intern::NameToken;
use crate::config::{CacheMode, GETTER_PREFIX, PREDICATE_PREFIX, SETTER_PREFIX};
use crate::error::{Error, Result};
use crate::model::{TypeKey, TypeProvider, ValueType};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Shape of a resolved accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// `get<Name>()`
    Getter,
    /// `is<Name>()` for boolean-valued members.
    Predicate,
    /// `set<Name>(value)`
    Setter,
}

impl AccessorKind {
    pub fn takes_argument(self) -> bool {
        self == Self::Setter
    }
}

/// A resolved accessor: the method and the type declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    owner: TypeKey,
    method: Arc<str>,
    kind: AccessorKind,
    value_type: ValueType,
}

impl Accessor {
    /// Type in the supertype chain that declares the method.
    pub fn owner(&self) -> &TypeKey {
        &self.owner
    }

    pub fn method_name(&self) -> &str {
        &self.method
    }

    pub fn kind(&self) -> AccessorKind {
        self.kind
    }

    /// Static value type the accessor was resolved for.
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.takes_argument() {
            write!(f, "{}::{}({})", self.owner, self.method, self.value_type)
        } else {
            write!(f, "{}::{}()", self.owner, self.method)
        }
    }
}

/// Build an accessor method name from a prefix and a schema name.
///
/// The first character of the schema name is upper-cased:
/// `method_name("get", "shipTo") == "getShipTo"`.
pub fn method_name(prefix: &str, xml_name: &str) -> String {
    let mut chars = xml_name.chars();
    let mut name = String::with_capacity(prefix.len() + xml_name.len());
    name.push_str(prefix);
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

/// Locates accessors by schema name, memoized per
/// (name, declaring type, argument type).
#[derive(Debug)]
pub struct AccessorResolver {
    mode: CacheMode,
    memo: DashMap<(NameToken, TypeKey, ValueType), Accessor>,
}

impl AccessorResolver {
    pub fn new(mode: CacheMode) -> Self {
        Self {
            mode,
            memo: DashMap::new(),
        }
    }

    /// Resolve the accessor for `name` starting at `declaring_type`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingAccessor`] when no type in the chain declares the
    /// method, [`Error::UnknownType`] when the chain references a type the
    /// provider does not know.
    pub fn resolve(
        &self,
        name: &NameToken,
        declaring_type: &TypeKey,
        value_type: &ValueType,
        provider: &dyn TypeProvider,
    ) -> Result<Accessor> {
        let key = (name.clone(), declaring_type.clone(), value_type.clone());
        if let Some(found) = self.memo.get(&key) {
            return Ok(found.value().clone());
        }

        let accessor = self.search(name, declaring_type, value_type, provider)?;
        Ok(self.memo.entry(key).or_insert(accessor).value().clone())
    }

    fn search(
        &self,
        name: &NameToken,
        declaring_type: &TypeKey,
        value_type: &ValueType,
        provider: &dyn TypeProvider,
    ) -> Result<Accessor> {
        let reads = self.mode.is_writer() || value_type.is_collection();
        let (kind, method) = if !reads {
            (AccessorKind::Setter, method_name(SETTER_PREFIX, name))
        } else if value_type.is_boolean() {
            (AccessorKind::Predicate, method_name(PREDICATE_PREFIX, name))
        } else {
            (AccessorKind::Getter, method_name(GETTER_PREFIX, name))
        };

        let mut current = Some(declaring_type.clone());
        while let Some(key) = current {
            let info = provider
                .lookup(&key)
                .ok_or_else(|| Error::UnknownType(key.clone()))?;
            let found = if reads {
                info.nullary_method(&method).is_some()
            } else {
                info.unary_method(&method, value_type).is_some()
            };
            if found {
                return Ok(Accessor {
                    owner: key,
                    method: Arc::from(method),
                    kind,
                    value_type: value_type.clone(),
                });
            }
            current = info.super_type.clone();
        }

        Err(Error::MissingAccessor {
            name: name.to_string(),
            method,
            declaring_type: declaring_type.clone(),
            argument_type: value_type.clone(),
        })
    }

    /// Number of memoized resolutions.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::intern::NameInterner;
    use crate::model::{BuiltinType, FieldInfo, MethodInfo, TypeInfoBuilder, TypeUniverse};

    fn universe() -> TypeUniverse {
        TypeUniverse::new()
            .with_type(
                TypeInfoBuilder::class("com.acme.Base")
                    .xml_type("BaseType")
                    .property(FieldInfo::element("count", BuiltinType::PrimitiveInt))
                    .property(FieldInfo::element("active", BuiltinType::PrimitiveBoolean))
                    .build(),
            )
            .with_type(
                TypeInfoBuilder::class("com.acme.Derived")
                    .xml_type("DerivedType")
                    .extends("com.acme.Base")
                    .property(FieldInfo::element(
                        "tag",
                        ValueType::list_of(BuiltinType::String.into()),
                    ))
                    .build(),
            )
    }

    #[test]
    fn test_method_name_capitalizes() {
        assert_eq!(method_name("get", "shipTo"), "getShipTo");
        assert_eq!(method_name("set", "x"), "setX");
        assert_eq!(method_name("is", "élan"), "isÉlan");
        assert_eq!(method_name("get", ""), "get");
    }

    #[test]
    fn test_writer_resolves_zero_argument_getter() {
        let interner = NameInterner::new();
        let resolver = AccessorResolver::new(CacheMode::Writer);
        let accessor = resolver
            .resolve(
                &interner.intern("count"),
                &TypeKey::new("com.acme.Base"),
                &BuiltinType::PrimitiveInt.into(),
                &universe(),
            )
            .expect("getter");

        assert_eq!(accessor.method_name(), "getCount");
        assert_eq!(accessor.kind(), AccessorKind::Getter);
        assert!(!accessor.kind().takes_argument());
    }

    #[test]
    fn test_reader_resolves_typed_setter() {
        let interner = NameInterner::new();
        let resolver = AccessorResolver::new(CacheMode::Reader);
        let accessor = resolver
            .resolve(
                &interner.intern("count"),
                &TypeKey::new("com.acme.Base"),
                &BuiltinType::PrimitiveInt.into(),
                &universe(),
            )
            .expect("setter");

        assert_eq!(accessor.method_name(), "setCount");
        assert_eq!(accessor.kind(), AccessorKind::Setter);
        assert_eq!(accessor.value_type(), &ValueType::Builtin(BuiltinType::PrimitiveInt));
    }

    #[test]
    fn test_boolean_writer_uses_predicate() {
        let interner = NameInterner::new();
        let resolver = AccessorResolver::new(CacheMode::Writer);
        let accessor = resolver
            .resolve(
                &interner.intern("active"),
                &TypeKey::new("com.acme.Base"),
                &BuiltinType::PrimitiveBoolean.into(),
                &universe(),
            )
            .expect("predicate");

        assert_eq!(accessor.method_name(), "isActive");
        assert_eq!(accessor.kind(), AccessorKind::Predicate);
    }

    #[test]
    fn test_reader_collection_uses_getter() {
        let interner = NameInterner::new();
        let resolver = AccessorResolver::new(CacheMode::Reader);
        let accessor = resolver
            .resolve(
                &interner.intern("tag"),
                &TypeKey::new("com.acme.Derived"),
                &ValueType::list_of(BuiltinType::String.into()),
                &universe(),
            )
            .expect("list getter");

        assert_eq!(accessor.method_name(), "getTag");
        assert_eq!(accessor.owner().as_str(), "com.acme.Derived");
    }

    #[test]
    fn test_search_walks_supertypes() {
        let interner = NameInterner::new();
        let resolver = AccessorResolver::new(CacheMode::Reader);
        let accessor = resolver
            .resolve(
                &interner.intern("count"),
                &TypeKey::new("com.acme.Derived"),
                &BuiltinType::PrimitiveInt.into(),
                &universe(),
            )
            .expect("inherited setter");

        assert_eq!(accessor.owner().as_str(), "com.acme.Base");
    }

    #[test]
    fn test_setter_parameter_must_match() {
        let interner = NameInterner::new();
        let resolver = AccessorResolver::new(CacheMode::Reader);
        let err = resolver
            .resolve(
                &interner.intern("count"),
                &TypeKey::new("com.acme.Derived"),
                &BuiltinType::Long.into(),
                &universe(),
            )
            .expect_err("no setCount(Long)");

        match err {
            Error::MissingAccessor {
                name,
                method,
                declaring_type,
                argument_type,
            } => {
                assert_eq!(name, "count");
                assert_eq!(method, "setCount");
                assert_eq!(declaring_type.as_str(), "com.acme.Derived");
                assert_eq!(argument_type, ValueType::Builtin(BuiltinType::Long));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_supertype_is_reported() {
        let universe = TypeUniverse::new().with_type(
            TypeInfoBuilder::class("com.acme.Orphan")
                .extends("com.acme.Gone")
                .method(MethodInfo::getter("getOther", BuiltinType::String))
                .build(),
        );
        let interner = NameInterner::new();
        let resolver = AccessorResolver::new(CacheMode::Writer);
        let err = resolver
            .resolve(
                &interner.intern("name"),
                &TypeKey::new("com.acme.Orphan"),
                &BuiltinType::String.into(),
                &universe,
            )
            .expect_err("chain is broken");
        assert!(matches!(err, Error::UnknownType(key) if key.as_str() == "com.acme.Gone"));
    }

    #[test]
    fn test_resolution_is_memoized() {
        let interner = NameInterner::new();
        let resolver = AccessorResolver::new(CacheMode::Writer);
        let name = interner.intern("count");
        let owner = TypeKey::new("com.acme.Base");
        let int: ValueType = BuiltinType::PrimitiveInt.into();

        let first = resolver.resolve(&name, &owner, &int, &universe()).expect("getter");
        let second = resolver
            .resolve(&name, &owner, &int, &TypeUniverse::new())
            .expect("memoized");
        assert_eq!(first, second);
        assert_eq!(resolver.len(), 1);
    }
}
