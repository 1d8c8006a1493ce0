// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Invocation strategy tags.
//!
//! The marshal/unmarshal engine dispatches value conversion on these tags
//! instead of re-inspecting value types for every element.

use crate::model::{BuiltinType, TypeProvider, ValueType};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Conversion strategy for a value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvocationType {
    // ===================================================================
    // Boxed scalars
    // ===================================================================
    Text,
    Long,
    Int,
    Short,
    Byte,
    Float,
    Double,
    Boolean,
    BigInteger,
    Decimal,
    ByteSequence,

    // ===================================================================
    // Primitive scalars
    // ===================================================================
    PrimitiveLong,
    PrimitiveInt,
    PrimitiveShort,
    PrimitiveByte,
    PrimitiveFloat,
    PrimitiveDouble,
    PrimitiveBoolean,
    PrimitiveByteSequence,

    // ===================================================================
    // Structured values
    // ===================================================================
    Calendar,
    Duration,
    QualifiedName,
    Enum,
    /// Anything converted through its own descriptor.
    Generic,
}

impl fmt::Display for InvocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn builtin_table() -> &'static HashMap<BuiltinType, InvocationType> {
    static TABLE: OnceLock<HashMap<BuiltinType, InvocationType>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use BuiltinType as B;
        use InvocationType as I;

        HashMap::from([
            (B::String, I::Text),
            (B::Long, I::Long),
            (B::PrimitiveLong, I::PrimitiveLong),
            (B::Int, I::Int),
            (B::PrimitiveInt, I::PrimitiveInt),
            (B::Short, I::Short),
            (B::PrimitiveShort, I::PrimitiveShort),
            (B::Byte, I::Byte),
            (B::PrimitiveByte, I::PrimitiveByte),
            (B::Float, I::Float),
            (B::PrimitiveFloat, I::PrimitiveFloat),
            (B::Double, I::Double),
            (B::PrimitiveDouble, I::PrimitiveDouble),
            (B::Boolean, I::Boolean),
            (B::PrimitiveBoolean, I::PrimitiveBoolean),
            (B::BigInteger, I::BigInteger),
            (B::BigDecimal, I::Decimal),
            (B::ByteArray, I::ByteSequence),
            (B::PrimitiveByteArray, I::PrimitiveByteSequence),
            (B::Calendar, I::Calendar),
            (B::Duration, I::Duration),
            (B::QName, I::QualifiedName),
        ])
    })
}

/// Tag of a well-known type. `Object` has no dedicated strategy.
pub fn classify_builtin(builtin: BuiltinType) -> InvocationType {
    builtin_table()
        .get(&builtin)
        .copied()
        .unwrap_or(InvocationType::Generic)
}

pub(crate) fn classify(value_type: &ValueType, provider: &dyn TypeProvider) -> InvocationType {
    match value_type {
        ValueType::Builtin(builtin) => classify_builtin(*builtin),
        ValueType::Named(key) => match provider.lookup(key) {
            Some(info) if info.is_enum() => InvocationType::Enum,
            _ => InvocationType::Generic,
        },
        ValueType::List(_) => InvocationType::Generic,
    }
}

/// Every well-known type and every enumeration is written as simple text.
pub(crate) fn is_basic(value_type: &ValueType, provider: &dyn TypeProvider) -> bool {
    match value_type {
        ValueType::Builtin(_) => true,
        ValueType::Named(key) => provider.lookup(key).is_some_and(|info| info.is_enum()),
        ValueType::List(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeInfoBuilder, TypeUniverse};

    #[test]
    fn test_builtin_tags() {
        assert_eq!(classify_builtin(BuiltinType::String), InvocationType::Text);
        assert_eq!(classify_builtin(BuiltinType::BigDecimal), InvocationType::Decimal);
        assert_eq!(
            classify_builtin(BuiltinType::PrimitiveByteArray),
            InvocationType::PrimitiveByteSequence
        );
        assert_eq!(classify_builtin(BuiltinType::QName), InvocationType::QualifiedName);
        assert_eq!(classify_builtin(BuiltinType::Object), InvocationType::Generic);
    }

    #[test]
    fn test_boxed_and_primitive_differ() {
        assert_ne!(
            classify_builtin(BuiltinType::Int),
            classify_builtin(BuiltinType::PrimitiveInt)
        );
        assert_eq!(classify_builtin(BuiltinType::Boolean), InvocationType::Boolean);
        assert_eq!(
            classify_builtin(BuiltinType::PrimitiveBoolean),
            InvocationType::PrimitiveBoolean
        );
    }

    #[test]
    fn test_named_types() {
        let universe = TypeUniverse::new()
            .with_type(
                TypeInfoBuilder::enumeration("com.acme.Color")
                    .xml_type("Color")
                    .constant("RED")
                    .build(),
            )
            .with_type(TypeInfoBuilder::class("com.acme.Item").xml_type("Item").build());

        assert_eq!(
            classify(&ValueType::named("com.acme.Color"), &universe),
            InvocationType::Enum
        );
        assert_eq!(
            classify(&ValueType::named("com.acme.Item"), &universe),
            InvocationType::Generic
        );
        assert_eq!(
            classify(&ValueType::named("com.acme.Unknown"), &universe),
            InvocationType::Generic
        );
        assert_eq!(
            classify(&ValueType::list_of(BuiltinType::String.into()), &universe),
            InvocationType::Generic
        );
    }

    #[test]
    fn test_basic_types() {
        let universe = TypeUniverse::new().with_type(
            TypeInfoBuilder::enumeration("com.acme.Color")
                .xml_type("Color")
                .constant("RED")
                .build(),
        );

        assert!(is_basic(&BuiltinType::Object.into(), &universe));
        assert!(is_basic(&ValueType::named("com.acme.Color"), &universe));
        assert!(!is_basic(&ValueType::named("com.acme.Item"), &universe));
        assert!(!is_basic(&ValueType::raw_list(), &universe));
    }
}
