// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Errors returned by binding registration and lookups.

use crate::config::CacheMode;
use crate::model::{TypeKey, ValueType};

/// Errors returned by xbind operations.
///
/// Shape mismatches between declared metadata and the actual members of a
/// type are fatal and abort registration. Factory discovery failures are
/// recoverable: the scanner logs them and carries on.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use xbind::{BindingContext, Error, TypeUniverse};
///
/// let universe = Arc::new(TypeUniverse::new());
/// match BindingContext::builder("com.acme.Missing", universe).build() {
///     Err(Error::UnknownType(key)) => assert_eq!(key.as_str(), "com.acme.Missing"),
///     other => panic!("unexpected: {:?}", other.map(|_| ())),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum Error {
    // ========================================================================
    // Fatal shape errors
    // ========================================================================
    /// No accessor for a declared name anywhere in the supertype chain.
    MissingAccessor {
        /// Schema name being bound.
        name: String,
        /// Candidate method name that was searched for.
        method: String,
        /// Type the search started from.
        declaring_type: TypeKey,
        /// Static value type of the member.
        argument_type: ValueType,
    },
    /// Container member without a resolvable element type.
    MalformedGenericDeclaration {
        owner: TypeKey,
        member: String,
    },
    /// A referenced type is not known to the type provider.
    UnknownType(TypeKey),
    /// Root type carries neither a root-element nor a schema-type annotation.
    NotSchemaBound(TypeKey),
    /// More than one member of a type is tagged as its value.
    DuplicateValueMember {
        owner: TypeKey,
        member: String,
    },

    // ========================================================================
    // Recoverable factory errors
    // ========================================================================
    /// No object factory could be located for a namespace.
    FactoryUnavailable {
        namespace: String,
        package: String,
    },
    /// An object-factory producer failed.
    FactoryInvocation {
        factory: TypeKey,
        producer: String,
        reason: String,
    },

    // ========================================================================
    // Usage errors
    // ========================================================================
    /// Operation is only meaningful in the other cache mode.
    ModeMismatch {
        operation: &'static str,
        mode: CacheMode,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingAccessor {
                name,
                method,
                declaring_type,
                argument_type,
            } => write!(
                f,
                "Failed to locate method for element, name = {}, method = {}, type = {}, argument type = {}",
                name, method, declaring_type, argument_type
            ),
            Error::MalformedGenericDeclaration { owner, member } => write!(
                f,
                "Container member {}.{} declares no element type",
                owner, member
            ),
            Error::UnknownType(key) => write!(f, "Unknown type: {}", key),
            Error::NotSchemaBound(key) => write!(
                f,
                "Type {} has neither a root element nor a schema type annotation",
                key
            ),
            Error::DuplicateValueMember { owner, member } => write!(
                f,
                "Type {} declares a second value member: {}",
                owner, member
            ),
            Error::FactoryUnavailable { namespace, package } => write!(
                f,
                "Failed to locate object factory for namespace = {} (package {})",
                namespace, package
            ),
            Error::FactoryInvocation {
                factory,
                producer,
                reason,
            } => write!(
                f,
                "Object factory {} failed in {}: {}",
                factory, producer, reason
            ),
            Error::ModeMismatch { operation, mode } => {
                write!(f, "{} is not available in {} mode", operation, mode)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Fatal errors abort registration; the rest are logged and swallowed.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::FactoryUnavailable { .. } | Error::FactoryInvocation { .. }
        )
    }
}

/// Convenient alias for results using the crate `Error` type.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BuiltinType;

    #[test]
    fn test_missing_accessor_names_every_part() {
        let err = Error::MissingAccessor {
            name: "count".into(),
            method: "setCount".into(),
            declaring_type: TypeKey::new("com.acme.Tally"),
            argument_type: ValueType::Builtin(BuiltinType::PrimitiveInt),
        };
        let msg = err.to_string();
        assert!(msg.contains("count"));
        assert!(msg.contains("setCount"));
        assert!(msg.contains("com.acme.Tally"));
        assert!(msg.contains("int"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_factory_errors_are_recoverable() {
        let err = Error::FactoryUnavailable {
            namespace: "urn:acme".into(),
            package: "com.acme".into(),
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("urn:acme"));
    }
}
