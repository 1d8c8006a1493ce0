// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # xbind - XML binding metadata cache
//!
//! Scans a graph of schema-annotated host types once and caches everything
//! an XML reader or writer needs to bind documents to those types: accessor
//! per element and attribute, namespaces, required names, choice groups,
//! enumeration tables and object-factory producers.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use xbind::model::{BuiltinType, FieldInfo, TypeInfoBuilder};
//! use xbind::{BindingContext, CacheMode, Result, TypeUniverse};
//!
//! fn main() -> Result<()> {
//!     let universe = TypeUniverse::new().with_type(
//!         TypeInfoBuilder::class("com.acme.Note")
//!             .root_element("note")
//!             .property(FieldInfo::attribute("id", BuiltinType::String).required())
//!             .property(FieldInfo::element("body", BuiltinType::String))
//!             .build(),
//!     );
//!
//!     let reader = BindingContext::new("com.acme.Note", Arc::new(universe), CacheMode::Reader)?;
//!     reader.register()?;
//!
//!     let note = reader.descriptor(&"com.acme.Note".into()).expect("scanned");
//!     assert_eq!(note.attribute_accessor("id").map(|a| a.method_name()), Some("setId"));
//!     assert!(note.is_required("id"));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                    Marshal / unmarshal engine                       |
//! |      descriptor lookups | name tables | factory producers           |
//! +---------------------------------------------------------------------+
//! |                         BindingContext                              |
//! |   registry (graph walk) -> scanner (per type) -> ClassDescriptor    |
//! |   NameInterner | AccessorResolver | NamespaceResolver | generics    |
//! +---------------------------------------------------------------------+
//! |                          Host type model                            |
//! |        TypeProvider (TypeUniverse) | FactoryResolver (FactoryTable)  |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`binding`] - Binding context, scanning and caches (start here)
//! - [`model`] - Host type descriptions
//! - [`config`] - Naming conventions and cache mode
//! - [`error`] - Error type

/// Binding context, type scanning and metadata caches.
pub mod binding;
/// Binding constants and cache mode.
pub mod config;
/// Errors returned by registration and lookups.
pub mod error;
/// Host type model consumed by the scanner.
pub mod model;

pub use binding::{
    Accessor, AccessorKind, BindingContext, BindingContextBuilder, ChoiceGroup, ClassDescriptor,
    FactoryResolver, FactoryTable, Instance, InvocationType, NameToken, ObjectFactory,
};
pub use config::CacheMode;
pub use error::{Error, Result};
pub use model::{TypeKey, TypeProvider, TypeUniverse};

/// xbind version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
