// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host type model.
//!
//! Schema-binding metadata and member shapes of the object model being
//! bound. Rust has no runtime reflection, so the caller describes each type
//! once; the binding context reads these descriptions and never mutates
//! them.
//!
//! # Example
//!
//! ```rust
//! use xbind::model::{BuiltinType, FieldInfo, TypeInfoBuilder, TypeProvider, TypeUniverse};
//!
//! let universe = TypeUniverse::new().with_type(
//!     TypeInfoBuilder::class("com.acme.Note")
//!         .root_element("note")
//!         .property(FieldInfo::attribute("id", BuiltinType::String).required())
//!         .property(FieldInfo::element("body", BuiltinType::String))
//!         .build(),
//! );
//!
//! let note = universe.lookup(&"com.acme.Note".into()).unwrap();
//! assert!(note.nullary_method("getBody").is_some());
//! ```

mod builder;
mod provider;
mod type_info;

pub use builder::TypeInfoBuilder;
pub use provider::{TypeProvider, TypeUniverse};
pub use type_info::{
    BuiltinType, ElementRef, EnumConstant, FieldBinding, FieldInfo, MethodInfo, PackageInfo,
    RootElement, TypeInfo, TypeKey, TypeKind, ValueType, XmlAccessType, XmlTypeInfo,
};
