// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binding context: type-graph scanning and the caches it fills.
//!
//! A [`BindingContext`] is built for one root type and one [`CacheMode`].
//! Building it resolves the root's schema name and namespace;
//! [`BindingContext::register`] then walks every type reachable from the
//! root and builds one [`ClassDescriptor`] per type. Afterwards the
//! marshal/unmarshal engine only reads the caches, apart from lazy
//! population (first-touch interning, custom factory scanning).
//!
//! # Architecture
//!
//! ```text
//! BindingContext (one per root type and mode)
//! +-- NameInterner        name -> NameToken
//! +-- GenericTypeResolver list member -> element type
//! +-- NamespaceResolver   type -> namespace
//! +-- AccessorResolver    (name, type, arg) -> Accessor
//! +-- seen                atomic claim, one scan per type
//! +-- descriptors         type -> Arc<ClassDescriptor>
//! +-- element_types       name -> declared type
//! +-- factory bindings    namespace -> FactoryBinding   (reader)
//! +-- reverse name tables accessor -> name              (writer)
//! ```
//!
//! # Thread Safety
//!
//! Every table is a `DashMap`/`DashSet`. First-writer-wins tables use the
//! entry API, never a get-then-insert sequence.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use xbind::model::{BuiltinType, FieldInfo, TypeInfoBuilder, TypeUniverse, ValueType};
//! use xbind::{BindingContext, CacheMode};
//!
//! let universe = TypeUniverse::new()
//!     .with_type(
//!         TypeInfoBuilder::class("com.acme.Order")
//!             .root_element("order")
//!             .property(FieldInfo::attribute("id", BuiltinType::String).required())
//!             .property(FieldInfo::element(
//!                 "line",
//!                 ValueType::list_of(ValueType::named("com.acme.Line")),
//!             ))
//!             .build(),
//!     )
//!     .with_type(
//!         TypeInfoBuilder::class("com.acme.Line")
//!             .xml_type("LineType")
//!             .property(FieldInfo::element("sku", BuiltinType::String))
//!             .build(),
//!     );
//!
//! let ctx = BindingContext::builder("com.acme.Order", Arc::new(universe))
//!     .mode(CacheMode::Writer)
//!     .build()?;
//! ctx.register()?;
//!
//! let order = ctx.descriptor(&"com.acme.Order".into()).unwrap();
//! assert_eq!(order.element_accessor("line").unwrap().method_name(), "getLine");
//! assert!(ctx.is_registered(&"com.acme.Line".into()));
//! # Ok::<(), xbind::Error>(())
//! ```

mod accessor;
mod descriptor;
mod factory;
mod generics;
mod intern;
mod invocation;
mod namespace;
mod registry;
mod scanner;

pub use accessor::{method_name, Accessor, AccessorKind, AccessorResolver};
pub use descriptor::{ChoiceGroup, ClassDescriptor, Member, PropEntry, SchemaType};
pub use factory::{
    object_factory_key, FactoryBinding, FactoryResolver, FactoryTable, Instance, ObjectFactory, Producer,
    ProducerError,
};
pub use generics::GenericTypeResolver;
pub use intern::{NameInterner, NameToken};
pub use invocation::{classify_builtin, InvocationType};
pub use namespace::NamespaceResolver;

use crate::config::CacheMode;
use crate::error::{Error, Result};
use crate::model::{TypeInfo, TypeKey, TypeProvider, ValueType, XmlAccessType};
use dashmap::{DashMap, DashSet};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Builder for [`BindingContext`].
pub struct BindingContextBuilder {
    root: TypeKey,
    provider: Arc<dyn TypeProvider>,
    mode: CacheMode,
    factory_resolver: Option<Arc<dyn FactoryResolver>>,
    skip_factory_discovery: bool,
}

impl BindingContextBuilder {
    /// Reader (default) or writer.
    pub fn mode(mut self, mode: CacheMode) -> Self {
        self.mode = mode;
        self
    }

    /// Source of per-package object factories (reader mode).
    pub fn factory_resolver(mut self, resolver: Arc<dyn FactoryResolver>) -> Self {
        self.factory_resolver = Some(resolver);
        self
    }

    /// Never look up object factories while scanning.
    pub fn skip_factory_discovery(mut self, skip: bool) -> Self {
        self.skip_factory_discovery = skip;
        self
    }

    /// Build the context.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownType`] if the provider does not know the root, and
    /// [`Error::NotSchemaBound`] if the root has neither a root-element nor
    /// a schema-type annotation.
    pub fn build(self) -> Result<BindingContext> {
        let root_info = self
            .provider
            .lookup(&self.root)
            .ok_or_else(|| Error::UnknownType(self.root.clone()))?;
        let root_name = root_info
            .schema_name()
            .ok_or_else(|| Error::NotSchemaBound(self.root.clone()))?;

        let interner = NameInterner::new();
        let root_name = interner.intern(root_name);
        let namespaces = NamespaceResolver::new();
        namespaces.resolve(root_info, self.provider.as_ref());

        let ctx = BindingContext {
            root: self.root.clone(),
            root_name: root_name.clone(),
            mode: self.mode,
            skip_factory_discovery: self.skip_factory_discovery,
            provider: self.provider,
            factory_resolver: self.factory_resolver,
            interner,
            generics: GenericTypeResolver::new(),
            namespaces,
            accessors: AccessorResolver::new(self.mode),
            seen: DashSet::new(),
            descriptors: DashMap::new(),
            declared_members: DashMap::new(),
            access_types: DashMap::new(),
            element_types: DashMap::new(),
            type_element_names: DashMap::new(),
            attribute_names: DashMap::new(),
            element_names: DashMap::new(),
            adapters: DashMap::new(),
            schema_types: DashMap::new(),
            see_also: DashSet::new(),
            basic_types: DashMap::new(),
            factory_bindings: DashMap::new(),
            producers: DashMap::new(),
            registration: Mutex::new(None),
        };
        ctx.seen.insert(self.root.clone());
        ctx.element_types
            .insert(root_name, ValueType::Named(self.root));
        Ok(ctx)
    }
}

/// Scanning engine and cache owner for one root type and mode.
pub struct BindingContext {
    root: TypeKey,
    root_name: NameToken,
    mode: CacheMode,
    skip_factory_discovery: bool,
    provider: Arc<dyn TypeProvider>,
    factory_resolver: Option<Arc<dyn FactoryResolver>>,

    interner: NameInterner,
    generics: GenericTypeResolver,
    namespaces: NamespaceResolver,
    accessors: AccessorResolver,

    /// Types claimed for scanning.
    seen: DashSet<TypeKey>,
    descriptors: DashMap<TypeKey, Arc<ClassDescriptor>>,
    /// Bound members of each type, furthest ancestor first.
    declared_members: DashMap<TypeKey, Arc<[Arc<Member>]>>,
    access_types: DashMap<TypeKey, Option<XmlAccessType>>,
    /// Element name -> declared (payload) type.
    element_types: DashMap<NameToken, ValueType>,
    /// Type -> local element name (writer).
    type_element_names: DashMap<TypeKey, Arc<str>>,
    /// Accessor -> attribute name.
    attribute_names: DashMap<Accessor, NameToken>,
    /// Accessor -> element name (writer).
    element_names: DashMap<Accessor, NameToken>,
    adapters: DashMap<Accessor, Arc<str>>,
    schema_types: DashMap<Accessor, SchemaType>,
    /// Types that declared see-also subtypes.
    see_also: DashSet<TypeKey>,
    basic_types: DashMap<ValueType, bool>,

    factory_bindings: DashMap<Arc<str>, Arc<FactoryBinding>>,
    /// Produced type -> factory producer (reader).
    producers: DashMap<TypeKey, Producer>,

    /// Serializes top-level registration; holds the first fatal failure.
    registration: Mutex<Option<Error>>,
}

impl BindingContext {
    /// Start building a context for `root`.
    pub fn builder(root: impl Into<TypeKey>, provider: Arc<dyn TypeProvider>) -> BindingContextBuilder {
        BindingContextBuilder {
            root: root.into(),
            provider,
            mode: CacheMode::default(),
            factory_resolver: None,
            skip_factory_discovery: false,
        }
    }

    /// Context for `root` in `mode` with no factory resolver.
    pub fn new(
        root: impl Into<TypeKey>,
        provider: Arc<dyn TypeProvider>,
        mode: CacheMode,
    ) -> Result<Self> {
        Self::builder(root, provider).mode(mode).build()
    }

    /// Root type this context was built for.
    pub fn root(&self) -> &TypeKey {
        &self.root
    }

    /// Schema name the root is registered under.
    pub fn root_name(&self) -> &NameToken {
        &self.root_name
    }

    /// Reader or writer mode.
    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Type provider the context scans from.
    pub fn provider(&self) -> &dyn TypeProvider {
        self.provider.as_ref()
    }

    pub(crate) fn type_info(&self, key: &TypeKey) -> Result<&TypeInfo> {
        self.provider
            .lookup(key)
            .ok_or_else(|| Error::UnknownType(key.clone()))
    }

    // ===================================================================
    // Lookups for the marshal/unmarshal engine
    // ===================================================================

    /// Descriptor of a scanned type.
    pub fn descriptor(&self, key: &TypeKey) -> Option<Arc<ClassDescriptor>> {
        self.descriptors.get(key).map(|d| Arc::clone(d.value()))
    }

    /// Number of scanned types.
    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether `key` was claimed for scanning.
    pub fn is_registered(&self, key: &TypeKey) -> bool {
        self.seen.contains(key)
    }

    /// Types claimed for scanning, in no particular order.
    pub fn registered_types(&self) -> Vec<TypeKey> {
        self.seen.iter().map(|k| k.key().clone()).collect()
    }

    /// Namespace of a type, resolving it if the type was never scanned.
    pub fn namespace_of(&self, key: &TypeKey) -> Option<Arc<str>> {
        if let Some(ns) = self.namespaces.get(key) {
            return Some(ns);
        }
        let info = self.provider.lookup(key)?;
        Some(self.namespaces.resolve(info, self.provider.as_ref()))
    }

    /// Required attribute and element names of a scanned type.
    pub fn required_names(&self, key: &TypeKey) -> Option<HashSet<NameToken>> {
        self.descriptors.get(key).map(|d| d.required_names().clone())
    }

    /// Declared type carried under an element name.
    pub fn element_type(&self, name: &str) -> Option<ValueType> {
        self.element_types.get(name).map(|t| t.value().clone())
    }

    /// Local element name of a type (writer mode).
    pub fn element_name_of_type(&self, key: &TypeKey) -> Option<Arc<str>> {
        self.type_element_names
            .get(key)
            .map(|n| Arc::clone(n.value()))
    }

    /// Attribute name an accessor binds to.
    pub fn attribute_name_of(&self, accessor: &Accessor) -> Option<NameToken> {
        self.attribute_names.get(accessor).map(|n| n.value().clone())
    }

    /// Element name an accessor binds to (writer mode).
    pub fn element_name_of(&self, accessor: &Accessor) -> Option<NameToken> {
        self.element_names.get(accessor).map(|n| n.value().clone())
    }

    /// Type adapter declared on the member behind `accessor`.
    pub fn adapter_for(&self, accessor: &Accessor) -> Option<Arc<str>> {
        self.adapters.get(accessor).map(|a| Arc::clone(a.value()))
    }

    /// Schema simple-type hint declared on the member behind `accessor`.
    pub fn schema_type_for(&self, accessor: &Accessor) -> Option<SchemaType> {
        self.schema_types.get(accessor).map(|s| *s.value())
    }

    /// Whether the type declared see-also subtypes.
    pub fn has_see_also(&self, key: &TypeKey) -> bool {
        self.see_also.contains(key)
    }

    /// Access mode of a type (cached).
    pub fn access_type(&self, key: &TypeKey) -> Option<XmlAccessType> {
        if let Some(cached) = self.access_types.get(key) {
            return *cached.value();
        }
        let access = self.provider.lookup(key)?.access_type;
        *self.access_types.entry(key.clone()).or_insert(access).value()
    }

    /// Structural members of a type and its schema-bound ancestors,
    /// furthest ancestor first.
    pub fn members_of(&self, key: &TypeKey) -> Result<Arc<[Arc<Member>]>> {
        self.declared_members(key)
    }

    /// Canonical token for a schema name.
    pub fn intern(&self, name: &str) -> NameToken {
        self.interner.intern(name)
    }

    /// Payload type of a zero-argument accessor (element type for lists).
    pub fn accessor_payload(&self, accessor: &Accessor) -> Result<ValueType> {
        let info = self.type_info(accessor.owner())?;
        let method = info
            .nullary_method(accessor.method_name())
            .ok_or_else(|| Error::MalformedGenericDeclaration {
                owner: accessor.owner().clone(),
                member: accessor.method_name().to_string(),
            })?;
        self.generics.method_payload(accessor.owner(), method)
    }

    /// Invocation strategy tag for a value type.
    pub fn invocation_type(&self, value_type: &ValueType) -> InvocationType {
        invocation::classify(value_type, self.provider.as_ref())
    }

    /// Whether values of this type are written as simple text (cached).
    pub fn is_basic_type(&self, value_type: &ValueType) -> bool {
        if let Some(cached) = self.basic_types.get(value_type) {
            return *cached.value();
        }
        let basic = invocation::is_basic(value_type, self.provider.as_ref());
        *self
            .basic_types
            .entry(value_type.clone())
            .or_insert(basic)
            .value()
    }
}

impl fmt::Debug for BindingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingContext")
            .field("root", &self.root)
            .field("root_name", &self.root_name)
            .field("mode", &self.mode)
            .field("registered", &self.seen.len())
            .field("descriptors", &self.descriptors.len())
            .field("names", &self.interner.len())
            .finish_non_exhaustive()
    }
}
