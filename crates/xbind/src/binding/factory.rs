// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object factories (reader mode).
//!
//! A package may ship an object factory: a host type whose zero-argument
//! producer methods create empty instances of the package's types. Readers
//! use the producer table to instantiate elements as they are parsed.
//!
//! Factories are located per package through a [`FactoryResolver`]
//! during scanning, or registered explicitly for a namespace with
//! [`BindingContext::register_object_factory`]. Discovery failures are
//! logged and never abort registration.

use super::BindingContext;
use crate::config::{OBJECT_FACTORY_NAME, PRODUCER_MARKER};
use crate::error::{Error, Result};
use crate::model::{TypeInfo, TypeKey, ValueType};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Conventional type of a package's object factory: `<package>.ObjectFactory`.
pub fn object_factory_key(package: &str) -> TypeKey {
    if package.is_empty() {
        TypeKey::new(OBJECT_FACTORY_NAME)
    } else {
        TypeKey::new(format!("{}.{}", package, OBJECT_FACTORY_NAME))
    }
}

/// Boxed error returned by producer invocations.
pub type ProducerError = Box<dyn std::error::Error + Send + Sync>;

/// Value produced by an object factory.
pub struct Instance {
    type_key: TypeKey,
    value: Box<dyn Any + Send>,
}

impl Instance {
    pub fn new<T: Any + Send>(type_key: impl Into<TypeKey>, value: T) -> Self {
        Self {
            type_key: type_key.into(),
            value: Box::new(value),
        }
    }

    /// Runtime type of the produced value.
    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn into_value(self) -> Box<dyn Any + Send> {
        self.value
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_key", &self.type_key)
            .finish_non_exhaustive()
    }
}

/// Producer of empty instances for one package.
pub trait ObjectFactory: Send + Sync {
    /// Host type declaring the producer methods.
    fn factory_type(&self) -> &TypeKey;

    /// Invoke the named zero-argument producer.
    fn create(&self, producer: &str) -> std::result::Result<Instance, ProducerError>;
}

/// Locates the object factory of a package.
pub trait FactoryResolver: Send + Sync {
    fn resolve(&self, package: &str) -> Option<Arc<dyn ObjectFactory>>;
}

impl<F> FactoryResolver for F
where
    F: Fn(&str) -> Option<Arc<dyn ObjectFactory>> + Send + Sync,
{
    fn resolve(&self, package: &str) -> Option<Arc<dyn ObjectFactory>> {
        self(package)
    }
}

/// Package name -> factory table.
///
/// Factories can be added after the context is built; lookups take a read
/// lock only.
#[derive(Default)]
pub struct FactoryTable {
    factories: RwLock<HashMap<String, Arc<dyn ObjectFactory>>>,
}

impl FactoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory of `package`, replacing any previous one.
    pub fn insert(&self, package: impl Into<String>, factory: Arc<dyn ObjectFactory>) {
        self.factories.write().insert(package.into(), factory);
    }

    /// Register a factory under the package of its own type.
    pub fn register(&self, factory: Arc<dyn ObjectFactory>) {
        let package = factory.factory_type().package().to_string();
        self.insert(package, factory);
    }

    pub fn remove(&self, package: &str) -> Option<Arc<dyn ObjectFactory>> {
        self.factories.write().remove(package)
    }

    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }
}

impl FactoryResolver for FactoryTable {
    fn resolve(&self, package: &str) -> Option<Arc<dyn ObjectFactory>> {
        self.factories.read().get(package).cloned()
    }
}

impl fmt::Debug for FactoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factories = self.factories.read();
        let mut packages: Vec<&String> = factories.keys().collect();
        packages.sort();
        f.debug_struct("FactoryTable")
            .field("packages", &packages)
            .finish()
    }
}

/// A producer method bound to its factory.
#[derive(Clone)]
pub struct Producer {
    factory: Arc<dyn ObjectFactory>,
    method: Arc<str>,
    produces: TypeKey,
}

impl Producer {
    pub fn factory(&self) -> &Arc<dyn ObjectFactory> {
        &self.factory
    }

    pub fn method_name(&self) -> &str {
        &self.method
    }

    /// Declared return type of the producer.
    pub fn produces(&self) -> &TypeKey {
        &self.produces
    }

    /// Invoke the producer.
    pub fn create(&self) -> Result<Instance> {
        self.factory
            .create(&self.method)
            .map_err(|e| Error::FactoryInvocation {
                factory: self.factory.factory_type().clone(),
                producer: self.method.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("factory", self.factory.factory_type())
            .field("method", &self.method)
            .field("produces", &self.produces)
            .finish()
    }
}

/// Factory bound to a namespace, with its producers by produced type.
pub struct FactoryBinding {
    namespace: Arc<str>,
    factory: Arc<dyn ObjectFactory>,
    producers: HashMap<TypeKey, Arc<str>>,
}

impl FactoryBinding {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn factory(&self) -> &Arc<dyn ObjectFactory> {
        &self.factory
    }

    /// Producer method name for a produced type.
    pub fn producer_name(&self, produces: &TypeKey) -> Option<&str> {
        self.producers.get(produces).map(|m| &**m)
    }

    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }
}

impl fmt::Debug for FactoryBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryBinding")
            .field("namespace", &self.namespace)
            .field("factory", self.factory.factory_type())
            .field("producers", &self.producers.len())
            .finish()
    }
}

impl BindingContext {
    /// Register a caller-supplied factory for `namespace`.
    ///
    /// Every producer whose name contains `create` is invoked once and the
    /// runtime type of its result is registered with factory discovery
    /// skipped. Producer failures are logged and skipped.
    ///
    /// # Errors
    ///
    /// [`Error::ModeMismatch`] in writer mode, [`Error::UnknownType`] when
    /// the factory's type is not known to the provider.
    pub fn register_object_factory(
        &self,
        namespace: &str,
        factory: Arc<dyn ObjectFactory>,
    ) -> Result<()> {
        if self.mode.is_writer() {
            return Err(Error::ModeMismatch {
                operation: "register_object_factory",
                mode: self.mode,
            });
        }
        self.scan_object_factory(Arc::from(namespace), factory, true)?;
        Ok(())
    }

    /// Factory bound to a namespace.
    pub fn factory_binding(&self, namespace: &str) -> Option<Arc<FactoryBinding>> {
        self.factory_bindings
            .get(namespace)
            .map(|b| Arc::clone(b.value()))
    }

    /// Factory producing instances of `key`.
    pub fn factory_for(&self, key: &TypeKey) -> Option<Arc<dyn ObjectFactory>> {
        self.producers.get(key).map(|p| Arc::clone(&p.factory))
    }

    /// Producer method creating instances of `key`.
    pub fn factory_producer(&self, key: &TypeKey) -> Option<Producer> {
        self.producers.get(key).map(|p| p.value().clone())
    }

    /// Look up and bind the factory of `info`'s package.
    pub(crate) fn discover_factory(&self, info: &TypeInfo, namespace: &Arc<str>) {
        let package = info.key.package();
        let factory = self
            .factory_resolver
            .as_ref()
            .and_then(|resolver| resolver.resolve(package));

        let outcome = match factory {
            Some(factory) => {
                if *factory.factory_type() != object_factory_key(package) {
                    log::debug!(
                        "[xbind::factory] {} resolved to non-conventional factory {}",
                        package,
                        factory.factory_type()
                    );
                }
                self
                    .scan_object_factory(Arc::clone(namespace), factory, false)
                    .map(|_| ())
            }
            None => Err(Error::FactoryUnavailable {
                namespace: namespace.to_string(),
                package: package.to_string(),
            }),
        };
        if let Err(e) = outcome {
            log::warn!("[xbind::factory] {}", e);
        }
    }

    fn scan_object_factory(
        &self,
        namespace: Arc<str>,
        factory: Arc<dyn ObjectFactory>,
        custom: bool,
    ) -> Result<Arc<FactoryBinding>> {
        let producer_methods = self.producer_methods(factory.factory_type())?;
        log::debug!(
            "[xbind::factory] {} bound to {} ({} producers{})",
            factory.factory_type(),
            namespace,
            producer_methods.len(),
            if custom { ", custom" } else { "" }
        );

        let mut producers = HashMap::with_capacity(producer_methods.len());
        for (method, produces) in producer_methods {
            if custom && method.contains(PRODUCER_MARKER) {
                self.register_produced(&factory, &method);
            }
            self.producers.insert(
                produces.clone(),
                Producer {
                    factory: Arc::clone(&factory),
                    method: Arc::clone(&method),
                    produces: produces.clone(),
                },
            );
            producers.insert(produces, method);
        }

        let binding = Arc::new(FactoryBinding {
            namespace: Arc::clone(&namespace),
            factory,
            producers,
        });
        if custom {
            self.factory_bindings
                .insert(namespace, Arc::clone(&binding));
            Ok(binding)
        } else {
            Ok(Arc::clone(
                self.factory_bindings
                    .entry(namespace)
                    .or_insert(binding)
                    .value(),
            ))
        }
    }

    /// Invoke a custom producer and register the runtime type it returns.
    fn register_produced(&self, factory: &Arc<dyn ObjectFactory>, method: &str) {
        let instance = match factory.create(method) {
            Ok(instance) => instance,
            Err(e) => {
                let err = Error::FactoryInvocation {
                    factory: factory.factory_type().clone(),
                    producer: method.to_string(),
                    reason: e.to_string(),
                };
                log::error!("[xbind::factory] Error scanning custom object factory: {}", err);
                return;
            }
        };

        let runtime = instance.type_key().clone();
        if self.claim(&runtime) {
            if let Err(e) = self.register_context(&runtime, true) {
                log::error!(
                    "[xbind::factory] Error scanning {} produced by {}.{}: {}",
                    runtime,
                    factory.factory_type(),
                    method,
                    e
                );
            }
        }
    }

    /// Zero-argument methods returning a host type, across the factory
    /// type's supertype chain (nearest declaration wins).
    fn producer_methods(&self, factory_type: &TypeKey) -> Result<Vec<(Arc<str>, TypeKey)>> {
        let mut methods = Vec::new();
        let mut names: HashSet<&str> = HashSet::new();
        let mut visited: HashSet<&TypeKey> = HashSet::new();
        let mut current = Some(factory_type);

        while let Some(key) = current {
            let info = self.type_info(key)?;
            if !visited.insert(&info.key) {
                break;
            }
            for method in info.methods.iter().filter(|m| m.is_nullary()) {
                if let Some(ValueType::Named(produces)) = &method.returns {
                    if names.insert(method.name.as_str()) {
                        methods.push((Arc::from(method.name.as_str()), produces.clone()));
                    }
                }
            }
            current = info.super_type.as_ref();
        }
        Ok(methods)
    }
}
