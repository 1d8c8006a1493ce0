// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeInfo.

use crate::binding::method_name;
use crate::config::{GETTER_PREFIX, PREDICATE_PREFIX, SETTER_PREFIX};
use crate::model::{
    EnumConstant, FieldBinding, FieldInfo, MethodInfo, RootElement, TypeInfo, TypeKey, TypeKind,
    ValueType, XmlAccessType, XmlTypeInfo,
};

/// Builder for creating TypeInfo instances.
#[derive(Debug)]
pub struct TypeInfoBuilder {
    info: TypeInfo,
}

impl TypeInfoBuilder {
    /// Create a new builder for a class.
    pub fn class(key: impl Into<TypeKey>) -> Self {
        Self {
            info: TypeInfo::new(key, TypeKind::Class),
        }
    }

    /// Create a new builder for an enumeration.
    pub fn enumeration(key: impl Into<TypeKey>) -> Self {
        Self {
            info: TypeInfo::new(key, TypeKind::Enum(Vec::new())),
        }
    }

    /// Set the supertype.
    pub fn extends(mut self, super_type: impl Into<TypeKey>) -> Self {
        self.info.super_type = Some(super_type.into());
        self
    }

    /// Mark as a root element.
    pub fn root_element(mut self, name: impl Into<String>) -> Self {
        self.info.root_element = Some(RootElement {
            name: name.into(),
            namespace: None,
        });
        self
    }

    /// Mark as a root element in an explicit namespace.
    pub fn root_element_in(mut self, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.info.root_element = Some(RootElement {
            name: name.into(),
            namespace: Some(namespace.into()),
        });
        self
    }

    /// Mark as a schema type.
    pub fn xml_type(mut self, name: impl Into<String>) -> Self {
        self.xml_type_mut().name = name.into();
        self
    }

    /// Mark as a schema type in an explicit namespace.
    pub fn xml_type_in(mut self, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let xml_type = self.xml_type_mut();
        xml_type.name = name.into();
        xml_type.namespace = Some(namespace.into());
        self
    }

    /// Declare member emission order (implies a schema-type annotation).
    pub fn prop_order(mut self, order: &[&str]) -> Self {
        self.xml_type_mut().prop_order = order.iter().map(|s| (*s).to_string()).collect();
        self
    }

    fn xml_type_mut(&mut self) -> &mut XmlTypeInfo {
        self.info.xml_type.get_or_insert_with(XmlTypeInfo::default)
    }

    /// Set the access mode.
    pub fn access_type(mut self, access_type: XmlAccessType) -> Self {
        self.info.access_type = Some(access_type);
        self
    }

    /// Declare a polymorphic subtype.
    pub fn see_also(mut self, subtype: impl Into<TypeKey>) -> Self {
        self.info.see_also.push(subtype.into());
        self
    }

    /// Add a member without generating accessors.
    pub fn field(mut self, field: FieldInfo) -> Self {
        self.info.fields.push(field);
        self
    }

    /// Add a method.
    pub fn method(mut self, method: MethodInfo) -> Self {
        self.info.methods.push(method);
        self
    }

    /// Add a member together with the conventional accessors for its
    /// schema name: a getter (`is` prefix for booleans) and, unless the
    /// member is a collection, a setter.
    pub fn property(mut self, field: FieldInfo) -> Self {
        let xml_name = match &field.binding {
            FieldBinding::Untagged | FieldBinding::Transient => {
                field.name.clone()
            }
            _ => field.xml_name_or_default().to_string(),
        };
        self.add_accessors(&xml_name, &field.value_type);
        self.info.fields.push(field);
        self
    }

    fn add_accessors(&mut self, xml_name: &str, value_type: &ValueType) {
        let prefix = if value_type.is_boolean() {
            PREDICATE_PREFIX
        } else {
            GETTER_PREFIX
        };
        self.info.methods.push(MethodInfo::getter(
            method_name(prefix, xml_name),
            value_type.clone(),
        ));
        if !value_type.is_collection() {
            self.info.methods.push(MethodInfo::setter(
                method_name(SETTER_PREFIX, xml_name),
                value_type.clone(),
            ));
        }
    }

    /// Add an enumeration constant.
    pub fn constant(self, name: impl Into<String>) -> Self {
        self.push_constant(name.into(), None)
    }

    /// Add an enumeration constant with an alternate textual value.
    pub fn constant_with_value(self, name: impl Into<String>, xml_value: impl Into<String>) -> Self {
        self.push_constant(name.into(), Some(xml_value.into()))
    }

    fn push_constant(mut self, name: String, xml_value: Option<String>) -> Self {
        if let TypeKind::Enum(constants) = &mut self.info.kind {
            let ordinal = u32::try_from(constants.len()).unwrap_or(u32::MAX);
            constants.push(EnumConstant {
                name,
                xml_value,
                ordinal,
            });
        }
        self
    }

    /// Build the TypeInfo.
    pub fn build(self) -> TypeInfo {
        self.info
    }
}
