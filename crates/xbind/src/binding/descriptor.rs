// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type binding metadata.
//!
//! A [`ClassDescriptor`] is built once, during its type's single scan, and
//! is immutable once published by the binding context. All name-keyed
//! tables accept a plain `&str` for lookups.

use crate::binding::accessor::Accessor;
use crate::binding::intern::NameToken;
use crate::config::CacheMode;
use crate::model::{EnumConstant, FieldInfo, TypeKey};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Structural member together with the type that declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub owner: TypeKey,
    pub field: FieldInfo,
}

/// Entry of the declaration-order list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropEntry {
    /// Member name.
    pub member: NameToken,
    /// Schema name the member binds to.
    pub xml_name: NameToken,
    pub accessor: Accessor,
}

/// Alternatives sharing one choice member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup {
    member: NameToken,
    alternatives: Vec<NameToken>,
}

impl ChoiceGroup {
    pub(crate) fn new(member: NameToken, alternatives: Vec<NameToken>) -> Self {
        Self {
            member,
            alternatives,
        }
    }

    /// Element name of the declaring member.
    pub fn member(&self) -> &NameToken {
        &self.member
    }

    /// Alternative element names, in declaration order.
    pub fn alternatives(&self) -> &[NameToken] {
        &self.alternatives
    }

    pub fn contains(&self, name: &str) -> bool {
        self.alternatives.iter().any(|alt| alt.as_str() == name)
    }
}

/// Schema simple-type hints with special handling downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    AnySimpleType,
    Date,
    DateTime,
    Time,
}

impl SchemaType {
    /// Parse a schema type name; names without special handling yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "anySimpleType" => Some(Self::AnySimpleType),
            "date" => Some(Self::Date),
            "dateTime" => Some(Self::DateTime),
            "time" => Some(Self::Time),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AnySimpleType => "anySimpleType",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Time => "time",
        }
    }
}

/// Binding metadata of one scanned type.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    pub(crate) type_key: TypeKey,
    pub(crate) mode: CacheMode,
    pub(crate) attribute_accessors: HashMap<NameToken, Accessor>,
    pub(crate) attribute_set: HashSet<Accessor>,
    pub(crate) element_accessors: HashMap<NameToken, Accessor>,
    pub(crate) element_members: HashMap<NameToken, Arc<Member>>,
    pub(crate) prop_order: Vec<PropEntry>,
    pub(crate) required: HashSet<NameToken>,
    pub(crate) value_accessor: Option<Accessor>,
    pub(crate) enum_values: HashMap<NameToken, EnumConstant>,
    pub(crate) choice_groups: HashMap<NameToken, Arc<ChoiceGroup>>,
}

impl ClassDescriptor {
    pub(crate) fn new(type_key: TypeKey, mode: CacheMode) -> Self {
        Self {
            type_key,
            mode,
            attribute_accessors: HashMap::new(),
            attribute_set: HashSet::new(),
            element_accessors: HashMap::new(),
            element_members: HashMap::new(),
            prop_order: Vec::new(),
            required: HashSet::new(),
            value_accessor: None,
            enum_values: HashMap::new(),
            choice_groups: HashMap::new(),
        }
    }

    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Attribute accessor by attribute name (reader mode).
    pub fn attribute_accessor(&self, name: &str) -> Option<&Accessor> {
        self.attribute_accessors.get(name)
    }

    /// Attribute name -> accessor table (reader mode).
    pub fn attribute_accessors(&self) -> &HashMap<NameToken, Accessor> {
        &self.attribute_accessors
    }

    /// Whether `accessor` is emitted as an attribute (writer mode).
    pub fn is_attribute_accessor(&self, accessor: &Accessor) -> bool {
        self.attribute_set.contains(accessor)
    }

    /// Accessors emitted as attributes (writer mode).
    pub fn attribute_accessor_set(&self) -> &HashSet<Accessor> {
        &self.attribute_set
    }

    /// Accessor bound to a schema name (elements, choice alternatives and
    /// attributes).
    pub fn element_accessor(&self, name: &str) -> Option<&Accessor> {
        self.element_accessors.get(name)
    }

    pub fn element_accessors(&self) -> &HashMap<NameToken, Accessor> {
        &self.element_accessors
    }

    /// Structural member bound to an element or choice alternative name.
    pub fn element_member(&self, name: &str) -> Option<&Arc<Member>> {
        self.element_members.get(name)
    }

    /// Element members in emission order, furthest ancestor first.
    pub fn prop_order(&self) -> &[PropEntry] {
        &self.prop_order
    }

    pub fn required_names(&self) -> &HashSet<NameToken> {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Accessor of the member holding the type's textual content.
    pub fn value_accessor(&self) -> Option<&Accessor> {
        self.value_accessor.as_ref()
    }

    /// Enumeration constant by its lexical value.
    pub fn enum_constant(&self, lexical: &str) -> Option<&EnumConstant> {
        self.enum_values.get(lexical)
    }

    pub fn enum_constants(&self) -> &HashMap<NameToken, EnumConstant> {
        &self.enum_values
    }

    /// Choice group an alternative name belongs to.
    pub fn choice_group(&self, name: &str) -> Option<&Arc<ChoiceGroup>> {
        self.choice_groups.get(name)
    }

    pub fn choice_groups(&self) -> &HashMap<NameToken, Arc<ChoiceGroup>> {
        &self.choice_groups
    }
}
