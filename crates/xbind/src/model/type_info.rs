// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host type descriptions consumed by the binding scanner.
//!
//! A host type carries its schema-binding annotations (root element, schema
//! type, access mode, see-also subtypes), its structural members with their
//! declared value types, and the accessor methods available on it.

use crate::config::DEFAULT_MARKER;
use std::fmt;
use std::sync::Arc;

/// Identity of a host type: its fully-qualified, dot-separated name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Arc<str>);

impl TypeKey {
    /// Create a type key from a fully-qualified name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Fully-qualified name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Enclosing package (empty for the default package).
    pub fn package(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Name without the package prefix.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Well-known value types understood without scanning.
///
/// `Primitive*` variants are the non-nullable forms of their boxed
/// counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    String,
    Long,
    PrimitiveLong,
    Int,
    PrimitiveInt,
    Short,
    PrimitiveShort,
    Byte,
    PrimitiveByte,
    Float,
    PrimitiveFloat,
    Double,
    PrimitiveDouble,
    Boolean,
    PrimitiveBoolean,
    BigInteger,
    BigDecimal,
    /// Sequence of boxed bytes.
    ByteArray,
    /// Sequence of primitive bytes.
    PrimitiveByteArray,
    /// XML Gregorian calendar value.
    Calendar,
    Duration,
    QName,
    /// Untyped value.
    Object,
}

impl BuiltinType {
    /// Boolean-valued types use predicate-style getters.
    pub fn is_boolean(self) -> bool {
        matches!(self, Self::Boolean | Self::PrimitiveBoolean)
    }

    /// Type name as it appears in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Long => "Long",
            Self::PrimitiveLong => "long",
            Self::Int => "Integer",
            Self::PrimitiveInt => "int",
            Self::Short => "Short",
            Self::PrimitiveShort => "short",
            Self::Byte => "Byte",
            Self::PrimitiveByte => "byte",
            Self::Float => "Float",
            Self::PrimitiveFloat => "float",
            Self::Double => "Double",
            Self::PrimitiveDouble => "double",
            Self::Boolean => "Boolean",
            Self::PrimitiveBoolean => "boolean",
            Self::BigInteger => "BigInteger",
            Self::BigDecimal => "BigDecimal",
            Self::ByteArray => "Byte[]",
            Self::PrimitiveByteArray => "byte[]",
            Self::Calendar => "XMLGregorianCalendar",
            Self::Duration => "Duration",
            Self::QName => "QName",
            Self::Object => "Object",
        }
    }
}

/// Declared value type of a member, accessor parameter or return.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Well-known scalar type.
    Builtin(BuiltinType),
    /// Host type (class or enumeration).
    Named(TypeKey),
    /// List container. `None` when no element type was declared.
    List(Option<Box<ValueType>>),
}

impl ValueType {
    /// Host type reference.
    pub fn named(key: impl Into<TypeKey>) -> Self {
        Self::Named(key.into())
    }

    /// List of `element`.
    pub fn list_of(element: ValueType) -> Self {
        Self::List(Some(Box::new(element)))
    }

    /// List without a declared element type.
    pub fn raw_list() -> Self {
        Self::List(None)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Builtin(b) if b.is_boolean())
    }

    /// Host type key, if this is a named type.
    pub fn as_named(&self) -> Option<&TypeKey> {
        match self {
            Self::Named(key) => Some(key),
            _ => None,
        }
    }
}

impl From<BuiltinType> for ValueType {
    fn from(builtin: BuiltinType) -> Self {
        Self::Builtin(builtin)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(b) => f.write_str(b.name()),
            Self::Named(key) => write!(f, "{}", key),
            Self::List(Some(element)) => write!(f, "List<{}>", element),
            Self::List(None) => f.write_str("List"),
        }
    }
}

/// Access mode deciding which untagged members bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlAccessType {
    /// Every member binds unless marked transient.
    Field,
    /// Only tagged members bind.
    Property,
    /// Only tagged members bind.
    PublicMember,
    /// Only tagged members bind.
    None,
}

/// Root-element annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootElement {
    pub name: String,
    pub namespace: Option<String>,
}

/// Schema-type annotation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlTypeInfo {
    /// Local type name (may be empty for anonymous types).
    pub name: String,
    pub namespace: Option<String>,
    /// Member names in emission order; empty means declaration order.
    pub prop_order: Vec<String>,
}

/// One alternative of a choice declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    /// Element name of the alternative.
    pub name: String,
    /// Declared type carried under that name.
    pub value_type: ValueType,
}

impl ElementRef {
    pub fn new(name: impl Into<String>, value_type: impl Into<ValueType>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
        }
    }
}

/// Schema-binding tag attached to a structural member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldBinding {
    /// No binding annotation.
    Untagged,
    /// Explicitly excluded from binding.
    Transient,
    /// Bound to an XML attribute.
    Attribute { name: Option<String>, required: bool },
    /// Bound to a child element.
    Element { name: Option<String>, required: bool },
    /// The type's sole textual content.
    Value,
    /// Element slot satisfied by one of several named alternatives.
    Choice {
        name: Option<String>,
        alternatives: Vec<ElementRef>,
    },
}

/// Structural member of a host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Member name as declared on the type.
    pub name: String,
    /// Declared value type.
    pub value_type: ValueType,
    pub binding: FieldBinding,
    /// Type adapter applied when converting the value.
    pub adapter: Option<String>,
    /// Schema simple-type hint (`date`, `dateTime`, ...).
    pub schema_type: Option<String>,
}

impl FieldInfo {
    fn with_binding(name: impl Into<String>, value_type: ValueType, binding: FieldBinding) -> Self {
        Self {
            name: name.into(),
            value_type,
            binding,
            adapter: None,
            schema_type: None,
        }
    }

    /// Member without binding annotations.
    pub fn untagged(name: impl Into<String>, value_type: impl Into<ValueType>) -> Self {
        Self::with_binding(name, value_type.into(), FieldBinding::Untagged)
    }

    /// Member excluded from binding.
    pub fn transient(name: impl Into<String>, value_type: impl Into<ValueType>) -> Self {
        Self::with_binding(name, value_type.into(), FieldBinding::Transient)
    }

    /// Member bound to an attribute named after the member.
    pub fn attribute(name: impl Into<String>, value_type: impl Into<ValueType>) -> Self {
        Self::with_binding(
            name,
            value_type.into(),
            FieldBinding::Attribute {
                name: None,
                required: false,
            },
        )
    }

    /// Member bound to a child element named after the member.
    pub fn element(name: impl Into<String>, value_type: impl Into<ValueType>) -> Self {
        Self::with_binding(
            name,
            value_type.into(),
            FieldBinding::Element {
                name: None,
                required: false,
            },
        )
    }

    /// Member holding the type's textual content.
    pub fn value(name: impl Into<String>, value_type: impl Into<ValueType>) -> Self {
        Self::with_binding(name, value_type.into(), FieldBinding::Value)
    }

    /// Member bound to a choice of named alternatives.
    pub fn choice(
        name: impl Into<String>,
        value_type: impl Into<ValueType>,
        alternatives: Vec<ElementRef>,
    ) -> Self {
        Self::with_binding(
            name,
            value_type.into(),
            FieldBinding::Choice {
                name: None,
                alternatives,
            },
        )
    }

    /// Override the schema name of an attribute, element or choice member.
    pub fn xml_name(mut self, xml_name: impl Into<String>) -> Self {
        match &mut self.binding {
            FieldBinding::Attribute { name, .. }
            | FieldBinding::Element { name, .. }
            | FieldBinding::Choice { name, .. } => {
                *name = Some(xml_name.into());
            }
            _ => {}
        }
        self
    }

    /// Mark an attribute or element member as mandatory.
    pub fn required(mut self) -> Self {
        match &mut self.binding {
            FieldBinding::Attribute { required, .. } | FieldBinding::Element { required, .. } => {
                *required = true;
            }
            _ => {}
        }
        self
    }

    /// Attach a type adapter.
    pub fn with_adapter(mut self, adapter: impl Into<String>) -> Self {
        self.adapter = Some(adapter.into());
        self
    }

    /// Attach a schema simple-type hint.
    pub fn with_schema_type(mut self, schema_type: impl Into<String>) -> Self {
        self.schema_type = Some(schema_type.into());
        self
    }

    /// Schema-local name this member binds to.
    ///
    /// Falls back to the member name when no explicit name (or the
    /// `##default` marker) was declared.
    pub fn xml_name_or_default(&self) -> &str {
        match &self.binding {
            FieldBinding::Attribute { name, .. }
            | FieldBinding::Element { name, .. }
            | FieldBinding::Choice { name, .. } => {
                match name.as_deref() {
                    Some(n) if !n.is_empty() && n != DEFAULT_MARKER => n,
                    _ => &self.name,
                }
            }
            FieldBinding::Value => crate::config::VALUE_NAME,
            _ => &self.name,
        }
    }
}

/// Accessor method available on a host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub params: Vec<ValueType>,
    pub returns: Option<ValueType>,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, params: Vec<ValueType>, returns: Option<ValueType>) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
        }
    }

    /// Zero-argument method returning `returns`.
    pub fn getter(name: impl Into<String>, returns: impl Into<ValueType>) -> Self {
        Self::new(name, Vec::new(), Some(returns.into()))
    }

    /// One-argument method returning nothing.
    pub fn setter(name: impl Into<String>, param: impl Into<ValueType>) -> Self {
        Self::new(name, vec![param.into()], None)
    }

    pub fn is_nullary(&self) -> bool {
        self.params.is_empty()
    }
}

/// Enumeration constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    /// Declared constant name.
    pub name: String,
    /// Alternate textual value used on the wire.
    pub xml_value: Option<String>,
    pub ordinal: u32,
}

impl EnumConstant {
    /// Text this constant reads and writes as.
    pub fn lexical(&self) -> &str {
        self.xml_value.as_deref().unwrap_or(&self.name)
    }
}

/// Shape of a host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Enum(Vec<EnumConstant>),
}

/// Complete description of one host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub key: TypeKey,
    pub kind: TypeKind,
    pub super_type: Option<TypeKey>,
    pub root_element: Option<RootElement>,
    pub xml_type: Option<XmlTypeInfo>,
    pub access_type: Option<XmlAccessType>,
    /// Polymorphic subtypes declared alongside this type.
    pub see_also: Vec<TypeKey>,
    /// Members in declaration order.
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
}

impl TypeInfo {
    /// Create a class with no annotations.
    pub fn new(key: impl Into<TypeKey>, kind: TypeKind) -> Self {
        Self {
            key: key.into(),
            kind,
            super_type: None,
            root_element: None,
            xml_type: None,
            access_type: None,
            see_also: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Carries a root-element or schema-type annotation.
    pub fn is_schema_bound(&self) -> bool {
        self.root_element.is_some() || self.xml_type.is_some()
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    /// Enumeration constants (empty for classes).
    pub fn enum_constants(&self) -> &[EnumConstant] {
        match &self.kind {
            TypeKind::Enum(constants) => constants,
            TypeKind::Class => &[],
        }
    }

    /// Schema name of this type: root element name, else schema type name.
    pub fn schema_name(&self) -> Option<&str> {
        match (&self.root_element, &self.xml_type) {
            (Some(root), _) => Some(&root.name),
            (None, Some(xml_type)) => Some(&xml_type.name),
            (None, None) => None,
        }
    }

    /// Local element name used when writing: schema type name, else root
    /// element name.
    pub fn local_name(&self) -> Option<&str> {
        match &self.xml_type {
            Some(xml_type) if !xml_type.name.is_empty() => Some(&xml_type.name),
            _ => self.root_element.as_ref().map(|root| root.name.as_str()),
        }
    }

    /// Zero-argument method declared on this type.
    pub fn nullary_method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.is_nullary())
    }

    /// One-argument method declared on this type whose parameter is `param`.
    pub fn unary_method(&self, name: &str, param: &ValueType) -> Option<&MethodInfo> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.params.len() == 1 && m.params[0] == *param)
    }

    /// Field declared directly on this type.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Package-level schema annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    /// Default namespace for every type in the package.
    pub namespace: Option<String>,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }
}
