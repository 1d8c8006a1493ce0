// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type scanning: builds and publishes a [`ClassDescriptor`].

use super::accessor::Accessor;
use super::descriptor::{ChoiceGroup, ClassDescriptor, Member, PropEntry, SchemaType};
use super::intern::NameToken;
use super::BindingContext;
use crate::config::{DEFAULT_NAMESPACE, VALUE_NAME};
use crate::error::{Error, Result};
use crate::model::{FieldBinding, FieldInfo, TypeInfo, XmlAccessType};
use std::sync::Arc;

impl BindingContext {
    /// Scan one type whose reachable types were already registered.
    ///
    /// `members` are the type's bound members, ancestors first.
    pub(crate) fn scan(
        &self,
        info: &TypeInfo,
        members: &[Arc<Member>],
        skip_factory: bool,
    ) -> Result<()> {
        let key = &info.key;
        log::debug!("[xbind::scan] scanning {} ({} members)", key, members.len());

        let namespace = self.namespaces.resolve(info, self.provider.as_ref());
        if self.mode.is_reader() {
            if !skip_factory
                && &*namespace != DEFAULT_NAMESPACE
                && !self.factory_bindings.contains_key(&*namespace)
            {
                self.discover_factory(info, &namespace);
            }
        } else if let Some(local) = info.local_name() {
            self.type_element_names
                .entry(key.clone())
                .or_insert_with(|| Arc::from(local));
        }

        let access = self.access_type(key);
        let mut desc = ClassDescriptor::new(key.clone(), self.mode);

        for member in members {
            let field = &member.field;
            if is_skipped(&field.binding, access) {
                continue;
            }

            let (name, accessor) = match &field.binding {
                FieldBinding::Attribute { required, .. } => {
                    self.scan_attribute(info, field, *required, &mut desc)?;
                    continue;
                }
                FieldBinding::Value => {
                    let name = self.interner.intern(VALUE_NAME);
                    let accessor = self.resolve_accessor(&name, info, field)?;
                    if desc.value_accessor.is_some() {
                        return Err(Error::DuplicateValueMember {
                            owner: key.clone(),
                            member: field.name.clone(),
                        });
                    }
                    self.record_hints(field, &accessor);
                    desc.value_accessor = Some(accessor);
                    continue;
                }
                FieldBinding::Element { required, .. } => {
                    let bound = self.scan_element(info, member, &mut desc)?;
                    if *required {
                        desc.required.insert(bound.0.clone());
                    }
                    bound
                }
                FieldBinding::Untagged => self.scan_element(info, member, &mut desc)?,
                FieldBinding::Choice { .. } => {
                    self.scan_choice(info, member, skip_factory, &mut desc)?
                }
                FieldBinding::Transient => continue,
            };

            self.record_hints(field, &accessor);
            desc.prop_order.push(PropEntry {
                member: self.interner.intern(&field.name),
                xml_name: name.clone(),
                accessor,
            });

            let payload = self.generics.field_payload(&member.owner, field)?;
            self.element_types.entry(name).or_insert(payload);
        }

        if !info.see_also.is_empty() {
            self.see_also.insert(key.clone());
            for subtype in &info.see_also {
                if self.claim(subtype) {
                    self.register_context(subtype, skip_factory)?;
                }
            }
        }

        for constant in info.enum_constants() {
            desc.enum_values
                .insert(self.interner.intern(constant.lexical()), constant.clone());
        }

        log::debug!(
            "[xbind::scan] {} in {}: {} elements, {} required, {} enum values",
            key,
            namespace,
            desc.prop_order.len(),
            desc.required.len(),
            desc.enum_values.len()
        );
        self.descriptors
            .entry(key.clone())
            .or_insert_with(|| Arc::new(desc));
        Ok(())
    }

    fn resolve_accessor(&self, name: &NameToken, info: &TypeInfo, field: &FieldInfo) -> Result<Accessor> {
        self.accessors
            .resolve(name, &info.key, &field.value_type, self.provider.as_ref())
    }

    fn scan_attribute(
        &self,
        info: &TypeInfo,
        field: &FieldInfo,
        required: bool,
        desc: &mut ClassDescriptor,
    ) -> Result<()> {
        let name = self.interner.intern(field.xml_name_or_default());
        if required {
            desc.required.insert(name.clone());
        }

        let accessor = self.resolve_accessor(&name, info, field)?;
        self.attribute_names
            .entry(accessor.clone())
            .or_insert_with(|| name.clone());
        if self.mode.is_reader() {
            desc.attribute_accessors
                .insert(name.clone(), accessor.clone());
        } else {
            desc.attribute_set.insert(accessor.clone());
        }
        self.record_hints(field, &accessor);
        desc.element_accessors.insert(name, accessor);
        Ok(())
    }

    fn scan_element(
        &self,
        info: &TypeInfo,
        member: &Arc<Member>,
        desc: &mut ClassDescriptor,
    ) -> Result<(NameToken, Accessor)> {
        let field = &member.field;
        let name = self.interner.intern(field.xml_name_or_default());
        let accessor = self.resolve_accessor(&name, info, field)?;

        desc.element_members
            .insert(name.clone(), Arc::clone(member));
        desc.element_accessors
            .insert(name.clone(), accessor.clone());
        if self.mode.is_writer() {
            self.element_names
                .entry(accessor.clone())
                .or_insert_with(|| name.clone());
        }
        Ok((name, accessor))
    }

    /// A choice binds under its declared schema name (the member name by
    /// default); each alternative maps to
    /// the same member and accessor and shares one [`ChoiceGroup`].
    fn scan_choice(
        &self,
        info: &TypeInfo,
        member: &Arc<Member>,
        skip_factory: bool,
        desc: &mut ClassDescriptor,
    ) -> Result<(NameToken, Accessor)> {
        let field = &member.field;
        let FieldBinding::Choice { alternatives, .. } = &field.binding else {
            return self.scan_element(info, member, desc);
        };

        let own = self.interner.intern(field.xml_name_or_default());
        let accessor = self.resolve_accessor(&own, info, field)?;

        let mut names = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            let name = self.interner.intern(&alternative.name);
            self.element_types
                .entry(name.clone())
                .or_insert_with(|| alternative.value_type.clone());
            desc.element_members
                .insert(name.clone(), Arc::clone(member));
            desc.element_accessors
                .insert(name.clone(), accessor.clone());

            if let Some(alt_key) = alternative.value_type.as_named() {
                if self.claim(alt_key) {
                    log::debug!("[xbind::scan] choice {} registers {}", own, alt_key);
                    self.register_context(alt_key, skip_factory)?;
                }
            }
            names.push(name);
        }

        let group = Arc::new(ChoiceGroup::new(own.clone(), names));
        for alternative in group.alternatives() {
            desc.choice_groups
                .insert(alternative.clone(), Arc::clone(&group));
        }

        desc.element_members
            .insert(own.clone(), Arc::clone(member));
        desc.element_accessors
            .insert(own.clone(), accessor.clone());
        if self.mode.is_writer() {
            self.element_names
                .entry(accessor.clone())
                .or_insert_with(|| own.clone());
        }
        Ok((own, accessor))
    }

    fn record_hints(&self, field: &FieldInfo, accessor: &Accessor) {
        if let Some(adapter) = &field.adapter {
            self.adapters
                .entry(accessor.clone())
                .or_insert_with(|| Arc::from(adapter.as_str()));
        }
        if let Some(schema_type) = field.schema_type.as_deref().and_then(SchemaType::from_name) {
            self.schema_types
                .entry(accessor.clone())
                .or_insert(schema_type);
        }
    }
}

/// `Field` access binds every member not marked transient; any other mode
/// binds tagged members only.
fn is_skipped(binding: &FieldBinding, access: Option<XmlAccessType>) -> bool {
    match binding {
        FieldBinding::Transient => true,
        FieldBinding::Untagged => access != Some(XmlAccessType::Field),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_access_skips_only_transient() {
        let field = Some(XmlAccessType::Field);
        assert!(is_skipped(&FieldBinding::Transient, field));
        assert!(!is_skipped(&FieldBinding::Untagged, field));
        assert!(!is_skipped(&FieldBinding::Value, field));
    }

    #[test]
    fn test_other_access_modes_skip_untagged() {
        for access in [
            None,
            Some(XmlAccessType::Property),
            Some(XmlAccessType::PublicMember),
            Some(XmlAccessType::None),
        ] {
            assert!(is_skipped(&FieldBinding::Untagged, access));
            assert!(is_skipped(&FieldBinding::Transient, access));
            assert!(!is_skipped(
                &FieldBinding::Element {
                    name: None,
                    required: false
                },
                access
            ));
            assert!(!is_skipped(
                &FieldBinding::Choice {
                    name: None,
                    alternatives: Vec::new()
                },
                access
            ));
        }
    }
}
