//! Device template catalog.
//!
//! The catalog maps template ids (device models) to their [`DeviceTemplate`]
//! and hands out [`DeviceRef`] handles for placed instances.

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::{
    device::{DeviceRef, DeviceTemplate},
    identifier::Id,
};

/// Errors raised while registering or resolving device templates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown device template `{0}`")]
    UnknownTemplate(Id),

    #[error("device template `{0}` is already registered")]
    DuplicateTemplate(Id),
}

/// Looks up the width class and unit height of a device template.
pub trait TemplateResolver {
    /// Returns the template registered under `template_id`, if any.
    fn resolve(&self, template_id: Id) -> Option<DeviceTemplate>;

    /// Resolves `template_id` and creates a handle for instance `instance_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTemplate`] when the template is missing.
    fn instantiate(&self, instance_id: Id, template_id: Id) -> Result<DeviceRef, CatalogError> {
        self.resolve(template_id)
            .map(|template| DeviceRef::from_template(instance_id, template))
            .ok_or(CatalogError::UnknownTemplate(template_id))
    }
}

/// In-memory catalog of device templates, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct DeviceCatalog {
    templates: IndexMap<Id, DeviceTemplate>,
}

impl DeviceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateTemplate`] if `template_id` is taken.
    pub fn register(
        &mut self,
        template_id: Id,
        template: DeviceTemplate,
    ) -> Result<(), CatalogError> {
        if self.templates.contains_key(&template_id) {
            return Err(CatalogError::DuplicateTemplate(template_id));
        }
        debug!(
            template_id = template_id.to_string(),
            width_class = template.width_class().name(),
            unit_height = template.unit_height();
            "Registered device template"
        );
        self.templates.insert(template_id, template);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterates over registered templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &DeviceTemplate)> {
        self.templates.iter().map(|(id, template)| (*id, template))
    }
}

impl TemplateResolver for DeviceCatalog {
    fn resolve(&self, template_id: Id) -> Option<DeviceTemplate> {
        self.templates.get(&template_id).copied()
    }
}
