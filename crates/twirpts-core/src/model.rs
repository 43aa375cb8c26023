//! The object model handed from the builders to the renderer
//!
//! Entities are built once, top-down, in a single pass. Fields refer to other
//! models by name; the lookup table owned by [`ApiContext`] is the only place
//! those names are resolved.

use crate::RoutePrefix;
use crate::{CompileError, CompileResult};
use std::collections::HashMap;

/// Name of the opaque-scalar model standing in for a wire timestamp
pub const TIMESTAMP_SENTINEL: &str = "Date";

/// Name of the field carrying a map entry's value
pub const MAP_VALUE_FIELD: &str = "value";

/// An enum declaration with its ordered value names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<String>,
}

/// A message type or a synthesized map-entry type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    /// Unique local name
    pub name: String,

    /// Set only on the timestamp sentinel; such models get no declarations
    pub primitive: bool,

    /// Fields in declaration order
    pub fields: Vec<ModelField>,

    /// A to-JSON converter is generated
    pub can_marshal: bool,

    /// A from-JSON converter is generated
    pub can_unmarshal: bool,

    /// Synthesized map-entry model
    pub is_map: bool,

    /// Local type of the `value` field, for map models
    pub map_value_type: Option<String>,

    /// The map's values need no conversion
    pub map_value_type_primitive: bool,
}

impl Model {
    /// Create an empty model
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The opaque-scalar placeholder for wire timestamps
    pub fn timestamp_sentinel() -> Self {
        Self {
            name: TIMESTAMP_SENTINEL.to_string(),
            primitive: true,
            ..Self::default()
        }
    }

    /// The `value` field of a map-entry model
    pub fn map_value_field(&self) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == MAP_VALUE_FIELD)
    }

    /// Whether the renderer may emit converter functions for this model.
    ///
    /// Maps of primitive values are passed through as-is, so they never get
    /// converters even when flagged.
    pub fn has_converters(&self) -> bool {
        !self.primitive && !(self.is_map && self.map_value_type_primitive)
    }
}

/// A field of a [`Model`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelField {
    /// TypeScript identifier (lowerCamelCase)
    pub name: String,

    /// Name in the wire JSON (the schema's field name)
    pub wire_name: String,

    /// TypeScript type
    pub ty: String,

    /// Type in the wire-JSON interface
    pub wire_type: String,

    /// Refers to another model (timestamps excluded)
    pub is_message: bool,

    /// Declared with the repeated label
    pub is_repeated: bool,

    /// Refers to a map-entry model
    pub is_map: bool,

    /// Refers to a map-entry model whose values need no conversion
    pub map_value_type_primitive: bool,
}

impl ModelField {
    /// Element type, without any array suffix.
    pub fn base_type(&self) -> &str {
        self.ty.strip_suffix("[]").unwrap_or(&self.ty)
    }

    /// Repeated field rendered as an array (map fields are not arrays)
    pub fn is_array(&self) -> bool {
        self.is_repeated && !self.is_map
    }
}

/// An RPC service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub package: String,
    pub methods: Vec<ServiceMethod>,
}

/// One RPC method of a [`Service`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMethod {
    /// Local method identifier (`getUser`)
    pub name: String,

    /// Route path segment, the untransformed method name (`GetUser`)
    pub path: String,

    /// Argument identifier (`getUserRequest`)
    pub input_arg: String,

    pub input_type: String,
    pub output_type: String,
}

/// Everything produced for one compilation unit
#[derive(Debug, Clone, Default)]
pub struct ApiContext {
    pub package: String,
    pub models: Vec<Model>,
    pub services: Vec<Service>,
    pub enums: Vec<Enum>,
    pub route_prefix: RoutePrefix,
    lookup: HashMap<String, usize>,
}

impl ApiContext {
    /// Create an empty context for `package`
    pub fn new(package: impl Into<String>, route_prefix: RoutePrefix) -> Self {
        Self {
            package: package.into(),
            route_prefix,
            ..Self::default()
        }
    }

    /// Append a model and register it in the lookup table.
    ///
    /// A second model with the same name replaces the lookup entry; both stay
    /// in the ordered model list.
    pub fn add_model(&mut self, model: Model) {
        let index = self.models.len();
        if self.lookup.insert(model.name.clone(), index).is_some() {
            tracing::warn!(model = %model.name, "duplicate model name, later declaration wins lookups");
        }
        tracing::debug!(model = %model.name, fields = model.fields.len(), "registered model");
        self.models.push(model);
    }

    pub fn add_enum(&mut self, e: Enum) {
        self.enums.push(e);
    }

    pub fn add_service(&mut self, service: Service) {
        self.services.push(service);
    }

    /// Look up a model by local name
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.lookup.get(name).map(|&i| &self.models[i])
    }

    /// Look up a model, failing with a malformed-schema error when absent
    pub fn require_model(&self, name: &str, context: &str) -> CompileResult<&Model> {
        self.model(name)
            .ok_or_else(|| CompileError::missing_model(name, context))
    }

    pub(crate) fn model_index(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// Names of the models currently flagged in each direction, in order
    pub fn flagged_models(&self) -> (Vec<&str>, Vec<&str>) {
        let marshal = self
            .models
            .iter()
            .filter(|m| m.can_marshal)
            .map(|m| m.name.as_str())
            .collect();
        let unmarshal = self
            .models
            .iter()
            .filter(|m| m.can_unmarshal)
            .map(|m| m.name.as_str())
            .collect();
        (marshal, unmarshal)
    }
}

#[cfg(test)]
#[path = "model/model_tests.rs"]
mod model_tests;
