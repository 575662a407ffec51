use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The wire identifier naming an activation function.
///
/// The set of valid names is owned by the activation section of the format,
/// so it is carried as an opaque string at this layer.
pub type ActivationIdentifier = String;

/// A `{class_name, config}` record whose config payload is owned by another
/// section of the format.
///
/// Initializers, regularizers and constraints all use this envelope; their
/// config fields are carried through without being interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseSerialization {
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub config: Map<String, Value>,
}

pub type InitializerSerialization = BaseSerialization;
pub type RegularizerSerialization = BaseSerialization;
pub type ConstraintSerialization = BaseSerialization;
