//! On-disk JSON schema for a Keras-compatible model-interchange format.
//!
//! Every record on the wire is a `{"class_name": ..., "config": {...}}`
//! envelope. The `class_name` tag is a closed discriminant: it uniquely
//! determines the field schema of `config`, so each record family is an
//! adjacently tagged enum and serde does the schema validation.

pub mod error;
mod json;
pub mod layers;
pub mod optimizer;
pub mod types;

pub use error::FormatError;
pub use layers::recurrent::{
    BaseRnnLayerConfig, GruCellConfig, GruLayerConfig, LstmCellConfig, LstmLayerConfig,
    RecurrentLayerSerialization, RnnCellField, RnnCellSerialization, SimpleRnnCellConfig,
    SimpleRnnLayerConfig, StackedRnnCellsConfig,
};
pub use optimizer::{
    OPTIMIZER_OPTIONS, OptimizerOption, OptimizerSerialization, optimizer_label,
};
pub use types::{
    ActivationIdentifier, BaseSerialization, ConstraintSerialization, InitializerSerialization,
    RegularizerSerialization,
};
