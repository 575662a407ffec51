//! Recurrent layer and cell records: SimpleRNN, GRU, LSTM and stacked cells.

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::json;
use crate::types::{
    ActivationIdentifier, ConstraintSerialization, InitializerSerialization,
    RegularizerSerialization,
};

/// Hyperparameters shared by every non-composite recurrent cell.
///
/// Only `units` is required; absent optional fields are left to the
/// loader's defaults and omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleRnnCellConfig {
    pub units: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<ActivationIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_bias: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_initializer: Option<InitializerSerialization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_initializer: Option<InitializerSerialization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_initializer: Option<InitializerSerialization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_regularizer: Option<RegularizerSerialization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_regularizer: Option<RegularizerSerialization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_regularizer: Option<RegularizerSerialization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_constraint: Option<ConstraintSerialization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_constraint: Option<ConstraintSerialization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_constraint: Option<ConstraintSerialization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropout: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_dropout: Option<f32>,
}

/// GRU cell hyperparameters: the simple-cell set plus gate activation and
/// kernel implementation selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GruCellConfig {
    #[serde(flatten)]
    pub base: SimpleRnnCellConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_activation: Option<ActivationIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<u32>,
}

/// LSTM cell hyperparameters: the simple-cell set plus gate activation,
/// forget-gate bias initialization and kernel implementation selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LstmCellConfig {
    #[serde(flatten)]
    pub base: SimpleRnnCellConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrent_activation: Option<ActivationIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_forget_bias: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<u32>,
}

/// A composite cell formed by sequencing heterogeneous cell records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackedRnnCellsConfig {
    pub cells: Vec<RnnCellSerialization>,
}

/// A recurrent cell record, discriminated by its `class_name` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class_name", content = "config")]
pub enum RnnCellSerialization {
    #[serde(rename = "SimpleRNNCell")]
    SimpleRnnCell(SimpleRnnCellConfig),
    #[serde(rename = "GRUCell")]
    GruCell(GruCellConfig),
    #[serde(rename = "LSTMCell")]
    LstmCell(LstmCellConfig),
    #[serde(rename = "StackedRNNCells")]
    StackedRnnCells(StackedRnnCellsConfig),
}

impl RnnCellSerialization {
    /// The closed set of cell `class_name` tags.
    pub const CLASS_NAMES: [&'static str; 4] =
        ["SimpleRNNCell", "GRUCell", "LSTMCell", "StackedRNNCells"];

    /// The wire tag of this record.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::SimpleRnnCell(_) => "SimpleRNNCell",
            Self::GruCell(_) => "GRUCell",
            Self::LstmCell(_) => "LSTMCell",
            Self::StackedRnnCells(_) => "StackedRNNCells",
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, FormatError> {
        json::from_tagged_str(s, &Self::CLASS_NAMES)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, FormatError> {
        json::from_tagged_value(value, &Self::CLASS_NAMES)
    }

    pub fn to_json_string(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The `cell` field of a recurrent layer: one cell record, or a list the
/// loader treats as an implicit stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RnnCellField {
    Single(RnnCellSerialization),
    Stack(Vec<RnnCellSerialization>),
}

/// Wrapper fields shared by every recurrent layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseRnnLayerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<RnnCellField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_sequences: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_state: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_backwards: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stateful: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unroll: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_dim: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_length: Option<usize>,
}

/// A SimpleRNN layer: the wrapper fields plus its cell hyperparameters
/// carried inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleRnnLayerConfig {
    #[serde(flatten)]
    pub base: BaseRnnLayerConfig,
    #[serde(flatten)]
    pub params: SimpleRnnCellConfig,
}

/// A GRU layer: the wrapper fields plus GRU cell hyperparameters inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GruLayerConfig {
    #[serde(flatten)]
    pub base: BaseRnnLayerConfig,
    #[serde(flatten)]
    pub params: GruCellConfig,
}

/// An LSTM layer: the wrapper fields plus LSTM cell hyperparameters inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LstmLayerConfig {
    #[serde(flatten)]
    pub base: BaseRnnLayerConfig,
    #[serde(flatten)]
    pub params: LstmCellConfig,
}

/// A recurrent layer record, discriminated by its `class_name` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class_name", content = "config")]
pub enum RecurrentLayerSerialization {
    #[serde(rename = "SimpleRNN")]
    SimpleRnn(SimpleRnnLayerConfig),
    #[serde(rename = "GRU")]
    Gru(GruLayerConfig),
    #[serde(rename = "LSTM")]
    Lstm(LstmLayerConfig),
}

impl RecurrentLayerSerialization {
    /// The closed set of recurrent layer `class_name` tags.
    pub const CLASS_NAMES: [&'static str; 3] = ["SimpleRNN", "GRU", "LSTM"];

    /// The wire tag of this record.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::SimpleRnn(_) => "SimpleRNN",
            Self::Gru(_) => "GRU",
            Self::Lstm(_) => "LSTM",
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, FormatError> {
        json::from_tagged_str(s, &Self::CLASS_NAMES)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, FormatError> {
        json::from_tagged_value(value, &Self::CLASS_NAMES)
    }

    pub fn to_json_string(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_cell(units: usize) -> SimpleRnnCellConfig {
        SimpleRnnCellConfig {
            units,
            ..Default::default()
        }
    }

    #[test]
    fn test_lstm_layer_document_parses() {
        let doc = r#"{
            "class_name": "LSTM",
            "config": {
                "units": 64,
                "activation": "tanh",
                "recurrent_activation": "hard_sigmoid",
                "use_bias": true,
                "kernel_initializer": {"class_name": "GlorotUniform"},
                "recurrent_initializer": {"class_name": "Orthogonal"},
                "bias_initializer": {"class_name": "Zeros"},
                "unit_forget_bias": true,
                "dropout": 0.2,
                "recurrent_dropout": 0.1,
                "implementation": 2,
                "return_sequences": true,
                "go_backwards": false,
                "stateful": false,
                "unroll": false,
                "input_dim": 32,
                "input_length": 10
            }
        }"#;

        let layer = RecurrentLayerSerialization::from_json_str(doc).unwrap();
        assert_eq!(layer.class_name(), "LSTM");

        let RecurrentLayerSerialization::Lstm(config) = layer else {
            panic!("expected an LSTM layer");
        };
        assert_eq!(config.params.base.units, 64);
        assert_eq!(config.params.base.activation.as_deref(), Some("tanh"));
        assert_eq!(
            config.params.recurrent_activation.as_deref(),
            Some("hard_sigmoid")
        );
        assert_eq!(config.params.unit_forget_bias, Some(true));
        assert_eq!(config.params.implementation, Some(2));
        assert_eq!(
            config
                .params
                .base
                .kernel_initializer
                .as_ref()
                .map(|i| i.class_name.as_str()),
            Some("GlorotUniform")
        );
        assert_eq!(config.base.return_sequences, Some(true));
        assert_eq!(config.base.input_dim, Some(32));
        assert_eq!(config.base.input_length, Some(10));
        assert_eq!(config.base.return_state, None);
    }

    #[test]
    fn test_missing_units_rejected() {
        let doc = r#"{"class_name": "SimpleRNNCell", "config": {"activation": "tanh"}}"#;
        let err = RnnCellSerialization::from_json_str(doc).unwrap_err();
        assert!(matches!(err, FormatError::Malformed(_)));
        assert!(err.to_string().contains("units"));
    }

    #[test]
    fn test_wrong_typed_field_rejected() {
        let doc = r#"{"class_name": "SimpleRNNCell", "config": {"units": "sixty-four"}}"#;
        assert!(matches!(
            RnnCellSerialization::from_json_str(doc),
            Err(FormatError::Malformed(_))
        ));
    }

    #[test]
    fn test_unknown_class_name_rejected() {
        let doc = r#"{"class_name": "BidirectionalRNN", "config": {"units": 8}}"#;
        let err = RecurrentLayerSerialization::from_json_str(doc).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnknownClassName { ref class_name } if class_name == "BidirectionalRNN"
        ));
    }

    #[test]
    fn test_cell_envelope_on_wire() {
        let cell = RnnCellSerialization::GruCell(GruCellConfig {
            base: simple_cell(16),
            recurrent_activation: Some("sigmoid".to_owned()),
            implementation: Some(1),
        });

        let value: serde_json::Value =
            serde_json::from_str(&cell.to_json_string().unwrap()).unwrap();
        assert_eq!(value["class_name"], "GRUCell");
        assert_eq!(value["config"]["units"], 16);
        assert_eq!(value["config"]["recurrent_activation"], "sigmoid");
        assert_eq!(value["config"]["implementation"], 1);
        // Absent optional fields stay off the wire.
        assert!(value["config"].get("dropout").is_none());
        assert!(value["config"].get("use_bias").is_none());
    }

    #[test]
    fn test_stacked_cells_preserve_order_and_variants() {
        let doc = r#"{
            "class_name": "StackedRNNCells",
            "config": {
                "cells": [
                    {"class_name": "LSTMCell", "config": {"units": 32}},
                    {"class_name": "GRUCell", "config": {"units": 16}},
                    {"class_name": "SimpleRNNCell", "config": {"units": 8}}
                ]
            }
        }"#;

        let cell = RnnCellSerialization::from_json_str(doc).unwrap();
        let RnnCellSerialization::StackedRnnCells(stack) = &cell else {
            panic!("expected stacked cells");
        };
        let tags: Vec<_> = stack.cells.iter().map(|c| c.class_name()).collect();
        assert_eq!(tags, ["LSTMCell", "GRUCell", "SimpleRNNCell"]);

        let reparsed =
            RnnCellSerialization::from_json_str(&cell.to_json_string().unwrap()).unwrap();
        assert_eq!(reparsed, cell);
    }

    #[test]
    fn test_layer_cell_field_accepts_single_or_list() {
        let single = r#"{
            "class_name": "SimpleRNN",
            "config": {
                "units": 4,
                "cell": {"class_name": "SimpleRNNCell", "config": {"units": 4}}
            }
        }"#;
        let layer = RecurrentLayerSerialization::from_json_str(single).unwrap();
        let RecurrentLayerSerialization::SimpleRnn(config) = &layer else {
            panic!("expected a SimpleRNN layer");
        };
        assert!(matches!(config.base.cell, Some(RnnCellField::Single(_))));

        let list = r#"{
            "class_name": "SimpleRNN",
            "config": {
                "units": 4,
                "cell": [
                    {"class_name": "SimpleRNNCell", "config": {"units": 4}},
                    {"class_name": "LSTMCell", "config": {"units": 4}}
                ]
            }
        }"#;
        let layer = RecurrentLayerSerialization::from_json_str(list).unwrap();
        let RecurrentLayerSerialization::SimpleRnn(config) = &layer else {
            panic!("expected a SimpleRNN layer");
        };
        let Some(RnnCellField::Stack(cells)) = &config.base.cell else {
            panic!("expected a cell list");
        };
        assert_eq!(cells.len(), 2);
    }

    #[test]
    fn test_gru_layer_round_trip() {
        let layer = RecurrentLayerSerialization::Gru(GruLayerConfig {
            base: BaseRnnLayerConfig {
                return_sequences: Some(true),
                stateful: Some(false),
                ..Default::default()
            },
            params: GruCellConfig {
                base: SimpleRnnCellConfig {
                    dropout: Some(0.5),
                    ..simple_cell(128)
                },
                recurrent_activation: Some("hard_sigmoid".to_owned()),
                implementation: None,
            },
        });

        let reparsed =
            RecurrentLayerSerialization::from_json_str(&layer.to_json_string().unwrap()).unwrap();
        assert_eq!(reparsed, layer);
    }
}
