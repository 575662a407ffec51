//! Optimizer records and their display-label table.

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::json;

/// An optimizer record, discriminated by its `class_name` tag.
///
/// Each variant carries exactly the hyperparameters the matching trainer
/// writes into the `config` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class_name", content = "config")]
pub enum OptimizerSerialization {
    #[serde(rename = "AdadeltaOptimizer")]
    Adadelta {
        learning_rate: f32,
        rho: f32,
        epsilon: f32,
    },
    #[serde(rename = "AdagradOptimizer")]
    Adagrad {
        learning_rate: f32,
        initial_accumulator_value: f32,
    },
    #[serde(rename = "AdamOptimizer")]
    Adam {
        learning_rate: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    },
    #[serde(rename = "AdamaxOptimizer")]
    Adamax {
        learning_rate: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decay: Option<f32>,
    },
    #[serde(rename = "MomentumOptimizer")]
    Momentum {
        learning_rate: f32,
        momentum: f32,
        use_nesterov: bool,
    },
    #[serde(rename = "RMSPropOptimizer")]
    RmsProp {
        learning_rate: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decay: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        momentum: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        epsilon: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        centered: Option<bool>,
    },
    #[serde(rename = "SGDOptimizer")]
    Sgd { learning_rate: f32 },
}

impl OptimizerSerialization {
    /// The closed set of optimizer `class_name` tags.
    pub const CLASS_NAMES: [&'static str; 7] = [
        "AdadeltaOptimizer",
        "AdagradOptimizer",
        "AdamOptimizer",
        "AdamaxOptimizer",
        "MomentumOptimizer",
        "RMSPropOptimizer",
        "SGDOptimizer",
    ];

    /// The wire tag of this record.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Adadelta { .. } => "AdadeltaOptimizer",
            Self::Adagrad { .. } => "AdagradOptimizer",
            Self::Adam { .. } => "AdamOptimizer",
            Self::Adamax { .. } => "AdamaxOptimizer",
            Self::Momentum { .. } => "MomentumOptimizer",
            Self::RmsProp { .. } => "RMSPropOptimizer",
            Self::Sgd { .. } => "SGDOptimizer",
        }
    }

    /// Human-readable label for selection UIs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Adadelta { .. } => "Adadelta",
            Self::Adagrad { .. } => "Adagrad",
            Self::Adam { .. } => "Adam",
            Self::Adamax { .. } => "Adamax",
            Self::Momentum { .. } => "Momentum",
            Self::RmsProp { .. } => "RMSProp",
            Self::Sgd { .. } => "SGD",
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

/// A `{value, label}` pair describing one valid optimizer.
///
/// The `value` is the serializable `class_name` tag; the `label` is the
/// friendlier name shown in selection UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// The valid optimizers with their display labels, in wire-tag order.
pub const OPTIMIZER_OPTIONS: [OptimizerOption; 7] = [
    OptimizerOption { value: "AdadeltaOptimizer", label: "Adadelta" },
    OptimizerOption { value: "AdagradOptimizer", label: "Adagrad" },
    OptimizerOption { value: "AdamOptimizer", label: "Adam" },
    OptimizerOption { value: "AdamaxOptimizer", label: "Adamax" },
    OptimizerOption { value: "MomentumOptimizer", label: "Momentum" },
    OptimizerOption { value: "RMSPropOptimizer", label: "RMSProp" },
    OptimizerOption { value: "SGDOptimizer", label: "SGD" },
];

/// Looks up the display label for an optimizer `class_name` tag.
pub fn optimizer_label(class_name: &str) -> Option<&'static str> {
    OPTIMIZER_OPTIONS
        .iter()
        .find(|option| option.value == class_name)
        .map(|option| option.label)
}
