// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 piperun contributors

//! Pipeline definition structures
//!
//! Loads the YAML pipeline config and resolves, once, which list of items
//! drives execution.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::errors::{PiperunError, PiperunResult};

/// Label used for steps that have no `name`
pub const UNNAMED_STEP: &str = "Unnamed step";

/// Commands run when a config declares neither `steps` nor `commands`
pub const FALLBACK_COMMANDS: [&str; 4] = [
    "echo 'Pipeline started'",
    "pwd",
    "ls -la",
    "echo 'Pipeline completed'",
];

/// A named step wrapping an optional command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    /// Display label; numbers and booleans are rendered as text
    #[serde(
        default,
        deserialize_with = "deserialize_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Command to run; a step without one is skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl StepSpec {
    /// Create a step with a name and command
    pub fn new(name: &str, command: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            command: Some(command.to_string()),
        }
    }

    /// Name shown in logs
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_STEP)
    }
}

/// Where the items to execute come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepSource {
    /// `steps:` list
    Steps(Vec<StepSpec>),
    /// `commands:` list
    Commands(Vec<String>),
    /// Neither key present; [`FALLBACK_COMMANDS`] are run
    Fallback,
}

impl StepSource {
    /// Number of items this source yields
    pub fn len(&self) -> usize {
        match self {
            Self::Steps(steps) => steps.len(),
            Self::Commands(commands) => commands.len(),
            Self::Fallback => FALLBACK_COMMANDS.len(),
        }
    }

    /// Whether this source yields no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pipeline configuration loaded from a YAML file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Pipeline name (descriptive only)
    pub name: Option<String>,

    /// Pipeline description (descriptive only)
    pub description: Option<String>,

    /// Items to execute, in declaration order
    pub source: StepSource,
}

/// On-disk shape of the config, used for writing
#[derive(Debug, Serialize)]
struct ConfigDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<&'a [StepSpec]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commands: Option<&'a [String]>,
}

impl PipelineConfig {
    /// Load pipeline config from a YAML file
    pub fn load(path: &Path) -> PiperunResult<Self> {
        if !path.exists() {
            return Err(PiperunError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PiperunError::ConfigRead {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    /// Parse pipeline config from a YAML string
    pub fn from_yaml(yaml: &str) -> PiperunResult<Self> {
        Self::parse(yaml, Path::new("<string>"))
    }

    fn parse(yaml: &str, origin: &Path) -> PiperunResult<Self> {
        let document: Value = serde_yaml::from_str(yaml)
            .map_err(|e| PiperunError::config_parse(origin, e.to_string()))?;

        let mapping = match document {
            Value::Mapping(mapping) => mapping,
            Value::Null => {
                return Err(PiperunError::ConfigParse {
                    path: origin.to_path_buf(),
                    reason: "document is empty".into(),
                    help: Some("Add a 'steps' or 'commands' list".into()),
                })
            }
            other => {
                return Err(PiperunError::ConfigParse {
                    path: origin.to_path_buf(),
                    reason: format!("expected a mapping at the top level, found {}", kind_of(&other)),
                    help: Some("The config must be a YAML mapping such as 'steps: [...]'".into()),
                })
            }
        };

        Ok(Self {
            name: text_field(&mapping, "name"),
            description: text_field(&mapping, "description"),
            source: resolve_source(&mapping, origin)?,
        })
    }

    /// Default config written by `init`
    pub fn sample() -> Self {
        Self {
            name: Some("Sample Pipeline".into()),
            description: Some("A sample pipeline configuration".into()),
            source: StepSource::Steps(vec![
                StepSpec::new("Setup", "echo \"Setting up pipeline\""),
                StepSpec::new("Process", "echo \"Processing data\""),
                StepSpec::new("Cleanup", "echo \"Cleaning up\""),
            ]),
        }
    }

    /// Serialize pipeline config to YAML
    pub fn to_yaml(&self) -> PiperunResult<String> {
        let (steps, commands) = match &self.source {
            StepSource::Steps(steps) => (Some(steps.as_slice()), None),
            StepSource::Commands(commands) => (None, Some(commands.as_slice())),
            StepSource::Fallback => (None, None),
        };

        let document = ConfigDocument {
            name: self.name.as_deref(),
            description: self.description.as_deref(),
            steps,
            commands,
        };

        serde_yaml::to_string(&document).map_err(Into::into)
    }
}

/// `steps` wins over `commands`; a key holding `null` counts as absent
fn resolve_source(mapping: &Mapping, origin: &Path) -> PiperunResult<StepSource> {
    if let Some(steps) = present(mapping, "steps") {
        let steps: Vec<StepSpec> = serde_yaml::from_value(steps.clone()).map_err(|e| {
            PiperunError::ConfigParse {
                path: origin.to_path_buf(),
                reason: format!("'steps' is malformed: {}", e),
                help: Some("Each step is a mapping with optional 'name' and 'command' strings".into()),
            }
        })?;
        return Ok(StepSource::Steps(steps));
    }

    if let Some(commands) = present(mapping, "commands") {
        let commands: Vec<String> = serde_yaml::from_value(commands.clone()).map_err(|e| {
            PiperunError::ConfigParse {
                path: origin.to_path_buf(),
                reason: format!("'commands' is malformed: {}", e),
                help: Some("'commands' is a list of command strings".into()),
            }
        })?;
        return Ok(StepSource::Commands(commands));
    }

    Ok(StepSource::Fallback)
}

fn present<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping.get(key).filter(|value| !value.is_null())
}

fn text_field(mapping: &Mapping, key: &str) -> Option<String> {
    mapping.get(key).and_then(label_text)
}

/// Text of a descriptive scalar; anything else is treated as missing
fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(label_text(&value))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
