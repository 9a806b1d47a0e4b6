//! Script - A typer queue described in TOML
//!
//! ```toml
//! [typer]
//! initial_text = ""
//!
//! [[steps]]
//! kind = "type"
//! text = "Hello there"
//!
//! [[steps]]
//! kind = "sleep"
//! ms = 800
//!
//! [[steps]]
//! kind = "remove"
//!
//! [[steps]]
//! kind = "loop"
//! ```

use crate::config::TyperOptions;
use crate::error::{TyperError, TyperResult};
use crate::event::{Event, LoopConfig, LoopScope};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Script {
    #[serde(default)]
    pub typer: TyperOptions,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One entry of a script. Omitted fields fall back to `[typer.defaults]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Type {
        text: Option<String>,
        delay_ms: Option<u64>,
    },
    Remove {
        count: Option<usize>,
        delay_ms: Option<u64>,
    },
    Sleep {
        ms: Option<u64>,
    },
    Loop {
        count: Option<u32>,
        #[serde(default)]
        scope: LoopScope,
    },
}

impl Script {
    pub fn from_toml_str(source: &str) -> TyperResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> TyperResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TyperError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Validate the steps and turn them into queue events.
    pub fn events(&self) -> TyperResult<Vec<Event>> {
        let defaults = &self.typer.defaults;
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let event = match step {
                    Step::Type { text, delay_ms } => {
                        if text.as_deref() == Some("") {
                            return Err(TyperError::InvalidStep {
                                index,
                                reason: "`text` must not be empty".to_string(),
                            });
                        }
                        Event::Type(defaults.type_config(text.as_deref(), *delay_ms))
                    }
                    Step::Remove { count, delay_ms } => {
                        Event::Remove(defaults.remove_config(*count, *delay_ms))
                    }
                    Step::Sleep { ms } => Event::Sleep(defaults.sleep_config(*ms)),
                    Step::Loop { count, scope } => {
                        if *count == Some(0) {
                            return Err(TyperError::InvalidStep {
                                index,
                                reason: "`count` must be at least 1, omit it to loop forever"
                                    .to_string(),
                            });
                        }
                        Event::Loop(LoopConfig {
                            count: *count,
                            scope: *scope,
                        })
                    }
                };
                Ok(event)
            })
            .collect()
    }

    /// JSON schema of the script format.
    pub fn json_schema() -> TyperResult<serde_json::Value> {
        Ok(serde_json::to_value(schemars::schema_for!(Script))?)
    }
}
