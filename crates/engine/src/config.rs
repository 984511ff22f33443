use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Options of the `no-unsafe-any` rule. Fixed for a whole pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RuleConfiguration {
    /// Accept `const x: T = anyValue` when the declaration is annotated.
    pub allow_annotation_from_any: bool,
}

impl RuleConfiguration {
    /// Reads rule options as a host passes them: `null`, an options object,
    /// or a list holding at most one options object.
    pub fn from_options(options: &JsonValue) -> Result<Self> {
        match options {
            JsonValue::Null => Ok(Self::default()),
            JsonValue::Array(items) => match items.as_slice() {
                [] => Ok(Self::default()),
                [JsonValue::Null] => Ok(Self::default()),
                [first] => serde_json::from_value(first.clone())
                    .context("invalid no-unsafe-any options"),
                _ => bail!("expected at most one options object, got {}", items.len()),
            },
            other => serde_json::from_value(other.clone()).context("invalid no-unsafe-any options"),
        }
    }
}
