use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use super::validation::{validate_document, Validated};
use crate::domain::error::{ConfigError, ConfigResult, ConfigWarning};
use crate::domain::models::ConfigDocument;

/// Text encodings the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Format implied by a file extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Guess from content: JSON objects start with `{`, anything else is YAML.
    pub fn sniff(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Builds a validated [`ConfigDocument`] from a file, a text literal or an
/// already-parsed value.
///
/// Every entry point runs the same validation pass; nothing is defaulted and
/// no partial document is ever returned.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from an injected, already-parsed value.
    pub fn load_value(raw: &Value) -> ConfigResult<ConfigDocument> {
        Self::load_value_with_warnings(raw).map(|validated| validated.document)
    }

    /// Load from an injected value, keeping the warnings.
    pub fn load_value_with_warnings(raw: &Value) -> ConfigResult<Validated> {
        let validated = validate_document(raw)?;

        for warning in &validated.warnings {
            match warning {
                ConfigWarning::UnknownKey { .. } => {
                    debug!(path = warning.path(), "{warning}");
                }
                ConfigWarning::OptimizerRunsIgnored { .. } => {
                    warn!(path = warning.path(), "{warning}");
                }
            }
        }

        info!(
            rpc = %validated.document.rpc.url(),
            networks = validated.document.networks.len(),
            compilers = validated.document.compilers.len(),
            "configuration loaded"
        );
        Ok(validated)
    }

    /// Load from text such as an embedded literal.
    pub fn load_str(
        content: &str,
        format: SourceFormat,
        source_name: &str,
    ) -> ConfigResult<ConfigDocument> {
        Self::load_str_with_warnings(content, format, source_name)
            .map(|validated| validated.document)
    }

    pub fn load_str_with_warnings(
        content: &str,
        format: SourceFormat,
        source_name: &str,
    ) -> ConfigResult<Validated> {
        let raw = parse(content, format, source_name)?;
        Self::load_value_with_warnings(&raw)
    }

    /// Load from a file. The format comes from the extension, falling back to
    /// content sniffing.
    pub fn load_file(path: impl AsRef<Path>) -> ConfigResult<ConfigDocument> {
        Self::load_file_with_warnings(path).map(|validated| validated.document)
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_file_with_warnings(path: impl AsRef<Path>) -> ConfigResult<Validated> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: source_name.clone(),
            source: e,
        })?;

        let format = SourceFormat::from_path(path).unwrap_or_else(|| SourceFormat::sniff(&content));
        debug!(format = format.as_str(), "reading configuration file");

        Self::load_str_with_warnings(&content, format, &source_name)
    }
}

fn parse(content: &str, format: SourceFormat, source_name: &str) -> ConfigResult<Value> {
    let parse_error = |message: String| ConfigError::Parse {
        source_name: source_name.to_string(),
        format: format.as_str(),
        message,
    };

    match format {
        SourceFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        SourceFormat::Yaml => serde_yaml::from_str::<YamlNode>(content)
            .map(|node| node.0)
            .map_err(|e| parse_error(e.to_string())),
    }
}

/// YAML parsed into a JSON value. Integers wider than 64 bits become floats,
/// as in JSON, so validation reports them as out of range at their field.
struct YamlNode(Value);

impl<'de> Deserialize<'de> for YamlNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(YamlNodeVisitor).map(YamlNode)
    }
}

struct YamlNodeVisitor;

impl<'de> Visitor<'de> for YamlNodeVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i128<E: serde::de::Error>(self, v: i128) -> Result<Value, E> {
        self.visit_f64(v as f64)
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u128<E: serde::de::Error>(self, v: u128) -> Result<Value, E> {
        self.visit_f64(v as f64)
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        YamlNode::deserialize(deserializer).map(|node| node.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(YamlNode(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut object = Map::new();
        while let Some((key, YamlNode(value))) = map.next_entry::<String, YamlNode>()? {
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}
