//! Flat JSON and YAML sources.

use super::Properties;
use crate::SourceError;

pub(super) fn parse_json(input: &str) -> Result<Properties, SourceError> {
    let serde_json::Value::Object(object) = serde_json::from_str(input)? else {
        return Err(SourceError::NotAnObject);
    };

    let mut properties = Properties::new();
    for (key, value) in object {
        let value = match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::Bool(value) => value.to_string(),
            serde_json::Value::Number(value) => value.to_string(),
            serde_json::Value::String(value) => value,
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(SourceError::NotFlat { key });
            }
        };
        properties.insert(key, value);
    }
    Ok(properties)
}

pub(super) fn parse_yaml(input: &str) -> Result<Properties, SourceError> {
    let mapping = match serde_yaml::from_str(input)? {
        serde_yaml::Value::Mapping(mapping) => mapping,
        // Empty document
        serde_yaml::Value::Null => return Ok(Properties::new()),
        _ => return Err(SourceError::NotAnObject),
    };

    let mut properties = Properties::new();
    for (key, value) in mapping {
        let key = yaml_scalar(key).map_err(|key| SourceError::NotFlat {
            key: format!("{key:?}"),
        })?;
        let value = yaml_scalar(value).map_err(|_| SourceError::NotFlat { key: key.clone() })?;
        properties.insert(key, value);
    }
    Ok(properties)
}

fn yaml_scalar(value: serde_yaml::Value) -> Result<String, serde_yaml::Value> {
    Ok(match value {
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(value) => value.to_string(),
        serde_yaml::Value::Number(value) => value.to_string(),
        serde_yaml::Value::String(value) => value,
        serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_)
        | serde_yaml::Value::Tagged(_) => return Err(value),
    })
}
