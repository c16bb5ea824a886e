//! Structured-data file formats understood by the loader.

use serde_json::Value;

/// Format of a configuration file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Pick the format for an extension such as `.json` or `yml`.
    ///
    /// Unknown extensions are read as JSON.
    pub fn from_ext(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }

    /// Parse file content into a JSON value.
    ///
    /// Errors are returned as the parser's own message.
    pub fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// JSON type name of a value, as used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_ext() {
        assert_eq!(FileFormat::from_ext(".json"), FileFormat::Json);
        assert_eq!(FileFormat::from_ext(".YAML"), FileFormat::Yaml);
        assert_eq!(FileFormat::from_ext("yml"), FileFormat::Yaml);
        assert_eq!(FileFormat::from_ext(".conf"), FileFormat::Json);
    }

    #[test]
    fn test_parse_json() {
        let value = FileFormat::Json.parse(r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(value, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_parse_yaml() {
        let value = FileFormat::Yaml
            .parse("server:\n  port: 8080\n  hosts: [a, b]\n")
            .unwrap();
        assert_eq!(value, json!({"server": {"port": 8080, "hosts": ["a", "b"]}}));
    }

    #[test]
    fn test_json_error_is_parser_message() {
        let expected = serde_json::from_str::<Value>("").unwrap_err().to_string();
        assert_eq!(FileFormat::Json.parse("").unwrap_err(), expected);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(0)), "number");
        assert_eq!(type_name(&json!("x")), "string");
        assert_eq!(type_name(&json!([])), "array");
        assert_eq!(type_name(&json!({})), "object");
        assert_eq!(type_name(&json!(false)), "boolean");
    }
}
