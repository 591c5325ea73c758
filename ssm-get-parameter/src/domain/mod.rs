use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Value assigned when the store answers without a parameter or without a value.
pub const MISSING_VALUE_PLACEHOLDER: &str = "undefined";

pub const PATH_SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ParameterName(String);

impl ParameterName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct VariableName(String);

impl VariableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    String,
    StringList,
    SecureString,
    Unknown(String),
}

impl ParameterType {
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::SecureString)
    }
}

impl From<&str> for ParameterType {
    fn from(s: &str) -> Self {
        match s {
            "String" => Self::String,
            "StringList" => Self::StringList,
            "SecureString" => Self::SecureString,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl FromStr for ParameterType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::StringList => write!(f, "StringList"),
            Self::SecureString => write!(f, "SecureString"),
            Self::Unknown(other) => write!(f, "{other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    name: ParameterName,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter_type: Option<ParameterType>,
}

impl Parameter {
    pub fn new(
        name: ParameterName,
        value: Option<String>,
        parameter_type: Option<ParameterType>,
    ) -> Self {
        Self {
            name,
            value,
            parameter_type,
        }
    }

    pub fn plain(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            ParameterName::new(name),
            Some(value.into()),
            Some(ParameterType::String),
        )
    }

    pub fn secure(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            ParameterName::new(name),
            Some(value.into()),
            Some(ParameterType::SecureString),
        )
    }

    pub fn name(&self) -> &ParameterName {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn parameter_type(&self) -> Option<&ParameterType> {
        self.parameter_type.as_ref()
    }

    pub fn is_secret(&self) -> bool {
        self.parameter_type
            .as_ref()
            .is_some_and(ParameterType::is_secret)
    }

    /// The value to hand to the pipeline, with the placeholder standing in for a missing one.
    pub fn value_or_placeholder(&self) -> String {
        self.value
            .clone()
            .unwrap_or_else(|| MISSING_VALUE_PLACEHOLDER.to_string())
    }
}

/// One page of a by-path listing. `parameters` is `None` when the store sent no list at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterPage {
    pub parameters: Option<Vec<Parameter>>,
    pub next_token: Option<String>,
}

impl ParameterPage {
    pub fn new(parameters: Vec<Parameter>, next_token: Option<String>) -> Self {
        Self {
            parameters: Some(parameters),
            next_token,
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    pub path: String,
    pub recursive: bool,
    pub with_decryption: bool,
    pub next_token: Option<String>,
}

/// Appends `:version` to the name when a version is requested.
pub fn lookup_key(name: &ParameterName, version: Option<u64>) -> String {
    match version {
        Some(version) => format!("{name}:{version}"),
        None => name.to_string(),
    }
}

/// Hierarchy paths are absolute; a missing leading separator is added.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with(PATH_SEPARATOR) {
        path.to_string()
    } else {
        format!("{PATH_SEPARATOR}{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_is_secret() {
        assert!(Parameter::secure("/app/db/password", "hunter2").is_secret());
        assert!(!Parameter::plain("/app/db/host", "localhost").is_secret());
    }

    #[test]
    fn test_untyped_and_unknown_types_are_not_secret() {
        let untyped = Parameter::new(ParameterName::new("/a"), Some("v".to_string()), None);
        assert!(!untyped.is_secret());

        let unknown = Parameter::new(
            ParameterName::new("/a"),
            Some("v".to_string()),
            Some("Binary".parse().unwrap()),
        );
        assert!(!unknown.is_secret());
        assert_eq!(unknown.parameter_type().unwrap().to_string(), "Binary");
    }

    #[test]
    fn test_string_list_parses() {
        let parsed: ParameterType = "StringList".parse().unwrap();
        assert_eq!(parsed, ParameterType::StringList);
        assert!(!parsed.is_secret());
    }

    #[test]
    fn test_missing_value_uses_placeholder() {
        let parameter = Parameter::new(ParameterName::new("/a"), None, None);
        assert_eq!(parameter.value_or_placeholder(), "undefined");
    }

    #[test]
    fn test_lookup_key_with_version() {
        let name = ParameterName::new("/app/db/password");
        assert_eq!(lookup_key(&name, Some(3)), "/app/db/password:3");
        assert_eq!(lookup_key(&name, None), "/app/db/password");
    }

    #[test]
    fn test_normalize_path_adds_leading_separator() {
        assert_eq!(normalize_path("foo/bar"), "/foo/bar");
        assert_eq!(normalize_path("/foo/bar"), "/foo/bar");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_parameter_serializes_without_missing_fields() {
        let parameter = Parameter::new(ParameterName::new("/a"), None, None);
        let json = serde_json::to_value(&parameter).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "/a" }));
    }
}
