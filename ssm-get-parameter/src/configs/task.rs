use std::{fmt, str::FromStr};

use super::{
    ConfigError, Configs,
    environment::{bool_input, input_or, optional_input, required_input},
};
use crate::domain::ParameterName;

pub const READ_MODE_SINGLE: &str = "single";
pub const READ_MODE_HIERARCHY: &str = "hierarchy";

pub const INPUT_READ_MODE: &str = "readMode";
pub const INPUT_PARAMETER_NAME: &str = "parameterName";
pub const INPUT_PARAMETER_VERSION: &str = "parameterVersion";
pub const INPUT_PARAMETER_PATH: &str = "parameterPath";
pub const INPUT_RECURSIVE: &str = "recursive";
pub const INPUT_SINGLE_NAME_TRANSFORM: &str = "singleNameTransform";
pub const INPUT_HIERARCHY_NAME_TRANSFORM: &str = "hierarchyNameTransform";
pub const INPUT_CUSTOM_VARIABLE_NAME: &str = "customVariableName";
pub const INPUT_REPLACEMENT_PATTERN: &str = "replacementPattern";
pub const INPUT_REPLACEMENT_TEXT: &str = "replacementText";
pub const INPUT_GLOBAL_MATCH: &str = "globalMatch";
pub const INPUT_CASE_INSENSITIVE_MATCH: &str = "caseInsensitiveMatch";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadMode {
    Single {
        parameter_name: ParameterName,
        parameter_version: Option<u64>,
    },
    Hierarchy {
        parameter_path: String,
        recursive: bool,
    },
}

impl ReadMode {
    pub fn kind(&self) -> ReadModeKind {
        match self {
            Self::Single { .. } => ReadModeKind::Single,
            Self::Hierarchy { .. } => ReadModeKind::Hierarchy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadModeKind {
    Single,
    Hierarchy,
}

impl fmt::Display for ReadModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "{READ_MODE_SINGLE}"),
            Self::Hierarchy => write!(f, "{READ_MODE_HIERARCHY}"),
        }
    }
}

impl FromStr for ReadModeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            READ_MODE_SINGLE => Ok(Self::Single),
            READ_MODE_HIERARCHY => Ok(Self::Hierarchy),
            _ => Err(ConfigError::UnknownReadMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameTransform {
    #[default]
    None,
    Leaf,
    Substitute,
    Custom,
}

impl fmt::Display for NameTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Leaf => write!(f, "leaf"),
            Self::Substitute => write!(f, "substitute"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for NameTransform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "leaf" => Ok(Self::Leaf),
            "substitute" => Ok(Self::Substitute),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Invalid name transform: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingOptions {
    pub single_name_transform: NameTransform,
    pub hierarchy_name_transform: NameTransform,
    pub custom_variable_name: Option<String>,
    pub replacement_pattern: Option<String>,
    pub replacement_text: String,
    pub global_match: bool,
    pub case_insensitive_match: bool,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            single_name_transform: NameTransform::None,
            hierarchy_name_transform: NameTransform::None,
            custom_variable_name: None,
            replacement_pattern: None,
            replacement_text: String::new(),
            global_match: true,
            case_insensitive_match: true,
        }
    }
}

impl NamingOptions {
    /// The transform that applies to the given read mode.
    pub fn transform_for(&self, kind: ReadModeKind) -> NameTransform {
        match kind {
            ReadModeKind::Single => self.single_name_transform,
            ReadModeKind::Hierarchy => self.hierarchy_name_transform,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskParameters {
    pub read_mode: ReadMode,
    pub naming: NamingOptions,
}

impl TaskParameters {
    pub fn single(parameter_name: impl Into<String>, parameter_version: Option<u64>) -> Self {
        Self {
            read_mode: ReadMode::Single {
                parameter_name: ParameterName::new(parameter_name),
                parameter_version,
            },
            naming: NamingOptions::default(),
        }
    }

    pub fn hierarchy(parameter_path: impl Into<String>, recursive: bool) -> Self {
        Self {
            read_mode: ReadMode::Hierarchy {
                parameter_path: parameter_path.into(),
                recursive,
            },
            naming: NamingOptions::default(),
        }
    }

    pub fn with_naming(mut self, naming: NamingOptions) -> Self {
        self.naming = naming;
        self
    }

    /// Checks the naming options against the read mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let kind = self.read_mode.kind();
        let transform = self.naming.transform_for(kind);
        match transform {
            NameTransform::Custom if kind == ReadModeKind::Hierarchy => {
                Err(ConfigError::InvalidInput {
                    name: INPUT_HIERARCHY_NAME_TRANSFORM.to_string(),
                    value: transform.to_string(),
                    reason: "custom names are only available when reading a single parameter"
                        .to_string(),
                })
            }
            NameTransform::Custom if self.naming.custom_variable_name.is_none() => Err(
                ConfigError::MissingInput(INPUT_CUSTOM_VARIABLE_NAME.to_string()),
            ),
            NameTransform::Substitute if self.naming.replacement_pattern.is_none() => Err(
                ConfigError::MissingInput(INPUT_REPLACEMENT_PATTERN.to_string()),
            ),
            _ => Ok(()),
        }
    }
}

fn parse_transform(input_name: &str) -> Result<NameTransform, ConfigError> {
    let value = input_or(input_name, "none");
    value
        .parse::<NameTransform>()
        .map_err(|reason| ConfigError::InvalidInput {
            name: input_name.to_string(),
            value,
            reason,
        })
}

fn parse_version(value: String) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(version) if version > 0 => Ok(version),
        _ => Err(ConfigError::InvalidInput {
            name: INPUT_PARAMETER_VERSION.to_string(),
            value,
            reason: "expected a positive whole number".to_string(),
        }),
    }
}

#[async_trait::async_trait]
impl Configs for TaskParameters {
    async fn load() -> Result<Self, ConfigError> {
        let read_mode = match required_input(INPUT_READ_MODE)?.parse::<ReadModeKind>()? {
            ReadModeKind::Single => ReadMode::Single {
                parameter_name: ParameterName::new(required_input(INPUT_PARAMETER_NAME)?),
                parameter_version: optional_input(INPUT_PARAMETER_VERSION)
                    .map(parse_version)
                    .transpose()?,
            },
            ReadModeKind::Hierarchy => ReadMode::Hierarchy {
                parameter_path: required_input(INPUT_PARAMETER_PATH)?,
                recursive: bool_input(INPUT_RECURSIVE, false)?,
            },
        };

        let naming = NamingOptions {
            single_name_transform: parse_transform(INPUT_SINGLE_NAME_TRANSFORM)?,
            hierarchy_name_transform: parse_transform(INPUT_HIERARCHY_NAME_TRANSFORM)?,
            custom_variable_name: optional_input(INPUT_CUSTOM_VARIABLE_NAME),
            replacement_pattern: optional_input(INPUT_REPLACEMENT_PATTERN),
            replacement_text: input_or(INPUT_REPLACEMENT_TEXT, ""),
            global_match: bool_input(INPUT_GLOBAL_MATCH, true)?,
            case_insensitive_match: bool_input(INPUT_CASE_INSENSITIVE_MATCH, true)?,
        };

        let parameters = TaskParameters { read_mode, naming };
        parameters.validate()?;
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_INPUTS: &[&str] = &[
        "INPUT_READMODE",
        "INPUT_PARAMETERNAME",
        "INPUT_PARAMETERVERSION",
        "INPUT_PARAMETERPATH",
        "INPUT_RECURSIVE",
        "INPUT_SINGLENAMETRANSFORM",
        "INPUT_HIERARCHYNAMETRANSFORM",
        "INPUT_CUSTOMVARIABLENAME",
        "INPUT_REPLACEMENTPATTERN",
        "INPUT_REPLACEMENTTEXT",
        "INPUT_GLOBALMATCH",
        "INPUT_CASEINSENSITIVEMATCH",
    ];

    fn set_inputs(inputs: &[(&str, &str)]) {
        unsafe {
            for name in ALL_INPUTS {
                std::env::remove_var(name);
            }
            for (name, value) in inputs {
                std::env::set_var(name, value);
            }
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_load_single_with_version() {
        set_inputs(&[
            ("INPUT_READMODE", "single"),
            ("INPUT_PARAMETERNAME", "/app/db/password"),
            ("INPUT_PARAMETERVERSION", "4"),
        ]);

        let parameters = TaskParameters::load().await.unwrap();
        assert_eq!(
            parameters.read_mode,
            ReadMode::Single {
                parameter_name: ParameterName::new("/app/db/password"),
                parameter_version: Some(4),
            }
        );
        assert_eq!(parameters.naming, NamingOptions::default());
        set_inputs(&[]);
    }

    #[tokio::test]
    #[serial]
    async fn test_load_hierarchy_with_substitute() {
        set_inputs(&[
            ("INPUT_READMODE", "hierarchy"),
            ("INPUT_PARAMETERPATH", "app/db"),
            ("INPUT_RECURSIVE", "true"),
            ("INPUT_HIERARCHYNAMETRANSFORM", "substitute"),
            ("INPUT_REPLACEMENTPATTERN", "/"),
            ("INPUT_REPLACEMENTTEXT", "."),
            ("INPUT_GLOBALMATCH", "false"),
        ]);

        let parameters = TaskParameters::load().await.unwrap();
        assert_eq!(
            parameters.read_mode,
            ReadMode::Hierarchy {
                parameter_path: "app/db".to_string(),
                recursive: true,
            }
        );
        assert_eq!(
            parameters.naming.hierarchy_name_transform,
            NameTransform::Substitute
        );
        assert_eq!(parameters.naming.replacement_text, ".");
        assert!(!parameters.naming.global_match);
        assert!(parameters.naming.case_insensitive_match);
        set_inputs(&[]);
    }

    #[tokio::test]
    #[serial]
    async fn test_load_unknown_read_mode() {
        set_inputs(&[("INPUT_READMODE", "everything")]);

        let result = TaskParameters::load().await;
        assert_eq!(
            result,
            Err(ConfigError::UnknownReadMode("everything".to_string()))
        );
        set_inputs(&[]);
    }

    #[tokio::test]
    #[serial]
    async fn test_load_single_requires_name() {
        set_inputs(&[("INPUT_READMODE", "single")]);

        let result = TaskParameters::load().await;
        assert_eq!(
            result,
            Err(ConfigError::MissingInput("parameterName".to_string()))
        );
        set_inputs(&[]);
    }

    #[tokio::test]
    #[serial]
    async fn test_load_rejects_zero_version() {
        set_inputs(&[
            ("INPUT_READMODE", "single"),
            ("INPUT_PARAMETERNAME", "/a"),
            ("INPUT_PARAMETERVERSION", "0"),
        ]);

        assert!(matches!(
            TaskParameters::load().await,
            Err(ConfigError::InvalidInput { .. })
        ));
        set_inputs(&[]);
    }

    #[test]
    fn test_custom_transform_needs_name() {
        let parameters = TaskParameters::single("/a", None).with_naming(NamingOptions {
            single_name_transform: NameTransform::Custom,
            ..Default::default()
        });
        assert_eq!(
            parameters.validate(),
            Err(ConfigError::MissingInput("customVariableName".to_string()))
        );
    }

    #[test]
    fn test_custom_transform_rejected_for_hierarchy() {
        let parameters = TaskParameters::hierarchy("/a", false).with_naming(NamingOptions {
            hierarchy_name_transform: NameTransform::Custom,
            custom_variable_name: Some("x".to_string()),
            ..Default::default()
        });
        assert!(parameters.validate().is_err());
    }

    #[test]
    fn test_substitute_needs_pattern() {
        let parameters = TaskParameters::hierarchy("/a", false).with_naming(NamingOptions {
            hierarchy_name_transform: NameTransform::Substitute,
            ..Default::default()
        });
        assert_eq!(
            parameters.validate(),
            Err(ConfigError::MissingInput("replacementPattern".to_string()))
        );
    }

    #[test]
    fn test_read_mode_kind_round_trips_names() {
        assert_eq!("single".parse::<ReadModeKind>(), Ok(ReadModeKind::Single));
        assert_eq!(ReadModeKind::Hierarchy.to_string(), "hierarchy");
        assert!("Single".parse::<ReadModeKind>().is_err());
    }
}
