use std::fmt;

/// Log lines emitted by the task, addressable by a stable key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<'a> {
    UnknownReadMode(&'a str),
    TaskCompleted,
    SettingVariable {
        variable_name: &'a str,
        parameter_name: &'a str,
        is_secret: bool,
    },
    ReadingParameterHierarchy {
        path: &'a str,
        recursive: bool,
    },
    ErrorParametersEmpty,
    ErrorEmptyVariableName(&'a str),
}

impl Message<'_> {
    pub fn key(&self) -> &'static str {
        match self {
            Self::UnknownReadMode(_) => "UnknownReadMode",
            Self::TaskCompleted => "TaskCompleted",
            Self::SettingVariable { .. } => "SettingVariable",
            Self::ReadingParameterHierarchy { .. } => "ReadingParameterHierarchy",
            Self::ErrorParametersEmpty => "ErrorParametersEmpty",
            Self::ErrorEmptyVariableName(_) => "ErrorEmptyVariableName",
        }
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownReadMode(mode) => write!(f, "{} is not a valid read mode", mode),
            Self::TaskCompleted => write!(f, "Task completed"),
            Self::SettingVariable {
                variable_name,
                parameter_name,
                is_secret,
            } => write!(
                f,
                "Setting variable {} from parameter {} (secret: {})",
                variable_name, parameter_name, is_secret
            ),
            Self::ReadingParameterHierarchy { path, recursive } => write!(
                f,
                "Reading parameter hierarchy with path {} (recursive: {})",
                path, recursive
            ),
            Self::ErrorParametersEmpty => {
                write!(f, "No parameters were returned for the requested path")
            }
            Self::ErrorEmptyVariableName(parameter_name) => write!(
                f,
                "Parameter {} maps to an empty variable name",
                parameter_name
            ),
        }
    }
}
