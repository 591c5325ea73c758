use std::env;

use super::ConfigError;

/// Azure Pipelines exposes task input `name` as `INPUT_NAME`.
pub const INPUT_PREFIX: &str = "INPUT_";

pub fn input_env_name(input_name: &str) -> String {
    format!(
        "{INPUT_PREFIX}{}",
        input_name.replace([' ', '.'], "_").to_uppercase()
    )
}

pub fn optional_env(env_name: &str) -> Option<String> {
    env::var(env_name).ok()
}

pub fn env_or(env_name: &str, default: &str) -> String {
    optional_env(env_name).unwrap_or_else(|| default.to_string())
}

/// A blank input counts as not supplied.
pub fn optional_input(input_name: &str) -> Option<String> {
    optional_env(&input_env_name(input_name))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn required_input(input_name: &str) -> Result<String, ConfigError> {
    optional_input(input_name).ok_or_else(|| ConfigError::MissingInput(input_name.to_string()))
}

pub fn input_or(input_name: &str, default: &str) -> String {
    optional_input(input_name).unwrap_or_else(|| default.to_string())
}

pub fn bool_input(input_name: &str, default: bool) -> Result<bool, ConfigError> {
    match optional_input(input_name) {
        None => Ok(default),
        Some(value) => match value.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ConfigError::InvalidInput {
                name: input_name.to_string(),
                value,
                reason: "expected true or false".to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_input_env_name() {
        assert_eq!(input_env_name("parameterName"), "INPUT_PARAMETERNAME");
        assert_eq!(input_env_name("aws.region"), "INPUT_AWS_REGION");
        assert_eq!(input_env_name("read mode"), "INPUT_READ_MODE");
    }

    #[test]
    #[serial]
    fn test_required_input_success() {
        unsafe {
            std::env::set_var("INPUT_TESTINPUT", "  value ");
        }

        assert_eq!(required_input("testInput").unwrap(), "value");

        unsafe {
            std::env::remove_var("INPUT_TESTINPUT");
        }
    }

    #[test]
    #[serial]
    fn test_required_input_missing() {
        unsafe {
            std::env::remove_var("INPUT_MISSINGINPUT");
        }
        assert_eq!(
            required_input("missingInput"),
            Err(ConfigError::MissingInput("missingInput".to_string()))
        );
    }

    #[test]
    #[serial]
    fn test_blank_input_is_absent() {
        unsafe {
            std::env::set_var("INPUT_BLANKINPUT", "   ");
        }
        assert_eq!(optional_input("blankInput"), None);
        assert_eq!(input_or("blankInput", "fallback"), "fallback");

        unsafe {
            std::env::remove_var("INPUT_BLANKINPUT");
        }
    }

    #[test]
    #[serial]
    fn test_bool_input() {
        unsafe {
            std::env::set_var("INPUT_FLAG", "True");
        }
        assert!(bool_input("flag", false).unwrap());

        unsafe {
            std::env::set_var("INPUT_FLAG", "yes please");
        }
        assert!(bool_input("flag", false).is_err());

        unsafe {
            std::env::remove_var("INPUT_FLAG");
        }
        assert!(bool_input("flag", true).unwrap());
    }

    #[test]
    #[serial]
    fn test_env_or_missing_uses_default() {
        unsafe {
            std::env::remove_var("MISSING");
        }
        assert_eq!(env_or("MISSING", "default"), "default");
    }
}
