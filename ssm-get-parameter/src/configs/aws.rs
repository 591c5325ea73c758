use super::{
    ConfigError, Configs,
    environment::{optional_env, optional_input},
};

pub const INPUT_REGION_NAME: &str = "regionName";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsConnectionConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

#[async_trait::async_trait]
impl Configs for AwsConnectionConfig {
    async fn load() -> Result<Self, ConfigError> {
        Ok(AwsConnectionConfig {
            region: optional_input(INPUT_REGION_NAME).or_else(|| optional_env("AWS_REGION")),
            profile: optional_env("AWS_PROFILE"),
            endpoint_url: optional_env("AWS_ENDPOINT").or_else(|| optional_env("SSM_ENDPOINT")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_region_input_wins_over_environment() {
        unsafe {
            std::env::set_var("INPUT_REGIONNAME", "eu-west-1");
            std::env::set_var("AWS_REGION", "us-east-1");
            std::env::remove_var("AWS_ENDPOINT");
            std::env::set_var("SSM_ENDPOINT", "http://localhost:4566");
        }

        let config = AwsConnectionConfig::load().await.unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));

        unsafe {
            std::env::remove_var("INPUT_REGIONNAME");
            std::env::remove_var("AWS_REGION");
            std::env::remove_var("SSM_ENDPOINT");
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_falls_back_to_sdk_defaults() {
        unsafe {
            std::env::remove_var("INPUT_REGIONNAME");
            std::env::remove_var("AWS_REGION");
            std::env::remove_var("AWS_PROFILE");
            std::env::remove_var("AWS_ENDPOINT");
            std::env::remove_var("SSM_ENDPOINT");
        }

        let config = AwsConnectionConfig::load().await.unwrap();
        assert_eq!(config, AwsConnectionConfig::default());
    }
}
