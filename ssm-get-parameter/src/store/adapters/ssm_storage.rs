use anyhow::Result as AnyResult;
use aws_config::BehaviorVersion;
use aws_sdk_ssm::{Client, types::Parameter as SdkParameter};
use aws_types::region::Region;
use tracing::debug;

use crate::{
    configs::AwsConnectionConfig,
    domain::{Parameter, ParameterName, ParameterPage, ParameterType, PathQuery},
    store::parameter_store::{ParameterStore, StoreError},
};

#[derive(Clone)]
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    pub async fn new(config: &AwsConnectionConfig) -> AnyResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url.clone());
        }

        let shared_config = loader.load().await;
        debug!(region = ?shared_config.region(), "Loaded AWS configuration");

        Ok(Self::with_client(Client::new(&shared_config)))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for SsmParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmParameterStore")
            .field("region", &self.client.config().region())
            .finish()
    }
}

pub(crate) fn from_sdk(parameter: &SdkParameter) -> Parameter {
    Parameter::new(
        ParameterName::new(parameter.name().unwrap_or_default()),
        parameter.value().map(str::to_string),
        parameter.r#type().map(|t| ParameterType::from(t.as_str())),
    )
}

#[async_trait::async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<Parameter>, StoreError> {
        debug!(name, with_decryption, "Calling ssm:GetParameter");

        let response = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_parameter_not_found() => {
                    StoreError::ParameterNotFound(name.to_string())
                }
                Some(e) if e.is_parameter_version_not_found() => {
                    StoreError::ParameterVersionNotFound(name.to_string())
                }
                _ => StoreError::RequestFailed(format!(
                    "Failed to get parameter '{}': {}",
                    name, err
                )),
            })?;

        Ok(response.parameter().map(from_sdk))
    }

    async fn get_parameters_by_path(
        &self,
        query: PathQuery,
    ) -> Result<ParameterPage, StoreError> {
        debug!(
            path = query.path.as_str(),
            recursive = query.recursive,
            has_token = query.next_token.is_some(),
            "Calling ssm:GetParametersByPath"
        );

        let response = self
            .client
            .get_parameters_by_path()
            .path(&query.path)
            .recursive(query.recursive)
            .with_decryption(query.with_decryption)
            .set_next_token(query.next_token.clone())
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_invalid_next_token() => {
                    StoreError::InvalidNextToken(query.next_token.clone().unwrap_or_default())
                }
                _ => StoreError::RequestFailed(format!(
                    "Failed to list parameters under '{}': {}",
                    query.path, err
                )),
            })?;

        Ok(ParameterPage {
            parameters: response
                .parameters
                .map(|parameters| parameters.iter().map(from_sdk).collect()),
            next_token: response.next_token,
        })
    }
}
