use async_trait::async_trait;
use aws_sdk_ssm::Client as SsmClient;
use aws_sdk_ssm::error::DisplayErrorContext;

use crate::errors::DemoError;

/// Named configuration values held outside the function.
#[async_trait]
pub trait ParameterSource: Send + Sync {
    /// Returns `Ok(None)` when the parameter does not exist or has no value.
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<String>, DemoError>;
}

/// SSM Parameter Store. Secrets Manager secrets are reachable through the
/// `/aws/reference/secretsmanager/` prefix with decryption on.
pub struct SsmParameterSource {
    client: SsmClient,
}

impl SsmParameterSource {
    #[must_use]
    pub fn new(client: SsmClient) -> Self {
        Self { client }
    }

    pub async fn from_env() -> Self {
        let shared = aws_config::from_env().load().await;
        Self::new(SsmClient::new(&shared))
    }
}

#[async_trait]
impl ParameterSource for SsmParameterSource {
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<String>, DemoError> {
        match self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await
        {
            Ok(resp) => Ok(resp
                .parameter()
                .and_then(|p| p.value())
                .map(ToString::to_string)),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .is_some_and(|se| se.is_parameter_not_found());
                if not_found {
                    Ok(None)
                } else {
                    Err(DemoError::AwsError(format!(
                        "ssm get_parameter {name}: {}",
                        DisplayErrorContext(&e)
                    )))
                }
            }
        }
    }
}
