use observability_demo::clients::{ReqwestGateway, SsmParameterSource};
use observability_demo::core::config::TracerConfig;
use observability_demo::tracer::TracerService;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    observability_demo::setup_logging();

    let config = TracerConfig::from_env()?;
    let gateway = ReqwestGateway::new(reqwest::Client::new());
    let parameters = SsmParameterSource::from_env().await;

    let service = TracerService::new(config, gateway, parameters);
    lambda_runtime::run(lambda_runtime::service_fn(|event| service.handle(event))).await
}
