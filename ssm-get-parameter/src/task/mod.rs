pub mod operations;

pub use operations::{RunSummary, TaskOperations};

use std::{future::Future, sync::Arc};

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    audit::BaseAuditLogger,
    configs::{AwsConnectionConfig, Configs, TaskConfig},
    messages::Message,
    pipeline::{LoggingCommandSink, TaskResult, VariableSink},
    store::{ParameterStore, adapters::ssm_storage::SsmParameterStore},
};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter) // reads RUST_LOG
        .with_target(false)
        .with_level(true)
        .try_init();
}

async fn connect_ssm(config: AwsConnectionConfig) -> anyhow::Result<Arc<dyn ParameterStore>> {
    Ok(Arc::new(SsmParameterStore::new(&config).await?))
}

async fn run<F, Fut>(sink: &mut dyn VariableSink, connect: F) -> anyhow::Result<RunSummary>
where
    F: FnOnce(AwsConnectionConfig) -> Fut,
    Fut: Future<Output = anyhow::Result<Arc<dyn ParameterStore>>>,
{
    let config = TaskConfig::load().await?;
    debug!("CONFIGS: {:?}", &config);

    let store = connect(config.aws_connection).await?;
    let operations = TaskOperations::new(
        store,
        config.task_parameters,
        Arc::new(BaseAuditLogger::new(config.audit_config)),
    )?;

    Ok(operations.execute(sink).await?)
}

fn report(sink: &mut dyn VariableSink, result: TaskResult, message: &str) -> TaskResult {
    if let Err(e) = sink.set_result(result, message) {
        error!("Failed to report the task result: {}", e);
        return TaskResult::Failed;
    }
    result
}

/// Runs the task against whatever store `connect` builds from the connection
/// settings, and reports the outcome through `sink`.
pub async fn start_with<F, Fut>(sink: &mut dyn VariableSink, connect: F) -> TaskResult
where
    F: FnOnce(AwsConnectionConfig) -> Fut,
    Fut: Future<Output = anyhow::Result<Arc<dyn ParameterStore>>>,
{
    match run(sink, connect).await {
        Ok(summary) => {
            info!(
                variables = summary.variables_set,
                secrets = summary.secrets_set,
                pages = summary.pages_read,
                "Parameters exported"
            );
            report(sink, TaskResult::Succeeded, &Message::TaskCompleted.to_string())
        }
        Err(e) => {
            error!("Task failed: {:#}", e);
            report(sink, TaskResult::Failed, &e.to_string())
        }
    }
}

/// Loads the task inputs, reads the parameters from SSM and reports the
/// outcome to the pipeline host on stdout.
pub async fn start() -> TaskResult {
    setup_logging();
    start_with(&mut LoggingCommandSink::stdout(), connect_ssm).await
}

/// Fails the task before it could start.
pub fn abort_with(sink: &mut dyn VariableSink, message: &str) -> TaskResult {
    error!("Task failed: {}", message);
    report(sink, TaskResult::Failed, message)
}

pub fn abort(message: &str) -> TaskResult {
    setup_logging();
    abort_with(&mut LoggingCommandSink::stdout(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RecordingSink;

    #[test]
    fn test_abort_reports_failure_to_host() {
        let mut sink = LoggingCommandSink::new(Vec::new());

        let result = abort_with(&mut sink, "Failed to load environment file 'ci.env'");

        assert_eq!(result, TaskResult::Failed);
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "##vso[task.complete result=Failed;]Failed to load environment file 'ci.env'\n"
        );
    }

    #[test]
    fn test_report_keeps_result() {
        let mut sink = RecordingSink::new();

        assert_eq!(
            report(&mut sink, TaskResult::Succeeded, "Task completed"),
            TaskResult::Succeeded
        );
        assert_eq!(
            sink.result,
            Some((TaskResult::Succeeded, "Task completed".to_string()))
        );
    }
}
