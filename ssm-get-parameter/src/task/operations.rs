use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{
    audit::{AuditLog, AuditLogger},
    configs::{ReadMode, ReadModeKind, TaskParameters},
    domain::{
        MISSING_VALUE_PLACEHOLDER, ParameterName, PathQuery, VariableName, lookup_key,
        normalize_path,
    },
    error::TaskError,
    messages::Message,
    pipeline::VariableSink,
    store::ParameterStore,
    transform::VariableNamer,
};

/// What a finished run handed to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub variables_set: usize,
    pub secrets_set: usize,
    pub pages_read: usize,
    pub stopped_on_empty: bool,
}

pub struct TaskOperations {
    store: Arc<dyn ParameterStore>,
    task_parameters: TaskParameters,
    namer: VariableNamer,
    audit_logger: Arc<dyn AuditLogger>,
}

impl TaskOperations {
    pub fn new(
        store: Arc<dyn ParameterStore>,
        task_parameters: TaskParameters,
        audit_logger: Arc<dyn AuditLogger>,
    ) -> Result<Self, TaskError> {
        task_parameters.validate()?;
        let namer = VariableNamer::new(&task_parameters)?;
        Ok(Self {
            store,
            task_parameters,
            namer,
            audit_logger,
        })
    }

    pub async fn execute(&self, sink: &mut dyn VariableSink) -> Result<RunSummary, TaskError> {
        let mut summary = RunSummary::default();

        match &self.task_parameters.read_mode {
            ReadMode::Single {
                parameter_name,
                parameter_version,
            } => {
                self.read_single_parameter_value(
                    parameter_name,
                    *parameter_version,
                    sink,
                    &mut summary,
                )
                .await?
            }
            ReadMode::Hierarchy {
                parameter_path,
                recursive,
            } => {
                self.read_parameter_hierarchy(parameter_path, *recursive, sink, &mut summary)
                    .await?
            }
        }

        let completed = Message::TaskCompleted;
        info!(key = completed.key(), "{}", completed);
        Ok(summary)
    }

    /// SecureString parameters become secret variables.
    async fn read_single_parameter_value(
        &self,
        parameter_name: &ParameterName,
        parameter_version: Option<u64>,
        sink: &mut dyn VariableSink,
        summary: &mut RunSummary,
    ) -> Result<(), TaskError> {
        let variable_name = self.namer.variable_name(parameter_name.as_str());
        let key = lookup_key(parameter_name, parameter_version);

        let (value, is_secret, placeholder) = match self.store.get_parameter(&key, true).await? {
            Some(parameter) => (
                parameter.value_or_placeholder(),
                parameter.is_secret(),
                parameter.value().is_none(),
            ),
            None => {
                debug!(key = key.as_str(), "Store answered without a parameter");
                (MISSING_VALUE_PLACEHOLDER.to_string(), false, true)
            }
        };

        self.assign(
            sink,
            summary,
            ReadModeKind::Single,
            &variable_name,
            &key,
            &value,
            is_secret,
            placeholder,
        )
        .await
    }

    async fn read_parameter_hierarchy(
        &self,
        parameter_path: &str,
        recursive: bool,
        sink: &mut dyn VariableSink,
        summary: &mut RunSummary,
    ) -> Result<(), TaskError> {
        let final_path = normalize_path(parameter_path);
        let reading = Message::ReadingParameterHierarchy {
            path: &final_path,
            recursive,
        };
        info!(key = reading.key(), "{}", reading);

        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .store
                .get_parameters_by_path(PathQuery {
                    path: final_path.clone(),
                    recursive,
                    with_decryption: true,
                    next_token: next_token.take(),
                })
                .await?;
            summary.pages_read += 1;

            // The SDK answers an empty path with `Some(vec![])` rather than
            // `None`, so a tokenless empty first page counts as absent too.
            let parameters = match page.parameters {
                Some(parameters)
                    if !parameters.is_empty()
                        || page.next_token.is_some()
                        || summary.variables_set > 0 =>
                {
                    parameters
                }
                _ => {
                    let empty = Message::ErrorParametersEmpty;
                    error!(key = empty.key(), path = final_path.as_str(), "{}", empty);
                    sink.log_error(&empty.to_string())?;
                    summary.stopped_on_empty = true;
                    break;
                }
            };

            next_token = page.next_token;
            for parameter in &parameters {
                let variable_name = self.namer.variable_name(parameter.name().as_str());
                self.assign(
                    sink,
                    summary,
                    ReadModeKind::Hierarchy,
                    &variable_name,
                    parameter.name().as_str(),
                    &parameter.value_or_placeholder(),
                    parameter.is_secret(),
                    parameter.value().is_none(),
                )
                .await?;
            }

            if next_token.is_none() {
                break;
            }
        }

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn assign(
        &self,
        sink: &mut dyn VariableSink,
        summary: &mut RunSummary,
        read_mode: ReadModeKind,
        variable_name: &VariableName,
        parameter_name: &str,
        value: &str,
        is_secret: bool,
        placeholder: bool,
    ) -> Result<(), TaskError> {
        if variable_name.as_str().is_empty() {
            return Err(TaskError::EmptyVariableName(parameter_name.to_string()));
        }

        let setting = Message::SettingVariable {
            variable_name: variable_name.as_str(),
            parameter_name,
            is_secret,
        };
        info!(key = setting.key(), "{}", setting);
        sink.set_variable(variable_name, value, is_secret)?;

        summary.variables_set += 1;
        if is_secret {
            summary.secrets_set += 1;
        }

        self.audit_logger
            .log(AuditLog::set_variable(
                read_mode,
                variable_name,
                parameter_name,
                is_secret,
                placeholder,
            ))
            .await;
        Ok(())
    }
}
