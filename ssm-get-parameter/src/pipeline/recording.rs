use crate::{
    domain::VariableName,
    pipeline::{SinkError, TaskResult, VariableSink},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAssignment {
    pub name: VariableName,
    pub value: String,
    pub is_secret: bool,
}

/// Keeps everything a run hands to the host in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub assignments: Vec<RecordedAssignment>,
    pub errors: Vec<String>,
    pub result: Option<(TaskResult, String)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(&self, name: &str) -> Option<&RecordedAssignment> {
        self.assignments
            .iter()
            .rev()
            .find(|a| a.name.as_str() == name)
    }
}

impl VariableSink for RecordingSink {
    fn set_variable(
        &mut self,
        name: &VariableName,
        value: &str,
        is_secret: bool,
    ) -> Result<(), SinkError> {
        self.assignments.push(RecordedAssignment {
            name: name.clone(),
            value: value.to_string(),
            is_secret,
        });
        Ok(())
    }

    fn log_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.errors.push(message.to_string());
        Ok(())
    }

    fn set_result(&mut self, result: TaskResult, message: &str) -> Result<(), SinkError> {
        self.result = Some((result, message.to_string()));
        Ok(())
    }
}
