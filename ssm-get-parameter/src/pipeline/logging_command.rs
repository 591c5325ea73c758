use std::io::{self, Write};

use crate::{
    domain::VariableName,
    pipeline::{SinkError, TaskResult, VariableSink},
};

const COMMAND_PREFIX: &str = "##vso[";

/// Writes Azure Pipelines logging commands, one per line.
pub struct LoggingCommandSink<W: Write + Send> {
    out: W,
}

impl LoggingCommandSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> LoggingCommandSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn command(
        &mut self,
        area_action: &str,
        properties: &[(&str, String)],
        data: &str,
    ) -> Result<(), SinkError> {
        let mut line = format!("{COMMAND_PREFIX}{area_action}");
        if !properties.is_empty() {
            line.push(' ');
            for (key, value) in properties {
                line.push_str(key);
                line.push('=');
                line.push_str(&escape_property(value));
                line.push(';');
            }
        }
        line.push(']');
        line.push_str(&escape_data(data));

        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> VariableSink for LoggingCommandSink<W> {
    fn set_variable(
        &mut self,
        name: &VariableName,
        value: &str,
        is_secret: bool,
    ) -> Result<(), SinkError> {
        self.command(
            "task.setvariable",
            &[
                ("variable", name.to_string()),
                ("issecret", is_secret.to_string()),
            ],
            value,
        )
    }

    fn log_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.command("task.logissue", &[("type", "error".to_string())], message)
    }

    fn set_result(&mut self, result: TaskResult, message: &str) -> Result<(), SinkError> {
        self.command(
            "task.complete",
            &[("result", result.to_string())],
            message,
        )
    }
}

pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(']', "%5D").replace(';', "%3B")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(sink: LoggingCommandSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_set_plain_variable() {
        let mut sink = LoggingCommandSink::new(Vec::new());
        sink.set_variable(&VariableName::new("db_host"), "localhost", false)
            .unwrap();

        assert_eq!(
            output(sink),
            "##vso[task.setvariable variable=db_host;issecret=false;]localhost\n"
        );
    }

    #[test]
    fn test_set_secret_variable() {
        let mut sink = LoggingCommandSink::new(Vec::new());
        sink.set_variable(&VariableName::new("db_password"), "hunter2", true)
            .unwrap();

        assert_eq!(
            output(sink),
            "##vso[task.setvariable variable=db_password;issecret=true;]hunter2\n"
        );
    }

    #[test]
    fn test_multiline_value_is_escaped() {
        let mut sink = LoggingCommandSink::new(Vec::new());
        sink.set_variable(&VariableName::new("cert"), "line1\r\nline2 100%", true)
            .unwrap();

        assert_eq!(
            output(sink),
            "##vso[task.setvariable variable=cert;issecret=true;]line1%0D%0Aline2 100%AZP25\n"
        );
    }

    #[test]
    fn test_property_escaping() {
        assert_eq!(escape_property("a;b]c%"), "a%3Bb%5Dc%AZP25");
        assert_eq!(escape_data("a;b]c"), "a;b]c");
    }

    #[test]
    fn test_log_error_and_result() {
        let mut sink = LoggingCommandSink::new(Vec::new());
        sink.log_error("nothing found").unwrap();
        sink.set_result(TaskResult::Failed, "boom").unwrap();

        assert_eq!(
            output(sink),
            "##vso[task.logissue type=error;]nothing found\n##vso[task.complete result=Failed;]boom\n"
        );
    }
}
