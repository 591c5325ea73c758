use regex::{Regex, RegexBuilder};

use crate::{
    configs::{
        ConfigError, NameTransform, TaskParameters,
        task::{INPUT_CUSTOM_VARIABLE_NAME, INPUT_REPLACEMENT_PATTERN},
    },
    domain::{PATH_SEPARATOR, VariableName},
};

#[derive(Debug, Clone)]
enum Rule {
    Unchanged,
    Leaf,
    Substitute {
        pattern: Regex,
        replacement: String,
        global: bool,
    },
    Fixed(String),
}

/// Turns parameter keys into pipeline variable names, using the naming
/// options of the active read mode.
#[derive(Debug, Clone)]
pub struct VariableNamer {
    rule: Rule,
}

impl VariableNamer {
    pub fn new(parameters: &TaskParameters) -> Result<Self, ConfigError> {
        let naming = &parameters.naming;
        let rule = match naming.transform_for(parameters.read_mode.kind()) {
            NameTransform::None => Rule::Unchanged,
            NameTransform::Leaf => Rule::Leaf,
            NameTransform::Substitute => {
                let source = naming
                    .replacement_pattern
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingInput(INPUT_REPLACEMENT_PATTERN.into()))?;
                let pattern = RegexBuilder::new(source)
                    .case_insensitive(naming.case_insensitive_match)
                    .build()
                    .map_err(|e| ConfigError::InvalidInput {
                        name: INPUT_REPLACEMENT_PATTERN.to_string(),
                        value: source.to_string(),
                        reason: e.to_string(),
                    })?;
                Rule::Substitute {
                    replacement: replacement_template(&naming.replacement_text, &pattern),
                    pattern,
                    global: naming.global_match,
                }
            }
            NameTransform::Custom => Rule::Fixed(
                naming
                    .custom_variable_name
                    .clone()
                    .ok_or_else(|| ConfigError::MissingInput(INPUT_CUSTOM_VARIABLE_NAME.into()))?,
            ),
        };

        Ok(Self { rule })
    }

    pub fn variable_name(&self, parameter_key: &str) -> VariableName {
        let name = match &self.rule {
            Rule::Unchanged => parameter_key.to_string(),
            Rule::Leaf => parameter_key
                .trim_end_matches(PATH_SEPARATOR)
                .rsplit(PATH_SEPARATOR)
                .next()
                .unwrap_or_default()
                .to_string(),
            Rule::Substitute {
                pattern,
                replacement,
                global,
            } => {
                let replaced = if *global {
                    pattern.replace_all(parameter_key, replacement.as_str())
                } else {
                    pattern.replace(parameter_key, replacement.as_str())
                };
                replaced.into_owned()
            }
            Rule::Fixed(name) => name.clone(),
        };

        VariableName::new(name)
    }
}

/// Rewrites a `$1` / `$<name>` / `$&` / `$$` replacement into the `regex`
/// crate's `${..}` form. A `$` that doesn't start a reference to one of the
/// pattern's groups is kept literally.
fn replacement_template(text: &str, pattern: &Regex) -> String {
    let groups = pattern.captures_len() - 1;
    let names: Vec<&str> = pattern.capture_names().flatten().collect();
    let chars: Vec<char> = text.chars().collect();
    let digit = |at: usize| chars.get(at).and_then(|c| c.to_digit(10)).map(|d| d as usize);

    let mut template = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '$' {
            template.push(chars[i]);
            i += 1;
            continue;
        }

        match chars.get(i + 1) {
            Some('$') => {
                template.push_str("$$");
                i += 2;
            }
            Some('&') => {
                template.push_str("${0}");
                i += 2;
            }
            Some('<') if !names.is_empty() => {
                match chars[i + 2..].iter().position(|c| *c == '>') {
                    Some(len) => {
                        let name: String = chars[i + 2..i + 2 + len].iter().collect();
                        // unknown group names expand to nothing
                        if names.contains(&name.as_str()) {
                            template.push_str(&format!("${{{name}}}"));
                        }
                        i += len + 3;
                    }
                    None => {
                        template.push_str("$$");
                        i += 1;
                    }
                }
            }
            _ => {
                let group = digit(i + 1).and_then(|one| {
                    // two digits win when the pattern has that many groups
                    match digit(i + 2).map(|two| one * 10 + two) {
                        Some(n) if (1..=groups).contains(&n) => Some((n, 3)),
                        _ if (1..=groups).contains(&one) => Some((one, 2)),
                        _ => None,
                    }
                });
                match group {
                    Some((n, width)) => {
                        template.push_str(&format!("${{{n}}}"));
                        i += width;
                    }
                    None => {
                        template.push_str("$$");
                        i += 1;
                    }
                }
            }
        }
    }

    template
}
