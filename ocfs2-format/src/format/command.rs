use super::options::FormatForm;
use crate::config::FormatterConfig;
use std::fmt;
use std::path::Path;

/// The formatter command line for one confirmed submission.
///
/// Tokens are: program, force flag, every field's arguments in field order, and
/// the device last. Built once; there is no way to modify it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCommand {
    tokens: Vec<String>,
}

impl FormatCommand {
    pub fn assemble(formatter: &FormatterConfig, form: &FormatForm, device: &Path) -> Self {
        let mut tokens = vec![formatter.program.clone()];
        if !formatter.force_flag.is_empty() {
            tokens.push(formatter.force_flag.clone());
        }
        tokens.extend(form.option_arguments());
        tokens.push(device.display().to_string());
        Self { tokens }
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The target device, always the final token.
    pub fn device(&self) -> &str {
        &self.tokens[self.tokens.len() - 1]
    }
}

fn shell_quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

/// Shell-style rendering for logs and dry runs.
impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self.tokens.iter().map(|t| shell_quote(t)).collect();
        f.write_str(&quoted.join(" "))
    }
}
