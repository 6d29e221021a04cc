//! Operator command port used while the craft waits in orbit.

use std::collections::VecDeque;
use std::io::BufRead;

use tracing::warn;

/// Producer of single operator tokens. `None` means no response arrived
/// (end of input, closed channel, timeout) and is treated as a cancel.
pub trait CommandSource {
    fn next_token(&mut self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    ReturnRequest,
    Confirm,
    Unrecognized,
}

impl OperatorCommand {
    pub fn parse_request(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "r" | "return" => OperatorCommand::ReturnRequest,
            _ => OperatorCommand::Unrecognized,
        }
    }

    pub fn parse_confirmation(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => OperatorCommand::Confirm,
            _ => OperatorCommand::Unrecognized,
        }
    }
}

/// Pre-recorded tokens, consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommands {
    tokens: VecDeque<String>,
}

impl ScriptedCommands {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedCommands {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a comma separated list such as `r,y`.
    pub fn from_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty()),
        )
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl CommandSource for ScriptedCommands {
    fn next_token(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }
}

/// Reads whitespace separated tokens from a line reader. Several tokens on
/// one line are handed out in order before the next line is read.
pub struct LineCommands<R: BufRead> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> LineCommands<R> {
    pub fn new(reader: R) -> Self {
        LineCommands {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> CommandSource for LineCommands<R> {
    fn next_token(&mut self) -> Option<String> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => self
                    .pending
                    .extend(line.split_whitespace().map(str::to_string)),
                Err(e) => {
                    warn!("Command input unavailable: {}", e);
                    return None;
                }
            }
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_request() {
        assert_eq!(OperatorCommand::parse_request("r"), OperatorCommand::ReturnRequest);
        assert_eq!(OperatorCommand::parse_request(" R "), OperatorCommand::ReturnRequest);
        assert_eq!(
            OperatorCommand::parse_request("Return"),
            OperatorCommand::ReturnRequest
        );
        assert_eq!(OperatorCommand::parse_request("x"), OperatorCommand::Unrecognized);
        assert_eq!(OperatorCommand::parse_request(""), OperatorCommand::Unrecognized);
    }

    #[test]
    fn test_parse_confirmation() {
        assert_eq!(OperatorCommand::parse_confirmation("Y"), OperatorCommand::Confirm);
        assert_eq!(OperatorCommand::parse_confirmation("yes"), OperatorCommand::Confirm);
        assert_eq!(OperatorCommand::parse_confirmation("n"), OperatorCommand::Unrecognized);
        assert_eq!(OperatorCommand::parse_confirmation("r"), OperatorCommand::Unrecognized);
    }

    #[test]
    fn test_scripted_commands_in_order() {
        let mut commands = ScriptedCommands::from_list("r, y,,");
        assert_eq!(commands.remaining(), 2);
        assert_eq!(commands.next_token().as_deref(), Some("r"));
        assert_eq!(commands.next_token().as_deref(), Some("y"));
        assert_eq!(commands.next_token(), None);
    }

    #[test]
    fn test_line_commands_skip_blank_lines() {
        let mut commands = LineCommands::new(Cursor::new("\n  \n r\n\ny\n"));
        assert_eq!(commands.next_token().as_deref(), Some("r"));
        assert_eq!(commands.next_token().as_deref(), Some("y"));
        assert_eq!(commands.next_token(), None);
    }

    #[test]
    fn test_line_commands_split_tokens_on_one_line() {
        let mut commands = LineCommands::new(Cursor::new("r y\n"));
        assert_eq!(commands.next_token().as_deref(), Some("r"));
        assert_eq!(commands.next_token().as_deref(), Some("y"));
        assert_eq!(commands.next_token(), None);
    }

    #[test]
    fn test_line_commands_keep_leftover_tokens_for_later_lines() {
        let mut commands = LineCommands::new(Cursor::new("r  extra\ny\n"));
        assert_eq!(commands.next_token().as_deref(), Some("r"));
        assert_eq!(commands.next_token().as_deref(), Some("extra"));
        assert_eq!(commands.next_token().as_deref(), Some("y"));
        assert_eq!(commands.next_token(), None);
    }
}
