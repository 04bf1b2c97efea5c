use crate::messages::{COMMAND_NOT_FOUND, START};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Unknown,
}

impl Command {
    pub const START_TOKEN: &'static str = "/start";

    /// Any text containing the start token is a start command.
    pub fn parse(text: Option<&str>) -> Self {
        match text {
            Some(text) if text.contains(Self::START_TOKEN) => Command::Start,
            _ => Command::Unknown,
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            Command::Start => START,
            Command::Unknown => COMMAND_NOT_FOUND,
        }
    }
}
