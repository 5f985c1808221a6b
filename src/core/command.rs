//! Command parser for the terminal host
//!
//! One command per line. Scripts may contain blank lines and `#` comments.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::CommandError;
use crate::types::Event;

lazy_static! {
    // heart 1 | touch 1 | play 3 | ended 2
    static ref RE_PAGE_EVENT: Regex = Regex::new(
        r"(?i)^(heart|touch|play|ended)\s+(\d+)$"
    ).unwrap();

    // key ArrowRight
    static ref RE_KEY: Regex = Regex::new(
        r"(?i)^key\s+(\S+)$"
    ).unwrap();

    // wait 600 | wait 600ms | wait 2s
    static ref RE_WAIT: Regex = Regex::new(
        r"(?i)^wait\s+(\d+)\s*(ms|s)?$"
    ).unwrap();
}

/// One parsed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    /// Let virtual time pass (ms)
    Wait(u64),
    Status,
    Quit,
}

/// Parses command lines for a deck of `page_count` pages
#[derive(Debug, Clone)]
pub struct CommandParser {
    page_count: usize,
}

impl CommandParser {
    pub fn new(page_count: usize) -> Self {
        Self { page_count }
    }

    /// Parse one line; `Ok(None)` for blank lines and comments
    pub fn parse(&self, line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        match line.to_ascii_lowercase().as_str() {
            "gift" => return Ok(Some(Command::Event(Event::OpenGift))),
            "back" => return Ok(Some(Command::Event(Event::Back))),
            "status" => return Ok(Some(Command::Status)),
            "quit" | "exit" => return Ok(Some(Command::Quit)),
            _ => {}
        }

        if let Some(caps) = RE_PAGE_EVENT.captures(line) {
            let page = self.page(&caps[2])?;
            let event = match caps[1].to_ascii_lowercase().as_str() {
                "heart" => Event::Affordance(page),
                "touch" => Event::Interaction(page),
                "play" => Event::MediaPlay(page),
                _ => Event::MediaEnded(page),
            };
            return Ok(Some(Command::Event(event)));
        }

        if let Some(caps) = RE_KEY.captures(line) {
            return Ok(Some(Command::Event(Event::Key(caps[1].to_string()))));
        }

        if let Some(caps) = RE_WAIT.captures(line) {
            let amount: u64 = caps[1]
                .parse()
                .map_err(|_| CommandError::Unknown(line.to_string()))?;
            let ms = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
                Some(unit) if unit == "s" => amount.saturating_mul(1_000),
                _ => amount,
            };
            return Ok(Some(Command::Wait(ms)));
        }

        Err(CommandError::Unknown(line.to_string()))
    }

    /// Parse a whole script, stopping at the first bad line
    pub fn parse_script(&self, script: &str) -> Result<Vec<Command>, CommandError> {
        let mut commands = Vec::new();
        for (number, line) in script.lines().enumerate() {
            match self.parse(line) {
                Ok(Some(command)) => commands.push(command),
                Ok(None) => {}
                Err(e) => {
                    return Err(CommandError::AtLine {
                        line: number + 1,
                        message: e.to_string(),
                    })
                }
            }
        }
        Ok(commands)
    }

    fn page(&self, digits: &str) -> Result<usize, CommandError> {
        let index: usize = digits
            .parse()
            .map_err(|_| CommandError::Unknown(digits.to_string()))?;
        if index >= self.page_count {
            return Err(CommandError::PageOutOfRange {
                index,
                count: self.page_count,
            });
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parser() -> CommandParser {
        CommandParser::new(crate::PAGE_COUNT)
    }

    #[test]
    fn test_bare_commands() {
        let p = parser();
        assert_eq!(p.parse("gift"), Ok(Some(Command::Event(Event::OpenGift))));
        assert_eq!(p.parse("  BACK "), Ok(Some(Command::Event(Event::Back))));
        assert_eq!(p.parse("status"), Ok(Some(Command::Status)));
        assert_eq!(p.parse("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_page_events() {
        let p = parser();
        assert_eq!(p.parse("heart 1"), Ok(Some(Command::Event(Event::Affordance(1)))));
        assert_eq!(p.parse("touch 1"), Ok(Some(Command::Event(Event::Interaction(1)))));
        assert_eq!(p.parse("play 3"), Ok(Some(Command::Event(Event::MediaPlay(3)))));
        assert_eq!(p.parse("ended 2"), Ok(Some(Command::Event(Event::MediaEnded(2)))));
    }

    #[test]
    fn test_key_keeps_case() {
        assert_eq!(
            parser().parse("key ArrowRight"),
            Ok(Some(Command::Event(Event::Key("ArrowRight".to_string()))))
        );
    }

    #[test]
    fn test_wait_units() {
        let p = parser();
        assert_eq!(p.parse("wait 600"), Ok(Some(Command::Wait(600))));
        assert_eq!(p.parse("wait 600ms"), Ok(Some(Command::Wait(600))));
        assert_eq!(p.parse("wait 2s"), Ok(Some(Command::Wait(2_000))));
    }

    #[test]
    fn test_comments_and_blanks() {
        let p = parser();
        assert_eq!(p.parse(""), Ok(None));
        assert_eq!(p.parse("# open the gift"), Ok(None));
    }

    #[test]
    fn test_page_out_of_range() {
        assert_eq!(
            parser().parse("heart 7"),
            Err(CommandError::PageOutOfRange { index: 7, count: 7 })
        );
    }

    #[test]
    fn test_script_reports_line() {
        let err = parser().parse_script("gift\nwait 600\nfly away\n").unwrap_err();
        assert!(matches!(err, CommandError::AtLine { line: 3, .. }));
    }
}
