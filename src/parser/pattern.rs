//! Compiled time format patterns.
//!
//! Patterns use single-letter codes (`g`, `h`, `G`, `H`, `i`, `s`, `a`, `A`).
//! A pattern compiles once into an anchored regex for parsing and a chrono
//! strftime string for formatting.

use crate::time_value::Meridiem;
use chrono::NaiveTime;
use log::debug;
use regex::{Captures, Regex};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while compiling a format pattern
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Format pattern is empty")]
    Empty,
    #[error("Format pattern '{0}' ends with a dangling escape")]
    TrailingEscape(String),
    #[error("Format pattern '{0}' contains no time fields")]
    NoTimeFields(String),
    #[error("Format pattern '{pattern}' does not compile: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Hour12,
    Hour12Padded,
    Hour24,
    Hour24Padded,
    Minute,
    Second,
    MeridiemLower,
    MeridiemUpper,
    Whitespace(String),
    Literal(char),
}

impl Token {
    fn from_code(c: char) -> Option<Self> {
        match c {
            'g' => Some(Token::Hour12),
            'h' => Some(Token::Hour12Padded),
            'G' => Some(Token::Hour24),
            'H' => Some(Token::Hour24Padded),
            'i' => Some(Token::Minute),
            's' => Some(Token::Second),
            'a' => Some(Token::MeridiemLower),
            'A' => Some(Token::MeridiemUpper),
            _ => None,
        }
    }

    fn group(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Token::Hour12 => Some(("hour12", "1[0-2]|[1-9]")),
            Token::Hour12Padded => Some(("hour12", "1[0-2]|0?[1-9]")),
            Token::Hour24 => Some(("hour24", "2[0-3]|1[0-9]|[0-9]")),
            Token::Hour24Padded => Some(("hour24", "2[0-3]|[01]?[0-9]")),
            Token::Minute => Some(("minute", "[0-5][0-9]")),
            Token::Second => Some(("second", "[0-5][0-9]")),
            Token::MeridiemLower | Token::MeridiemUpper => Some(("meridiem", "(?i:am|pm)")),
            Token::Whitespace(_) | Token::Literal(_) => None,
        }
    }

    fn strftime(&self) -> String {
        match self {
            Token::Hour12 => "%-I".to_string(),
            Token::Hour12Padded => "%I".to_string(),
            Token::Hour24 => "%-H".to_string(),
            Token::Hour24Padded => "%H".to_string(),
            Token::Minute => "%M".to_string(),
            Token::Second => "%S".to_string(),
            Token::MeridiemLower => "%P".to_string(),
            Token::MeridiemUpper => "%p".to_string(),
            Token::Whitespace(ws) => ws.clone(),
            Token::Literal('%') => "%%".to_string(),
            Token::Literal(c) => c.to_string(),
        }
    }

    fn is_meridiem(&self) -> bool {
        matches!(self, Token::MeridiemLower | Token::MeridiemUpper)
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, FormatError> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => tokens.push(Token::Literal(escaped)),
                None => return Err(FormatError::TrailingEscape(pattern.to_string())),
            }
        } else if c.is_whitespace() {
            let mut run = c.to_string();
            while let Some(&next) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                run.push(next);
                chars.next();
            }
            tokens.push(Token::Whitespace(run));
        } else if let Some(token) = Token::from_code(c) {
            tokens.push(token);
        } else {
            tokens.push(Token::Literal(c));
        }
    }

    Ok(tokens)
}

/// A compiled time format such as `h:iA`.
#[derive(Debug, Clone)]
pub struct TimeFormat {
    pattern: String,
    tokens: Vec<Token>,
    matcher: Regex,
    strftime: String,
}

impl TimeFormat {
    pub fn new(pattern: &str) -> Result<Self, FormatError> {
        if pattern.is_empty() {
            return Err(FormatError::Empty);
        }

        let tokens = tokenize(pattern)?;
        if !tokens.iter().any(|t| t.group().is_some() && !t.is_meridiem()) {
            return Err(FormatError::NoTimeFields(pattern.to_string()));
        }

        let mut seen: Vec<&str> = Vec::new();
        let mut source = String::from("^");
        for token in &tokens {
            match token.group() {
                // A field may appear twice; only the first occurrence captures.
                Some((name, body)) if seen.contains(&name) => {
                    source.push_str(&format!("(?:{})", body));
                }
                Some((name, body)) => {
                    seen.push(name);
                    source.push_str(&format!("(?P<{}>{})", name, body));
                }
                None => match token {
                    Token::Whitespace(_) => source.push_str(r"\s*"),
                    Token::Literal(c) => source.push_str(&regex::escape(&c.to_string())),
                    _ => {}
                },
            }
        }
        source.push('$');

        let matcher = Regex::new(&source)
            .map_err(|source| FormatError::Regex { pattern: pattern.to_string(), source })?;
        let strftime = tokens.iter().map(Token::strftime).collect();

        debug!("Compiled time format '{}' to matcher {}", pattern, matcher.as_str());
        Ok(Self { pattern: pattern.to_string(), tokens, matcher, strftime })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the last element of the pattern is an `a`/`A` marker.
    pub fn ends_with_meridiem(&self) -> bool {
        self.tokens.last().is_some_and(Token::is_meridiem)
    }

    pub fn has_meridiem(&self) -> bool {
        self.tokens.iter().any(Token::is_meridiem)
    }

    pub fn has_seconds(&self) -> bool {
        self.tokens.contains(&Token::Second)
    }

    /// Parse `text` as a whole. A 12-hour hour without a meridiem is read
    /// as AM; a 24-hour hour ignores any meridiem.
    pub fn parse_time(&self, text: &str) -> Option<NaiveTime> {
        let caps = self.matcher.captures(text)?;
        let meridiem = caps.name("meridiem").and_then(|m| m.as_str().parse::<Meridiem>().ok());

        let hour = if let Some(hour24) = number(&caps, "hour24") {
            hour24
        } else if let Some(hour12) = number(&caps, "hour12") {
            meridiem.unwrap_or(Meridiem::Am).to_24_hour(hour12)
        } else {
            0
        };
        let minute = number(&caps, "minute").unwrap_or(0);
        let second = number(&caps, "second").unwrap_or(0);

        NaiveTime::from_hms_opt(hour, minute, second)
    }

    pub fn format_time(&self, time: NaiveTime) -> String {
        time.format(&self.strftime).to_string()
    }
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

impl FromStr for TimeFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeFormat::new(s)
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl PartialEq for TimeFormat {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for TimeFormat {}
