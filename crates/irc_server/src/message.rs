//! Generic IRC line tokenizer: one line of text in, `(prefix?, command,
//! params[])` out. Command-specific grammar and per-param validation live
//! in the handlers, which index into the tokenized `params` directly.

use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_till, take_while, take_while1},
    character::complete::char,
    combinator::opt,
    multi::many0,
    sequence::preceded,
};

pub const MAX_PARAMS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub prefix: Option<String>,
    pub command: String,
    pub params: Vec<String>,
}

fn is_space(c: char) -> bool {
    c == ' '
}

fn prefix_parser(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_till(is_space)).parse(input)
}

fn command_parser(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != ' ' && c != '\0').parse(input)
}

fn middle_param(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != ' ' && c != '\0' && c != '\r' && c != '\n').parse(input)
}

fn trailing_param(input: &str) -> IResult<&str, &str> {
    preceded(tag(":"), take_while(|c: char| c != '\r' && c != '\n')).parse(input)
}

fn spaces(input: &str) -> IResult<&str, &str> {
    take_while1(is_space).parse(input)
}

/// Parses one already-unframed line (no CR/LF, no leading/trailing space
/// guaranteed) into its wire components. Returns `None` for an empty or
/// whitespace-only line, matching "empty messages are silently ignored".
pub fn parse_line(line: &str) -> Option<ParsedMessage> {
    let line = line.trim_start_matches(' ');
    if line.is_empty() {
        return None;
    }

    let (rest, prefix) = opt(prefix_parser).parse(line).ok()?;
    let rest = if prefix.is_some() {
        spaces(rest).ok()?.0
    } else {
        rest
    };

    let (mut rest, command) = command_parser(rest).ok()?;
    if command.is_empty() {
        return None;
    }

    let mut params = Vec::new();
    loop {
        if params.len() >= MAX_PARAMS {
            break;
        }
        let Ok((r, _)) = spaces(rest) else { break };
        rest = r;
        if rest.is_empty() {
            break;
        }
        if let Ok((r, trailing)) = trailing_param(rest) {
            params.push(trailing.to_owned());
            rest = r;
            break;
        }
        let Ok((r, param)) = middle_param(rest) else {
            break;
        };
        params.push(param.to_owned());
        rest = r;
    }

    // Drop any further whitespace-separated tokens beyond the 15-param cap
    // silently, per the framing contract.
    let _ = many0(preceded(spaces, middle_param)).parse(rest);

    Some(ParsedMessage {
        prefix: prefix.map(str::to_owned),
        command: command.to_owned(),
        params,
    })
}
