//! Line-oriented VM source parser
//!
//! Strips `//` comments and blank lines, splits each remaining line on
//! whitespace, and validates it as exactly one VM command. The first
//! malformed line aborts the whole unit.

use crate::command::{ArithmeticOp, Command, Segment, SourcedCommand, TranslationUnit};
use hvt_common::{SourceLocation, TranslateError};
use log::debug;

/// Parse one `.vm` file into a translation unit.
///
/// `name` is the file's base name without extension; it becomes the
/// unit's static-variable namespace.
pub fn parse_unit(name: &str, source: &str) -> Result<TranslationUnit, TranslateError> {
    let mut commands = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        let location = SourceLocation::new(name, (i + 1) as u32);
        let command = parse_command(line, &location)?;
        commands.push(SourcedCommand { command, location });
    }

    debug!("parsed unit '{}': {} commands", name, commands.len());
    Ok(TranslationUnit::new(name, commands))
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_command(line: &str, location: &SourceLocation) -> Result<Command, TranslateError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let keyword = tokens[0];

    if let Ok(op) = keyword.parse::<ArithmeticOp>() {
        expect_arity(&tokens, 1, location)?;
        return Ok(Command::Arithmetic(op));
    }

    match keyword {
        "push" => {
            expect_arity(&tokens, 3, location)?;
            let (segment, index) = parse_segment_pair(tokens[1], tokens[2], location)?;
            Ok(Command::Push { segment, index })
        }
        "pop" => {
            expect_arity(&tokens, 3, location)?;
            let (segment, index) = parse_segment_pair(tokens[1], tokens[2], location)?;
            Ok(Command::Pop { segment, index })
        }
        "label" => {
            expect_arity(&tokens, 2, location)?;
            Ok(Command::Label(parse_symbol(tokens[1], location)?))
        }
        "goto" => {
            expect_arity(&tokens, 2, location)?;
            Ok(Command::Goto(parse_symbol(tokens[1], location)?))
        }
        "if-goto" => {
            expect_arity(&tokens, 2, location)?;
            Ok(Command::IfGoto(parse_symbol(tokens[1], location)?))
        }
        "function" => {
            expect_arity(&tokens, 3, location)?;
            Ok(Command::Function {
                name: parse_symbol(tokens[1], location)?,
                locals: parse_index(tokens[2], location)?,
            })
        }
        "call" => {
            expect_arity(&tokens, 3, location)?;
            Ok(Command::Call {
                name: parse_symbol(tokens[1], location)?,
                args: parse_index(tokens[2], location)?,
            })
        }
        "return" => {
            expect_arity(&tokens, 1, location)?;
            Ok(Command::Return)
        }
        other => Err(TranslateError::parse(
            format!("unknown command '{}'", other),
            location.clone(),
        )),
    }
}

fn expect_arity(
    tokens: &[&str],
    expected: usize,
    location: &SourceLocation,
) -> Result<(), TranslateError> {
    if tokens.len() != expected {
        return Err(TranslateError::parse(
            format!(
                "'{}' takes {} token{}, got {}",
                tokens[0],
                expected,
                if expected == 1 { "" } else { "s" },
                tokens.len()
            ),
            location.clone(),
        ));
    }
    Ok(())
}

fn parse_segment_pair(
    segment: &str,
    index: &str,
    location: &SourceLocation,
) -> Result<(Segment, u16), TranslateError> {
    let segment = segment.parse::<Segment>().map_err(|_| {
        TranslateError::parse(format!("unknown segment '{}'", segment), location.clone())
    })?;
    let index = parse_index(index, location)?;
    Ok((segment, index))
}

fn parse_index(token: &str, location: &SourceLocation) -> Result<u16, TranslateError> {
    token.parse::<u16>().map_err(|_| {
        TranslateError::parse(
            format!("expected a non-negative integer, got '{}'", token),
            location.clone(),
        )
    })
}

/// Labels and function names: letters, digits, `_ . $ :`, not starting
/// with a digit. Same alphabet the downstream assembler accepts.
fn parse_symbol(token: &str, location: &SourceLocation) -> Result<String, TranslateError> {
    let valid_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':');
    let starts_with_digit = token.chars().next().is_some_and(|c| c.is_ascii_digit());

    if token.is_empty() || starts_with_digit || !token.chars().all(valid_char) {
        return Err(TranslateError::parse(
            format!("invalid symbol '{}'", token),
            location.clone(),
        ));
    }
    Ok(token.to_string())
}
