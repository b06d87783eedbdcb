//! Line commands for the interactive prompt.
//!
//! ```text
//! ropani 2        set a field
//! aana=3          same, assignment form
//! aana            clear a field
//! show | json | units | reset | help | quit
//! ```

use area_core::{AreaResult, UnitId};

/// One parsed prompt line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set (or with empty text, clear) a unit field
    Set { unit: UnitId, text: String },
    Show,
    Json,
    Units,
    Reset,
    Help,
    Quit,
    /// Blank line
    Nothing,
}

/// Parse a prompt line. Anything that is not a keyword is taken as a unit
/// assignment, so unknown words surface as `UnitNotFound`.
pub fn parse_command(line: &str) -> AreaResult<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Nothing);
    }

    match line.to_ascii_lowercase().as_str() {
        "show" | "s" => return Ok(Command::Show),
        "json" => return Ok(Command::Json),
        "units" => return Ok(Command::Units),
        "reset" | "clear" => return Ok(Command::Reset),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        _ => {}
    }

    parse_assignment(line)
}

/// Parse `unit=value`, `unit value`, or a bare `unit`
pub fn parse_assignment(text: &str) -> AreaResult<Command> {
    let text = text.trim();
    let (name, value) = match text.split_once('=') {
        Some((name, value)) => (name, value),
        None => match text.split_once(char::is_whitespace) {
            Some((name, value)) => (name, value),
            None => (text, ""),
        },
    };

    let unit: UnitId = name.trim().parse()?;
    Ok(Command::Set {
        unit,
        text: value.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(unit: UnitId, text: &str) -> Command {
        Command::Set {
            unit,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_command("show").unwrap(), Command::Show);
        assert_eq!(parse_command("  RESET ").unwrap(), Command::Reset);
        assert_eq!(parse_command("json").unwrap(), Command::Json);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
        assert_eq!(parse_command("").unwrap(), Command::Nothing);
    }

    #[test]
    fn test_assignment_forms() {
        assert_eq!(parse_command("ropani 2").unwrap(), set(UnitId::Ropani, "2"));
        assert_eq!(parse_command("aana=3.5").unwrap(), set(UnitId::Aana, "3.5"));
        assert_eq!(parse_command("sq_meter = 10").unwrap(), set(UnitId::SqMeter, "10"));
        assert_eq!(parse_command("Bigha   1").unwrap(), set(UnitId::Bigha, "1"));
    }

    #[test]
    fn test_bare_unit_clears() {
        assert_eq!(parse_command("dhur").unwrap(), set(UnitId::Dhur, ""));
        assert_eq!(parse_command("dhur=").unwrap(), set(UnitId::Dhur, ""));
    }

    #[test]
    fn test_partial_number_is_kept_verbatim() {
        assert_eq!(parse_command("paisa 1.").unwrap(), set(UnitId::Paisa, "1."));
        assert_eq!(parse_command("paisa abc").unwrap(), set(UnitId::Paisa, "abc"));
    }

    #[test]
    fn test_unknown_unit() {
        let err = parse_command("acre 2").unwrap_err();
        assert_eq!(err.error_code(), "UNIT_NOT_FOUND");
    }
}
