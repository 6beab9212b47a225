//! Replay scripts: `;`-separated interaction steps driven against the demo state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;
use thiserror::Error;

/// Errors returned while parsing a replay script.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ScriptError {
    #[error("unknown step `{0}`")]
    UnknownStep(String),
    #[error("step `{0}` needs an argument (`{0}:<value>`)")]
    MissingArgument(&'static str),
    #[error("unknown key `{0}`; use enter, esc, tab, backspace, up, down or a single character")]
    UnknownKey(String),
    #[error("unknown trigger `{0}`; use search or clear")]
    UnknownTrigger(String),
    #[error("expected on or off, got `{0}`")]
    InvalidToggle(String),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Trigger {
    Search,
    Clear,
}

/// One interaction in a replay script.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Step {
    /// Replace the input text verbatim.
    Type(String),
    Focus,
    Blur,
    Key(KeyEvent),
    Click(Trigger),
    /// Push a new controlled value through the props.
    Value(String),
    Disable,
    Enable,
    EscapeCancels(bool),
}

/// A parsed replay script.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let steps = raw
            .split(';')
            .filter(|step| !step.trim().is_empty())
            .map(parse_step)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

fn parse_step(raw: &str) -> Result<Step, ScriptError> {
    let (name, argument) = match raw.split_once(':') {
        Some((name, argument)) => (name.trim(), Some(argument)),
        None => (raw.trim(), None),
    };

    match (name, argument) {
        ("type", Some(text)) => Ok(Step::Type(text.to_owned())),
        ("value", Some(text)) => Ok(Step::Value(text.to_owned())),
        ("type", None) => Err(ScriptError::MissingArgument("type")),
        ("value", None) => Err(ScriptError::MissingArgument("value")),
        ("focus", None) => Ok(Step::Focus),
        ("blur", None) => Ok(Step::Blur),
        ("disable", None) => Ok(Step::Disable),
        ("enable", None) => Ok(Step::Enable),
        ("key", Some(key)) => parse_key(key).map(Step::Key),
        ("key", None) => Err(ScriptError::MissingArgument("key")),
        ("click", Some(trigger)) => match trigger.trim() {
            "search" => Ok(Step::Click(Trigger::Search)),
            "clear" => Ok(Step::Click(Trigger::Clear)),
            other => Err(ScriptError::UnknownTrigger(other.to_owned())),
        },
        ("click", None) => Err(ScriptError::MissingArgument("click")),
        ("escape-cancels", Some(toggle)) => match toggle.trim() {
            "on" => Ok(Step::EscapeCancels(true)),
            "off" => Ok(Step::EscapeCancels(false)),
            other => Err(ScriptError::InvalidToggle(other.to_owned())),
        },
        ("escape-cancels", None) => Err(ScriptError::MissingArgument("escape-cancels")),
        _ => Err(ScriptError::UnknownStep(raw.trim().to_owned())),
    }
}

fn parse_key(raw: &str) -> Result<KeyEvent, ScriptError> {
    if raw == " " {
        return Ok(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
    }

    let raw = raw.trim();
    let code = match raw.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Err(ScriptError::UnknownKey(raw.to_owned())),
            }
        }
    };
    Ok(KeyEvent::new(code, KeyModifiers::NONE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_keeps_edge_whitespace() {
        let script: Script = "type:  hello  ; blur ;key:enter;click:clear".parse().unwrap();

        assert_eq!(
            script.steps,
            vec![
                Step::Type("  hello  ".to_owned()),
                Step::Blur,
                Step::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
                Step::Click(Trigger::Clear),
            ]
        );
    }

    #[test]
    fn empty_steps_are_skipped() {
        let script: Script = ";focus;;escape-cancels:on;".parse().unwrap();
        assert_eq!(script.steps, vec![Step::Focus, Step::EscapeCancels(true)]);
        assert_eq!("".parse::<Script>().unwrap(), Script::default());
    }

    #[test]
    fn single_characters_are_keys() {
        let script: Script = "key:x;key: ".parse().unwrap();
        assert_eq!(
            script.steps,
            vec![
                Step::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
                Step::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
            ]
        );
    }

    #[test]
    fn key_names_tolerate_padding() {
        let script: Script = "focus ; key: enter ;key:x ;blur".parse().unwrap();
        assert_eq!(
            script.steps,
            vec![
                Step::Focus,
                Step::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
                Step::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
                Step::Blur,
            ]
        );
        assert_eq!(
            "key:  ".parse::<Script>(),
            Err(ScriptError::UnknownKey(String::new()))
        );
    }

    #[test]
    fn malformed_steps_are_rejected() {
        assert_eq!(
            "jump".parse::<Script>(),
            Err(ScriptError::UnknownStep("jump".to_owned()))
        );
        assert_eq!(
            "type".parse::<Script>(),
            Err(ScriptError::MissingArgument("type"))
        );
        assert_eq!(
            "key:home".parse::<Script>(),
            Err(ScriptError::UnknownKey("home".to_owned()))
        );
        assert_eq!(
            "click:submit".parse::<Script>(),
            Err(ScriptError::UnknownTrigger("submit".to_owned()))
        );
        assert_eq!(
            "escape-cancels:maybe".parse::<Script>(),
            Err(ScriptError::InvalidToggle("maybe".to_owned()))
        );
        assert_eq!(
            "focus:now".parse::<Script>(),
            Err(ScriptError::UnknownStep("focus:now".to_owned()))
        );
    }
}
