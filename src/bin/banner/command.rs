use std::str::FromStr;
use std::time::Duration;

use humantime::parse_duration;

/// A line of interactive input.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Show(String),
    Hide,
    Tap,
    Swipe,
    Height(f64),
    Duration(Duration),
    State,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));
        match (word.to_ascii_lowercase().as_str(), rest) {
            ("show", "") => Err("show needs some text".to_string()),
            ("show", text) => Ok(Self::Show(text.to_string())),
            ("hide", "") => Ok(Self::Hide),
            ("tap", "") => Ok(Self::Tap),
            ("swipe", "") => Ok(Self::Swipe),
            ("height", value) => value
                .parse::<f64>()
                .map(Self::Height)
                .map_err(|err| format!("invalid height {value:?}: {err}")),
            ("duration", value) => parse_duration(value)
                .map(Self::Duration)
                .map_err(|err| format!("invalid duration {value:?}: {err}")),
            ("state", "") => Ok(Self::State),
            ("quit" | "exit", "") => Ok(Self::Quit),
            (other, _) => Err(format!("unknown command: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Command;
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn show_keeps_the_whole_text() {
        assert_eq!(
            Command::from_str("show  Build finished in 3s "),
            Ok(Command::Show("Build finished in 3s".to_string()))
        );
        assert!(Command::from_str("show").is_err());
    }

    #[test]
    fn arguments_are_parsed() {
        assert_eq!(Command::from_str("height 20"), Ok(Command::Height(20.0)));
        assert_eq!(
            Command::from_str("duration 1s"),
            Ok(Command::Duration(Duration::from_secs(1)))
        );
        assert!(Command::from_str("height tall").is_err());
    }

    #[test]
    fn bare_commands_accept_any_case() {
        assert_eq!(Command::from_str("TAP"), Ok(Command::Tap));
        assert_eq!(Command::from_str("exit"), Ok(Command::Quit));
        assert!(Command::from_str("hide now").is_err());
        assert!(Command::from_str("wave").is_err());
    }
}
