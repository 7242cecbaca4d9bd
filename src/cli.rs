use anyhow::{Result, anyhow};

const USAGE: &str = "Usage: lingva-panel [send [--no-open] <text>...]";

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Panel,
    Send { text: String, open_panel: bool },
}

pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(Command::Panel);
    };

    match command.as_str() {
        "send" => {
            let mut open_panel = true;
            let mut words = Vec::new();
            for arg in args {
                if arg == "--no-open" && words.is_empty() {
                    open_panel = false;
                } else {
                    words.push(arg);
                }
            }
            let text = words.join(" ");
            if text.trim().is_empty() {
                return Err(anyhow!("Nothing to send. {USAGE}"));
            }
            Ok(Command::Send { text, open_panel })
        }
        "-h" | "--help" => Err(anyhow!(USAGE)),
        other => Err(anyhow!("Unknown command `{other}`. {USAGE}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_opens_panel() {
        assert_eq!(parse_args(args(&[])).unwrap(), Command::Panel);
    }

    #[test]
    fn send_joins_words_and_opens_by_default() {
        assert_eq!(
            parse_args(args(&["send", "guten", "tag"])).unwrap(),
            Command::Send {
                text: "guten tag".to_string(),
                open_panel: true,
            }
        );
    }

    #[test]
    fn no_open_flag_only_counts_before_text() {
        assert_eq!(
            parse_args(args(&["send", "--no-open", "hola"])).unwrap(),
            Command::Send {
                text: "hola".to_string(),
                open_panel: false,
            }
        );
        assert_eq!(
            parse_args(args(&["send", "hola", "--no-open"])).unwrap(),
            Command::Send {
                text: "hola --no-open".to_string(),
                open_panel: true,
            }
        );
    }

    #[test]
    fn empty_send_and_unknown_commands_fail() {
        assert!(parse_args(args(&["send"])).is_err());
        assert!(parse_args(args(&["send", "  "])).is_err());
        assert!(parse_args(args(&["open"])).is_err());
    }
}
