//! Shell command parsing
//!
//! A line whose first word is a known command runs that command; anything
//! else is treated as address bar input for the current tab.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a tab, on the home page when no url is given
    Open { url: Option<String>, activate: bool },
    /// Load address bar input in the current tab
    Go(String),
    /// Switch to a tab by its 1-based position
    Switch(usize),
    /// Close a tab by its 1-based position, the current one by default
    Close(Option<usize>),
    /// Reload, or stop when a load is in flight
    Reload,
    Back,
    Forward,
    Tabs,
    History,
    ClearHistory,
    Save,
    Help,
    Quit,
}

/// Parse one input line. Empty lines and malformed arguments give `None`.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let word = parts.next()?.to_lowercase();
    let arg = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let command = match word.as_str() {
        "open" | "new" | "o" => Command::Open {
            url: arg,
            activate: true,
        },
        "bg" => Command::Open {
            url: Some(arg?),
            activate: false,
        },
        "go" | "g" => Command::Go(arg?),
        "switch" | "s" => Command::Switch(position(arg?)?),
        "close" | "c" => match arg {
            Some(arg) => Command::Close(Some(position(arg)?)),
            None => Command::Close(None),
        },
        "reload" | "stop" | "r" => Command::Reload,
        "back" | "b" => Command::Back,
        "forward" | "f" => Command::Forward,
        "tabs" | "t" => Command::Tabs,
        "history" | "h" => Command::History,
        "clear-history" => Command::ClearHistory,
        "save" => Command::Save,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Go(line.to_string()),
    };

    Some(command)
}

/// 1-based position to a 0-based index
fn position(arg: String) -> Option<usize> {
    arg.parse::<usize>().ok()?.checked_sub(1)
}

pub const HELP: &str = "\
open [url]       open a tab (home page by default)
bg <url>         open a tab in the background
go <input>       load input in the current tab (or just type it)
switch <n>       switch to tab n
close [n]        close tab n, or the current tab
reload           reload, or stop a load in progress
back / forward   walk the current tab's history
tabs             list open tabs
history          list recent history
clear-history    forget all history
save             save open tabs now
quit             save and exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open() {
        assert_eq!(
            parse("open"),
            Some(Command::Open {
                url: None,
                activate: true
            })
        );
        assert_eq!(
            parse("new example.com"),
            Some(Command::Open {
                url: Some("example.com".to_string()),
                activate: true
            })
        );
        assert_eq!(
            parse("bg example.com"),
            Some(Command::Open {
                url: Some("example.com".to_string()),
                activate: false
            })
        );
        assert_eq!(parse("bg"), None);
    }

    #[test]
    fn test_positions_are_one_based() {
        assert_eq!(parse("switch 1"), Some(Command::Switch(0)));
        assert_eq!(parse("s 3"), Some(Command::Switch(2)));
        assert_eq!(parse("switch 0"), None);
        assert_eq!(parse("switch two"), None);

        assert_eq!(parse("close"), Some(Command::Close(None)));
        assert_eq!(parse("close 2"), Some(Command::Close(Some(1))));
        assert_eq!(parse("close x"), None);
    }

    #[test]
    fn test_bare_input_navigates() {
        assert_eq!(
            parse("  example.com/path  "),
            Some(Command::Go("example.com/path".to_string()))
        );
        assert_eq!(
            parse("go rust lang"),
            Some(Command::Go("rust lang".to_string()))
        );
        assert_eq!(parse("go"), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(parse("QUIT"), Some(Command::Quit));
        assert_eq!(parse("Reload"), Some(Command::Reload));
        assert_eq!(parse("stop"), Some(Command::Reload));
        assert_eq!(parse("clear-history"), Some(Command::ClearHistory));
    }
}
