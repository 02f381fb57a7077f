//! Parsing of the commands typed at the swipe prompt.

use data_loader::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeInput {
    /// Rate the movie in a 1-based slot
    Rate { slot: usize, verdict: Verdict },
    /// Show everything known about the movie in a slot
    Details(usize),
    Profile,
    Window,
    Help,
    Quit,
}

pub const HELP: &str = "\
  l <n>   like the movie in slot n
  d <n>   dislike the movie in slot n
  i <n>   details and score breakdown for slot n
  p       show the preference profile
  w       show the current suggestions
  h       this help
  q       quit";

pub fn parse_input(line: &str) -> Result<SwipeInput, String> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(SwipeInput::Window);
    };
    let argument = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments in '{}'", line.trim()));
    }

    match (command.to_ascii_lowercase().as_str(), argument) {
        ("l" | "like", Some(n)) => Ok(SwipeInput::Rate {
            slot: parse_slot(n)?,
            verdict: Verdict::Liked,
        }),
        ("d" | "dislike", Some(n)) => Ok(SwipeInput::Rate {
            slot: parse_slot(n)?,
            verdict: Verdict::Disliked,
        }),
        ("i" | "info", Some(n)) => Ok(SwipeInput::Details(parse_slot(n)?)),
        ("l" | "like" | "d" | "dislike" | "i" | "info", None) => {
            Err(format!("'{}' needs a slot number", command))
        }
        ("p" | "profile", None) => Ok(SwipeInput::Profile),
        ("w" | "window", None) => Ok(SwipeInput::Window),
        ("h" | "help" | "?", None) => Ok(SwipeInput::Help),
        ("q" | "quit" | "exit", None) => Ok(SwipeInput::Quit),
        _ => Err(format!("unknown command '{}' (h for help)", line.trim())),
    }
}

fn parse_slot(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("'{}' is not a slot number", raw)),
        Ok(slot) => Ok(slot),
    }
}
