use orbital::Point;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    /// Header button pressed.
    Open,
    Close,
    /// Pointer entered an item (`Some`) or left it (`None`).
    Hover(Option<usize>),
    /// Click on the overlay background, viewport coordinates.
    OverlayClick(Point),
    /// Click handled by an item's own control.
    ItemClick(usize),
    CenterClick,
    Escape,
    Resize,
    /// Animation frame, carrying the time since the previous one.
    Tick(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseEventError {
    #[error("Empty event")]
    Empty,
    #[error("Unknown event '{0}'")]
    Unknown(String),
    #[error("Event '{command}' expects {expected}")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },
    #[error("Invalid number '{0}'")]
    Number(String),
}

fn number(s: &str) -> Result<f64, ParseEventError> {
    s.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ParseEventError::Number(s.to_string()))
}

fn index(s: &str) -> Result<usize, ParseEventError> {
    s.parse::<usize>()
        .map_err(|_| ParseEventError::Number(s.to_string()))
}

impl FromStr for NavEvent {
    type Err = ParseEventError;

    /// Parses one line: `open`, `close`, `hover 2`, `leave`, `click 400 300`,
    /// `item 1`, `center`, `escape`, `resize`, `tick 0.016`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseEventError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let arity = |command, expected| ParseEventError::Arity { command, expected };

        match (command.as_str(), args.as_slice()) {
            ("open", []) => Ok(Self::Open),
            ("close", []) => Ok(Self::Close),
            ("hover", [i]) => Ok(Self::Hover(Some(index(i)?))),
            ("leave", []) => Ok(Self::Hover(None)),
            ("click", [x, y]) => Ok(Self::OverlayClick(Point::new(number(x)?, number(y)?))),
            ("item", [i]) => Ok(Self::ItemClick(index(i)?)),
            ("center", []) => Ok(Self::CenterClick),
            ("escape" | "esc", []) => Ok(Self::Escape),
            ("resize", []) => Ok(Self::Resize),
            ("tick", [dt]) => Ok(Self::Tick(number(dt)?)),
            ("open" | "close" | "leave" | "center" | "escape" | "esc" | "resize", _) => {
                Err(arity("open/close/leave/center/escape/resize", "no arguments"))
            }
            ("hover" | "item", _) => Err(arity("hover/item", "an item index")),
            ("click", _) => Err(arity("click", "x and y")),
            ("tick", _) => Err(arity("tick", "a time delta")),
            _ => Err(ParseEventError::Unknown(line.trim().to_string())),
        }
    }
}
