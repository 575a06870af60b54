use ejypti_core::SlotIndex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    Help,
    Draw,
    Discard(SlotIndex),
    LeftTorch,
    RightTorch,
    Wait(Option<Duration>),
    Board,
    Favorites,
    Restart,
    Invalid(String),
}

pub fn parse_line(line: &str) -> InputAction {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return InputAction::None;
    };
    let arg = parts.next();
    match command.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => InputAction::Quit,
        "h" | "help" | "?" => InputAction::Help,
        "d" | "draw" | "reel" | "click" => InputAction::Draw,
        "x" | "discard" => match arg.map(parse_slot) {
            Some(Ok(slot)) => InputAction::Discard(slot),
            Some(Err(message)) => InputAction::Invalid(message),
            None => InputAction::Invalid("usage: discard <1-8>".to_string()),
        },
        "l" | "left" => InputAction::LeftTorch,
        "r" | "right" => InputAction::RightTorch,
        "w" | "wait" => match arg {
            None => InputAction::Wait(None),
            Some(value) => match value.parse::<f64>().map(Duration::try_from_secs_f64) {
                Ok(Ok(span)) => InputAction::Wait(Some(span)),
                _ => InputAction::Invalid(format!("invalid wait seconds: {value}")),
            },
        },
        "b" | "board" | "ls" => InputAction::Board,
        "f" | "fav" | "favorites" => InputAction::Favorites,
        "restart" | "new" => InputAction::Restart,
        other => InputAction::Invalid(format!("unknown command: {other}")),
    }
}

fn parse_slot(value: &str) -> Result<SlotIndex, String> {
    let number = value
        .parse::<u8>()
        .map_err(|_| format!("invalid slot: {value}"))?;
    SlotIndex::new(number).map_err(|err| err.to_string())
}
