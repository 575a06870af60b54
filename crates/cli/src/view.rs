use ejypti_core::{FavoriteEntry, FavoritesHistory, Game, KeyValueStore, Screen, SessionPhase};

const EMPTY_CELL: &str = "·";

pub fn render<S: KeyValueStore>(game: &Game<S>) -> String {
    let mut lines = Vec::new();
    match game.screen() {
        Screen::Gameplay => render_board(game, &mut lines),
        Screen::Fading => lines.push("(the reel fades away...)".to_string()),
        Screen::Snapshot(entry) => {
            lines.push("Foresight — Final 8 Cards".to_string());
            lines.push(format!("♥ {}", entry_row(entry)));
        }
        Screen::Favorites => render_favorites(game.favorites(), &mut lines),
    }
    if let Some(status) = game.status() {
        lines.push(format!(">> {status}"));
    }
    lines.join("\n")
}

fn render_board<S: KeyValueStore>(game: &Game<S>, lines: &mut Vec<String>) {
    let session = game.session();
    let counters = session.counters();
    lines.push(format!(
        "draws {}/{} | initial picks {}/{} | deck {}",
        counters.draws_done,
        session.max_total_draws(),
        counters.initial_picks_done,
        game.config().initial_picks,
        session.deck().remaining()
    ));
    let cells: Vec<String> = session
        .slots()
        .iter()
        .map(|(slot, card)| {
            let name = card.map(|card| card.card_type.name()).unwrap_or(EMPTY_CELL);
            format!("[{slot}] {name}")
        })
        .collect();
    lines.push(cells.join("  "));
    let torch = if session.left_torch_lit() { "lit" } else { "dark" };
    let phase = match session.phase() {
        SessionPhase::InProgress => "in progress",
        SessionPhase::ReadyToFinalize => "ready to finalize",
        SessionPhase::Finalizing => "finalizing",
        SessionPhase::Finalized => "finalized",
    };
    let drawing = if session.is_drawing() { " | card in flight" } else { "" };
    lines.push(format!("left torch {torch} | {phase}{drawing}"));
}

pub fn render_favorites(history: &FavoritesHistory, lines: &mut Vec<String>) {
    lines.push(format!("Favorite Games — Last {}", history.cap()));
    if history.is_empty() {
        lines.push("No favorite games yet".to_string());
        return;
    }
    for entry in history.entries() {
        lines.push(format!("♥ {}", entry_row(entry)));
    }
}

fn entry_row(entry: &FavoriteEntry) -> String {
    entry
        .cells()
        .iter()
        .map(|cell| cell.card_type().map(|kind| kind.name()).unwrap_or(EMPTY_CELL))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn help_text() -> &'static str {
    "Commands:
  draw|d              click the reel and reveal the next card
  discard|x <1-8>     discard the card in a slot
  left|l              light the left torch (needs 8 cards incl. a spade)
  right|r             click the right torch to finalize
  wait|w [secs]       let time pass (default: until the next timer)
  board|b             show the table
  favorites|f         show the favorite games history
  restart             start a new game
  help|h|?            show this help
  quit|q              exit"
}
