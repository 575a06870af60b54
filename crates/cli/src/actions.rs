use crate::app::App;
use crate::input::InputAction;
use crate::view;
use tracing::debug;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None | InputAction::Board => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::Help => app.note(view::help_text()),
        InputAction::Draw => {
            if let Err(reason) = app.game.click_reel() {
                debug!(%reason, "reel click ignored");
            }
        }
        InputAction::Discard(slot) => {
            if app.game.click_slot(slot).is_none() {
                debug!(%slot, "nothing to discard");
            }
        }
        InputAction::LeftTorch => {
            if let Err(reason) = app.game.click_left_torch() {
                debug!(%reason, "left torch ignored");
            }
        }
        InputAction::RightTorch => {
            if let Err(reason) = app.game.click_right_torch() {
                debug!(%reason, "right torch ignored");
            }
        }
        InputAction::Wait(span) => app.wait(span),
        InputAction::Favorites => {
            let mut lines = Vec::new();
            view::render_favorites(app.game.favorites(), &mut lines);
            app.note(lines.join("\n"));
        }
        InputAction::Restart => app.game.restart(),
        InputAction::Invalid(message) => app.note(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BoxedStore;
    use ejypti_core::{GameConfig, MemoryStore};

    fn test_app() -> App {
        let store: BoxedStore = Box::new(MemoryStore::new());
        App::new(GameConfig::default(), 17, store)
    }

    #[test]
    fn draw_then_wait_lands_the_card() {
        let mut app = test_app();
        dispatch(&mut app, InputAction::Draw);
        assert!(app.game.session().is_drawing());
        let reveal = app.game.config().timings.reveal();
        dispatch(&mut app, InputAction::Wait(Some(reveal)));
        assert!(!app.game.session().is_drawing());
        assert_eq!(app.game.session().slots().filled(), 1);
    }

    #[test]
    fn invalid_input_becomes_a_note() {
        let mut app = test_app();
        dispatch(&mut app, InputAction::Invalid("unknown command: zap".to_string()));
        assert_eq!(app.notes, vec!["unknown command: zap".to_string()]);
        dispatch(&mut app, InputAction::Quit);
        assert!(app.should_quit);
    }
}
