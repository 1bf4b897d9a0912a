use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode, Screen};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_assistant_reply().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // The assistant popup captures all input while it is open
    if app.show_assistant {
        handle_assistant_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_filter_editing(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Screen switching and the assistant shortcut are shared by every screen
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('a') => {
            app.open_assistant();
            return;
        }
        KeyCode::Char('1') => {
            app.screen = Screen::Dashboard;
            return;
        }
        KeyCode::Char('2') => {
            app.screen = Screen::Candidates;
            return;
        }
        KeyCode::Char('3') => {
            app.screen = Screen::Schedule;
            return;
        }
        KeyCode::Char('4') => {
            app.screen = Screen::Interview;
            return;
        }
        KeyCode::Char('5') => {
            app.screen = Screen::Reports;
            return;
        }
        KeyCode::Char('6') => {
            app.screen = Screen::Analysis;
            return;
        }
        _ => {}
    }

    match app.screen {
        Screen::Dashboard => {}
        Screen::Candidates => handle_candidates_normal(app, key),
        Screen::Schedule => handle_schedule_normal(app, key),
        Screen::Interview => handle_interview_normal(app, key),
        Screen::Reports => handle_reports_normal(app, key),
        Screen::Analysis => {}
    }
}

fn handle_candidates_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.candidate_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.candidate_nav_up(),
        KeyCode::Char('g') => app.candidate_nav_first(),
        KeyCode::Char('G') => app.candidate_nav_last(),

        // Edit the substring filter
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }

        // Cycle the status filter
        KeyCode::Char('f') => app.cycle_status_filter(),

        // Clear both filters
        KeyCode::Esc => app.clear_candidate_filters(),

        _ => {}
    }
}

fn handle_schedule_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.schedule_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.schedule_nav_up(),

        // Tab switches between the upcoming and completed lists
        KeyCode::Tab => app.toggle_schedule_focus(),

        // Open the selected round in the interview screen
        KeyCode::Enter => app.open_selected_round(),

        _ => {}
    }
}

fn handle_interview_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.question_scroll = app.question_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.question_scroll = app.question_scroll.saturating_sub(1);
        }

        // Back to the schedule
        KeyCode::Esc | KeyCode::Backspace => {
            app.screen = Screen::Schedule;
        }

        _ => {}
    }
}

fn handle_reports_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.report_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.report_nav_up(),
        _ => {}
    }
}

fn handle_filter_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.candidate_filter.pop();
            app.reset_candidate_selection();
        }
        KeyCode::Char(c) => {
            app.candidate_filter.push(c);
            app.reset_candidate_selection();
        }
        _ => {}
    }
}

fn handle_assistant_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Close the panel; any pending reply is aborted and the transcript dropped
        KeyCode::Esc => app.close_assistant(),

        KeyCode::Enter => app.submit_assistant_input(),

        // Transcript scrolling (the input is single-line, so Up/Down are free)
        KeyCode::Up => {
            app.chat_scroll = app.chat_scroll.saturating_sub(1);
        }
        KeyCode::Down => {
            app.chat_scroll = app.chat_scroll.saturating_add(1);
        }

        KeyCode::Backspace => {
            if app.assistant_cursor > 0 {
                app.assistant_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.assistant_input, app.assistant_cursor);
                app.assistant_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.assistant_input.chars().count();
            if app.assistant_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.assistant_input, app.assistant_cursor);
                app.assistant_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.assistant_cursor = app.assistant_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.assistant_input.chars().count();
            app.assistant_cursor = (app.assistant_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.assistant_cursor = 0;
        }
        KeyCode::End => {
            app.assistant_cursor = app.assistant_input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.assistant_input, app.assistant_cursor);
            app.assistant_input.insert(byte_pos, c);
            app.assistant_cursor += 1;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::FixtureStore;

    fn test_app() -> App {
        let store = FixtureStore::load_embedded().expect("bundled fixtures must parse");
        let config = Config {
            reply_delay_ms: Some(10),
            start_screen: None,
        };
        App::new(store, &config)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn number_keys_switch_screens() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.screen, Screen::Schedule);
        press(&mut app, KeyCode::Char('6'));
        assert_eq!(app.screen, Screen::Analysis);
    }

    #[tokio::test]
    async fn assistant_popup_captures_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        assert!(app.show_assistant);

        // '2' goes into the input instead of switching screens
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.assistant_input, "2");

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_assistant);
        assert!(app.assistant_input.is_empty());
    }

    #[tokio::test]
    async fn assistant_input_editing_is_utf8_safe() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));

        for c in "候选人质量".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.assistant_input, "候选人质量");
        assert_eq!(app.assistant_cursor, 5);

        // Delete the character before the cursor, then insert mid-string
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.assistant_input, "候选人质");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('的'));
        assert_eq!(app.assistant_input, "候选人的质");
    }

    #[tokio::test]
    async fn filter_editing_updates_selection() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "后端".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.filtered_candidates().len(), 3);
        assert_eq!(app.candidate_state.selected(), Some(0));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);

        // Esc in normal mode clears the filter again
        press(&mut app, KeyCode::Esc);
        assert!(app.candidate_filter.is_empty());
        assert_eq!(app.filtered_candidates().len(), 12);
    }

    #[tokio::test]
    async fn enter_on_schedule_opens_interview() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Interview);
        assert!(app.active_round().is_some());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Schedule);
    }
}
