//! Keyboard handling: turns key presses into `App` operations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus};
use crate::authoring::{GenerationRequest, ManualField};
use crate::models::{View, NUM_OPTIONS};

/// Something the event loop has to do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    /// Run the generator in the background.
    Generate(GenerationRequest),
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    app.clear_status();

    if app.share().is_some() {
        handle_share_input(app, key);
        return InputAction::None;
    }

    match app.view {
        View::Create => handle_create_input(app, key),
        View::Preview => handle_preview_input(app, key),
        View::Take => handle_take_input(app, key),
    }
}

fn handle_share_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_share(),
        KeyCode::Enter => app.copy_link(),
        KeyCode::Backspace => app.pop_slug_char(),
        KeyCode::Char(c) => app.push_slug_char(c),
        _ => {}
    }
}

fn handle_create_input(app: &mut App, key: KeyEvent) -> InputAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return InputAction::Quit,
        KeyCode::F(3) => app.switch_view(View::Preview),
        KeyCode::F(4) => app.open_share(),
        KeyCode::F(5) => {
            app.start_quiz();
        }
        KeyCode::Tab | KeyCode::Down => app.focus = app.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.focus = app.focus.previous(),
        KeyCode::Char('k') if ctrl => {
            if let Focus::Manual(ManualField::Option(index)) = app.focus {
                app.manual_mut().set_correct(index);
            }
        }
        KeyCode::Enter => match app.focus {
            Focus::Manual(_) => {
                let _ = app.submit_manual();
            }
            Focus::Topic | Focus::Count | Focus::Difficulty => {
                if let Some(request) = app.begin_generation() {
                    return InputAction::Generate(request);
                }
            }
        },
        KeyCode::Left | KeyCode::Right => cycle_choice(app, key.code == KeyCode::Right),
        KeyCode::Backspace => {
            if let Some(field) = focused_text(app) {
                field.pop();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(field) = focused_text(app) {
                field.push(c);
            }
        }
        _ => {}
    }

    InputAction::None
}

fn focused_text(app: &mut App) -> Option<&mut String> {
    match app.focus {
        Focus::Manual(field) => Some(app.manual_mut().field_mut(field)),
        Focus::Topic => Some(&mut app.generator_mut().topic),
        Focus::Count | Focus::Difficulty => None,
    }
}

fn cycle_choice(app: &mut App, forward: bool) {
    let focus = app.focus;
    let generator = app.generator_mut();
    match (focus, forward) {
        (Focus::Count, true) => generator.next_count(),
        (Focus::Count, false) => generator.previous_count(),
        (Focus::Difficulty, true) => generator.difficulty = generator.difficulty.next(),
        (Focus::Difficulty, false) => generator.difficulty = generator.difficulty.previous(),
        _ => {}
    }
}

fn handle_preview_input(app: &mut App, key: KeyEvent) -> InputAction {
    if app.is_confirming_clear() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear(),
            _ => app.cancel_clear(),
        }
        return InputAction::None;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return InputAction::Quit,
        KeyCode::F(2) => app.switch_view(View::Create),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Delete | KeyCode::Char('d') => app.remove_selected(),
        KeyCode::Char('C') => app.request_clear(),
        KeyCode::F(4) | KeyCode::Char('s') => app.open_share(),
        KeyCode::Enter | KeyCode::F(5) => {
            app.start_quiz();
        }
        _ => {}
    }

    InputAction::None
}

fn handle_take_input(app: &mut App, key: KeyEvent) -> InputAction {
    let finished = app.runner().is_some_and(|runner| runner.is_finished());

    if finished {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
            KeyCode::Char('r') | KeyCode::Char('R') => app.restart_quiz(),
            KeyCode::Esc => app.exit_quiz(),
            _ => {}
        }
        return InputAction::None;
    }

    if key.code == KeyCode::Esc {
        app.exit_quiz();
        return InputAction::None;
    }

    let Some(runner) = app.runner_mut() else {
        return InputAction::None;
    };

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => runner.highlight_next(),
        KeyCode::Up | KeyCode::Char('k') => runner.highlight_previous(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            runner.select_highlighted();
        }
        KeyCode::Char(c @ 'a'..='d') => {
            runner.select_option(c as usize - 'a' as usize);
        }
        KeyCode::Char(c @ '1'..='4') => {
            runner.select_option(c as usize - '1' as usize);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            runner.next();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            runner.previous();
        }
        KeyCode::Char('f') => {
            if runner.finish().is_none() {
                app.set_status(format!(
                    "Answer the last question to finish (options 1-{NUM_OPTIONS})"
                ));
            }
        }
        _ => {}
    }

    InputAction::None
}
