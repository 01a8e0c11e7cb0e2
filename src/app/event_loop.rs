use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use super::{App, textarea};
use crate::clipboard::SystemClipboard;
use crate::editor::{EditOutcome, LineCommand, LineEditor, locate};
use crate::input::{KeyDecision, ShortcutDispatcher};
use crate::surface::{PlainTextSurface, TextSurface};

const HELP_LINE: &str =
    "Ctrl+Shift+K delete line · Alt+↑/↓ move line · Ctrl+C/X copy/cut line · Ctrl+S save · Ctrl+Q quit";

struct Session {
    surface: PlainTextSurface,
    status: String,
    saved_revision: u64,
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or the
    /// terminal fails.
    pub fn run(&mut self) -> Result<()> {
        let text = match &self.file_path {
            Some(path) if path.exists() => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            _ => String::new(),
        };

        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal, PlainTextSurface::new(text));
        ratatui::restore();
        result
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, surface: PlainTextSurface) -> Result<()> {
        let dispatcher = ShortcutDispatcher;
        let mut editor = LineEditor::new(SystemClipboard);
        let mut session = Session {
            surface,
            status: HELP_LINE.to_string(),
            saved_revision: 0,
        };

        loop {
            terminal.draw(|frame| render(self, &session, frame))?;

            if !event::poll(Duration::from_millis(250))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // App chrome: save and quit are host glue, not line shortcuts.
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('s') => {
                        self.save(&mut session)?;
                        continue;
                    }
                    _ => {}
                }
            }

            match dispatcher.on_key(&key, session.surface.selection()) {
                KeyDecision::Intercept(command) => apply_command(&mut editor, &mut session, command),
                KeyDecision::PassThrough => default_input(&mut session, &key),
            }
        }
    }

    fn save(&self, session: &mut Session) -> Result<()> {
        let Some(path) = &self.file_path else {
            session.status = "Scratch buffer; nothing to save to".to_string();
            return Ok(());
        };
        fs::write(path, session.surface.text())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        session.saved_revision = session.surface.revision();
        session.status = format!("Saved {}", path.display());
        Ok(())
    }
}

fn apply_command(
    editor: &mut LineEditor<SystemClipboard>,
    session: &mut Session,
    command: LineCommand,
) {
    match editor.apply(&mut session.surface, command) {
        Ok(EditOutcome::Mutated) => {
            session.status = match command {
                LineCommand::DeleteLine => "Line deleted".to_string(),
                LineCommand::CutLine => "Line cut".to_string(),
                _ => "Line moved".to_string(),
            };
        }
        Ok(EditOutcome::Copied) => session.status = "Line copied".to_string(),
        Ok(EditOutcome::NoOp) => {}
        Err(err) => session.status = format!("{err}"),
    }
}

fn default_input(session: &mut Session, key: &KeyEvent) {
    let surface = &mut session.surface;
    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            textarea::insert_char(surface, ch);
        }
        KeyCode::Enter => textarea::insert_newline(surface),
        KeyCode::Backspace => textarea::backspace(surface),
        KeyCode::Delete => textarea::delete_forward(surface),
        KeyCode::Left => textarea::move_left(surface),
        KeyCode::Right => textarea::move_right(surface),
        KeyCode::Up => textarea::move_up(surface),
        KeyCode::Down => textarea::move_down(surface),
        KeyCode::Home => textarea::move_home(surface),
        KeyCode::End => textarea::move_end(surface),
        _ => {}
    }
}

fn render(app: &App, session: &Session, frame: &mut Frame) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    let (row, col) = cursor_cell(session);
    let scroll = row.saturating_sub(body.height.saturating_sub(1) as usize);
    frame.render_widget(
        Paragraph::new(session.surface.text().to_string()).scroll((scroll as u16, 0)),
        body,
    );
    place_cursor(frame, body, row - scroll, col);

    let name = app
        .file_path
        .as_ref()
        .map_or_else(|| "[scratch]".to_string(), |p| p.display().to_string());
    let dirty = if session.surface.revision() == session.saved_revision {
        ""
    } else {
        " [+]"
    };
    frame.render_widget(
        Line::from(format!(" {name}{dirty}  {}", session.status)).dim(),
        footer,
    );
}

/// Row and display-width column of the cursor within the document.
fn cursor_cell(session: &Session) -> (usize, usize) {
    let text = session.surface.text();
    let offset = session.surface.selection().start;
    let line = locate(text, offset);
    let row = text[..line.start].matches('\n').count();
    let col = text[line.start..offset].width();
    (row, col)
}

fn place_cursor(frame: &mut Frame, body: Rect, row: usize, col: usize) {
    let x = body.x.saturating_add(u16::try_from(col).unwrap_or(u16::MAX));
    let y = body.y.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
    frame.set_cursor_position((x.min(body.right().saturating_sub(1)), y));
}
