//! Terminal UI example using crossterm and ratatui.
//!
//! This example demonstrates how to host scribe_mini in a terminal
//! application: type `# `, `* `, `** `, or `*** ` at the start of a line
//! to autoformat, Ctrl+S to save, and the document comes back on the next
//! run. Run with: cargo run --example tui_crossterm

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier as TuiModifier, Style},
    text::{Line, Span},
    widgets::{Block as TuiBlock, Borders, Paragraph},
};
use std::io;
use unicode_segmentation::UnicodeSegmentation;

use scribe_mini::{
    Caret, ContentOps, FileStore, InputEvent, KeyCode, KeyEvent, Modifiers, Treatment,
    shell::EditorShell,
};

struct App {
    shell: EditorShell<FileStore>,
    message: String,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        let store = FileStore::new(".scribe_mini");
        Self {
            shell: EditorShell::new(store),
            message: "Ctrl+S save · Ctrl+B bold · Ctrl+U underline · Shift+Alt+Space code · Ctrl+C quit".to_string(),
            should_quit: false,
        }
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        // Host-level commands first: quit, save, caret motion
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            match event.code {
                CKeyCode::Char('c') | CKeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                CKeyCode::Char('s') => {
                    self.message = if self.shell.save() {
                        "saved".to_string()
                    } else {
                        "save failed (store rejected the write)".to_string()
                    };
                    return;
                }
                _ => {}
            }
        }
        if let Some(caret) = self.moved_caret(event.code) {
            self.shell.set_caret(caret);
            return;
        }

        if let Some(input) = convert_crossterm_event(event) {
            self.shell.handle_event(input);
        }
    }

    // Caret motion stays in the host; the engine only cares about edits.
    fn moved_caret(&self, code: CKeyCode) -> Option<Caret> {
        let caret = self.shell.caret();
        let doc = self.shell.document();
        match code {
            CKeyCode::Left => Some(if caret.offset > 0 {
                Caret {
                    block: caret.block,
                    offset: caret.offset - 1,
                }
            } else if caret.block > 0 {
                Caret {
                    block: caret.block - 1,
                    offset: doc.block_len(caret.block - 1),
                }
            } else {
                caret
            }),
            CKeyCode::Right => Some(if caret.offset < doc.block_len(caret.block) {
                Caret {
                    block: caret.block,
                    offset: caret.offset + 1,
                }
            } else if caret.block + 1 < doc.block_count() {
                Caret {
                    block: caret.block + 1,
                    offset: 0,
                }
            } else {
                caret
            }),
            CKeyCode::Up => Some(doc.clamp(Caret {
                block: caret.block.saturating_sub(1),
                offset: caret.offset,
            })),
            CKeyCode::Down => Some(doc.clamp(Caret {
                block: caret.block + 1,
                offset: caret.offset,
            })),
            _ => None,
        }
    }
}

fn convert_crossterm_event(event: CKeyEvent) -> Option<InputEvent> {
    let mut mods = Modifiers::empty();
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        mods |= Modifiers::SHIFT;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }

    match event.code {
        CKeyCode::Char(c) => {
            if mods.intersects(Modifiers::CTRL | Modifiers::ALT) {
                // Chords go to the engine as key commands
                Some(InputEvent::Key(KeyEvent {
                    code: KeyCode::Char(c.to_ascii_lowercase()),
                    mods,
                }))
            } else {
                // Plain typing is intercepted before insertion
                Some(InputEvent::BeforeInput(c))
            }
        }
        CKeyCode::Enter => Some(InputEvent::Key(KeyEvent {
            code: KeyCode::Enter,
            mods,
        })),
        CKeyCode::Backspace => Some(InputEvent::Key(KeyEvent {
            code: KeyCode::Backspace,
            mods,
        })),
        CKeyCode::Esc => Some(InputEvent::Key(KeyEvent {
            code: KeyCode::Esc,
            mods,
        })),
        _ => None,
    }
}

fn tui_style(treatment: Treatment) -> Style {
    let mut style = Style::default();
    if treatment.bold {
        style = style.add_modifier(TuiModifier::BOLD);
    }
    if treatment.underline {
        style = style.add_modifier(TuiModifier::UNDERLINED);
    }
    if let Some((r, g, b)) = treatment.fg {
        style = style.fg(Color::Rgb(r, g, b));
    }
    if let Some((r, g, b)) = treatment.bg {
        style = style.bg(Color::Rgb(r, g, b));
    }
    style
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let doc = app.shell.document();
    let sheet = app.shell.styles();

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor = (0u16, 0u16);
    for (index, block) in doc.blocks().iter().enumerate() {
        let base = sheet
            .block_treatment(block.kind)
            .map(tui_style)
            .unwrap_or_default();

        // Break the block into runs of constant styling, then into
        // visual lines at soft breaks.
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_style = base;
        for (offset, grapheme) in block.text.graphemes(true).enumerate() {
            let style = base.patch(tui_style(sheet.resolve(block.styles_at(offset as u32))));
            if style != run_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = style;
            if grapheme == "\n" {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
                lines.push(Line::from(std::mem::take(&mut spans)));
            } else {
                run.push_str(grapheme);
            }
        }
        spans.push(Span::styled(run, run_style));
        lines.push(Line::from(spans));

        if index as u32 == app.shell.caret().block {
            let (row, col) = caret_row_col(&block.text, app.shell.caret().offset);
            cursor = (
                (lines.len() - visual_lines(&block.text) + row) as u16,
                col as u16,
            );
        }
    }

    let text = Paragraph::new(lines).block(
        TuiBlock::default()
            .borders(Borders::ALL)
            .title("scribe_mini demo"),
    );
    f.render_widget(text, chunks[0]);

    let status = Paragraph::new(app.message.as_str())
        .style(Style::default().add_modifier(TuiModifier::DIM))
        .block(TuiBlock::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    f.set_cursor(chunks[0].x + 1 + cursor.1, chunks[0].y + 1 + cursor.0);
}

fn visual_lines(text: &str) -> usize {
    text.graphemes(true).filter(|g| *g == "\n").count() + 1
}

// Row within the block and column within that row for a grapheme offset.
fn caret_row_col(text: &str, offset: u32) -> (usize, usize) {
    let mut row = 0;
    let mut col = 0;
    for grapheme in text.graphemes(true).take(offset as usize) {
        if grapheme == "\n" {
            row += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (row, col)
}

fn main() -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_crossterm_event(key);

            if app.should_quit {
                break;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
