//! Full-screen quick pick for choosing one option, drawn on stderr.

use std::io;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

/// Filterable selection state backing the picker.
#[derive(Debug, Clone, Default)]
pub struct PickerState {
    options: Vec<String>,
    filter: String,
    selected: usize,
}

impl PickerState {
    pub fn new(options: &[String]) -> Self {
        Self {
            options: options.to_vec(),
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Options matching the filter, case-insensitively, in their original order.
    pub fn visible(&self) -> Vec<&str> {
        let needle = self.filter.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Index of the highlighted entry within [`PickerState::visible`].
    pub fn selected(&self) -> Option<usize> {
        let count = self.visible().len();
        (count > 0).then(|| self.selected.min(count - 1))
    }

    pub fn current(&self) -> Option<&str> {
        let index = self.selected()?;
        self.visible().get(index).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            self.selected = (self.selected.min(count - 1) + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            let current = self.selected.min(count - 1);
            self.selected = if current == 0 { count - 1 } else { current - 1 };
        }
    }

    pub fn push_char(&mut self, ch: char) {
        self.filter.push(ch);
        self.selected = 0;
    }

    pub fn pop_char(&mut self) {
        self.filter.pop();
        self.selected = 0;
    }
}

/// What a key press does to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    Continue,
    Submit(String),
    Cancel,
}

pub fn handle_key(state: &mut PickerState, key: KeyEvent) -> PickerAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => PickerAction::Cancel,
            KeyCode::Char('n') => {
                state.select_next();
                PickerAction::Continue
            }
            KeyCode::Char('p') => {
                state.select_previous();
                PickerAction::Continue
            }
            _ => PickerAction::Continue,
        };
    }

    match key.code {
        KeyCode::Esc => PickerAction::Cancel,
        KeyCode::Enter => match state.current() {
            Some(choice) => PickerAction::Submit(choice.to_owned()),
            None => PickerAction::Continue,
        },
        KeyCode::Down | KeyCode::Tab => {
            state.select_next();
            PickerAction::Continue
        }
        KeyCode::Up | KeyCode::BackTab => {
            state.select_previous();
            PickerAction::Continue
        }
        KeyCode::Backspace => {
            state.pop_char();
            PickerAction::Continue
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) => {
            state.push_char(ch);
            PickerAction::Continue
        }
        _ => PickerAction::Continue,
    }
}

/// Visual component drawing the picker.
#[derive(Debug, Default)]
pub struct QuickPick;

impl QuickPick {
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &PickerState, title: &str) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(state.filter()),
        ]))
        .block(
            Block::default()
                .title(title.to_owned())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(input, layout[0]);

        let items: Vec<ListItem> = state
            .visible()
            .into_iter()
            .map(|option| ListItem::new(option.to_owned()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");
        let mut list_state = ListState::default();
        list_state.select(state.selected());
        frame.render_stateful_widget(list, layout[1], &mut list_state);

        let hints = Paragraph::new(Line::from(vec![
            Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
            Span::raw(" move · "),
            Span::styled("↵", Style::default().fg(Color::Cyan)),
            Span::raw(" select · "),
            Span::styled("esc", Style::default().fg(Color::Cyan)),
            Span::raw(" cancel · type to filter"),
        ]))
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(hints, layout[2]);
    }
}

/// Show the picker on the terminal and block until the user submits or cancels.
pub fn run(options: &[String], title: &str) -> Result<Option<String>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let result = Terminal::new(CrosstermBackend::new(stderr))
        .context("failed to initialize terminal")
        .and_then(|mut terminal| {
            terminal.hide_cursor().ok();
            let outcome = event_loop(&mut terminal, options, title);
            let _ = terminal.show_cursor();
            outcome
        });

    disable_raw_mode().ok();
    let _ = execute!(io::stderr(), LeaveAlternateScreen);

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    options: &[String],
    title: &str,
) -> Result<Option<String>> {
    let mut state = PickerState::new(options);
    let component = QuickPick;

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            component.render(frame, area, &state, title);
        })?;

        if let Event::Key(key) = event::read().context("failed to read terminal event")? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(&mut state, key) {
                PickerAction::Continue => {}
                PickerAction::Submit(choice) => return Ok(Some(choice)),
                PickerAction::Cancel => return Ok(None),
            }
        }
    }
}
