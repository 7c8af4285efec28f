use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use household_builder::{
    Action, Candidate, Controller, FieldKey, MemberId, MemberRecord, Outcome,
    PresentationSurface, RELATION_OPTIONS,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::collections::BTreeMap;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldKey),
    Household,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Field(FieldKey::Smoker) => Focus::Household,
            Focus::Field(key) => Focus::Field(key.next()),
            Focus::Household => Focus::Field(FieldKey::Relation),
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Focus::Field(FieldKey::Relation) => Focus::Household,
            Focus::Field(key) => Focus::Field(key.previous()),
            Focus::Household => Focus::Field(FieldKey::Smoker),
        }
    }
}

/// What a key press asks the event loop to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Action),
    Quit,
}

#[derive(Debug, Clone)]
pub struct ListItem {
    pub id: MemberId,
    pub label: String,
}

pub struct App {
    pub relation_index: usize,
    pub age_input: String,
    pub smoker: bool,
    pub focus: Focus,
    pub members: Vec<ListItem>,
    pub state: TableState,
    pub errors: BTreeMap<FieldKey, String>,
    pub export: Option<String>,
    pub status: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            relation_index: 0,
            age_input: String::new(),
            smoker: false,
            focus: Focus::Field(FieldKey::Relation),
            members: Vec::new(),
            state: TableState::default(),
            errors: BTreeMap::new(),
            export: None,
            status: String::from("Fill in a member and press Enter to add"),
        }
    }

    pub fn relation(&self) -> &'static str {
        RELATION_OPTIONS
            .get(self.relation_index)
            .copied()
            .unwrap_or_default()
    }

    /// Current input values, as the form holds them
    pub fn candidate(&self) -> Candidate {
        Candidate::new(self.relation(), self.age_input.clone(), self.smoker)
    }

    pub fn selected_member(&self) -> Option<&ListItem> {
        self.state.selected().and_then(|i| self.members.get(i))
    }

    pub fn next_relation(&mut self) {
        self.relation_index = (self.relation_index + 1) % RELATION_OPTIONS.len();
    }

    pub fn previous_relation(&mut self) {
        self.relation_index = if self.relation_index == 0 {
            RELATION_OPTIONS.len() - 1
        } else {
            self.relation_index - 1
        };
    }

    pub fn next(&mut self) {
        let len = self.members.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.members.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => return Some(Command::Quit),
            KeyCode::Esc => return Some(Command::Quit),
            KeyCode::Char('s') if ctrl => return Some(Command::Dispatch(Action::SubmitRequested)),
            KeyCode::F(2) => return Some(Command::Dispatch(Action::SubmitRequested)),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Field(field) => {
                if key.code == KeyCode::Enter {
                    return Some(Command::Dispatch(Action::AddRequested(self.candidate())));
                }
                self.edit_field(field, key);
                None
            }
            Focus::Household => match key.code {
                KeyCode::Char('q') => Some(Command::Quit),
                KeyCode::Down | KeyCode::Char('j') => {
                    self.next();
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.previous();
                    None
                }
                KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => self
                    .selected_member()
                    .map(|item| Command::Dispatch(Action::RemoveRequested(item.id.clone()))),
                _ => None,
            },
        }
    }

    fn edit_field(&mut self, field: FieldKey, key: KeyEvent) {
        match field {
            FieldKey::Relation => match key.code {
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => self.next_relation(),
                KeyCode::Left | KeyCode::Up => self.previous_relation(),
                _ => {}
            },
            FieldKey::Age => match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.age_input.push(c)
                }
                KeyCode::Backspace => {
                    self.age_input.pop();
                }
                _ => {}
            },
            FieldKey::Smoker => {
                if key.code == KeyCode::Char(' ') {
                    self.smoker = !self.smoker;
                }
            }
        }
    }

    /// Status line for the last handled action
    pub fn note_outcome(&mut self, outcome: &Outcome) {
        self.status = match outcome {
            Outcome::Added(id) => format!("Added member {}", id),
            Outcome::Rejected(error) => format!("Not added: {}", error),
            Outcome::Removed { id, existed: true } => format!("Removed member {}", id),
            Outcome::Removed { existed: false, .. } => String::from("Nothing to remove"),
            Outcome::Exported => String::from("Household exported"),
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSurface for App {
    fn render_member(&mut self, record: &MemberRecord, label: &str) {
        self.members.push(ListItem {
            id: record.id.clone(),
            label: label.to_string(),
        });
        if self.state.selected().is_none() {
            self.state.select(Some(0));
        }
    }

    fn remove_member(&mut self, id: &MemberId) {
        self.members.retain(|item| &item.id != id);

        let selected = match self.state.selected() {
            _ if self.members.is_empty() => None,
            Some(i) if i >= self.members.len() => Some(self.members.len() - 1),
            other => other,
        };
        self.state.select(selected);
    }

    fn show_field_error(&mut self, field: FieldKey, message: &str) {
        self.errors.insert(field, message.to_string());
    }

    fn clear_errors(&mut self) {
        self.errors.clear();
    }

    fn clear_inputs(&mut self) {
        self.relation_index = 0;
        self.age_input.clear();
        self.smoker = false;
        self.focus = Focus::Field(FieldKey::Relation);
    }

    fn show_export(&mut self, text: &str) {
        self.export = Some(text.to_string());
    }
}

pub fn run_ui(app: &mut App, controller: &mut Controller) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, controller);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    controller: &mut Controller,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::Dispatch(action)) => {
                let outcome = controller.handle(action, &mut *app);
                app.note_outcome(&outcome);
            }
            None => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Form
            Constraint::Min(0),    // Household + export
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_form(f, chunks[1], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    render_household(f, content_chunks[0], app);
    render_export(f, content_chunks[1], app);
    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let spans = vec![
        Span::styled(
            "Household Builder",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Members: {}", app.members.len()),
            Style::default().fg(Color::White),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = FieldKey::ALL
        .iter()
        .map(|&field| {
            let focused = app.focus == Focus::Field(field);
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let value = match field {
                FieldKey::Relation => match app.relation() {
                    "" => String::from("< --- >"),
                    relation => format!("< {} >", relation),
                },
                FieldKey::Age if focused => format!("{}_", app.age_input),
                FieldKey::Age => app.age_input.clone(),
                FieldKey::Smoker => {
                    if app.smoker {
                        String::from("[x]")
                    } else {
                        String::from("[ ]")
                    }
                }
            };

            let mut spans = vec![
                Span::styled(if focused { "→ " } else { "  " }, label_style),
                Span::styled(format!("{:<14}", field.label()), label_style),
                Span::styled(format!("{:<16}", value), Style::default().fg(Color::White)),
            ];
            if let Some(message) = app.errors.get(&field) {
                spans.push(Span::styled(message.clone(), Style::default().fg(Color::Red)));
            }

            Line::from(spans)
        })
        .collect();

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Add Member "),
    );

    f.render_widget(form, area);
}

fn render_household(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Id", "Member"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.members.iter().map(|item| {
        Row::new(vec![
            Cell::from(truncate(item.id.as_str(), 10)),
            Cell::from(item.label.clone()),
        ])
        .height(1)
    });

    let border_color = if app.focus == Focus::Household {
        Color::Yellow
    } else {
        Color::White
    };

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(20)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(" Household "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_export(f: &mut Frame, area: Rect, app: &App) {
    let text = match &app.export {
        Some(export) => export.clone(),
        None => String::from("Press F2 (or Ctrl+S) to export the household"),
    };

    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Export "),
        );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let status_spans = vec![
        Span::styled(format!(" {} ", app.status), Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Focus | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Add | "),
        Span::styled("d", Style::default().fg(Color::Yellow)),
        Span::raw(" Remove | "),
        Span::styled("F2", Style::default().fg(Color::Yellow)),
        Span::raw(" Export | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use household_builder::{HouseholdStore, ValidationError};

    fn press(app: &mut App, code: KeyCode) -> Option<Command> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_age(app: &mut App, text: &str) {
        app.focus = Focus::Field(FieldKey::Age);
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn dispatch(app: &mut App, controller: &mut Controller, command: Option<Command>) -> Outcome {
        match command {
            Some(Command::Dispatch(action)) => {
                let outcome = controller.handle(action, &mut *app);
                app.note_outcome(&outcome);
                outcome
            }
            other => panic!("expected an action, got {:?}", other),
        }
    }

    fn add_member(app: &mut App, controller: &mut Controller, relation_steps: usize, age: &str) {
        app.focus = Focus::Field(FieldKey::Relation);
        for _ in 0..relation_steps {
            press(app, KeyCode::Right);
        }
        type_age(app, age);
        let command = press(app, KeyCode::Enter);
        dispatch(app, controller, command);
    }

    #[test]
    fn test_focus_cycles_through_fields_and_list() {
        let mut app = App::new();
        assert_eq!(app.focus, Focus::Field(FieldKey::Relation));

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Field(FieldKey::Age));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Field(FieldKey::Smoker));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Household);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Field(FieldKey::Relation));

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Household);
    }

    #[test]
    fn test_form_input_builds_candidate() {
        let mut app = App::new();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        type_age(&mut app, "34");
        app.focus = Focus::Field(FieldKey::Smoker);
        press(&mut app, KeyCode::Char(' '));

        assert_eq!(app.candidate(), Candidate::new("spouse", "34", true));

        let command = press(&mut app, KeyCode::Enter);
        assert_eq!(
            command,
            Some(Command::Dispatch(Action::AddRequested(Candidate::new(
                "spouse", "34", true
            ))))
        );
    }

    #[test]
    fn test_relation_select_wraps() {
        let mut app = App::new();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.relation(), "other");
        press(&mut app, KeyCode::Right);
        assert_eq!(app.relation(), "");
    }

    #[test]
    fn test_backspace_edits_age() {
        let mut app = App::new();
        type_age(&mut app, "120");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.age_input, "12");
    }

    #[test]
    fn test_add_clears_form_and_lists_member() {
        let mut app = App::new();
        let mut controller = Controller::default();

        add_member(&mut app, &mut controller, 3, "12");

        assert_eq!(app.members.len(), 1);
        assert_eq!(app.members[0].label, "Relation: child Age: 12 Smoker: no");
        assert_eq!(app.state.selected(), Some(0));
        assert_eq!(app.relation_index, 0);
        assert!(app.age_input.is_empty());
        assert_eq!(app.status, "Added member 1");
    }

    #[test]
    fn test_rejected_add_keeps_inputs_and_shows_error() {
        let mut app = App::new();
        let mut controller = Controller::default();

        type_age(&mut app, "-1");
        app.focus = Focus::Field(FieldKey::Relation);
        press(&mut app, KeyCode::Right);
        let command = press(&mut app, KeyCode::Enter);
        let outcome = dispatch(&mut app, &mut controller, command);

        assert_eq!(outcome, Outcome::Rejected(ValidationError::InvalidAge));
        assert_eq!(app.age_input, "-1");
        assert_eq!(app.relation(), "self");
        assert_eq!(
            app.errors.get(&FieldKey::Age).map(String::as_str),
            Some("Invalid age. Please try again.")
        );
        assert!(app.members.is_empty());
    }

    #[test]
    fn test_remove_selected_member() {
        let mut app = App::new();
        let mut controller = Controller::new(HouseholdStore::new(), Default::default());

        add_member(&mut app, &mut controller, 1, "40");
        add_member(&mut app, &mut controller, 2, "38");
        add_member(&mut app, &mut controller, 3, "6");

        app.focus = Focus::Household;
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_member().unwrap().id.as_str(), "2");

        let command = press(&mut app, KeyCode::Char('d'));
        dispatch(&mut app, &mut controller, command);

        let ids: Vec<_> = app.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(controller.store().len(), 2);
        assert_eq!(app.selected_member().unwrap().id.as_str(), "3");
    }

    #[test]
    fn test_remove_last_item_moves_selection_back() {
        let mut app = App::new();
        let mut controller = Controller::default();
        add_member(&mut app, &mut controller, 1, "40");
        add_member(&mut app, &mut controller, 2, "38");

        app.focus = Focus::Household;
        press(&mut app, KeyCode::Up);
        assert_eq!(app.state.selected(), Some(1));

        let command = press(&mut app, KeyCode::Delete);
        dispatch(&mut app, &mut controller, command);
        assert_eq!(app.state.selected(), Some(0));

        let command = press(&mut app, KeyCode::Delete);
        dispatch(&mut app, &mut controller, command);
        assert_eq!(app.state.selected(), None);

        // Nothing selected, nothing to remove
        assert_eq!(press(&mut app, KeyCode::Delete), None);
    }

    #[test]
    fn test_submit_shows_export() {
        let mut app = App::new();
        let mut controller = Controller::default();
        add_member(&mut app, &mut controller, 1, "40");

        let command = press(&mut app, KeyCode::F(2));
        dispatch(&mut app, &mut controller, command);

        let export = app.export.as_deref().unwrap();
        assert!(export.contains("\"relation\": \"self\""));
        assert_eq!(app.status, "Household exported");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        assert_eq!(press(&mut app, KeyCode::Esc), Some(Command::Quit));
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );

        // 'q' is typed text while a field has focus
        type_age(&mut app, "q");
        assert_eq!(app.age_input, "q");

        app.focus = Focus::Household;
        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(Command::Quit));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789abcdef", 10), "0123456...");
    }
}
