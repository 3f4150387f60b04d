use anyhow::Result;
use auto_catalog::{AttributeKind, Manufacturer, Model, Registry};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Manufacturers,
    Models,
}

impl Pane {
    pub fn toggle(&self) -> Self {
        match self {
            Pane::Manufacturers => Pane::Models,
            Pane::Models => Pane::Manufacturers,
        }
    }
}

pub struct App {
    pub registry: Registry,
    pub focus: Pane,
    pub brand_state: TableState,
    pub model_state: TableState,
    pub show_detail: bool,
}

impl App {
    pub fn new(registry: Registry) -> Self {
        let mut brand_state = TableState::default();
        let mut model_state = TableState::default();
        if !registry.is_empty() {
            brand_state.select(Some(0));
            model_state.select(Some(0));
        }

        Self {
            registry,
            focus: Pane::Manufacturers,
            brand_state,
            model_state,
            show_detail: false,
        }
    }

    pub fn selected_manufacturer(&self) -> Option<&Manufacturer> {
        self.brand_state
            .selected()
            .and_then(|i| self.registry.manufacturers().get(i))
    }

    pub fn selected_model(&self) -> Option<&Model> {
        let manufacturer = self.selected_manufacturer()?;
        self.model_state
            .selected()
            .and_then(|i| manufacturer.models().get(i))
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Pane::Manufacturers => self.registry.len(),
            Pane::Models => self.selected_manufacturer().map_or(0, |m| m.model_count()),
        }
    }

    fn select(&mut self, i: Option<usize>) {
        match self.focus {
            Pane::Manufacturers => {
                self.brand_state.select(i);
                // New manufacturer: restart at its first model
                self.model_state.select(i.map(|_| 0));
            }
            Pane::Models => self.model_state.select(i),
        }
    }

    fn selected(&self) -> Option<usize> {
        match self.focus {
            Pane::Manufacturers => self.brand_state.selected(),
            Pane::Models => self.model_state.selected(),
        }
    }

    pub fn next(&mut self) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.select(Some(i));
    }

    pub fn first(&mut self) {
        if self.focused_len() > 0 {
            self.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        let len = self.focused_len();
        if len > 0 {
            self.select(Some(len - 1));
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
                KeyCode::Left | KeyCode::Char('h') => app.focus = Pane::Manufacturers,
                KeyCode::Right | KeyCode::Char('l') => app.focus = Pane::Models,
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let mut constraints = vec![Constraint::Length(28), Constraint::Min(0)];
    if app.show_detail {
        constraints.push(Constraint::Length(38));
    }
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(chunks[1]);

    render_manufacturers(f, content[0], app);
    render_models(f, content[1], app);
    if app.show_detail {
        render_detail_panel(f, content[2], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn border_style(app: &App, pane: Pane) -> Style {
    if app.focus == pane {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    }
}

fn header_row<'a>(titles: impl IntoIterator<Item = &'a str>) -> Row<'a> {
    let cells = titles.into_iter().map(|h| {
        Cell::from(h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    Row::new(cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let spans = vec![
        Span::styled(
            "Auto Catalog",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Manufacturers: {}", app.registry.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Models: {}", app.registry.model_count()),
            Style::default().fg(Color::Green),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_manufacturers(f: &mut Frame, area: Rect, app: &mut App) {
    let rows: Vec<Row> = app
        .registry
        .manufacturers()
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.brand().to_string()),
                Cell::from(m.model_count().to_string()),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Length(7)])
        .header(header_row(["Brand", "Models"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app, Pane::Manufacturers))
                .title(" Manufacturers "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.brand_state);
}

fn render_models(f: &mut Frame, area: Rect, app: &mut App) {
    let title = match app.selected_manufacturer() {
        Some(m) => format!(" {} ", m.brand()),
        None => " Models ".to_string(),
    };

    let rows: Vec<Row> = app
        .selected_manufacturer()
        .map(|m| m.models())
        .unwrap_or_default()
        .iter()
        .map(|model| {
            let mut cells = vec![Cell::from(display_name(model).to_string())];
            cells.extend(AttributeKind::ALL.iter().map(|kind| {
                Cell::from(
                    model
                        .attribute(*kind)
                        .map(|a| a.display().to_string())
                        .unwrap_or_default(),
                )
            }));
            Row::new(cells).height(1)
        })
        .collect();

    let mut widths = vec![Constraint::Length(24)];
    widths.extend(AttributeKind::ALL.iter().map(|_| Constraint::Length(11)));

    let titles = std::iter::once("Model").chain(AttributeKind::ALL.iter().map(|k| k.column_name()));

    let table = Table::new(rows, widths)
        .header(header_row(titles))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app, Pane::Models))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.model_state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    if let (Some(manufacturer), Some(model)) = (app.selected_manufacturer(), app.selected_model()) {
        lines.push(Line::from(Span::styled(
            format!("{} {}", manufacturer.brand(), model.name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for attr in model.attributes() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<16}", attr.kind().label()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(attr.display().to_string()),
            ]));
        }
    } else {
        lines.push(Line::from("No model selected"));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Details "),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let position = match app.focus {
        Pane::Manufacturers => format!(
            " Brand: {}/{} ",
            app.brand_state.selected().map(|i| i + 1).unwrap_or(0),
            app.registry.len()
        ),
        Pane::Models => format!(
            " Model: {}/{} ",
            app.model_state.selected().map(|i| i + 1).unwrap_or(0),
            app.selected_manufacturer().map_or(0, |m| m.model_count())
        ),
    };

    let spans = vec![
        Span::styled(position, Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Pane | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn display_name(model: &Model) -> &str {
    if model.name().is_empty() {
        "(unnamed)"
    } else {
        model.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auto_catalog::{DatasetReader, IngestConfig};

    fn app() -> App {
        let data = "name\tmpg\nford pinto\t25\nford maverick\t21\namc gremlin\t21\n";
        let registry = DatasetReader::new(IngestConfig::default())
            .unwrap()
            .read_from(data.as_bytes())
            .unwrap();
        App::new(registry)
    }

    #[test]
    fn test_initial_selection() {
        let app = app();

        assert_eq!(app.selected_manufacturer().unwrap().brand(), "ford");
        assert_eq!(app.selected_model().unwrap().name(), "pinto");
    }

    #[test]
    fn test_brand_navigation_resets_model() {
        let mut app = app();

        app.toggle_focus();
        app.next();
        assert_eq!(app.selected_model().unwrap().name(), "maverick");

        app.toggle_focus();
        app.next();
        assert_eq!(app.selected_manufacturer().unwrap().brand(), "amc");
        assert_eq!(app.selected_model().unwrap().name(), "gremlin");
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();

        app.previous();
        assert_eq!(app.selected_manufacturer().unwrap().brand(), "amc");
        app.next();
        assert_eq!(app.selected_manufacturer().unwrap().brand(), "ford");
    }

    #[test]
    fn test_empty_registry() {
        let mut app = App::new(Registry::default());

        app.next();
        app.last();
        assert!(app.selected_manufacturer().is_none());
        assert!(app.selected_model().is_none());
    }
}
