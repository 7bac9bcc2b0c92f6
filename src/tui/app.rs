use crate::dashboard::{Action, Dashboard, Slot};
use crate::event::{Event, EventResult};
use crate::fetch::Fetcher;
use crate::tui::InputWidget;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Seconds added or removed per interval keypress
const INTERVAL_STEP: u64 = 5;

/// Which panel keyboard navigation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Queries,
    Results,
    Saved,
}

/// Main application state
///
/// Owns the dashboard and translates terminal events into dashboard
/// [`Action`]s. Rendering only reads dashboard state; every mutation goes
/// through the action dispatcher.
pub struct App {
    dashboard: Dashboard,
    focus: Focus,
    selected_query: usize,
    selected_result: usize,
    selected_saved: usize,
    /// Index of the query being edited, if the editor is open
    editing: Option<usize>,
    input: Option<InputWidget>,
    status: String,
    should_quit: bool,
    refresh_requested: bool,
    pending_interval: Option<u64>,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            focus: Focus::Queries,
            selected_query: 0,
            selected_result: 0,
            selected_saved: 0,
            editing: None,
            input: None,
            status: "Waiting for first fetch cycle".to_string(),
            should_quit: false,
            refresh_requested: false,
            pending_interval: None,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Consume a pending interval change, if the user adjusted it
    pub fn take_interval_change(&mut self) -> Option<u64> {
        self.pending_interval.take()
    }

    /// Consume a pending refresh request (timer tick or manual)
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    pub fn set_refreshing(&mut self) {
        self.status = "Refreshing…".to_string();
    }

    /// Run one fetch cycle over all queries
    pub async fn refresh(&mut self, fetcher: &Fetcher) {
        self.dashboard.refresh_all(fetcher).await;
        self.status = format!("Last refresh {}", Local::now().format("%H:%M:%S"));
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                match mouse.kind {
                    MouseEventKind::ScrollUp => self.move_selection(-1),
                    MouseEventKind::ScrollDown => self.move_selection(1),
                    _ => {}
                }
                Ok(())
            }
            Event::RefreshTick => {
                self.refresh_requested = true;
                Ok(())
            }
            Event::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Event::Resize(..) => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        if self.editing.is_some() {
            return self.handle_editor_key(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.cycle_focus(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('a') => {
                self.dashboard.apply(Action::AddQuery);
                self.selected_query = self.dashboard.queries().len() - 1;
                self.focus = Focus::Queries;
                self.status = "Query added; it is picked up by the next cycle".to_string();
            }
            KeyCode::Char('d') => {
                let before = self.dashboard.queries().len();
                self.dashboard.apply(Action::RemoveQuery(self.selected_query));
                if self.dashboard.queries().len() == before {
                    self.status = "At least one query must remain".to_string();
                } else {
                    self.selected_query = self
                        .selected_query
                        .min(self.dashboard.queries().len() - 1);
                    self.status = "Query removed".to_string();
                }
            }
            KeyCode::Char('e') => self.open_editor(),
            KeyCode::Enter => match self.focus {
                Focus::Queries => self.open_editor(),
                Focus::Results => self.save_selected_result(),
                Focus::Saved => {}
            },
            KeyCode::Char('s') => self.save_selected_result(),
            KeyCode::Char('r') => self.refresh_requested = true,
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.adjust_interval(INTERVAL_STEP as i64);
            }
            KeyCode::Char('-') => {
                self.adjust_interval(-(INTERVAL_STEP as i64));
            }
            KeyCode::Char(']') => self.adjust_results(1),
            KeyCode::Char('[') => self.adjust_results(-1),
            _ => {}
        }
        Ok(())
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> EventResult<()> {
        match key.code {
            KeyCode::Enter => {
                if let (Some(index), Some(input)) = (self.editing.take(), self.input.take()) {
                    // Empty text is allowed; the provider decides what an
                    // empty query returns.
                    self.dashboard.apply(Action::SetQueryText(index, input.text()));
                    self.status = "Query updated; it is picked up by the next cycle".to_string();
                }
            }
            KeyCode::Esc => {
                self.editing = None;
                self.input = None;
            }
            _ => {
                if let Some(input) = &mut self.input {
                    input.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn open_editor(&mut self) {
        let index = self.selected_query;
        if let Some(text) = self.dashboard.queries().get(index) {
            self.input = Some(InputWidget::new(text));
            self.editing = Some(index);
            self.focus = Focus::Queries;
        }
    }

    fn save_selected_result(&mut self) {
        // Copy at click time: a refresh overwriting the slot afterwards
        // cannot change what was saved.
        let result = match self.dashboard.slots().get(self.selected_query) {
            Some(Slot::Loaded(results)) => results.get(self.selected_result).cloned(),
            _ => None,
        };
        if let Some(result) = result {
            let title = truncate(&result.title, 40);
            self.dashboard.apply(Action::SaveArticle(result));
            self.status = format!("Saved \"{title}\"");
        }
    }

    fn adjust_interval(&mut self, delta: i64) {
        let current = self.dashboard.refresh_interval_secs() as i64;
        let next = (current + delta).max(0) as u64;
        self.dashboard.apply(Action::SetRefreshInterval(next));
        let applied = self.dashboard.refresh_interval_secs();
        self.pending_interval = Some(applied);
        self.status = format!("Refresh interval: {applied}s");
    }

    fn adjust_results(&mut self, delta: i64) {
        let current = self.dashboard.results_per_query() as i64;
        let next = (current + delta).max(0) as usize;
        self.dashboard.apply(Action::SetResultsPerQuery(next));
        self.status = format!(
            "Results per query: {}",
            self.dashboard.results_per_query()
        );
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Queries => Focus::Results,
            Focus::Results => Focus::Saved,
            Focus::Saved => Focus::Queries,
        };
    }

    fn move_selection(&mut self, delta: i64) {
        match self.focus {
            Focus::Queries => {
                self.selected_query =
                    step(self.selected_query, delta, self.dashboard.queries().len());
                self.selected_result = 0;
            }
            Focus::Results => {
                let len = match self.dashboard.slots().get(self.selected_query) {
                    Some(Slot::Loaded(results)) => results.len(),
                    _ => 0,
                };
                self.selected_result = step(self.selected_result, delta, len);
            }
            Focus::Saved => {
                self.selected_saved =
                    step(self.selected_saved, delta, self.dashboard.saved().len());
            }
        }
    }

    /// Render the whole dashboard
    pub fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(30)])
            .split(rows[0]);

        self.render_sidebar(frame, columns[0]);
        self.render_results(frame, columns[1]);
        self.render_status(frame, rows[1]);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let editor_height = if self.editing.is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(editor_height),
                Constraint::Length(4),
                Constraint::Min(4),
            ])
            .split(area);

        self.render_queries(frame, chunks[0]);
        if let Some(input) = &self.input {
            input.render(frame, chunks[1]);
        }
        self.render_controls(frame, chunks[2]);
        self.render_saved(frame, chunks[3]);
    }

    fn render_queries(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .dashboard
            .queries()
            .iter()
            .enumerate()
            .map(|(i, query)| {
                let marker = match self.dashboard.slots().get(i) {
                    Some(Slot::Failed(_)) => Span::styled("✗ ", Style::default().fg(Color::Red)),
                    Some(Slot::Pending) => Span::styled("… ", Style::default().fg(Color::DarkGray)),
                    _ => Span::raw("  "),
                };
                let text = if query.is_empty() { "(empty)" } else { query };
                ListItem::new(Line::from(vec![marker, Span::raw(text.to_string())]))
            })
            .collect();

        let list = List::new(items)
            .block(
                panel_block(" Queries (a=add │ d=del │ e=edit) ", self.focus == Focus::Queries),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸");

        let mut state = ListState::default().with_selected(Some(self.selected_query));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(format!(
                "Interval: {}s  (+/- to adjust)",
                self.dashboard.refresh_interval_secs()
            )),
            Line::from(format!(
                "Results:  {}   ([/] to adjust)",
                self.dashboard.results_per_query()
            )),
        ];
        let paragraph = Paragraph::new(lines).block(panel_block(" Control Panel ", false));
        frame.render_widget(paragraph, area);
    }

    fn render_saved(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .dashboard
            .saved()
            .iter()
            .map(|article| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        truncate(&article.title, area.width.saturating_sub(4) as usize),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        truncate(&article.url, area.width.saturating_sub(4) as usize),
                        Style::default().fg(Color::Blue),
                    )),
                ])
            })
            .collect();

        let title = format!(" Saved Articles ({}) ", self.dashboard.saved().len());
        let list = List::new(items)
            .block(panel_block(&title, self.focus == Focus::Saved))
            .highlight_style(Style::default().fg(Color::Yellow));

        let mut state = ListState::default().with_selected(
            (!self.dashboard.saved().is_empty()).then_some(self.selected_saved),
        );
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let query = self
            .dashboard
            .queries()
            .get(self.selected_query)
            .cloned()
            .unwrap_or_default();

        let title = format!(
            " Top {} results for '{}' (s=save) ",
            self.dashboard.results_per_query(),
            query
        );
        let block = panel_block(&title, self.focus == Focus::Results);

        match self.dashboard.slots().get(self.selected_query) {
            Some(Slot::Loaded(results)) if !results.is_empty() => {
                let width = area.width.saturating_sub(4) as usize;
                let items: Vec<ListItem> = results
                    .iter()
                    .map(|result| {
                        ListItem::new(vec![
                            Line::from(Span::styled(
                                truncate(&result.title, width),
                                Style::default().add_modifier(Modifier::BOLD),
                            )),
                            Line::from(Span::styled(
                                truncate(&result.url, width),
                                Style::default().fg(Color::Blue),
                            )),
                            Line::from(truncate(&result.description, width * 2)),
                            Line::from(Span::styled(
                                format!(
                                    "retrieved {}",
                                    result.retrieved_at.format("%Y-%m-%d %H:%M:%S")
                                ),
                                Style::default().fg(Color::DarkGray),
                            )),
                            Line::from(""),
                        ])
                    })
                    .collect();

                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().fg(Color::Yellow))
                    .highlight_symbol("▸");
                let mut state =
                    ListState::default().with_selected(Some(self.selected_result));
                frame.render_stateful_widget(list, area, &mut state);
            }
            Some(Slot::Loaded(_)) => {
                let paragraph = Paragraph::new("No results for this query.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                frame.render_widget(paragraph, area);
            }
            Some(Slot::Failed(message)) => {
                let paragraph = Paragraph::new(format!(
                    "Fetch failed: {message}\nWill retry on the next cycle."
                ))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
                frame.render_widget(paragraph, area);
            }
            _ => {
                let paragraph = Paragraph::new("Waiting for first fetch…")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                frame.render_widget(paragraph, area);
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(self.status.as_str(), Style::default().fg(Color::LightBlue)),
            Span::styled(
                "  │ Tab=focus ↑↓=select r=refresh q=quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
    }
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .border_style(border)
}

fn step(current: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as i64 + delta;
    next.clamp(0, len as i64 - 1) as usize
}

fn truncate(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    for (count, ch) in text.chars().enumerate() {
        if count + 1 >= max {
            out.push('…');
            return out;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clamps_at_both_ends() {
        assert_eq!(step(0, -1, 3), 0);
        assert_eq!(step(2, 1, 3), 2);
        assert_eq!(step(1, 1, 3), 2);
        assert_eq!(step(0, 5, 3), 2);
        assert_eq!(step(0, 1, 0), 0);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("a longer title here", 8), "a longe…");
        assert_eq!(truncate("anything", 0), "");
    }
}
