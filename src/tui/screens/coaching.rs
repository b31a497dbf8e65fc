//! Coaching screen: the check-in form on the left, the snapshot on the right.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, Padding, Paragraph, Wrap};

use crate::coaching::{Preset, ScoringPolicy};
use crate::form::CoachingForm;
use crate::model::{CoachingResult, DISCLAIMER, Field, Zone};
use crate::select::{
    DocumentEvent, DocumentListeners, SelectError, SelectEvent, SelectKey, SelectList,
};

const FORM_WIDTH: u16 = 40;
const PROGRESS_LABEL: &str = "A win or challenge today (optional)";
const PROGRESS_PLACEHOLDER: &str = "e.g. Hit my protein goal";

/// What the app loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    Continue,
    Quit,
}

/// Which widget receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Select(usize),
    Progress,
    Submit,
}

pub struct CoachingScreen {
    form: CoachingForm,
    selects: Vec<(Field, SelectList)>,
    listeners: DocumentListeners,
    focus: Focus,
    progress_area: Rect,
    submit_area: Rect,
}

impl CoachingScreen {
    /// Build the form with one mounted dropdown per field.
    pub fn new(policy: ScoringPolicy, listeners: &DocumentListeners) -> Result<Self, SelectError> {
        let form = CoachingForm::new(policy);

        let mut selects = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            let options = field.options().iter().map(|o| (*o).to_string()).collect();
            let mut select = SelectList::new(field.label(), options, form.input().value(field))?;
            select.mount(listeners);
            selects.push((field, select));
        }

        Ok(Self {
            form,
            selects,
            listeners: listeners.clone(),
            focus: Focus::Select(0),
            progress_area: Rect::default(),
            submit_area: Rect::default(),
        })
    }

    pub fn preset(&self) -> Preset {
        self.form.policy().preset
    }

    /// Release every dropdown's document listeners.
    pub fn unmount(&mut self) {
        for (_, select) in &mut self.selects {
            select.unmount();
        }
    }

    // ── Keyboard ──

    pub fn on_key(&mut self, key: KeyEvent) -> ScreenAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return ScreenAction::Quit,
            KeyCode::Char('r') if ctrl => {
                self.reset();
                return ScreenAction::Continue;
            }
            KeyCode::Esc => {
                if self.any_open() {
                    self.broadcast(DocumentEvent::Escape);
                    return ScreenAction::Continue;
                }
                return ScreenAction::Quit;
            }
            KeyCode::Tab => {
                self.focus_next();
                return ScreenAction::Continue;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return ScreenAction::Continue;
            }
            _ => {}
        }

        match self.focus {
            Focus::Select(i) => {
                let key = match key.code {
                    KeyCode::Enter => SelectKey::Enter,
                    KeyCode::Char(' ') => SelectKey::Space,
                    KeyCode::Up => SelectKey::Up,
                    KeyCode::Down => SelectKey::Down,
                    KeyCode::Char('q') if !self.selects[i].1.is_open() => {
                        return ScreenAction::Quit;
                    }
                    _ => return ScreenAction::Continue,
                };
                self.dispatch_select(i, SelectEvent::Key(key));
            }
            Focus::Progress => match key.code {
                KeyCode::Char(c) if is_typing(key.modifiers) => self.form.push_progress(c),
                KeyCode::Backspace => self.form.pop_progress(),
                KeyCode::Enter => self.submit(),
                KeyCode::Up => self.focus_prev(),
                KeyCode::Down => self.focus_next(),
                _ => {}
            },
            Focus::Submit => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.submit(),
                KeyCode::Up => self.focus_prev(),
                KeyCode::Down => self.focus_next(),
                KeyCode::Char('q') => return ScreenAction::Quit,
                _ => {}
            },
        }
        ScreenAction::Continue
    }

    // ── Mouse ──

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.broadcast(DocumentEvent::PointerDown { column, row });

                // Open lists are drawn over the rest of the form.
                if let Some(i) = self
                    .selects
                    .iter()
                    .position(|(_, s)| s.is_open() && s.contains(column, row))
                {
                    let select = &self.selects[i].1;
                    let event = match select.option_at(column, row) {
                        Some(index) => Some(SelectEvent::Click(index)),
                        None if select.on_trigger(column, row) => Some(SelectEvent::Activate),
                        None => None,
                    };
                    if let Some(event) = event {
                        self.set_focus(Focus::Select(i));
                        self.dispatch_select(i, event);
                    }
                    return;
                }

                if let Some(i) = self
                    .selects
                    .iter()
                    .position(|(_, s)| s.on_trigger(column, row))
                {
                    self.set_focus(Focus::Select(i));
                    self.dispatch_select(i, SelectEvent::Activate);
                    return;
                }

                let at = Position::new(column, row);
                if self.progress_area.contains(at) {
                    self.set_focus(Focus::Progress);
                } else if self.submit_area.contains(at) {
                    self.set_focus(Focus::Submit);
                    self.submit();
                }
            }
            MouseEventKind::Moved => {
                for (_, select) in &mut self.selects {
                    if let Some(index) = select.option_at(column, row) {
                        select.handle(SelectEvent::Hover(index));
                    }
                }
            }
            _ => {}
        }
    }

    // ── Actions ──

    fn dispatch_select(&mut self, i: usize, event: SelectEvent) {
        let (field, select) = &mut self.selects[i];
        let field = *field;
        let form = &mut self.form;

        let mut committed = false;
        select.dispatch(event, |value| {
            committed = true;
            if let Err(e) = form.set_choice(field, value) {
                tracing::warn!(error = %e, "dropdown produced an unknown option");
            }
        });

        if committed {
            select.sync_value(form.input().value(field));
        }
    }

    fn submit(&mut self) {
        let result = self.form.submit();
        tracing::info!(zone = %result.zone, tips = result.tips.len(), "coaching requested");
    }

    /// Restore mount state and reconcile every dropdown with its new value.
    fn reset(&mut self) {
        self.form.reset();
        for (field, select) in &mut self.selects {
            select.close();
            select.sync_value(self.form.input().value(*field));
        }
        tracing::debug!("form reset");
    }

    fn any_open(&self) -> bool {
        self.selects.iter().any(|(_, s)| s.is_open())
    }

    /// Deliver a document event to the dropdowns still subscribed.
    fn broadcast(&mut self, event: DocumentEvent) {
        let selects = &mut self.selects;
        self.listeners.broadcast(event, |id, event| {
            if let Some((_, select)) = selects
                .iter_mut()
                .find(|(_, s)| s.subscription_id() == Some(id))
            {
                select.on_document(event);
            }
        });
    }

    fn focus_order(&self) -> Vec<Focus> {
        (0..self.selects.len())
            .map(Focus::Select)
            .chain([Focus::Progress, Focus::Submit])
            .collect()
    }

    fn focus_next(&mut self) {
        let order = self.focus_order();
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.set_focus(order[(at + 1) % order.len()]);
    }

    fn focus_prev(&mut self) {
        let order = self.focus_order();
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.set_focus(order[(at + order.len() - 1) % order.len()]);
    }

    fn set_focus(&mut self, focus: Focus) {
        if let Focus::Select(i) = self.focus {
            if focus != self.focus {
                self.selects[i].1.close();
            }
        }
        self.focus = focus;
    }

    // ── Rendering ──

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // help
        ])
        .split(area);

        let [form_area, result_area] =
            Layout::horizontal([Constraint::Length(FORM_WIDTH + 4), Constraint::Min(0)])
                .areas(chunks[1]);

        let muted = Style::default().fg(Color::DarkGray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        // Header.
        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("FitCal Coaching", highlight),
                Span::styled(format!("  [{}]", self.preset()), muted),
            ]),
            Line::from(Span::styled(
                "Real-time guidance based on how you're feeling today.",
                muted,
            )),
        ])
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(header, chunks[0]);

        self.render_form(frame, form_area);
        render_result(frame, result_area, self.form.result());

        // Open lists go last so they draw over the fields below them.
        for (field, select) in &self.selects {
            if select.is_open() {
                render_list(frame, select, self.form.input().value(*field));
            }
        }

        // Help line.
        let help = Paragraph::new(Line::from(vec![Span::styled(
            " tab focus  ↑↓ choose  ⏎ select/submit  ctrl-r reset  esc close/quit",
            muted,
        )]));
        frame.render_widget(help, chunks[2]);
    }

    fn render_form(&mut self, frame: &mut Frame, area: Rect) {
        let inner = Block::default().padding(Padding::new(2, 2, 1, 0)).inner(area);

        // label, field, gap per row; then progress; then the button.
        let mut constraints = Vec::new();
        for _ in 0..=self.selects.len() {
            constraints.extend([Constraint::Length(1); 3]);
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for (i, (field, select)) in self.selects.iter_mut().enumerate() {
            let label_area = rows[i * 3];
            let trigger = rows[i * 3 + 1];
            let list_height = u16::try_from(select.options().len())
                .unwrap_or(u16::MAX)
                .saturating_add(2);
            let list = Rect {
                x: trigger.x,
                y: trigger.y.saturating_add(1),
                width: trigger.width,
                height: list_height,
            }
            .intersection(frame.area());
            select.set_layout(label_area, trigger, list);

            frame.render_widget(
                Paragraph::new(Span::styled(select.label().to_string(), muted)),
                label_area,
            );

            let focused = self.focus == Focus::Select(i);
            let style = if focused { highlight } else { normal };
            let pointer = if focused { "› " } else { "  " };
            let arrow = if select.is_open() { "▴" } else { "▾" };
            let value = self.form.input().value(*field);
            let width = usize::from(trigger.width.saturating_sub(4));
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(pointer, style),
                    Span::styled(format!("{value:<width$}"), style),
                    Span::styled(arrow, muted),
                ])),
                trigger,
            );
        }

        let base = self.selects.len() * 3;
        frame.render_widget(
            Paragraph::new(Span::styled(PROGRESS_LABEL, muted)),
            rows[base],
        );

        self.progress_area = rows[base + 1];
        let progress = &self.form.input().progress;
        let focused = self.focus == Focus::Progress;
        let mut spans = vec![Span::styled(
            if focused { "› " } else { "  " },
            if focused { highlight } else { normal },
        )];
        if progress.is_empty() && !focused {
            spans.push(Span::styled(PROGRESS_PLACEHOLDER, muted));
        } else {
            spans.push(Span::styled(progress.clone(), Style::default().fg(Color::White)));
        }
        if focused {
            spans.push(Span::styled("█", muted));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), self.progress_area);

        self.submit_area = rows[base + 3];
        let style = if self.focus == Focus::Submit {
            highlight.add_modifier(Modifier::REVERSED)
        } else {
            normal
        };
        frame.render_widget(
            Paragraph::new(Span::styled("[ Get Coaching ]", style)),
            self.submit_area,
        );
    }
}

/// Plain or shifted characters; anything chorded with Ctrl or Alt is a command.
fn is_typing(modifiers: KeyModifiers) -> bool {
    modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

fn render_list(frame: &mut Frame, select: &SelectList, value: &str) {
    let area = select.list_area();
    if area.is_empty() {
        return;
    }

    let items: Vec<ListItem> = select
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let mut style = Style::default().fg(Color::Gray);
            if i == select.active_index() {
                style = style.bg(Color::DarkGray).fg(Color::White);
            }
            let check = if option == value { " ✓" } else { "" };
            if option == value {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled(option.clone(), style),
                Span::styled(check, style),
            ]))
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items).block(Block::bordered()), area);
}

fn render_result(frame: &mut Frame, area: Rect, result: Option<&CoachingResult>) {
    let muted = Style::default().fg(Color::DarkGray);
    let block = Block::bordered()
        .title(" Your Coaching Snapshot ")
        .border_style(muted)
        .padding(Padding::new(1, 1, 0, 0));

    let Some(result) = result else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Fill in the form and press Get Coaching.",
            muted,
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(format!(" {} ", result.label), badge_style(result.zone))),
        Line::default(),
        Line::from(result.core_message.as_str()),
        Line::default(),
        Line::from(Span::styled(
            "What to focus on now:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for tip in &result.tips {
        lines.push(Line::from(format!("• {tip}")));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(DISCLAIMER, muted)));

    let content = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(content, area);
}

fn badge_style(zone: Zone) -> Style {
    let bg = match zone {
        Zone::Green => Color::Green,
        Zone::Yellow => Color::Yellow,
        Zone::Red => Color::Red,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::coaching::Preset;

    fn screen(listeners: &DocumentListeners) -> CoachingScreen {
        CoachingScreen::new(Preset::Adaptive.policy(), listeners).unwrap()
    }

    fn press(screen: &mut CoachingScreen, code: KeyCode) -> ScreenAction {
        screen.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(screen: &mut CoachingScreen, column: u16, row: u16) {
        screen.on_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn draw(terminal: &mut Terminal<TestBackend>, screen: &mut CoachingScreen) -> String {
        terminal.draw(|frame| screen.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn mounts_one_listener_per_dropdown() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        assert_eq!(listeners.len(), Field::ALL.len());
        s.unmount();
        assert!(listeners.is_empty());
    }

    #[test]
    fn keyboard_changes_a_field_and_submits() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);

        // Energy: medium → high.
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.form.input().value(Field::Energy), "high");

        // Tab to the submit button.
        for _ in 0..6 {
            press(&mut s, KeyCode::Tab);
        }
        assert_eq!(s.focus, Focus::Submit);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.form.result().unwrap().zone, Zone::Green);
    }

    #[test]
    fn typing_goes_to_progress_input() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        s.set_focus(Focus::Progress);
        for c in "ran 5k".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        press(&mut s, KeyCode::Backspace);
        assert_eq!(s.form.input().progress, "ran 5");

        press(&mut s, KeyCode::Enter);
        let tips = &s.form.result().unwrap().tips;
        assert!(tips.iter().any(|t| t.contains("“ran 5”")));
    }

    #[test]
    fn chorded_keys_are_not_typed() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        s.set_focus(Focus::Progress);
        s.on_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        s.on_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(s.form.input().progress, "");

        s.on_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(s.form.input().progress, "A");
    }

    #[test]
    fn escape_closes_before_quitting() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        press(&mut s, KeyCode::Enter);
        assert!(s.any_open());

        assert_eq!(press(&mut s, KeyCode::Esc), ScreenAction::Continue);
        assert!(!s.any_open());
        assert_eq!(press(&mut s, KeyCode::Esc), ScreenAction::Quit);
    }

    #[test]
    fn leaving_a_dropdown_closes_it() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        press(&mut s, KeyCode::Down);
        assert!(s.selects[0].1.is_open());
        press(&mut s, KeyCode::Tab);
        assert!(!s.selects[0].1.is_open());
        assert_eq!(s.form.input().value(Field::Energy), "medium");
    }

    #[test]
    fn reset_reconciles_dropdowns() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        press(&mut s, KeyCode::Up);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.form.input().value(Field::Energy), "low");
        assert_eq!(s.selects[0].1.active_index(), 0);

        s.on_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(s.form.input().value(Field::Energy), "medium");
        assert_eq!(s.selects[0].1.active_index(), 1);
    }

    #[test]
    fn mouse_opens_commits_and_dismisses() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut s);

        // Open the mood dropdown by clicking its trigger.
        let trigger = s.selects[1].1.trigger_area();
        click(&mut s, trigger.x + 2, trigger.y);
        assert!(s.selects[1].1.is_open());
        assert_eq!(s.focus, Focus::Select(1));

        // First option sits just inside the list border.
        draw(&mut terminal, &mut s);
        let list = s.selects[1].1.list_area();
        click(&mut s, list.x + 2, list.y + 1);
        assert!(!s.selects[1].1.is_open());
        assert_eq!(s.form.input().value(Field::Mood), "down");

        // Reopen, then click far outside: closes without committing.
        click(&mut s, trigger.x + 2, trigger.y);
        assert!(s.selects[1].1.is_open());
        click(&mut s, 99, 0);
        assert!(!s.selects[1].1.is_open());
        assert_eq!(s.form.input().value(Field::Mood), "down");
    }

    #[test]
    fn label_click_keeps_dropdown_open() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut s);

        let trigger = s.selects[1].1.trigger_area();
        click(&mut s, trigger.x + 2, trigger.y);
        assert!(s.selects[1].1.is_open());

        // The "Mood" label sits on the row above the trigger.
        draw(&mut terminal, &mut s);
        click(&mut s, trigger.x + 2, trigger.y - 1);
        assert!(s.selects[1].1.is_open());
        assert_eq!(s.form.input().value(Field::Mood), "neutral");
    }

    #[test]
    fn unmounted_dropdown_misses_document_events() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        s.selects[0].1.unmount();
        assert_eq!(listeners.len(), Field::ALL.len() - 1);

        s.selects[0].1.handle(SelectEvent::Activate);
        s.selects[1].1.handle(SelectEvent::Activate);
        s.broadcast(DocumentEvent::Escape);
        assert!(s.selects[0].1.is_open());
        assert!(!s.selects[1].1.is_open());
    }

    #[test]
    fn hover_moves_active_option() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut s);

        press(&mut s, KeyCode::Enter);
        draw(&mut terminal, &mut s);
        let list = s.selects[0].1.list_area();
        s.on_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: list.x + 1,
            row: list.y + 3,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(s.selects[0].1.active_index(), 2);
        assert_eq!(s.form.input().value(Field::Energy), "medium");
    }

    #[test]
    fn renders_form_and_result() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        let before = draw(&mut terminal, &mut s);
        assert!(before.contains("Energy Level"));
        assert!(before.contains("Hunger / Cravings"));
        assert!(before.contains("Get Coaching"));
        assert!(!before.contains("Aligned Day"));

        s.submit();
        let after = draw(&mut terminal, &mut s);
        assert!(after.contains("Aligned Day"));
        assert!(after.contains("What to focus on now:"));
    }

    #[test]
    fn open_list_is_drawn() {
        let listeners = DocumentListeners::new();
        let mut s = screen(&listeners);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut s);

        press(&mut s, KeyCode::Enter);
        let text = draw(&mut terminal, &mut s);
        assert!(text.contains("medium ✓"));
    }
}
