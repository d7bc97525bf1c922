//! Video wizard view: one input per screen, ending in the generate trigger.
//!
//! Enter advances; there is no way back. Text steps take typing and paste,
//! selection steps cycle with j/k or the arrow keys, the template step also
//! takes a digit. On the Generate step Enter fires the request and `o` opens
//! the finished video.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

use crate::core::video::{
    SubmissionResult, SubmissionState, SubmissionStatus, Variant, VideoReference,
    DEFAULT_PHOTO_NAME, TEMPLATES,
};
use crate::core::wizard::{InputWidget, Step, WizardState};
use crate::tui::events::{AppEvent, Notification, NotificationLevel};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

/// Shown on failure; the underlying error only goes to the log.
pub const FAILURE_MESSAGE: &str = "Failed to generate video. Please try again later.";
/// Trigger label and notice while a request is in flight.
pub const LOADING_MESSAGE: &str = "Generating takes up to a min...";

// ── Internal async event channel ────────────────────────────────────────────

enum WizardDataEvent {
    Finished(SubmissionResult),
}

// ── State ───────────────────────────────────────────────────────────────────

pub struct VideoWizardState {
    wizard: WizardState,
    /// Edit buffer for the current text step; written back on every change.
    input: InputBuffer,
    submission: SubmissionState,
    data_tx: mpsc::UnboundedSender<WizardDataEvent>,
    data_rx: mpsc::UnboundedReceiver<WizardDataEvent>,
}

impl VideoWizardState {
    pub fn new(variant: Variant) -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        let wizard = WizardState::new(variant);
        let mut input = InputBuffer::new();
        if let Some(step) = wizard.current_step() {
            input.set_limit(wizard.text_limit(step));
        }
        Self {
            wizard,
            input,
            submission: SubmissionState::new(),
            data_tx,
            data_rx,
        }
    }

    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    /// True while the current step captures plain characters.
    pub fn captures_text(&self) -> bool {
        self.wizard.current_step().is_some_and(Step::is_text)
    }

    /// Drain finished submissions into the display state.
    pub fn poll(&mut self) {
        while let Ok(event) = self.data_rx.try_recv() {
            match event {
                WizardDataEvent::Finished(result) => {
                    log::info!("Submission finished with {:?}", result.status);
                    self.submission.finish(result);
                }
            }
        }
    }

    // ── Input handling ──────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        if let Event::Paste(text) = event {
            if self.captures_text() {
                self.input.insert_str(text);
                self.commit_input();
                return true;
            }
            return false;
        }

        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        // Ctrl/Alt chords belong to the global keymap
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }

        match self.wizard.current_step() {
            Some(Step::Generate) => self.handle_trigger_input(*code, services),
            Some(step) if step.is_text() => self.handle_text_input(*code),
            Some(Step::Font) => self.handle_select_input(*code, |w, fwd| w.cycle_font(fwd)),
            Some(Step::Voice) => self.handle_select_input(*code, |w, fwd| w.cycle_voice(fwd)),
            Some(Step::Template) => self.handle_template_input(*code),
            Some(_) | None => false,
        }
    }

    fn handle_text_input(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Enter => self.advance(),
            KeyCode::Char(c) => {
                if self.input.insert_char(c) {
                    self.commit_input();
                }
            }
            KeyCode::Backspace => {
                self.input.backspace();
                self.commit_input();
            }
            KeyCode::Delete => {
                self.input.delete();
                self.commit_input();
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => return false,
        }
        true
    }

    fn handle_select_input(
        &mut self,
        code: KeyCode,
        cycle: impl Fn(&mut WizardState, bool),
    ) -> bool {
        match code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Right => cycle(&mut self.wizard, true),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::Left => cycle(&mut self.wizard, false),
            KeyCode::Enter => self.advance(),
            _ => return false,
        }
        true
    }

    fn handle_template_input(&mut self, code: KeyCode) -> bool {
        let current = self.wizard.template();
        match code {
            KeyCode::Char('k') | KeyCode::Up | KeyCode::Right => {
                self.wizard.set_template(current.saturating_add(1))
            }
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Left => {
                self.wizard.set_template(current.saturating_sub(1))
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.wizard.set_template(c as u8 - b'0');
            }
            KeyCode::Enter => self.advance(),
            _ => return false,
        }
        true
    }

    fn handle_trigger_input(&mut self, code: KeyCode, services: &Services) -> bool {
        match code {
            KeyCode::Enter | KeyCode::Char('g') => {
                self.trigger(services);
                true
            }
            KeyCode::Char('o') => {
                self.open_video(services);
                true
            }
            _ => false,
        }
    }

    fn commit_input(&mut self) {
        if let Some(step) = self.wizard.current_step().filter(|s| s.is_text()) {
            self.wizard.set_text_value(step, self.input.text());
        }
    }

    /// Move to the next step and load its value into the edit buffer.
    fn advance(&mut self) {
        self.commit_input();
        if let Some(step) = self.wizard.advance() {
            self.input.set_limit(self.wizard.text_limit(step));
            self.input.set_text(self.wizard.text_value(step));
        } else {
            self.input.clear();
        }
    }

    // ── Submission ──────────────────────────────────────────────────────

    /// Fire one request. Refused while a previous one is still loading.
    pub fn trigger(&mut self, services: &Services) {
        if !self.submission.begin() {
            log::debug!("Generate pressed while a request is in flight, ignoring");
            return;
        }

        let (request, photo_path) = self.wizard.build_request();
        log::info!(
            "Generate triggered (attempt {}), photo={:?}",
            self.submission.attempts(),
            photo_path
        );
        services.notify(Notification::new(NotificationLevel::Info, LOADING_MESSAGE));

        let submitter = services.submitter.clone();
        let tx = self.data_tx.clone();
        let event_tx = services.event_tx.clone();

        tokio::spawn(async move {
            let result = submitter.submit_with_photo(request, photo_path).await;
            if result.status == SubmissionStatus::Error {
                let toast = Notification::new(NotificationLevel::Error, FAILURE_MESSAGE)
                    .with_title("Error");
                let _ = event_tx.send(AppEvent::Notification(toast));
            }
            let _ = tx.send(WizardDataEvent::Finished(result));
        });
    }

    fn open_video(&self, services: &Services) {
        let Some(url) = self.submission.video_url() else {
            return;
        };
        let reference = VideoReference(url.to_string());
        if !reference.is_url() {
            services.notify(Notification::new(
                NotificationLevel::Warning,
                format!("Not a playable URL: {url}"),
            ));
            return;
        }
        if let Err(e) = open::that_detached(url) {
            log::error!("Failed to open {url}: {e}");
            services.notify(Notification::new(
                NotificationLevel::Warning,
                "Could not open the video player",
            ));
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Step indicator
            Constraint::Length(1),
            Constraint::Min(3),    // Widget
            Constraint::Length(1), // Hints
        ])
        .split(area);

        self.render_step_indicator(frame, chunks[0]);

        match self.wizard.widget() {
            InputWidget::TextArea { max } => self.render_text_area(frame, chunks[2], max),
            InputWidget::TextLine | InputWidget::FilePath => {
                self.render_text_line(frame, chunks[2])
            }
            InputWidget::Select { options } => self.render_select(frame, chunks[2], &options),
            InputWidget::Number { min, max } => {
                self.render_template(frame, chunks[2], min, max)
            }
            InputWidget::GenerateButton => self.render_trigger(frame, chunks[2]),
            InputWidget::Preparing => self.render_preparing(frame, chunks[2]),
        }

        self.render_hints(frame, chunks[3]);
    }

    /// ✓ Text ── ● Name ── ○ Handle …
    fn render_step_indicator(&self, frame: &mut Frame, area: Rect) {
        let current = self.wizard.step_index();
        let mut spans = Vec::new();

        for (i, step) in self.wizard.steps().iter().enumerate() {
            let index = i + 1;
            if i > 0 {
                let connector = if index <= current {
                    Style::default().fg(theme::PRIMARY_DARK)
                } else {
                    theme::dim()
                };
                spans.push(Span::styled(" ── ", connector));
            }

            let (label, style) = if index == current {
                (format!("● {}", step.label()), theme::highlight())
            } else if index < current {
                (format!("✓ {}", step.label()), Style::default().fg(theme::SUCCESS))
            } else {
                (format!("○ {}", step.label()), theme::muted())
            };
            spans.push(Span::styled(label, style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn step_title(&self) -> String {
        let prompt = self.wizard.current_step().map(Step::prompt).unwrap_or("");
        format!(
            "Step {}/{}: {}",
            self.wizard.step_index().min(self.wizard.step_count()),
            self.wizard.step_count(),
            prompt
        )
    }

    fn render_text_area(&self, frame: &mut Frame, area: Rect, max: usize) {
        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

        let title = self.step_title();
        let body = Paragraph::new(cursor_lines(&self.input))
            .wrap(Wrap { trim: false })
            .block(theme::block_focused(&title));
        frame.render_widget(body, chunks[0]);

        let count = self.input.char_count();
        let count_style = if count >= max {
            Style::default().fg(theme::WARNING)
        } else {
            theme::muted()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Character Count: {count}/{max}"),
                count_style,
            ))
            .alignment(Alignment::Right),
            chunks[1],
        );
    }

    fn render_text_line(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);
        let title = self.step_title();
        let body = Paragraph::new(cursor_lines(&self.input)).block(theme::block_focused(&title));
        frame.render_widget(body, chunks[0]);

        if self.wizard.current_step() == Some(Step::Photo) && self.input.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  Blank uses the bundled {DEFAULT_PHOTO_NAME}"),
                    theme::muted(),
                )),
                chunks[1],
            );
        }
    }

    fn render_select(&self, frame: &mut Frame, area: Rect, options: &[&'static str]) {
        let selected = match self.wizard.current_step() {
            Some(Step::Font) => self
                .wizard
                .font()
                .and_then(|f| options.iter().position(|o| *o == f.id())),
            Some(Step::Voice) => self
                .wizard
                .voice()
                .and_then(|v| options.iter().position(|o| *o == v.label())),
            _ => None,
        };

        let items: Vec<ListItem> = options.iter().map(|o| ListItem::new(*o)).collect();
        let title = self.step_title();
        let list = List::new(items)
            .block(theme::block_focused(&title))
            .highlight_style(theme::highlight())
            .highlight_symbol("▸ ");

        let mut state = ListState::default();
        state.select(selected);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_template(&self, frame: &mut Frame, area: Rect, min: u8, max: u8) {
        let current = self.wizard.template();
        let mut lines = vec![
            Line::from(vec![
                Span::raw("  Template: "),
                Span::styled(format!("{current}"), theme::highlight()),
                Span::styled(format!("  ({min}-{max})"), theme::muted()),
            ]),
            Line::raw(""),
            Line::from(Span::styled("  Template Info:", theme::heading())),
        ];
        for (i, (desc, id)) in TEMPLATES.iter().enumerate() {
            let style = if i == current as usize {
                theme::highlight()
            } else {
                theme::muted()
            };
            lines.push(Line::from(Span::styled(
                format!("  {i}: {desc} ({id})"),
                style,
            )));
        }

        let title = self.step_title();
        frame.render_widget(
            Paragraph::new(lines).block(theme::block_focused(&title)),
            area,
        );
    }

    fn render_trigger(&self, frame: &mut Frame, area: Rect) {
        let request = self.wizard.request();
        let or_blank = |s: &str| {
            if s.is_empty() {
                "(blank)".to_string()
            } else {
                s.to_string()
            }
        };
        let preview: String = request.text.chars().take(60).collect();
        let ellipsis = if request.text.chars().count() > 60 { "…" } else { "" };

        let mut lines = vec![
            Line::raw(""),
            summary_line("Text", format!("{}{}", or_blank(&preview), ellipsis)),
            summary_line("Profile Name", or_blank(&request.display_name)),
            summary_line("Username", or_blank(&request.handle)),
        ];

        if request.variant == Variant::Classic {
            lines.push(summary_line("Font Color", or_blank(&request.styling.font_color)));
            lines.push(summary_line(
                "Font Bg Color",
                or_blank(&request.styling.background_color),
            ));
            lines.push(summary_line(
                "Font",
                or_blank(request.styling.font.map(|f| f.id()).unwrap_or("")),
            ));
            lines.push(summary_line("Template", self.wizard.template().to_string()));
        }

        lines.push(summary_line(
            "Voice",
            or_blank(request.voice.map(|v| v.label()).unwrap_or("")),
        ));
        lines.push(summary_line(
            "Photo",
            self.wizard
                .photo_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| format!("default ({DEFAULT_PHOTO_NAME})")),
        ));
        lines.push(Line::raw(""));

        if self.submission.loading() {
            lines.push(Line::from(Span::styled(
                format!("  [ {LOADING_MESSAGE} ]  "),
                theme::button_disabled(),
            )));
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("  Loading...", theme::muted())));
        } else {
            lines.push(Line::from(Span::styled(
                "  [ Generate Video ]  ",
                theme::button(),
            )));
            lines.push(Line::raw(""));
            lines.extend(self.result_lines());
        }

        let title = self.step_title();
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(theme::block_focused(&title)),
            area,
        );
    }

    fn result_lines(&self) -> Vec<Line<'static>> {
        match (self.submission.status(), self.submission.video_url()) {
            (SubmissionStatus::Success, Some(url)) if !url.is_empty() => {
                let mut lines = vec![Line::from(vec![
                    Span::styled("  Video: ", Style::default().fg(theme::SUCCESS)),
                    Span::styled(
                        url.to_string(),
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    ),
                ])];
                if VideoReference(url.to_string()).is_url() {
                    lines.push(Line::from(Span::styled(
                        "  Press o to open it in your player",
                        theme::muted(),
                    )));
                }
                lines
            }
            (SubmissionStatus::Success, _) => vec![Line::from(Span::styled(
                "  The service finished but returned no video.",
                theme::muted(),
            ))],
            (SubmissionStatus::Error, _) => vec![Line::from(Span::styled(
                "  Last attempt failed. Press Enter to try again.",
                Style::default().fg(theme::ERROR),
            ))],
            _ => Vec::new(),
        }
    }

    fn render_preparing(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_default());
        let p = Paragraph::new(vec![
            Line::raw(""),
            Line::from(Span::styled("Preparing...", theme::heading())),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(p, area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = match self.wizard.widget() {
            InputWidget::TextArea { .. } | InputWidget::TextLine | InputWidget::FilePath => {
                &[("type", " to edit  "), ("Enter", ":next")]
            }
            InputWidget::Select { .. } => &[("j/k", ":choose  "), ("Enter", ":next")],
            InputWidget::Number { .. } => {
                &[("0-7 j/k", ":template  "), ("Enter", ":next")]
            }
            InputWidget::GenerateButton if self.submission.loading() => {
                &[("", "Waiting for the video service")]
            }
            InputWidget::GenerateButton => &[("Enter", ":generate  "), ("o", ":open video")],
            InputWidget::Preparing => &[],
        };

        let mut spans = vec![Span::raw("  ")];
        for (key, desc) in hints {
            spans.push(Span::styled(*key, theme::key_hint().add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(*desc, theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn summary_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<14}"), theme::muted()),
        Span::raw(value),
    ])
}

/// Buffer content split into lines with a bar at the cursor.
fn cursor_lines(input: &InputBuffer) -> Vec<Line<'static>> {
    let (before, after) = input.split_at_cursor();
    format!("{before}▏{after}")
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::video::{Result as SubmitResult, VideoGenerator, VideoRequest};
    use async_trait::async_trait;
    use crossterm::event::KeyEventState;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::{Arc, Mutex};

    struct RecordingGenerator {
        url: Option<&'static str>,
        calls: Mutex<Vec<VideoRequest>>,
    }

    #[async_trait]
    impl VideoGenerator for RecordingGenerator {
        async fn generate(&self, request: &VideoRequest) -> SubmitResult<VideoReference> {
            self.calls.lock().unwrap().push(request.clone());
            match self.url {
                Some(url) => Ok(VideoReference(url.to_string())),
                None => Err(crate::core::video::SubmitError::Status {
                    status: 500,
                    body: String::new(),
                }),
            }
        }
    }

    fn services(
        url: Option<&'static str>,
    ) -> (
        Services,
        Arc<RecordingGenerator>,
        mpsc::UnboundedReceiver<AppEvent>,
    ) {
        let generator = Arc::new(RecordingGenerator {
            url,
            calls: Mutex::new(Vec::new()),
        });
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Services::new(AppConfig::default(), generator.clone(), tx),
            generator,
            rx,
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn type_text(view: &mut VideoWizardState, text: &str, services: &Services) {
        for c in text.chars() {
            view.handle_input(&key(KeyCode::Char(c)), services);
        }
    }

    fn rendered(view: &VideoWizardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    async fn wait_for_result(view: &mut VideoWizardState) {
        for _ in 0..100 {
            view.poll();
            if !view.submission().loading() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("submission never finished");
    }

    #[tokio::test]
    async fn test_typing_fills_fields_step_by_step() {
        let (services, _, _rx) = services(Some("https://x/y.mp4"));
        let mut view = VideoWizardState::new(Variant::Stepwise);

        type_text(&mut view, "hello world", &services);
        view.handle_input(&key(KeyCode::Enter), &services);
        type_text(&mut view, "Ada", &services);
        view.handle_input(&key(KeyCode::Enter), &services);
        type_text(&mut view, "@ada", &services);
        view.handle_input(&key(KeyCode::Enter), &services);

        let request = view.wizard().request();
        assert_eq!(request.text, "hello world");
        assert_eq!(request.display_name, "Ada");
        assert_eq!(request.handle, "@ada");
        assert_eq!(view.wizard().current_step(), Some(Step::Voice));
    }

    #[tokio::test]
    async fn test_paste_is_truncated_to_variant_limit() {
        let (services, _, _rx) = services(None);
        let mut view = VideoWizardState::new(Variant::Classic);
        view.handle_input(&Event::Paste("x".repeat(400)), &services);
        assert_eq!(view.wizard().request().text.len(), 256);
        assert!(rendered(&view).contains("Character Count: 256/256"));
    }

    #[tokio::test]
    async fn test_select_step_cycles_voice() {
        let (services, _, _rx) = services(None);
        let mut view = VideoWizardState::new(Variant::Stepwise);
        for _ in 0..3 {
            view.handle_input(&key(KeyCode::Enter), &services);
        }
        view.handle_input(&key(KeyCode::Char('j')), &services);
        view.handle_input(&key(KeyCode::Char('j')), &services);
        assert_eq!(view.wizard().voice(), Some(crate::core::video::Voice::Echo));
    }

    #[tokio::test]
    async fn test_template_digit_and_clamp() {
        let (services, _, _rx) = services(None);
        let mut view = VideoWizardState::new(Variant::Classic);
        while view.wizard().current_step() != Some(Step::Template) {
            view.handle_input(&key(KeyCode::Enter), &services);
        }
        view.handle_input(&key(KeyCode::Char('5')), &services);
        assert_eq!(view.wizard().template(), 5);
        view.handle_input(&key(KeyCode::Char('9')), &services);
        assert_eq!(view.wizard().template(), 7);
        assert!(rendered(&view).contains("7: Purple background"));
    }

    #[tokio::test]
    async fn test_trigger_success_shows_video() {
        let (services, generator, _rx) = services(Some("https://x/y.mp4"));
        let mut view = VideoWizardState::new(Variant::Stepwise);
        while !view.wizard().on_trigger() {
            view.handle_input(&key(KeyCode::Enter), &services);
        }

        view.handle_input(&key(KeyCode::Enter), &services);
        assert!(view.submission().loading());
        assert!(rendered(&view).contains(LOADING_MESSAGE));

        wait_for_result(&mut view).await;
        assert_eq!(view.submission().status(), SubmissionStatus::Success);
        assert_eq!(view.submission().video_url(), Some("https://x/y.mp4"));
        assert_eq!(generator.calls.lock().unwrap().len(), 1);
        assert!(rendered(&view).contains("https://x/y.mp4"));
    }

    #[tokio::test]
    async fn test_double_trigger_sends_one_request() {
        let (services, generator, _rx) = services(Some("https://x/y.mp4"));
        let mut view = VideoWizardState::new(Variant::Stepwise);
        while !view.wizard().on_trigger() {
            view.handle_input(&key(KeyCode::Enter), &services);
        }
        view.trigger(&services);
        view.trigger(&services);
        wait_for_result(&mut view).await;
        assert_eq!(generator.calls.lock().unwrap().len(), 1);
        assert_eq!(view.submission().attempts(), 1);
    }

    #[tokio::test]
    async fn test_trigger_failure_raises_generic_toast() {
        let (services, _, mut rx) = services(None);
        let mut view = VideoWizardState::new(Variant::Classic);
        while !view.wizard().on_trigger() {
            view.handle_input(&key(KeyCode::Enter), &services);
        }
        view.trigger(&services);
        wait_for_result(&mut view).await;

        assert_eq!(view.submission().status(), SubmissionStatus::Error);
        assert!(view.submission().video_url().is_none());

        let mut messages = Vec::new();
        while let Ok(AppEvent::Notification(n)) = rx.try_recv() {
            messages.push(n.message);
        }
        assert_eq!(messages, vec![LOADING_MESSAGE, FAILURE_MESSAGE]);
        assert!(rendered(&view).contains("Last attempt failed"));
    }

    #[tokio::test]
    async fn test_ctrl_chords_fall_through() {
        let (services, _, _rx) = services(None);
        let mut view = VideoWizardState::new(Variant::Classic);
        let ctrl_c = Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert!(!view.handle_input(&ctrl_c, &services));
        assert!(view.wizard().request().text.is_empty());
    }

    #[test]
    fn test_render_each_step_names_itself() {
        let mut view = VideoWizardState::new(Variant::Classic);
        let count = view.wizard().step_count();
        for index in 1..=count {
            let screen = rendered(&view);
            assert!(
                screen.contains(&format!("Step {index}/{count}")),
                "step {index} missing title"
            );
            view.advance();
        }
        assert!(rendered(&view).contains("Preparing..."));
    }
}
