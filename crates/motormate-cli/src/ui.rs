//! Full-screen TUI

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event, EventStream, MouseEventKind};
use futures::StreamExt;
use motormate_api::ChatRequest;
use motormate_chat::{ChatController, MessageKind, Outcome, Transport};
use motormate_tui::{
    TerminalGuard, Theme,
    input::{Action, event_to_action},
    widgets::{ChatMessage, InputBox, MessageList, Role, Spinner, message_list::calculate_message_height},
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tokio::sync::mpsc;

use crate::commands::{CommandResult, execute_command};

/// Messages sent from key handling to the main loop
#[derive(Debug)]
pub enum UiMessage {
    /// A request is ready to go out
    Submit(ChatRequest),
    /// Slash command typed into the input box
    Command(String),
    /// User requested quit
    Quit,
}

/// TUI application state
pub struct TuiState {
    controller: ChatController,
    input: InputBox,
    /// Scroll offset in lines; `usize::MAX` means "follow the bottom"
    scroll: usize,
    /// Largest valid scroll offset at the last render
    last_max_scroll: usize,
    /// Command output, keyed by the conversation length when it was shown
    notices: Vec<(usize, String)>,
    status: String,
    theme: Theme,
    endpoint: String,
    /// Whether Shift+Enter is distinguishable from Enter
    keyboard_enhanced: bool,
    ui_tx: mpsc::Sender<UiMessage>,
    request_started: Instant,
}

fn to_chat_message(kind: MessageKind, text: &str) -> ChatMessage {
    let role = match kind {
        MessageKind::User => Role::User,
        MessageKind::Bot => Role::Bot,
        MessageKind::Error => Role::Error,
        MessageKind::Placeholder => Role::Thinking,
    };
    ChatMessage::new(role, text)
}

impl TuiState {
    pub fn new(
        controller: ChatController,
        theme: Theme,
        endpoint: impl Into<String>,
        ui_tx: mpsc::Sender<UiMessage>,
    ) -> Self {
        let mut input = InputBox::new()
            .with_placeholder("Ask about any car...")
            .with_disabled_placeholder("Waiting for MotorMate...");
        input.set_focused(true);

        Self {
            controller,
            input,
            scroll: usize::MAX,
            last_max_scroll: 0,
            notices: Vec::new(),
            status: "Ready".to_string(),
            theme,
            endpoint: endpoint.into(),
            keyboard_enhanced: false,
            ui_tx,
            request_started: Instant::now(),
        }
    }

    pub fn set_keyboard_enhanced(&mut self, enhanced: bool) {
        self.keyboard_enhanced = enhanced;
    }

    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    fn scroll_to_bottom(&mut self) {
        // Resolved against content height during render
        self.scroll = usize::MAX;
    }

    fn follow_controller(&mut self) {
        if self.controller.take_scroll_request() {
            self.scroll_to_bottom();
        }
    }

    /// Show a local notice in the conversation (not sent to the server)
    fn show_notice(&mut self, text: &str) {
        self.status = text.lines().next().unwrap_or("").to_string();
        self.notices.push((self.controller.messages().len(), text.to_string()));
        self.scroll_to_bottom();
    }

    /// Handle keyboard action. Returns false to quit.
    pub async fn handle_action(&mut self, action: Action, width: u16) -> bool {
        match action {
            Action::Submit => {
                if self.controller.is_busy() {
                    return true;
                }
                let content = self.input.content().to_string();
                if content.trim_start().starts_with('/') {
                    self.input.clear();
                    let _ = self.ui_tx.send(UiMessage::Command(content)).await;
                } else if let Some(request) = self.controller.begin_submit(&content) {
                    self.input.clear();
                    self.input.set_disabled(true);
                    self.request_started = Instant::now();
                    self.status = "Waiting for reply...".to_string();
                    self.follow_controller();
                    let _ = self.ui_tx.send(UiMessage::Submit(request)).await;
                }
                true
            }
            Action::Quit | Action::Interrupt | Action::Escape => {
                let _ = self.ui_tx.send(UiMessage::Quit).await;
                false
            }
            Action::PageUp => {
                self.scroll_up(10);
                true
            }
            Action::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                true
            }
            Action::Clear => {
                if !self.controller.is_busy() {
                    let _ = self
                        .ui_tx
                        .send(UiMessage::Command("/clear".to_string()))
                        .await;
                }
                true
            }
            _ => {
                self.input.handle_action(&action, width);
                true
            }
        }
    }

    fn scroll_up(&mut self, lines: usize) {
        if self.scroll == usize::MAX {
            self.scroll = self.last_max_scroll;
        }
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Apply the result of the outstanding request
    pub fn finish_request(&mut self, result: motormate_api::Result<motormate_api::ChatResponse>) {
        let outcome = self.controller.finish(result);
        self.input.set_disabled(false);
        self.status = match outcome {
            Outcome::Replied => format!(
                "Ready | {} history entries",
                self.controller.history().len()
            ),
            Outcome::Failed => "Request failed".to_string(),
        };
        self.follow_controller();
    }

    /// Run a slash command. Returns false to quit.
    pub fn run_command(&mut self, input: &str) -> bool {
        match execute_command(input, &self.controller) {
            Some(CommandResult::Clear) => {
                if self.controller.reset() {
                    self.notices.clear();
                    self.status = "Cleared".to_string();
                    self.follow_controller();
                }
                true
            }
            Some(CommandResult::Message(msg)) => {
                self.show_notice(&msg);
                true
            }
            Some(CommandResult::Unknown(cmd)) => {
                self.show_notice(&format!(
                    "Unknown command: /{}\nType /help for available commands.",
                    cmd
                ));
                true
            }
            Some(CommandResult::Exit) => false,
            None => true,
        }
    }

    /// Conversation plus local notices, in display order
    fn display_messages(&self) -> Vec<ChatMessage> {
        let mut out = Vec::new();
        let mut notices = self.notices.iter().peekable();
        for (i, msg) in self.controller.messages().iter().enumerate() {
            while let Some((_, text)) = notices.next_if(|(at, _)| *at <= i) {
                out.push(ChatMessage::new(Role::Notice, text.clone()));
            }
            out.push(to_chat_message(msg.kind, &msg.text));
        }
        for (_, text) in notices {
            out.push(ChatMessage::new(Role::Notice, text.clone()));
        }
        out
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Messages
                Constraint::Length(1), // Status
                Constraint::Length(3), // Input
            ])
            .split(frame.area());

        self.render_messages(frame, chunks[0]);
        self.render_status(frame, chunks[1]);
        self.input
            .render(chunks[2], frame.buffer_mut(), &self.theme);
    }

    fn render_messages(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(" MotorMate │ {} ", self.endpoint);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(title);

        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let messages = self.display_messages();
        let content_height = calculate_message_height(&messages, inner.width as usize);
        let max_scroll = content_height.saturating_sub(inner.height as usize);
        self.last_max_scroll = max_scroll;
        self.scroll = self.scroll.min(max_scroll);
        let at_bottom = self.scroll == max_scroll;

        let list = MessageList::new(&messages, &self.theme)
            .scroll(self.scroll)
            .thinking_elapsed(self.request_started.elapsed());
        frame.render_widget(list, inner);

        if content_height > inner.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");

            let mut scrollbar_state = ScrollbarState::new(content_height)
                .position(self.scroll)
                .viewport_content_length(inner.height as usize);

            frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }

        // Keep following new lines while parked at the bottom
        if at_bottom {
            self.scroll = usize::MAX;
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if self.controller.is_busy() {
            let spinner =
                Spinner::new(&self.status, &self.theme).with_start_time(self.request_started);
            frame.render_widget(spinner, area);
            return;
        }

        let newline_key = if self.keyboard_enhanced {
            "Shift+Enter"
        } else {
            "Alt+Enter"
        };
        let left = self.status.clone();
        let right = format!(
            "Enter: send │ {}: newline │ Ctrl+L: clear │ Ctrl+C: quit",
            newline_key
        );

        let left_width = left.chars().count();
        let right_width = right.chars().count();
        let available = area.width as usize;

        let line = if left_width + right_width + 2 <= available {
            let spacing = available - left_width - right_width;
            Line::from(vec![
                Span::styled(left, self.theme.dim_style()),
                Span::raw(" ".repeat(spacing)),
                Span::styled(right, self.theme.dim_style()),
            ])
        } else {
            Line::from(Span::styled(left, self.theme.dim_style()))
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// What the terminal asked for, after translating raw events
enum Input {
    Action(Action),
    Scroll(i32),
    Ignore,
    Closed,
}

fn translate(event: Option<std::io::Result<Event>>) -> anyhow::Result<Input> {
    Ok(match event {
        Some(Ok(Event::Mouse(mouse))) => match mouse.kind {
            MouseEventKind::ScrollUp => Input::Scroll(-3),
            MouseEventKind::ScrollDown => Input::Scroll(3),
            _ => Input::Ignore,
        },
        Some(Ok(evt)) => event_to_action(evt).map_or(Input::Ignore, Input::Action),
        Some(Err(e)) => return Err(anyhow::anyhow!("Event error: {}", e)),
        None => Input::Closed,
    })
}

impl TuiState {
    fn scroll_by(&mut self, delta: i32) {
        if delta < 0 {
            self.scroll_up(delta.unsigned_abs() as usize);
        } else {
            self.scroll = self.scroll.saturating_add(delta as usize);
        }
    }
}

/// Run the TUI application
pub async fn run_tui(
    transport: Arc<dyn Transport>,
    controller: ChatController,
    theme: Theme,
    endpoint: &str,
) -> anyhow::Result<()> {
    let mut terminal = TerminalGuard::enter()?;

    let (ui_tx, mut ui_rx) = mpsc::channel::<UiMessage>(32);
    let mut state = TuiState::new(controller, theme, endpoint, ui_tx);
    state.set_keyboard_enhanced(terminal.keyboard_enhanced());

    let mut event_stream = EventStream::new();

    // Tick interval for animations (80ms for smooth spinner)
    let mut tick_interval = tokio::time::interval(std::time::Duration::from_millis(80));

    let mut pending: Option<ChatRequest> = None;

    loop {
        // One request in flight: keep drawing and reading keys until it resolves
        if let Some(request) = pending.take() {
            let mut reply = std::pin::pin!(transport.send(request));

            loop {
                terminal.draw(|frame| state.render(frame))?;
                let width = terminal.width()?;

                tokio::select! {
                    biased;

                    result = &mut reply => {
                        state.finish_request(result);
                        break;
                    }

                    event = event_stream.next() => {
                        match translate(event)? {
                            Input::Action(action) => {
                                if !state.handle_action(action, width).await {
                                    return Ok(());
                                }
                            }
                            Input::Scroll(delta) => state.scroll_by(delta),
                            Input::Closed => return Ok(()),
                            Input::Ignore => {}
                        }
                    }

                    _ = tick_interval.tick() => {}
                }
            }
            continue;
        }

        terminal.draw(|frame| state.render(frame))?;
        let width = terminal.width()?;

        tokio::select! {
            biased;

            msg = ui_rx.recv() => {
                match msg {
                    Some(UiMessage::Submit(request)) => {
                        pending = Some(request);
                    }
                    Some(UiMessage::Command(cmd)) => {
                        if !state.run_command(&cmd) {
                            break;
                        }
                    }
                    Some(UiMessage::Quit) | None => break,
                }
            }

            event = event_stream.next() => {
                match translate(event)? {
                    Input::Action(action) => {
                        state.handle_action(action, width).await;
                    }
                    Input::Scroll(delta) => state.scroll_by(delta),
                    Input::Closed => break,
                    Input::Ignore => {}
                }
            }

            _ = tick_interval.tick() => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use motormate_api::ChatResponse;
    use motormate_tui::input::key_to_action;

    fn state() -> (TuiState, mpsc::Receiver<UiMessage>) {
        let (tx, rx) = mpsc::channel(8);
        let mut controller = ChatController::new();
        controller.greet();
        (
            TuiState::new(controller, Theme::dark(), "http://127.0.0.1:5000", tx),
            rx,
        )
    }

    async fn type_text(state: &mut TuiState, text: &str) {
        for c in text.chars() {
            state.handle_action(Action::Char(c), 80).await;
        }
    }

    #[tokio::test]
    async fn test_enter_submits_and_disables_input() {
        let (mut state, mut rx) = state();
        type_text(&mut state, "Cheapest EV?").await;

        let enter = key_to_action(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(state.handle_action(enter, 80).await);

        match rx.try_recv() {
            Ok(UiMessage::Submit(request)) => assert_eq!(request.message, "Cheapest EV?"),
            other => panic!("expected submit, got {:?}", other),
        }
        assert!(state.controller().is_busy());
        assert!(state.input.is_disabled());
        assert_eq!(state.input.content(), "");
    }

    #[tokio::test]
    async fn test_shift_enter_does_not_submit() {
        let (mut state, mut rx) = state();
        type_text(&mut state, "line").await;

        let shift_enter = key_to_action(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        state.handle_action(shift_enter, 80).await;

        assert!(rx.try_recv().is_err());
        assert!(!state.controller().is_busy());
        assert_eq!(state.input.content(), "line\n");
    }

    #[tokio::test]
    async fn test_blank_submit_sends_nothing() {
        let (mut state, mut rx) = state();
        type_text(&mut state, "   ").await;
        state.handle_action(Action::Submit, 80).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(state.controller().messages().len(), 1);
    }

    #[tokio::test]
    async fn test_input_reenabled_after_failure() {
        let (mut state, mut rx) = state();
        type_text(&mut state, "hello").await;
        state.handle_action(Action::Submit, 80).await;
        assert!(matches!(rx.try_recv(), Ok(UiMessage::Submit(_))));

        // Keys typed while waiting are dropped
        type_text(&mut state, "more").await;
        assert_eq!(state.input.content(), "");

        state.finish_request(Err(motormate_api::Error::status(500, "boom")));
        assert!(!state.controller().is_busy());
        assert!(!state.input.is_disabled());
        assert_eq!(state.status, "Request failed");
        assert_eq!(state.scroll, usize::MAX);

        type_text(&mut state, "x").await;
        assert_eq!(state.input.content(), "x");
    }

    #[tokio::test]
    async fn test_success_updates_status() {
        let (mut state, _rx) = state();
        type_text(&mut state, "hi").await;
        state.handle_action(Action::Submit, 80).await;
        state.finish_request(Ok(ChatResponse {
            response: "hello".into(),
            history: vec![serde_json::json!(1), serde_json::json!(2)],
            success: Some(true),
        }));
        assert_eq!(state.status, "Ready | 2 history entries");
    }

    #[tokio::test]
    async fn test_slash_input_becomes_command() {
        let (mut state, mut rx) = state();
        type_text(&mut state, "/history").await;
        state.handle_action(Action::Submit, 80).await;

        match rx.try_recv() {
            Ok(UiMessage::Command(cmd)) => assert_eq!(cmd, "/history"),
            other => panic!("expected command, got {:?}", other),
        }
        assert!(!state.controller().is_busy());
    }

    #[test]
    fn test_notices_interleave_with_conversation() {
        let (mut state, _rx) = state();
        assert!(state.run_command("/history"));
        assert!(!state.run_command("/quit"));

        let shown = state.display_messages();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].role, Role::Bot);
        assert_eq!(shown[1], ChatMessage::new(Role::Notice, "No history yet."));

        assert!(state.run_command("/clear"));
        assert_eq!(state.display_messages().len(), 1);
    }
}
