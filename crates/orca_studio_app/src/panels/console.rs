// SPDX-License-Identifier: MIT OR Apache-2.0
//! Console panel - Log output and command input.

use std::collections::VecDeque;
use std::sync::mpsc;

/// Maximum number of entries kept in the console
pub const MAX_ENTRIES: usize = 10_000;

/// A tracing event captured by the [`TracingBridge`] layer.
#[derive(Debug, Clone)]
pub struct TracingEvent {
    /// The log level.
    pub level: tracing::Level,
    /// The formatted message.
    pub message: String,
    /// Target (module path).
    pub target: String,
}

/// A `tracing_subscriber::Layer` that forwards events over a bounded `mpsc`
/// channel so the [`ConsolePanel`] can display them.
///
/// While nobody drains the receiver (welcome screen) at most `capacity`
/// events are buffered; later ones are dropped.
pub struct TracingBridge {
    sender: mpsc::SyncSender<TracingEvent>,
}

impl TracingBridge {
    /// Create a new bridge buffering up to [`MAX_ENTRIES`] events and return
    /// `(layer, receiver)`.
    pub fn new() -> (Self, mpsc::Receiver<TracingEvent>) {
        Self::with_capacity(MAX_ENTRIES)
    }

    /// Create a new bridge buffering up to `capacity` undrained events.
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<TracingEvent>) {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        (Self { sender }, receiver)
    }
}

impl<S> tracing_subscriber::Layer<S> for TracingBridge
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        // Full while undrained, disconnected after shutdown; drop either way.
        let _ = self.sender.try_send(TracingEvent {
            level: *meta.level(),
            message: visitor.finish(),
            target: meta.target().to_string(),
        });
    }
}

/// Collects the `message` field first, then `name = value` pairs.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (true, true) => "(empty)".to_string(),
            (true, false) => self.fields.join(", "),
            (false, true) => self.message,
            (false, false) => format!("{} ({})", self.message, self.fields.join(", ")),
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{} = {:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{} = {}", field.name(), value));
        }
    }
}

/// What produced a console entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `trace!` output
    Trace,
    /// `debug!` output
    Debug,
    /// `info!` output
    Info,
    /// `warn!` output
    Warn,
    /// `error!` output, or a rejected command
    Error,
    /// Echo of a command typed by the user
    Command,
    /// Response of the console itself
    System,
}

impl From<tracing::Level> for EntryKind {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Self::Trace,
            tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

impl EntryKind {
    /// Label shown after the timestamp
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Command => "COMMAND",
            Self::System => "SYSTEM",
        }
    }

    fn color(&self) -> egui::Color32 {
        match self {
            Self::Trace => egui::Color32::from_rgb(100, 100, 100),
            Self::Debug => egui::Color32::from_rgb(150, 150, 150),
            Self::Info => egui::Color32::from_rgb(0xdc, 0xdc, 0xdc),
            Self::Warn => egui::Color32::from_rgb(255, 200, 80),
            Self::Error => egui::Color32::from_rgb(255, 100, 100),
            Self::Command => egui::Color32::from_rgb(0x88, 0xc0, 0xd0),
            Self::System => egui::Color32::from_rgb(0x00, 0xb0, 0x00),
        }
    }
}

/// One line of console output
#[derive(Debug, Clone)]
pub struct ConsoleEntry {
    /// Entry kind
    pub kind: EntryKind,
    /// Message text
    pub message: String,
    /// Local time as `HH:MM:SS`
    pub timestamp: String,
    /// Module that emitted the event, for tracing output
    pub target: Option<String>,
}

impl ConsoleEntry {
    /// `[HH:MM:SS] <KIND>: message`
    pub fn formatted(&self) -> String {
        format!("[{}] {}: {}", self.timestamp, self.kind.name(), self.message)
    }
}

/// The console panel
pub struct ConsolePanel {
    /// Receiver for tracing events
    tracing_rx: Option<mpsc::Receiver<TracingEvent>>,
    /// Log entries, oldest first
    entries: VecDeque<ConsoleEntry>,
    /// Search filter
    pub search: String,
    /// Auto-scroll to bottom
    pub auto_scroll: bool,
    /// Command input
    pub command_input: String,
    /// Command history
    command_history: Vec<String>,
    /// Position while walking the history
    history_index: Option<usize>,
}

impl ConsolePanel {
    /// Create a console wired to a tracing receiver.
    pub fn new(tracing_rx: Option<mpsc::Receiver<TracingEvent>>) -> Self {
        Self {
            tracing_rx,
            entries: VecDeque::new(),
            search: String::new(),
            auto_scroll: true,
            command_input: String::new(),
            command_history: Vec::new(),
            history_index: None,
        }
    }

    /// Hand the tracing receiver back, e.g. when the editor closes.
    pub fn take_tracing_receiver(&mut self) -> Option<mpsc::Receiver<TracingEvent>> {
        self.poll_tracing_events();
        self.tracing_rx.take()
    }

    /// Entries currently held, oldest first
    pub fn entries(&self) -> &VecDeque<ConsoleEntry> {
        &self.entries
    }

    /// Append an entry, dropping the oldest beyond [`MAX_ENTRIES`].
    pub fn log(&mut self, kind: EntryKind, message: impl Into<String>) {
        self.push(kind, message.into(), None);
    }

    fn push(&mut self, kind: EntryKind, message: String, target: Option<String>) {
        self.entries.push_back(ConsoleEntry {
            kind,
            message,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            target,
        });

        while self.entries.len() > MAX_ENTRIES {
            self.entries.pop_front();
        }
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drain any pending tracing events into the log.
    pub fn poll_tracing_events(&mut self) {
        let Some(rx) = &self.tracing_rx else {
            return;
        };

        let events: Vec<TracingEvent> = rx.try_iter().collect();
        for event in events {
            self.push(event.level.into(), event.message, Some(event.target));
        }
    }

    /// Run the command in the input line.
    ///
    /// Surrounding whitespace is ignored and a blank line does nothing.
    pub fn submit(&mut self) {
        let command = self.command_input.trim().to_string();
        self.command_input.clear();
        self.history_index = None;

        if command.is_empty() {
            return;
        }

        self.command_history.push(command.clone());
        self.execute_command(&command);
    }

    /// Step back through the history into the input line.
    pub fn history_previous(&mut self) {
        let index = match self.history_index {
            Some(index) => index.saturating_sub(1),
            None if self.command_history.is_empty() => return,
            None => self.command_history.len() - 1,
        };
        self.history_index = Some(index);
        self.command_input = self.command_history[index].clone();
    }

    /// Step forward through the history. Past the newest entry the input
    /// line is cleared.
    pub fn history_next(&mut self) {
        let Some(index) = self.history_index else {
            return;
        };

        if index + 1 < self.command_history.len() {
            self.history_index = Some(index + 1);
            self.command_input = self.command_history[index + 1].clone();
        } else {
            self.history_index = None;
            self.command_input.clear();
        }
    }

    fn execute_command(&mut self, command: &str) {
        self.log(EntryKind::Command, command);

        if command == "clear" {
            self.clear();
            self.log(EntryKind::System, "Console cleared.");
        } else if let Some(text) = command.strip_prefix("echo ") {
            self.log(EntryKind::System, text.trim());
        } else if command == "help" {
            self.log(EntryKind::System, "Available commands:");
            self.log(EntryKind::System, "  help         - Show this help");
            self.log(EntryKind::System, "  clear        - Clear the console");
            self.log(EntryKind::System, "  echo <text>  - Print text");
        } else {
            self.log(EntryKind::Error, format!("Unknown command: {command}"));
        }
    }

    /// Render the console panel
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.poll_tracing_events();

        ui.horizontal(|ui| {
            if ui.button("Clear").on_hover_text("Clear all output").clicked() {
                self.clear();
            }

            ui.separator();

            ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("Filter...")
                    .desired_width(150.0),
            );
            if !self.search.is_empty() && ui.button("x").on_hover_text("Clear filter").clicked() {
                self.search.clear();
            }

            ui.separator();
            ui.checkbox(&mut self.auto_scroll, "Auto-scroll");
        });

        ui.separator();

        let filter = self.search.to_lowercase();
        let input_height = ui.spacing().interact_size.y + 8.0;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height((ui.available_height() - input_height).max(0.0))
            .stick_to_bottom(self.auto_scroll)
            .show(ui, |ui| {
                for entry in &self.entries {
                    if !filter.is_empty() && !entry.message.to_lowercase().contains(&filter) {
                        continue;
                    }

                    let text = egui::RichText::new(entry.formatted())
                        .monospace()
                        .size(12.0)
                        .color(entry.kind.color());
                    let response = ui.label(text);
                    if let Some(target) = &entry.target {
                        response.on_hover_text(target);
                    }
                }
            });

        ui.horizontal(|ui| {
            ui.label(">");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.command_input)
                    .hint_text("Enter a command...")
                    .desired_width(ui.available_width())
                    .font(egui::TextStyle::Monospace),
            );

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.submit();
                response.request_focus();
            }

            if response.has_focus() {
                if ui.input(|i| i.key_pressed(egui::Key::ArrowUp)) {
                    self.history_previous();
                }
                if ui.input(|i| i.key_pressed(egui::Key::ArrowDown)) {
                    self.history_next();
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn run(console: &mut ConsolePanel, command: &str) {
        console.command_input = command.to_string();
        console.submit();
    }

    fn lines(console: &ConsolePanel) -> Vec<(EntryKind, String)> {
        console
            .entries()
            .iter()
            .map(|e| (e.kind, e.message.clone()))
            .collect()
    }

    #[test]
    fn test_entry_format() {
        let entry = ConsoleEntry {
            kind: EntryKind::Warn,
            message: "low disk".to_string(),
            timestamp: "09:05:01".to_string(),
            target: None,
        };
        assert_eq!(entry.formatted(), "[09:05:01] WARN: low disk");
    }

    #[test]
    fn test_echo() {
        let mut console = ConsolePanel::new(None);
        run(&mut console, "  echo   hello world  ");

        assert_eq!(
            lines(&console),
            vec![
                (EntryKind::Command, "echo   hello world".to_string()),
                (EntryKind::System, "hello world".to_string()),
            ]
        );
    }

    #[test]
    fn test_clear() {
        let mut console = ConsolePanel::new(None);
        console.log(EntryKind::Info, "one");
        console.log(EntryKind::Info, "two");
        run(&mut console, "clear");

        assert_eq!(
            lines(&console),
            vec![(EntryKind::System, "Console cleared.".to_string())]
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut console = ConsolePanel::new(None);
        run(&mut console, "spawn cube");

        assert_eq!(
            lines(&console).last(),
            Some(&(EntryKind::Error, "Unknown command: spawn cube".to_string()))
        );
    }

    #[test]
    fn test_empty_input_ignored() {
        let mut console = ConsolePanel::new(None);
        run(&mut console, "   ");

        assert!(console.entries().is_empty());
        console.history_previous();
        assert!(console.command_input.is_empty());
    }

    #[test]
    fn test_entries_are_bounded() {
        let mut console = ConsolePanel::new(None);
        for i in 0..MAX_ENTRIES + 5 {
            console.log(EntryKind::Debug, i.to_string());
        }

        assert_eq!(console.entries().len(), MAX_ENTRIES);
        assert_eq!(console.entries()[0].message, "5");
    }

    #[test]
    fn test_history_navigation() {
        let mut console = ConsolePanel::new(None);
        run(&mut console, "echo a");
        run(&mut console, "echo b");

        console.history_previous();
        assert_eq!(console.command_input, "echo b");
        console.history_previous();
        assert_eq!(console.command_input, "echo a");
        console.history_previous();
        assert_eq!(console.command_input, "echo a");

        console.history_next();
        assert_eq!(console.command_input, "echo b");
        console.history_next();
        assert!(console.command_input.is_empty());
    }

    #[test]
    fn test_tracing_bridge() {
        let (layer, rx) = TracingBridge::new();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("Couldn't compile the {} shader!", "vertex");
            tracing::error!(fatal = true, "Rendering disabled");
        });

        let mut console = ConsolePanel::new(Some(rx));
        console.poll_tracing_events();

        assert_eq!(
            lines(&console),
            vec![
                (EntryKind::Warn, "Couldn't compile the vertex shader!".to_string()),
                (EntryKind::Error, "Rendering disabled (fatal = true)".to_string()),
            ]
        );
        assert!(console.entries()[0].target.is_some());
    }

    #[test]
    fn test_tracing_bridge_drops_when_undrained() {
        let (layer, rx) = TracingBridge::with_capacity(3);
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            for i in 0..10 {
                tracing::info!("event {i}");
            }
        });

        let received: Vec<String> = rx.try_iter().map(|event| event.message).collect();
        assert_eq!(received, ["event 0", "event 1", "event 2"]);
    }
}
