use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::suggestions::{Suggestion, SuggestionCatalog, answer_for};
use crate::text_layout::wrap_words;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);
const CODE_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopilotTiming {
    pub analysis_delay: Duration,
    pub answer_delay: Duration,
}

impl Default for CopilotTiming {
    fn default() -> Self {
        Self {
            analysis_delay: Duration::from_millis(1000),
            answer_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionRequest {
    Analyze { file: String },
    Ask { query: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionEvent {
    Analyzed {
        request_id: u64,
        file: String,
        suggestions: Vec<Suggestion>,
    },
    Answered {
        request_id: u64,
        answer: Suggestion,
    },
}

impl SuggestionEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            Self::Analyzed { request_id, .. } | Self::Answered { request_id, .. } => *request_id,
        }
    }
}

#[derive(Debug)]
struct PendingRequest {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

/// Runs suggestion requests off the UI thread. Each request sleeps its delay on a
/// worker thread and posts one event unless cancelled first.
#[derive(Debug)]
pub struct SuggestionEngine {
    catalog: Arc<SuggestionCatalog>,
    timing: CopilotTiming,
    event_tx: Sender<SuggestionEvent>,
    event_rx: Receiver<SuggestionEvent>,
    next_request_id: u64,
    pending: Vec<PendingRequest>,
}

impl SuggestionEngine {
    pub fn new(catalog: Arc<SuggestionCatalog>, timing: CopilotTiming) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            catalog,
            timing,
            event_tx,
            event_rx,
            next_request_id: 1,
            pending: Vec::new(),
        }
    }

    pub fn start(&mut self, request: SuggestionRequest) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.saturating_add(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        self.pending.push(PendingRequest {
            id: request_id,
            cancelled: cancelled.clone(),
        });

        let delay = match request {
            SuggestionRequest::Analyze { .. } => self.timing.analysis_delay,
            SuggestionRequest::Ask { .. } => self.timing.answer_delay,
        };
        debug!(request_id, ?request, ?delay, "suggestion request started");

        let catalog = self.catalog.clone();
        let tx = self.event_tx.clone();
        thread::spawn(move || {
            if !wait_unless_cancelled(delay, &cancelled) {
                return;
            }
            let event = match request {
                SuggestionRequest::Analyze { file } => SuggestionEvent::Analyzed {
                    request_id,
                    suggestions: catalog.for_file(&file),
                    file,
                },
                SuggestionRequest::Ask { query } => SuggestionEvent::Answered {
                    request_id,
                    answer: answer_for(&query, request_id),
                },
            };
            let _ = tx.send(event);
        });
        request_id
    }

    pub fn cancel(&mut self, request_id: u64) {
        self.pending.retain(|pending| {
            if pending.id == request_id {
                pending.cancelled.store(true, Ordering::SeqCst);
                debug!(request_id, "suggestion request cancelled");
                false
            } else {
                true
            }
        });
    }

    pub fn cancel_all(&mut self) {
        for pending in self.pending.drain(..) {
            pending.cancelled.store(true, Ordering::SeqCst);
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn drain_events_limited(&mut self, max_events: usize) -> Vec<SuggestionEvent> {
        let mut events = Vec::new();
        while events.len() < max_events {
            let Ok(event) = self.event_rx.try_recv() else {
                break;
            };
            let request_id = event.request_id();
            let was_pending = self.pending.iter().any(|pending| pending.id == request_id);
            self.pending.retain(|pending| pending.id != request_id);
            if was_pending {
                events.push(event);
            }
        }
        events
    }
}

fn wait_unless_cancelled(delay: Duration, cancelled: &AtomicBool) -> bool {
    let deadline = Instant::now() + delay;
    loop {
        if cancelled.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(CANCEL_POLL_INTERVAL.min(deadline - now));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRowKind {
    Header { selected: bool, expanded: bool },
    Details,
    Code,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub kind: PanelRowKind,
    pub text: String,
    /// Index of the suggestion this row belongs to.
    pub owner: Option<usize>,
}

/// Suggestion list state for the active file plus the free-text question box.
#[derive(Debug)]
pub struct CopilotPanel {
    engine: SuggestionEngine,
    status: PanelStatus,
    file: String,
    suggestions: Vec<Suggestion>,
    expanded: Option<String>,
    selected: usize,
    input: String,
    analysis_request: Option<u64>,
    answer_request: Option<u64>,
}

impl CopilotPanel {
    pub fn new(engine: SuggestionEngine) -> Self {
        Self {
            engine,
            status: PanelStatus::Ready,
            file: String::new(),
            suggestions: Vec::new(),
            expanded: None,
            selected: 0,
            input: String::new(),
            analysis_request: None,
            answer_request: None,
        }
    }

    /// Drops the current list and asks for the set belonging to `file`. Pending
    /// requests for the previous file are cancelled.
    pub fn request_for_file(&mut self, file: &str) {
        self.cancel_pending();
        self.file = file.to_string();
        self.suggestions.clear();
        self.expanded = None;
        self.selected = 0;
        self.status = PanelStatus::Loading;
        let request_id = self.engine.start(SuggestionRequest::Analyze {
            file: file.to_string(),
        });
        self.analysis_request = Some(request_id);
        info!(file = %file, request_id, "copilot analysis requested");
    }

    /// Sends the typed question and empties the box. Returns `false` for blank input.
    pub fn submit_input(&mut self) -> bool {
        let query = self.input.trim().to_string();
        if query.is_empty() {
            return false;
        }
        if let Some(previous) = self.answer_request.take() {
            self.engine.cancel(previous);
        }
        self.input.clear();
        self.status = PanelStatus::Loading;
        let request_id = self.engine.start(SuggestionRequest::Ask { query });
        self.answer_request = Some(request_id);
        info!(request_id, "copilot question submitted");
        true
    }

    /// Applies finished requests. Returns how many changed the panel.
    pub fn poll(&mut self, max_events: usize) -> usize {
        let mut applied = 0;
        for event in self.engine.drain_events_limited(max_events) {
            match event {
                SuggestionEvent::Analyzed {
                    request_id,
                    file,
                    suggestions,
                } if self.analysis_request == Some(request_id) => {
                    debug!(file = %file, count = suggestions.len(), "copilot analysis ready");
                    self.analysis_request = None;
                    // answers that beat the analysis stay on top
                    self.suggestions.retain(Suggestion::is_answer);
                    self.suggestions.extend(suggestions);
                    applied += 1;
                }
                SuggestionEvent::Answered { request_id, answer }
                    if self.answer_request == Some(request_id) =>
                {
                    self.answer_request = None;
                    self.expanded = Some(answer.id.clone());
                    self.suggestions.insert(0, answer);
                    self.selected = 0;
                    applied += 1;
                }
                _ => {}
            }
        }
        if self.analysis_request.is_none() && self.answer_request.is_none() {
            self.status = PanelStatus::Ready;
        }
        applied
    }

    pub fn teardown(&mut self) {
        self.cancel_pending();
        self.status = PanelStatus::Ready;
    }

    fn cancel_pending(&mut self) {
        if let Some(request_id) = self.analysis_request.take() {
            self.engine.cancel(request_id);
        }
        if let Some(request_id) = self.answer_request.take() {
            self.engine.cancel(request_id);
        }
    }

    pub fn status(&self) -> PanelStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == PanelStatus::Loading
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn expanded_id(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn backspace_input(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn select_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = (self.selected + 1).min(self.suggestions.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// At most one suggestion is expanded; toggling another collapses the first.
    pub fn toggle(&mut self, index: usize) {
        let Some(suggestion) = self.suggestions.get(index) else {
            return;
        };
        self.selected = index;
        if self.expanded.as_deref() == Some(suggestion.id.as_str()) {
            self.expanded = None;
        } else {
            self.expanded = Some(suggestion.id.clone());
        }
    }

    pub fn toggle_selected(&mut self) {
        self.toggle(self.selected);
    }

    /// Display rows for a list area `width` columns wide.
    pub fn rows(&self, width: u16) -> Vec<PanelRow> {
        let width = usize::from(width.max(1));
        let mut rows = Vec::new();
        for (index, suggestion) in self.suggestions.iter().enumerate() {
            let expanded = self.expanded.as_deref() == Some(suggestion.id.as_str());
            let marker = if expanded { "v" } else { ">" };
            let header = format!("{marker} [{}] {}", suggestion.kind.label(), suggestion.text);
            for text in wrap_words(&header, width) {
                rows.push(PanelRow {
                    kind: PanelRowKind::Header {
                        selected: index == self.selected,
                        expanded,
                    },
                    text,
                    owner: Some(index),
                });
            }
            if expanded {
                if let Some(details) = suggestion.details.as_deref() {
                    for text in wrap_words(details, width.saturating_sub(2).max(1)) {
                        rows.push(PanelRow {
                            kind: PanelRowKind::Details,
                            text: format!("  {text}"),
                            owner: Some(index),
                        });
                    }
                }
                if let Some(code) = suggestion.code.as_deref() {
                    for line in code.lines() {
                        rows.push(PanelRow {
                            kind: PanelRowKind::Code,
                            text: format!("{CODE_INDENT}{line}"),
                            owner: Some(index),
                        });
                    }
                }
            }
            rows.push(PanelRow {
                kind: PanelRowKind::Spacer,
                text: String::new(),
                owner: None,
            });
        }
        rows
    }
}

impl Drop for CopilotPanel {
    fn drop(&mut self) {
        self.engine.cancel_all();
    }
}

#[cfg(test)]
#[path = "../tests/unit/copilot_tests.rs"]
mod tests;
