use crate::timeline::{Timeline, TimelineEvent};

/// Replay reconstructs what a listener saw from a recorded Timeline.
/// It keeps a cursor that moves through the recorded events.
pub struct Replay {
    timeline: Timeline,
    cursor: usize,
    text: String,
    is_typing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFrame {
    pub at_ms: u64,
    pub text: String,
    pub is_typing: bool,
    pub event: TimelineEvent,
}

impl Replay {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            cursor: 0,
            text: String::new(),
            is_typing: false,
        }
    }

    /// Advance the replay by one recorded event.
    /// Returns the state after that event, or None if finished.
    pub fn next_frame(&mut self) -> Option<ReplayFrame> {
        let event = self.timeline.events.get(self.cursor)?.clone();
        self.cursor += 1;

        match &event {
            TimelineEvent::TextChanged { text, .. } => self.text.clone_from(text),
            TimelineEvent::TypingChanged { is_typing, .. } => self.is_typing = *is_typing,
            _ => {}
        }

        Some(ReplayFrame {
            at_ms: event.at_ms(),
            text: self.text.clone(),
            is_typing: self.is_typing,
            event,
        })
    }

    /// Apply every event recorded at or before `ms` and return the last frame.
    pub fn seek(&mut self, ms: u64) -> Option<ReplayFrame> {
        let mut last = None;
        while self
            .timeline
            .events
            .get(self.cursor)
            .is_some_and(|e| e.at_ms() <= ms)
        {
            last = self.next_frame();
        }
        last
    }

    /// Current reconstructed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Reset replay to start
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.text.clear();
        self.is_typing = false;
    }
}
