//! Executor - Sequential queue driver
//!
//! Runs the queued events strictly one after another. Loops are a jump of
//! the program counter over the immutable queue, so replayed events are
//! re-read rather than re-inserted.

use crate::shared::Shared;
use crate::timer::ticker;
use autotyper_core::event::{
    Event, LoopConfig, RemoveConfig, SleepConfig, TypeConfig, segment_start,
};
use autotyper_core::outcome::Outcome;
use autotyper_core::text;
use autotyper_core::timeline::TimelineEvent;
use std::collections::HashMap;
use std::sync::Arc;

/// Drive `events` to completion or cancellation.
pub(crate) async fn drive(shared: Arc<Shared>, events: Arc<[Event]>) {
    // remaining replays per loop index; absent = not entered yet
    let mut loops: HashMap<usize, u32> = HashMap::new();
    // timer arms seen at the last backward jump
    let mut arms_at_jump = shared.timer.arms();
    let mut index = 0;

    tracing::debug!(events = events.len(), "typer started");

    while let Some(event) = events.get(index) {
        let kind = event.kind();
        tracing::debug!(index, event = %event.label(), "running event");
        if !shared.record_step(|at_ms| TimelineEvent::EventStarted { index, kind, at_ms }) {
            return;
        }

        let outcome = match event {
            Event::Type(config) => run_type(&shared, config).await,
            Event::Remove(config) => run_remove(&shared, config).await,
            Event::Sleep(config) => run_sleep(&shared, config).await,
            Event::Loop(_) if shared.timer.arms() == arms_at_jump => {
                tracing::warn!(index, "loop replays no timed work, skipping");
                Outcome::Next
            }
            Event::Loop(config) => run_loop(&events, index, config, &mut loops),
        };

        if outcome == Outcome::Cancelled {
            tracing::debug!(index, "typer stopped mid-event");
            return;
        }
        if !shared.record_step(|at_ms| TimelineEvent::EventFinished { index, kind, at_ms }) {
            return;
        }

        match outcome.next_index(index) {
            Some(next) => {
                if next <= index {
                    arms_at_jump = shared.timer.arms();
                }
                index = next;
            }
            None => return,
        }
    }

    tracing::debug!("queue drained");
    shared.finish();
}

async fn run_type(shared: &Shared, config: &TypeConfig) -> Outcome {
    if config.to_type.is_empty() {
        return Outcome::Next;
    }
    let timer = shared.timer.arm();
    if !shared.set_typing(true) {
        return Outcome::Cancelled;
    }

    let mut interval = ticker(config.delay());
    for grapheme in text::graphemes(&config.to_type) {
        interval.tick().await;
        if !shared.push_grapheme(grapheme) {
            return Outcome::Cancelled;
        }
    }

    drop(timer);
    if !shared.set_typing(false) {
        return Outcome::Cancelled;
    }
    Outcome::Next
}

async fn run_remove(shared: &Shared, config: &RemoveConfig) -> Outcome {
    let available = shared.grapheme_count();
    let pending = match config.char_count {
        Some(count) if !config.removes_all() => count.min(available),
        _ => available,
    };
    if pending == 0 {
        return Outcome::Next;
    }

    let _timer = shared.timer.arm();
    let mut interval = ticker(config.delay());
    for _ in 0..pending {
        interval.tick().await;
        if !shared.pop_grapheme() {
            return Outcome::Cancelled;
        }
    }
    Outcome::Next
}

async fn run_sleep(shared: &Shared, config: &SleepConfig) -> Outcome {
    let _timer = shared.timer.arm();
    tokio::time::sleep(config.delay()).await;
    if shared.is_cancelled() {
        return Outcome::Cancelled;
    }
    Outcome::Next
}

fn run_loop(
    events: &[Event],
    index: usize,
    config: &LoopConfig,
    loops: &mut HashMap<usize, u32>,
) -> Outcome {
    let start = segment_start(events, index);
    if start == index {
        tracing::warn!(index, "loop has nothing to replay");
        return Outcome::Next;
    }

    let Some(replays) = config.replays() else {
        return Outcome::Jump(start);
    };
    let left = loops.entry(index).or_insert(replays);
    if *left > 0 {
        *left -= 1;
        Outcome::Jump(start)
    } else {
        // exhausted: reset so an outer loop replays this one in full
        loops.remove(&index);
        Outcome::Next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotyper_core::event::LoopScope;

    /// Walk the program counter without timers and collect visited indices.
    fn trace(events: &[Event], limit: usize) -> Vec<usize> {
        let mut loops = HashMap::new();
        let mut visited = Vec::new();
        let mut index = 0;
        while index < events.len() && visited.len() < limit {
            visited.push(index);
            let outcome = match &events[index] {
                Event::Loop(config) => run_loop(events, index, config, &mut loops),
                _ => Outcome::Next,
            };
            index = outcome.next_index(index).unwrap_or(events.len());
        }
        visited
    }

    #[test]
    fn test_loop_count_two_runs_twice() {
        let events: Vec<Event> = vec![
            TypeConfig::new("a").into(),
            LoopConfig::times(2).into(),
        ];
        assert_eq!(trace(&events, 100), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_nested_loops_reset() {
        let events: Vec<Event> = vec![
            TypeConfig::new("a").into(),
            LoopConfig::times(2).into(),
            TypeConfig::new("b").into(),
            LoopConfig::times(2).into(),
        ];
        let runs_of_a = trace(&events, 100).iter().filter(|i| **i == 0).count();
        let runs_of_b = trace(&events, 100).iter().filter(|i| **i == 2).count();
        assert_eq!(runs_of_a, 4);
        assert_eq!(runs_of_b, 2);
    }

    #[test]
    fn test_since_previous_loop_scope() {
        let events: Vec<Event> = vec![
            TypeConfig::new("a").into(),
            LoopConfig::times(1).into(),
            TypeConfig::new("b").into(),
            LoopConfig::times(3)
                .with_scope(LoopScope::SincePreviousLoop)
                .into(),
        ];
        assert_eq!(trace(&events, 100), vec![0, 1, 2, 3, 2, 3, 2, 3]);
    }

    #[test]
    fn test_infinite_loop_keeps_jumping() {
        let events: Vec<Event> = vec![
            SleepConfig::default().into(),
            LoopConfig::forever().into(),
        ];
        assert_eq!(trace(&events, 6), vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_leading_loop_is_skipped() {
        let events: Vec<Event> = vec![
            LoopConfig::forever().into(),
            RemoveConfig::all().into(),
        ];
        assert_eq!(trace(&events, 100), vec![0, 1]);
    }
}
