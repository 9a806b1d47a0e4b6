use autotyper_core::event::{EventKind, LoopConfig, RemoveConfig, TypeConfig};
use autotyper_core::timeline::TimelineEvent;
use autotyper_core::{Replay, Script, TyperOptions};
use autotyper_runtime::{AutoTyper, Phase};
use autotyper_std::{Endless, Preset};
use autotyper_test::{Frame, Probe, assert_texts, typer_with_probe};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn recording(initial: &str) -> (AutoTyper, std::sync::Arc<Probe>) {
    let probe = Probe::new();
    let typer = AutoTyper::with_options(
        TyperOptions::default().with_initial_text(initial).recording(),
        probe.clone(),
    );
    (typer, probe)
}

#[tokio::test(start_paused = true)]
async fn finite_queue_runs_in_order_then_goes_quiet() {
    let (typer, probe) = recording("");
    let typer = typer
        .type_str("ab")
        .sleep_ms(100)
        .remove(RemoveConfig::chars(1))
        .type_str("c")
        .start();

    assert_eq!(typer.wait().await, Phase::Finished);
    assert_eq!(typer.text(), "ac");
    assert_eq!(typer.live_timers(), 0);
    assert!(!typer.is_running());

    let timeline = typer.timeline().unwrap();
    assert_eq!(
        timeline.executed(),
        vec![EventKind::Type, EventKind::Sleep, EventKind::Remove, EventKind::Type]
    );

    let seen = probe.len();
    probe.until_ms(10_000).await;
    assert_eq!(probe.len(), seen);
}

#[tokio::test(start_paused = true)]
async fn typing_flag_wraps_each_type_event() {
    let (typer, probe) = recording("");
    let typer = typer.type_str("a").sleep_ms(50).type_str("b").start();
    typer.wait().await;

    assert_eq!(probe.typing_flags(), vec![false, true, false, true, false]);

    // the flag drops before the next event starts
    let timeline = typer.timeline().unwrap();
    let mut typing = false;
    for event in &timeline.events {
        match event {
            TimelineEvent::TypingChanged { is_typing, .. } => typing = *is_typing,
            TimelineEvent::EventStarted { kind, .. } => {
                assert!(!typing, "{kind} started while typing");
            }
            _ => {}
        }
    }
}

#[tokio::test(start_paused = true)]
async fn types_one_letter_per_tick() {
    let (typer, probe) = recording("> ");
    let typer = typer
        .type_text(TypeConfig::new("hi").with_delay(Duration::from_millis(100)))
        .start();

    probe.until_ms(50).await;
    assert_eq!(probe.last_text().as_deref(), Some("> "));
    assert!(typer.is_typing());

    probe.until_ms(150).await;
    assert_eq!(probe.last_text().as_deref(), Some("> h"));

    probe.until_ms(250).await;
    assert_eq!(probe.last_text().as_deref(), Some("> hi"));
    assert!(!typer.is_typing());
    assert_eq!(typer.phase(), Phase::Finished);

    let timeline = typer.timeline().unwrap();
    assert!(timeline.events.contains(&TimelineEvent::EventFinished {
        index: 0,
        kind: EventKind::Type,
        at_ms: 200,
    }));
    assert!(probe.after_ms(200).is_empty());
}

#[tokio::test(start_paused = true)]
async fn remove_without_count_clears_everything() {
    let (typer, probe) = typer_with_probe("hello");
    let typer = typer.remove_all().start();
    typer.wait().await;

    assert_eq!(typer.text(), "");
    assert_texts!(probe, ["hello", "hell", "hel", "he", "h", ""]);
}

#[tokio::test(start_paused = true)]
async fn remove_with_count_drops_exactly_that_many() {
    let (typer, probe) = typer_with_probe("hello");
    let typer = typer.remove(RemoveConfig::chars(2)).start();
    typer.wait().await;

    assert_eq!(typer.text(), "hel");
    assert_texts!(probe, ["hello", "hell", "hel"]);
}

#[tokio::test(start_paused = true)]
async fn remove_more_than_available_stops_at_empty() {
    let (typer, _probe) = typer_with_probe("ab");
    let typer = typer.remove(RemoveConfig::chars(10)).start();
    typer.wait().await;
    assert_eq!(typer.text(), "");
}

#[tokio::test(start_paused = true)]
async fn sleep_is_silent() {
    let (typer, probe) = recording("x");
    let typer = typer.sleep_ms(500).type_str("y").start();

    probe.until_ms(499).await;
    assert!(probe.after_ms(0).is_empty());
    assert_eq!(typer.live_timers(), 1);

    probe.until_ms(650).await;
    assert_eq!(probe.last_text().as_deref(), Some("xy"));

    let timeline = typer.timeline().unwrap();
    let finished_sleeps: Vec<u64> = timeline
        .events
        .iter()
        .filter_map(|e| match e {
            TimelineEvent::EventFinished {
                kind: EventKind::Sleep,
                at_ms,
                ..
            } => Some(*at_ms),
            _ => None,
        })
        .collect();
    assert_eq!(finished_sleeps, vec![500]);
}

#[tokio::test(start_paused = true)]
async fn loop_count_two_runs_the_queue_twice() {
    let (typer, probe) = recording("");
    let typer = typer
        .type_str("a")
        .repeat(LoopConfig::times(2))
        .start();

    assert_eq!(typer.wait().await, Phase::Finished);
    assert_eq!(typer.text(), "aa");
    assert_texts!(probe, ["", "a", "aa"]);

    let types = typer
        .timeline()
        .unwrap()
        .executed()
        .into_iter()
        .filter(|k| *k == EventKind::Type)
        .count();
    assert_eq!(types, 2);
}

#[tokio::test(start_paused = true)]
async fn infinite_loop_runs_until_stopped() {
    let (typer, probe) = typer_with_probe("");
    let typer = typer
        .type_str("ab")
        .remove_all()
        .repeat_forever()
        .start();

    // one round is 400ms
    probe.until_ms(1_150).await;
    assert!(typer.is_running());
    assert_eq!(typer.text(), "a");

    typer.stop();
    assert_eq!(typer.phase(), Phase::Stopped);
}

#[tokio::test(start_paused = true)]
async fn stop_mid_type_silences_the_typer() {
    let (typer, probe) = typer_with_probe("");
    let typer = typer.type_str("hello").start();

    probe.until_ms(250).await;
    typer.stop();
    let seen = probe.len();

    probe.until_ms(2_000).await;
    assert_eq!(probe.len(), seen);
    assert_eq!(typer.text(), "he");
    assert_eq!(typer.live_timers(), 0);
    assert!(!typer.is_typing());
    // no rollback, and no closing typing notification
    assert_eq!(probe.typing_flags(), vec![false, true]);
}

#[tokio::test(start_paused = true)]
async fn loop_over_untimed_events_goes_quiet() {
    let (typer, probe) = typer_with_probe("");
    let typer = typer
        .type_text(TypeConfig::new(""))
        .repeat_forever()
        .start();

    assert_eq!(typer.wait().await, Phase::Finished);
    assert_eq!(probe.len(), 2);
    assert_eq!(probe.typing_flags(), vec![false]);
    assert_eq!(typer.text(), "");
}

#[tokio::test(start_paused = true)]
async fn remove_loop_stops_once_the_text_is_gone() {
    let (typer, probe) = typer_with_probe("ab");
    let typer = typer.remove_all().repeat_forever().start();

    assert_eq!(typer.wait().await, Phase::Finished);
    assert_texts!(probe, ["ab", "a", ""]);
    assert_eq!(typer.live_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_typer() {
    let (typer, probe) = typer_with_probe("");
    let typer = typer.type_str("abc").repeat_forever().start();

    probe.until_ms(150).await;
    drop(typer);
    let seen = probe.len();

    probe.until_ms(3_000).await;
    assert_eq!(probe.len(), seen);
}

#[tokio::test(start_paused = true)]
async fn double_start_keeps_a_single_timer() {
    let (typer, probe) = typer_with_probe("");
    let typer = typer.type_str("abc").start().start();
    typer.try_start().unwrap();

    for ms in [50, 150, 250, 350] {
        probe.until_ms(ms).await;
        assert!(typer.live_timers() <= 1);
    }

    assert_eq!(typer.wait().await, Phase::Finished);
    assert_texts!(probe, ["", "a", "ab", "abc"]);
}

#[tokio::test(start_paused = true)]
async fn grapheme_clusters_are_typed_whole() {
    let (typer, probe) = typer_with_probe("");
    let typer = typer
        .type_text(TypeConfig::new("e\u{301}👍🏽").with_delay(Duration::from_millis(10)))
        .start();
    typer.wait().await;
    assert_texts!(probe, ["", "e\u{301}", "e\u{301}👍🏽"]);
}

#[tokio::test(start_paused = true)]
async fn zero_delay_is_clamped_to_a_millisecond() {
    let (typer, probe) = typer_with_probe("");
    let typer = typer
        .type_text(TypeConfig::new("abc").with_delay(Duration::ZERO))
        .start();
    typer.wait().await;

    let times: Vec<Duration> = probe
        .records()
        .into_iter()
        .filter(|r| matches!(r.frame, Frame::Text(_)))
        .map(|r| r.at)
        .collect();
    assert_eq!(
        times,
        vec![
            Duration::ZERO,
            Duration::from_millis(1),
            Duration::from_millis(2),
            Duration::from_millis(3),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn script_drives_a_typer_and_replays() {
    let script = Script::from_toml_str(
        r#"
        [typer]
        initial_text = "$ "
        record_timeline = true

        [[steps]]
        kind = "type"
        text = "ls"
        delay_ms = 20

        [[steps]]
        kind = "sleep"
        ms = 100

        [[steps]]
        kind = "remove"
        count = 1
        delay_ms = 20
        "#,
    )
    .unwrap();

    let probe = Probe::new();
    let typer = AutoTyper::from_script(&script, probe.clone()).unwrap().start();
    typer.wait().await;
    assert_eq!(typer.text(), "$ l");

    let mut replay = Replay::new(typer.timeline().unwrap());
    let frame = replay.seek(50).unwrap();
    assert_eq!(frame.text, "$ ls");
    assert!(!frame.is_typing);

    replay.seek(u64::MAX);
    assert_eq!(replay.text(), probe.last_text().unwrap());
}

#[tokio::test(start_paused = true)]
async fn endless_preset_keeps_the_prompt() {
    let (typer, probe) = typer_with_probe("$ ");
    let typer = Endless::new(["ok"]).apply(typer).start();

    probe.until_ms(1_025).await;
    assert_texts!(probe, ["$ ", "$ o", "$ ok", "$ o", "$ "]);
    assert!(typer.is_running());
}
