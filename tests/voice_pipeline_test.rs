//! Integration tests for the recognition session controller

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use iris::messaging::police_search_link;
use iris::voice::{CaptureEvent, ListenMode, SessionState};
use iris::{Location, SosCategory};

use common::{DELHI, builder};

const SOS_CONFIRMATION: &str = "Emergency detected. SOS sent to your trusted contacts.";

#[tokio::test(start_paused = true)]
async fn test_sos_end_to_end() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;
    assert_eq!(h.controller.state(), SessionState::Listening);
    assert!(h.fakes.capture.is_running());

    h.say("IRIS, HELP ME!!").await;

    let calls = h.fakes.broadcaster.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].location, Some(DELHI));
    assert_eq!(calls[0].category, SosCategory::Family);
    assert_eq!(
        calls[0].contacts,
        vec!["Emergency Support 1", "Emergency Support 2"]
    );

    assert_eq!(h.fakes.police.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.fakes.links.opened(), vec![police_search_link(DELHI)]);
    assert_eq!(h.fakes.haptics.patterns(), vec![vec![500, 200, 500]]);
    assert_eq!(h.fakes.synth.spoken(), vec![SOS_CONFIRMATION]);
    let logs = h.fakes.history.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].audio_recording_id.as_deref(), Some("rec-1"));
    assert_eq!(h.fakes.recorder.durations(), vec![Duration::from_secs(15)]);

    assert!(h.fakes.emergency.is_active());
    assert!(h.fakes.emergency.is_sent());
    assert_eq!(h.fakes.emergency.links().len(), 2);

    assert_eq!(h.controller.state(), SessionState::Suppressed);
    assert!(!h.fakes.capture.is_running());
    assert!(!h.controller.restart_pending());
}

#[tokio::test(start_paused = true)]
async fn test_utterance_without_wake_word_has_no_side_effects() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;

    h.say("help me please").await;
    h.say("irish coffee").await;

    assert!(h.fakes.no_side_effects());
    assert_eq!(h.controller.state(), SessionState::Listening);
    assert!(h.controller.restart_pending());

    // Capture comes back after the settle delay
    assert!(h.step().await);
    assert!(h.fakes.capture.is_running());
    assert_eq!(h.fakes.capture.starts(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_short_interim_results_are_skipped() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;

    h.say_interim("iri").await;
    h.say_interim("  iris ").await;
    assert!(h.fakes.no_side_effects());
    assert!(h.fakes.capture.is_running());
    assert_eq!(h.fakes.capture.stops(), 0);

    // Long enough interim results are acted on without waiting for the final
    h.say_interim("iris where am i").await;
    assert_eq!(h.fakes.links.opened().len(), 1);
    assert!(!h.fakes.capture.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_area_then_restart_after_settle_delay() {
    let mut h = builder().hour(22).build();
    h.enable(ListenMode::Continuous).await;

    h.say("Iris, check area").await;

    let spoken = h.fakes.synth.spoken();
    assert_eq!(spoken.len(), 1);
    assert!(spoken[0].ends_with("Night time detected. Stay alert."));
    assert_eq!(h.controller.state(), SessionState::Listening);
    assert!(!h.fakes.capture.is_running());

    let before = tokio::time::Instant::now();
    assert!(h.step().await);
    assert!(before.elapsed() >= Duration::from_millis(h.settings.settle_delay_ms));
    assert!(h.fakes.capture.is_running());
    assert!(!h.controller.restart_pending());
}

#[tokio::test(start_paused = true)]
async fn test_benign_errors_restart_and_fatal_errors_suspend() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;

    h.error("no-speech").await;
    assert_eq!(h.controller.state(), SessionState::Listening);
    assert!(h.controller.restart_pending());
    assert!(h.step().await);
    assert_eq!(h.fakes.capture.starts(), 2);

    h.error("aborted").await;
    assert!(h.step().await);
    assert_eq!(h.fakes.capture.starts(), 3);

    h.error("not-allowed").await;
    assert_eq!(h.controller.state(), SessionState::Suspended);
    assert!(!h.fakes.capture.is_running());
    assert!(!h.controller.restart_pending());
    assert!(h.fakes.no_side_effects());
}

#[tokio::test(start_paused = true)]
async fn test_recognizer_end_restarts_in_continuous_mode() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;

    // Device stops on its own (e.g. silence timeout)
    h.fakes.capture.running.store(false, Ordering::SeqCst);
    h.ended().await;

    assert!(h.controller.restart_pending());
    assert!(h.step().await);
    assert_eq!(h.fakes.capture.starts(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_emergency_suppresses_listening_until_dismissed() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;
    h.say("iris emergency").await;
    assert_eq!(h.controller.state(), SessionState::Suppressed);

    // Nothing is interpreted while suppressed
    h.say("iris where am i").await;
    h.enable(ListenMode::Continuous).await;
    assert!(h.fakes.links.opened().iter().all(|l| !l.contains("maps?q=")));
    assert_eq!(h.fakes.capture.starts(), 1);
    assert_eq!(h.fakes.broadcaster.calls().len(), 1);

    h.dismiss().await;
    assert!(!h.fakes.emergency.is_active());
    assert_eq!(h.controller.state(), SessionState::Idle);

    h.enable(ListenMode::Continuous).await;
    assert_eq!(h.controller.state(), SessionState::Listening);
    assert_eq!(h.fakes.capture.starts(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_enable_during_active_emergency_starts_suppressed() {
    let mut h = builder().build();
    h.fakes.emergency.raise();

    h.enable(ListenMode::Continuous).await;

    assert_eq!(h.controller.state(), SessionState::Suppressed);
    assert_eq!(h.fakes.capture.starts(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stop_command_ends_session() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;

    h.say("iris stop").await;

    assert_eq!(
        h.fakes.synth.spoken(),
        vec!["Command received. SOS protocol dismissed. I am standing by."]
    );
    assert_eq!(h.fakes.haptics.patterns(), vec![vec![200]]);
    assert_eq!(h.controller.state(), SessionState::Idle);
    assert!(!h.controller.restart_pending());
    assert!(h.controller.session().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_disable_cancels_pending_restart() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;
    h.say("iris where am i").await;
    assert!(h.controller.restart_pending());

    h.handle.disable();
    assert!(h.step().await);
    assert_eq!(h.controller.state(), SessionState::Idle);
    assert!(!h.controller.restart_pending());

    // The timer still fires but is stale
    assert!(h.step().await);
    assert_eq!(h.fakes.capture.starts(), 1);
    assert!(!h.fakes.capture.is_running());
    assert_eq!(h.controller.state(), SessionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_disable_during_dispatch_prevents_restart() {
    let mut h = builder()
        .broadcast_delay(Duration::from_secs(2))
        .build();
    h.enable(ListenMode::Continuous).await;

    let handle = h.handle.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        handle.disable();
    });

    h.say("iris sos").await;

    assert_eq!(h.controller.state(), SessionState::Idle);
    assert!(!h.controller.restart_pending());
    assert!(!h.fakes.capture.is_running());
    assert_eq!(h.fakes.capture.starts(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_transcripts_queued_during_processing_are_dropped() {
    let mut h = builder()
        .broadcast_delay(Duration::from_secs(1))
        .build();
    h.enable(ListenMode::Continuous).await;

    let sink = h.handle.capture_sink();
    for _ in 0..2 {
        sink.emit(CaptureEvent::Result {
            transcript: "iris help".to_string(),
            is_final: true,
        });
    }

    assert!(h.step().await);
    assert!(h.step().await);

    assert_eq!(h.fakes.broadcaster.calls().len(), 1);
    assert_eq!(h.fakes.broadcaster.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_results_after_stop_are_ignored_until_restart() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;

    h.say("iris where am i").await;
    h.say("iris where am i").await;
    assert_eq!(h.fakes.links.opened().len(), 1);

    assert!(h.step().await);
    h.say("iris where am i").await;
    assert_eq!(h.fakes.links.opened().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_single_shot_goes_idle_after_one_command() {
    let mut h = builder().build();
    h.enable(ListenMode::SingleShot).await;

    h.say("iris my location").await;

    assert_eq!(
        h.fakes.links.opened(),
        vec!["https://www.google.com/maps?q=28.6139,77.209".to_string()]
    );
    assert_eq!(h.controller.state(), SessionState::Idle);
    assert!(!h.controller.restart_pending());

    h.enable(ListenMode::SingleShot).await;
    h.error("no-speech").await;
    assert_eq!(h.controller.state(), SessionState::Idle);
    assert!(!h.controller.restart_pending());
}

#[tokio::test(start_paused = true)]
async fn test_enable_twice_keeps_one_session() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;
    h.enable(ListenMode::Continuous).await;

    assert_eq!(h.fakes.capture.starts(), 1);
    assert_eq!(
        h.controller.session().map(|s| s.mode),
        Some(ListenMode::Continuous)
    );
}

#[tokio::test(start_paused = true)]
async fn test_capture_start_failure_suspends() {
    let mut h = builder().build();
    h.fakes.capture.fail_start.store(true, Ordering::SeqCst);

    h.enable(ListenMode::Continuous).await;

    assert_eq!(h.controller.state(), SessionState::Suspended);

    // Manual restart once the device is back
    h.fakes.capture.fail_start.store(false, Ordering::SeqCst);
    h.enable(ListenMode::Continuous).await;
    assert_eq!(h.controller.state(), SessionState::Listening);
}

#[tokio::test(start_paused = true)]
async fn test_silent_mode_still_dispatches() {
    let mut h = builder().silent().build();
    h.enable(ListenMode::Continuous).await;

    h.say("iris help").await;

    assert!(h.fakes.synth.spoken().is_empty());
    assert_eq!(h.fakes.broadcaster.calls().len(), 1);
    assert!(h.fakes.emergency.is_sent());
    assert_eq!(
        h.fakes.history.logs()[0].audio_recording_id.as_deref(),
        Some("rec-1")
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_broadcast_keeps_overlay_unconfirmed() {
    let mut h = builder().broadcast_fails().build();
    h.enable(ListenMode::Continuous).await;

    h.say("iris emergency").await;

    assert!(h.fakes.emergency.is_active());
    assert!(!h.fakes.emergency.is_sent());
    assert!(h.fakes.history.logs().is_empty());
    assert!(!h.fakes.synth.spoken().contains(&SOS_CONFIRMATION.to_string()));
    assert_eq!(h.controller.state(), SessionState::Suppressed);
}

#[tokio::test(start_paused = true)]
async fn test_unrecognized_command_offers_help() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;

    h.say("iris").await;
    assert!(h.fakes.synth.spoken().is_empty());

    assert!(h.step().await);
    h.say("Iris, play some music").await;
    assert_eq!(
        h.fakes.synth.spoken(),
        vec!["I did not understand. Say: Iris Emergency, Iris Check Area, or Iris Where Am I."]
    );
    assert_eq!(h.controller.state(), SessionState::Listening);
}

#[tokio::test(start_paused = true)]
async fn test_spawned_controller_runs_until_shutdown() {
    let h = builder().build();
    let handle = h.handle.clone();
    let capture = h.fakes.capture.clone();
    let task = tokio::spawn(h.controller.run());

    let mut state = handle.subscribe();
    handle.enable(ListenMode::Continuous);
    state
        .wait_for(|s| *s == SessionState::Listening)
        .await
        .unwrap();
    assert!(capture.is_running());

    handle.shutdown();
    task.await.unwrap();
    assert!(!capture.is_running());
    assert_eq!(handle.state(), SessionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_sos_without_fix_uses_fallback_in_history() {
    let mut h = builder().no_location().build();
    h.enable(ListenMode::Continuous).await;

    h.say("iris sos").await;

    assert_eq!(h.fakes.broadcaster.calls()[0].location, None);
    // Police lookup fails without a fix; the SOS still goes out
    assert!(h.fakes.links.opened().is_empty());
    assert!(h.fakes.emergency.is_sent());
    assert_eq!(h.fakes.history.logs()[0].location, Location::FALLBACK);
}

#[tokio::test(start_paused = true)]
async fn test_custom_wake_word_drives_commands() {
    let mut h = builder().wake_word("Nova").build();
    h.enable(ListenMode::Continuous).await;

    h.say("iris help").await;
    assert!(h.fakes.no_side_effects());
    assert!(h.step().await);

    h.say("Nova, play some music").await;
    assert_eq!(
        h.fakes.synth.spoken(),
        vec!["I did not understand. Say: Nova Emergency, Nova Check Area, or Nova Where Am I."]
    );
    assert!(h.step().await);

    h.say("Nova, help me!").await;
    assert_eq!(h.fakes.broadcaster.calls().len(), 1);
    assert!(h.fakes.emergency.is_sent());
    assert_eq!(h.controller.state(), SessionState::Suppressed);
}

#[tokio::test(start_paused = true)]
async fn test_late_fatal_error_keeps_pending_restart() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;

    h.say("iris where am i").await;
    assert_eq!(h.controller.state(), SessionState::Listening);
    assert!(h.controller.restart_pending());
    assert!(!h.fakes.capture.is_running());

    // The stopped capture reports a failure after the fact
    h.error("network").await;
    assert_eq!(h.controller.state(), SessionState::Listening);
    assert!(h.controller.restart_pending());

    assert!(h.step().await);
    assert!(h.fakes.capture.is_running());
    assert_eq!(h.fakes.capture.starts(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_fatal_error_while_capturing_suspends() {
    let mut h = builder().build();
    h.enable(ListenMode::Continuous).await;

    h.error("network").await;

    assert_eq!(h.controller.state(), SessionState::Suspended);
    assert!(!h.fakes.capture.is_running());
    assert!(!h.controller.restart_pending());
}

#[tokio::test(start_paused = true)]
async fn test_interim_threshold_follows_settings() {
    let mut h = builder().interim_min_chars(10).build();
    h.enable(ListenMode::Continuous).await;

    // 8 and 9 characters stay under the raised threshold
    h.say_interim("iris sos").await;
    h.say_interim("iris help").await;
    assert!(h.fakes.no_side_effects());
    assert!(h.fakes.capture.is_running());

    h.say_interim("iris where am i").await;
    assert_eq!(h.fakes.links.opened().len(), 1);
    assert!(h.fakes.broadcaster.calls().is_empty());
}
