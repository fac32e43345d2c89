//! Integration tests for the playback machine
//!
//! Scenario tests for the transition table and the media lifecycle. Every
//! test checks both the machine's state and what the media element was told.

mod common;

use common::{config, loaded_machine, machine_with, tracks, MediaCall};
use siao_playback::{PlaybackError, PlaybackEvent, PlaybackState};

// ===== Initial State =====

#[test]
fn test_initial_state_without_autoplay() {
    let (mut machine, media) = machine_with(config(false, 100));
    machine.set_tracks(tracks(3));

    assert_eq!(machine.state(), PlaybackState::Loading);
    assert_eq!(machine.current_index(), 0);
    assert!(!machine.is_playing());
    assert!(machine.is_loading());
    assert_eq!(machine.progress().position, 0.0);
    assert_eq!(media.calls(), vec![MediaCall::Load("track0".to_string())]);
}

#[test]
fn test_initial_state_with_autoplay() {
    let (mut machine, media) = machine_with(config(true, 100));
    machine.set_tracks(tracks(3));

    assert!(machine.is_playing());
    assert_eq!(machine.state(), PlaybackState::Loading);

    machine.on_loaded(240.0);
    assert_eq!(machine.state(), PlaybackState::Playing);
    assert_eq!(machine.progress().duration, 240.0);
    assert_eq!(media.last_transport(), Some(MediaCall::Play));
}

#[test]
fn test_autoplay_only_applies_to_first_track() {
    let (mut machine, _media) = machine_with(config(true, 100));
    machine.set_tracks(tracks(3));
    machine.on_loaded(100.0);
    machine.skip_to_index(2);
    machine.pause();

    machine.on_loaded(100.0);
    assert!(!machine.is_playing());
    assert_eq!(machine.state(), PlaybackState::Paused);
}

#[test]
fn test_empty_list_is_uninitialized_and_ignores_commands() {
    let (mut machine, media) = machine_with(config(true, 100));
    machine.set_tracks(Vec::new());

    machine.play();
    machine.skip_to_next();
    machine.skip_to_previous();
    machine.skip_to_index(0);
    machine.on_ended();
    assert!(machine.seek_to(10.0).is_ok());

    assert_eq!(machine.state(), PlaybackState::Uninitialized);
    assert!(!machine.is_playing());
    assert!(media.loads().is_empty());
    assert!(!media.calls().contains(&MediaCall::Play));
}

// ===== Transport =====

#[test]
fn test_play_pause() {
    let (mut machine, media) = loaded_machine(2);

    machine.play();
    assert_eq!(machine.state(), PlaybackState::Playing);
    machine.pause();
    assert_eq!(machine.state(), PlaybackState::Paused);

    assert_eq!(media.calls(), vec![MediaCall::Play, MediaCall::Pause]);
    assert_eq!(
        machine.drain_events(),
        vec![
            PlaybackEvent::PlayingChanged { playing: true },
            PlaybackEvent::StateChanged {
                state: PlaybackState::Playing
            },
            PlaybackEvent::PlayingChanged { playing: false },
            PlaybackEvent::StateChanged {
                state: PlaybackState::Paused
            },
        ]
    );
}

#[test]
fn test_stop_pauses_then_rewinds() {
    let (mut machine, media) = loaded_machine(2);
    machine.play();
    machine.on_progress(42.0, 180.0);
    media.take();

    machine.stop();

    assert!(!machine.is_playing());
    assert_eq!(machine.progress().position, 0.0);
    assert_eq!(machine.progress().duration, 180.0);
    assert_eq!(media.calls(), vec![MediaCall::Pause, MediaCall::Seek(0.0)]);
}

#[test]
fn test_seek_updates_position_optimistically() {
    let (mut machine, media) = loaded_machine(1);

    machine.seek_to(95.5).unwrap();

    assert_eq!(machine.progress().position, 95.5);
    assert_eq!(media.calls(), vec![MediaCall::Seek(95.5)]);
}

#[test]
fn test_seek_past_end_is_left_to_media_element() {
    let (mut machine, media) = loaded_machine(1);
    machine.seek_to(10_000.0).unwrap();
    assert_eq!(media.calls(), vec![MediaCall::Seek(10_000.0)]);
}

#[test]
fn test_seek_rejects_negative_and_nan() {
    let (mut machine, media) = loaded_machine(1);

    assert_eq!(
        machine.seek_to(-1.0),
        Err(PlaybackError::InvalidSeekPosition(-1.0))
    );
    assert!(matches!(
        machine.seek_to(f64::NAN),
        Err(PlaybackError::InvalidSeekPosition(p)) if p.is_nan()
    ));
    assert!(media.calls().is_empty());
    assert_eq!(machine.progress().position, 0.0);
}

// ===== Navigation =====

#[test]
fn test_skip_to_next_loads_and_plays() {
    let (mut machine, media) = loaded_machine(3);

    machine.skip_to_next();

    assert_eq!(machine.current_index(), 1);
    assert!(machine.is_playing());
    assert_eq!(machine.state(), PlaybackState::Loading);
    assert_eq!(
        media.calls(),
        vec![MediaCall::Load("track1".to_string()), MediaCall::Play]
    );

    let events = machine.drain_events();
    assert!(events.contains(&PlaybackEvent::TrackChanged {
        index: 1,
        track_id: "track1".to_string(),
        previous_track_id: Some("track0".to_string()),
    }));
}

#[test]
fn test_skip_to_next_at_last_is_noop() {
    let (mut machine, media) = loaded_machine(2);
    machine.skip_to_index(1);
    machine.on_loaded(100.0);
    machine.pause();
    machine.drain_events();
    media.take();
    let before = machine.snapshot();

    machine.skip_to_next();

    assert_eq!(machine.snapshot(), before);
    assert!(media.calls().is_empty());
    assert!(!machine.has_pending_events());
}

#[test]
fn test_skip_to_previous_at_first_rewinds_idempotently() {
    let (mut machine, media) = loaded_machine(3);
    machine.on_progress(30.0, 180.0);

    machine.skip_to_previous();
    let once = machine.snapshot();
    machine.skip_to_previous();
    let twice = machine.snapshot();

    assert_eq!(machine.current_index(), 0);
    assert_eq!(once.progress.position, 0.0);
    assert_eq!(once, twice);
    assert_eq!(media.calls(), vec![MediaCall::Seek(0.0), MediaCall::Seek(0.0)]);
}

#[test]
fn test_skip_to_previous_goes_back() {
    let (mut machine, _media) = loaded_machine(3);
    machine.skip_to_index(2);
    machine.skip_to_previous();

    assert_eq!(machine.current_index(), 1);
    assert!(machine.is_playing());
}

#[test]
fn test_skip_to_index_out_of_range_is_noop() {
    let (mut machine, media) = loaded_machine(3);
    let before = machine.snapshot();

    machine.skip_to_index(3);
    machine.skip_to_index(usize::MAX);

    assert_eq!(machine.snapshot(), before);
    assert!(media.calls().is_empty());
}

#[test]
fn test_skip_to_current_index_resumes_without_reload() {
    let (mut machine, media) = loaded_machine(3);

    machine.skip_to_index(0);

    assert!(machine.is_playing());
    assert_eq!(media.calls(), vec![MediaCall::Play]);
}

#[test]
fn test_index_change_keeps_progress_until_reported() {
    let (mut machine, _media) = loaded_machine(3);
    machine.on_progress(77.0, 180.0);

    machine.skip_to_next();
    assert_eq!(machine.progress().position, 77.0);
    assert_eq!(machine.progress().duration, 180.0);

    machine.on_loaded(200.0);
    machine.on_progress(0.5, 200.0);
    assert_eq!(machine.progress().position, 0.5);
    assert_eq!(machine.progress().duration, 200.0);
}

// ===== Media Lifecycle =====

#[test]
fn test_loaded_duration_overwrites_estimate() {
    let (mut machine, _media) = machine_with(config(false, 100));
    machine.set_tracks(tracks(1));

    machine.on_loaded(201.25);

    assert_eq!(machine.progress().duration, 201.25);
    assert_eq!(machine.current_track().unwrap().duration, Some(201.25));
    assert!(!machine.is_loading());
}

#[test]
fn test_loaded_without_duration_keeps_previous() {
    let (mut machine, _media) = loaded_machine(2);
    machine.on_loaded(f64::NAN);
    machine.on_loaded(0.0);
    assert_eq!(machine.progress().duration, 180.0);
}

#[test]
fn test_progress_fills_duration_only_when_unknown() {
    let (mut machine, _media) = machine_with(config(false, 100));
    machine.set_tracks(tracks(1));
    machine.on_loaded(0.0);

    machine.on_progress(1.0, 150.0);
    assert_eq!(machine.progress().duration, 150.0);

    machine.on_progress(2.0, 999.0);
    assert_eq!(machine.progress().duration, 150.0);
    assert_eq!(machine.progress().position, 2.0);
}

#[test]
fn test_ended_on_last_track_finishes_once() {
    let (mut machine, _media) = loaded_machine(2);
    machine.skip_to_index(1);
    machine.on_loaded(100.0);
    machine.drain_events();

    machine.on_ended();
    assert_eq!(machine.state(), PlaybackState::Ended);
    assert_eq!(machine.current_index(), 1);
    assert!(!machine.is_playing());

    // Replay the last track and let it end again
    machine.play();
    machine.on_ended();

    let finished = machine
        .drain_events()
        .into_iter()
        .filter(|e| *e == PlaybackEvent::PlaylistFinished)
        .count();
    assert_eq!(finished, 1);
    assert_eq!(machine.current_index(), 1);
}

#[test]
fn test_finished_rearms_after_leaving_last_track() {
    let (mut machine, _media) = loaded_machine(2);
    machine.skip_to_index(1);
    machine.on_ended();
    machine.skip_to_previous();
    machine.skip_to_next();
    machine.on_ended();

    let finished = machine
        .drain_events()
        .into_iter()
        .filter(|e| *e == PlaybackEvent::PlaylistFinished)
        .count();
    assert_eq!(finished, 2);
}

#[test]
fn test_ended_advances_then_resumes_after_grace() {
    let (mut machine, media) = loaded_machine(3);
    machine.play();
    media.take();

    machine.on_ended();

    assert_eq!(machine.current_index(), 1);
    assert!(!machine.is_playing());
    assert_eq!(
        media.calls(),
        vec![MediaCall::Pause, MediaCall::Load("track1".to_string())]
    );

    let ticket = machine.pending_resume().expect("resume scheduled");
    machine.resume_after_grace(ticket.token);

    assert!(machine.is_playing());
    assert!(machine.pending_resume().is_none());
    assert_eq!(media.last_transport(), Some(MediaCall::Play));
}

#[test]
fn test_zero_grace_resumes_immediately() {
    let (mut machine, media) = machine_with(config(false, 0));
    machine.set_tracks(tracks(2));
    machine.on_loaded(10.0);
    machine.play();
    media.take();

    machine.on_ended();

    assert!(machine.is_playing());
    assert!(machine.pending_resume().is_none());
    // Stop before next play
    assert_eq!(
        media.calls(),
        vec![
            MediaCall::Pause,
            MediaCall::Load("track1".to_string()),
            MediaCall::Play
        ]
    );
}

#[test]
fn test_pause_during_grace_discards_resume() {
    let (mut machine, _media) = loaded_machine(3);
    machine.play();
    machine.on_ended();
    let ticket = machine.pending_resume().unwrap();

    machine.pause();
    assert!(machine.pending_resume().is_none());

    machine.resume_after_grace(ticket.token);
    assert!(!machine.is_playing());
    assert_eq!(machine.current_index(), 1);
}

#[test]
fn test_stop_and_seek_during_grace_discard_resume() {
    for op in ["stop", "seek", "skip", "set_tracks"] {
        let (mut machine, _media) = loaded_machine(3);
        machine.play();
        machine.on_ended();
        let ticket = machine.pending_resume().unwrap();

        match op {
            "stop" => machine.stop(),
            "seek" => machine.seek_to(5.0).unwrap(),
            "skip" => machine.skip_to_index(0),
            _ => machine.set_tracks(tracks(2)),
        }
        assert!(machine.pending_resume().is_none(), "{} kept the resume", op);

        let playing = machine.is_playing();
        machine.resume_after_grace(ticket.token);
        assert_eq!(machine.is_playing(), playing, "{} honoured a stale resume", op);
    }
}

#[test]
fn test_error_surfaces_and_play_retries() {
    let (mut machine, media) = loaded_machine(2);
    machine.play();
    machine.drain_events();

    machine.on_error("404 Not Found");

    assert!(!machine.is_playing());
    assert!(!machine.is_loading());
    assert_eq!(machine.state(), PlaybackState::Paused);
    assert_eq!(
        machine.last_error(),
        Some(&PlaybackError::MediaLoad("404 Not Found".to_string()))
    );
    assert!(machine.drain_events().contains(&PlaybackEvent::Error {
        message: "Media load failed: 404 Not Found".to_string()
    }));
    assert_eq!(
        machine.snapshot().last_error.as_deref(),
        Some("Media load failed: 404 Not Found")
    );

    media.take();
    machine.play();
    assert!(machine.last_error().is_none());
    assert!(machine.is_playing());
    assert_eq!(media.last_transport(), Some(MediaCall::Play));

    // The failed source is loaded again, on the same track
    assert_eq!(media.loads(), vec!["track0".to_string()]);
    assert_eq!(machine.current_index(), 0);
    assert!(machine.is_loading());
    assert_eq!(machine.state(), PlaybackState::Loading);

    machine.on_loaded(180.0);
    assert_eq!(machine.state(), PlaybackState::Playing);
}

#[test]
fn test_retry_after_error_reloads_before_playing() {
    let (mut machine, media) = machine_with(config(false, 100));
    machine.set_tracks(tracks(2));
    machine.on_error("decode failed");
    media.take();

    machine.play();

    assert_eq!(
        media.calls(),
        vec![MediaCall::Load("track0".to_string()), MediaCall::Play]
    );
    assert_eq!(machine.state(), PlaybackState::Loading);
    // A retry is not a track change
    assert!(!machine
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlaybackEvent::TrackChanged { .. })));
}

#[test]
fn test_play_without_error_does_not_reload() {
    let (mut machine, media) = loaded_machine(2);

    machine.play();

    assert!(media.loads().is_empty());
    assert_eq!(machine.state(), PlaybackState::Playing);
}

#[test]
fn test_error_leaves_rest_of_list_usable() {
    let (mut machine, _media) = loaded_machine(3);
    machine.on_error("decode failed");

    machine.skip_to_next();

    assert!(machine.last_error().is_none());
    assert_eq!(machine.current_index(), 1);
    assert!(machine.is_playing());
}

#[test]
fn test_new_list_resets_to_first_track() {
    let (mut machine, media) = loaded_machine(3);
    machine.skip_to_index(2);
    machine.on_progress(12.0, 180.0);
    media.take();

    machine.set_tracks(tracks(2));

    assert_eq!(machine.current_index(), 0);
    assert_eq!(machine.progress().position, 0.0);
    assert_eq!(machine.progress().duration, 0.0);
    assert!(!machine.is_playing());
    assert_eq!(
        media.calls(),
        vec![MediaCall::Load("track0".to_string()), MediaCall::Pause]
    );
}

// ===== Disposal =====

#[test]
fn test_dispose_silences_everything() {
    let (mut machine, media) = loaded_machine(3);
    machine.play();
    machine.on_ended();
    let ticket = machine.pending_resume().unwrap();
    media.take();

    machine.dispose();
    assert!(machine.is_disposed());
    assert!(machine.pending_resume().is_none());
    assert_eq!(media.take(), vec![MediaCall::Pause]);

    machine.resume_after_grace(ticket.token);
    machine.play();
    machine.skip_to_next();
    machine.on_loaded(10.0);
    machine.set_tracks(tracks(5));

    assert!(media.calls().is_empty());
    assert!(!machine.is_playing());
    assert_eq!(machine.tracks().len(), 3);
}
