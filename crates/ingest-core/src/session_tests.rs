// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn validate_session_name_accepts_charset() {
    assert!(validate_session_name("alpha-01_run.2").is_ok());
}

#[test]
fn validate_session_name_rejects_slash() {
    assert!(validate_session_name("alpha/beta").is_err());
}

#[test]
fn validate_session_name_rejects_empty() {
    assert!(validate_session_name("").is_err());
}

#[test]
fn generated_name_has_expected_prefix() {
    let name = generate_session_name();
    assert!(name.starts_with("00-session-"));
}

#[test]
fn start_sets_active_and_names() {
    let state = SessionState::new();
    state.start("alpha".to_string(), "20260305".to_string()).unwrap();
    let snap = state.snapshot();
    assert!(snap.active);
    assert_eq!(snap.session_name.as_deref(), Some("alpha"));
    assert_eq!(snap.date_prefix.as_deref(), Some("20260305"));
}

#[test]
fn start_twice_fails_with_conflict() {
    let state = SessionState::new();
    state.start("alpha".to_string(), "20260305".to_string()).unwrap();
    let err = state.start("beta".to_string(), "20260305".to_string()).unwrap_err();
    assert!(matches!(err, SessionError::AlreadyActive));
}

#[test]
fn stop_preserves_names_for_draining_workers() {
    let state = SessionState::new();
    state.start("alpha".to_string(), "20260305".to_string()).unwrap();
    state.stop();
    let snap = state.snapshot();
    assert!(!snap.active);
    assert_eq!(snap.session_name.as_deref(), Some("alpha"));
    assert_eq!(snap.date_prefix.as_deref(), Some("20260305"));
}

#[test]
fn counters_accumulate_independently_of_identity() {
    let state = SessionState::new();
    state.record_success();
    state.record_success();
    state.record_failure("boom.bin: oops".to_string());
    assert_eq!(state.processed_ok(), 2);
    assert_eq!(state.processed_err(), 1);
    assert_eq!(state.last_error().as_deref(), Some("boom.bin: oops"));
}

#[test]
fn stop_then_start_again_is_legal() {
    let state = SessionState::new();
    state.start("alpha".to_string(), "20260305".to_string()).unwrap();
    state.stop();
    state.start("alpha".to_string(), "20260306".to_string()).unwrap();
    let snap = state.snapshot();
    assert!(snap.active);
    assert_eq!(snap.date_prefix.as_deref(), Some("20260306"));
}
