//! # Actions
//!
//! Everything that can happen to a conversation becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::ResponseReceived(response)`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns the `Effect` the runtime must carry out (spawn the request, show an
//! alert, ...). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! One send cycle walks `Idle → Sending → Resolving → Idle`:
//!
//! ```text
//! Submit ──► Sending ──RequestDispatched──► Resolving ──ResponseReceived──► Idle
//!                                                    └─TransportFailed───► Idle
//! ```

use log::{debug, info, warn};

use crate::core::message::Message;
use crate::core::state::{App, Phase};
use crate::transport::{ChatRequest, ChatResponse, ResponseStatus, TransportError};

pub const EMPTY_QUESTION_PROMPT: &str = "Please enter your question";
pub const SERVICE_UNAVAILABLE_TEXT: &str =
    "Sorry, the service is temporarily unavailable, please retry later.";
pub const EMERGENCY_ALERT_TEXT: &str =
    "Emergency symptoms detected, please seek medical care immediately!";
pub const TIMEOUT_TEXT: &str = "The request timed out. The server may be waking up \
    (the free tier needs 30-60 seconds to start), please try again shortly.";
pub const NETWORK_DOWN_TEXT: &str =
    "Network connection failed, please check your network settings.";
pub const SERVER_UNREACHABLE_TEXT: &str =
    "Unable to connect to the server, please check that the server address is correct.";

#[derive(Debug)]
pub enum Action {
    /// Raw input-box contents; trimming and validation happen here.
    Submit(String),
    /// The runtime has started the transport call for the pending request.
    RequestDispatched,
    ResponseReceived(ChatResponse),
    TransportFailed(TransportError),
    DismissAlert,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Input was empty: show a transient prompt, nothing was sent.
    Prompt(&'static str),
    /// Issue exactly one transport call with this request.
    SpawnRequest(ChatRequest),
    /// Raise a one-shot, non-blocking alert.
    Alert(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit(app, &text),
        Action::RequestDispatched => {
            if app.phase == Phase::Sending {
                app.phase = Phase::Resolving;
            } else {
                warn!("RequestDispatched received in phase {:?}", app.phase);
            }
            Effect::None
        }
        Action::ResponseReceived(response) => {
            let effect = resolve_response(app, response);
            finish_send(app);
            effect
        }
        Action::TransportFailed(err) => {
            let effect = resolve_failure(app, &err);
            finish_send(app);
            effect
        }
        Action::DismissAlert => {
            app.alert = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: &str) -> Effect {
    let question = text.trim();
    if question.is_empty() {
        debug!("Ignoring empty submission");
        app.status_message = EMPTY_QUESTION_PROMPT.to_string();
        return Effect::Prompt(EMPTY_QUESTION_PROMPT);
    }
    if app.is_busy() || !app.send_enabled {
        warn!("Submit while a request is in flight (phase {:?}); ignoring", app.phase);
        return Effect::None;
    }

    app.conversation.append(Message::user(question));
    app.loading_index = Some(app.conversation.append(Message::loading()));
    app.send_enabled = false;
    app.phase = Phase::Sending;
    app.status_message = String::from("Waiting for Red Spider...");

    info!("Submitting question ({} chars)", question.chars().count());
    Effect::SpawnRequest(ChatRequest {
        question: question.to_string(),
        session_id: app.session_id.clone(),
    })
}

/// Drops the loading placeholder, but only if it is still where we put it.
fn clear_placeholder(app: &mut App) {
    let Some(index) = app.loading_index.take() else {
        return;
    };
    match app.conversation.get(index) {
        Some(message) if message.is_loading() => {
            if let Err(e) = app.conversation.remove_at(index) {
                warn!("Failed to remove loading placeholder: {}", e);
            }
        }
        _ => warn!(
            "Loading placeholder no longer at index {} ({} messages); leaving conversation untouched",
            index,
            app.conversation.len()
        ),
    }
}

fn resolve_response(app: &mut App, response: ChatResponse) -> Effect {
    clear_placeholder(app);

    match (response.status, response.data) {
        (ResponseStatus::Ok, Some(data)) => {
            app.conversation.append(Message::assistant(data.answer));
            app.status_message = String::from("Answer received");
            Effect::None
        }
        (ResponseStatus::Emergency, Some(data)) => {
            warn!("Backend flagged the question as an emergency");
            app.conversation.append(Message::emergency(data.answer));
            app.status_message = String::from("Emergency symptoms detected");
            raise_alert(app, EMERGENCY_ALERT_TEXT.to_string())
        }
        (status, _) => {
            let text = response
                .error
                .map(|e| {
                    info!("Backend error {}: {}", e.code, e.message);
                    e.message
                })
                .unwrap_or_else(|| {
                    warn!("Response with status {:?} carried no usable payload", status);
                    SERVICE_UNAVAILABLE_TEXT.to_string()
                });
            app.conversation.append(Message::error(text));
            app.status_message = String::from("The backend reported an error");
            Effect::None
        }
    }
}

fn resolve_failure(app: &mut App, err: &TransportError) -> Effect {
    warn!("Transport failure: {}", err);
    clear_placeholder(app);

    let text = describe_failure(&err.to_string());
    app.conversation.append(Message::error(text.clone()));
    app.status_message = String::from("Request failed");
    raise_alert(app, text)
}

/// Maps a failure description to the text shown to the user.
pub fn describe_failure(description: &str) -> String {
    let lowered = description.to_lowercase();
    if lowered.contains("timeout") {
        TIMEOUT_TEXT.to_string()
    } else if lowered.contains("unable to resolve host") {
        NETWORK_DOWN_TEXT.to_string()
    } else if lowered.contains("connection refused") {
        SERVER_UNREACHABLE_TEXT.to_string()
    } else {
        format!("Network error: {description}")
    }
}

fn raise_alert(app: &mut App, text: String) -> Effect {
    app.alert = Some(text.clone());
    Effect::Alert(text)
}

/// Runs on every resolution path, success or failure.
fn finish_send(app: &mut App) {
    app.phase = Phase::Idle;
    app.send_enabled = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{Kind, Origin, Template};
    use crate::test_support::test_app;

    fn submit_and_dispatch(app: &mut App, question: &str) {
        let effect = update(app, Action::Submit(question.to_string()));
        assert!(matches!(effect, Effect::SpawnRequest(_)));
        update(app, Action::RequestDispatched);
    }

    fn kinds(app: &App) -> Vec<(Origin, Kind)> {
        app.conversation
            .snapshot()
            .iter()
            .map(|m| (m.origin, m.kind))
            .collect()
    }

    #[test]
    fn submit_appends_user_and_loading_synchronously() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("  headache and fever  ".into()));

        assert_eq!(
            effect,
            Effect::SpawnRequest(ChatRequest::new("headache and fever"))
        );
        let messages = app.conversation.snapshot();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "headache and fever");
        assert_eq!(messages[0].template(), Template::User);
        assert!(messages[1].is_loading());
        assert_eq!(app.loading_index, Some(1));
        assert_eq!(app.phase, Phase::Sending);
        assert!(!app.send_enabled);
    }

    #[test]
    fn empty_or_whitespace_input_is_refused() {
        for input in ["", "   ", "\n\t "] {
            let mut app = test_app();
            let effect = update(&mut app, Action::Submit(input.to_string()));
            assert_eq!(effect, Effect::Prompt(EMPTY_QUESTION_PROMPT));
            assert!(app.conversation.is_empty());
            assert_eq!(app.phase, Phase::Idle);
            assert!(app.send_enabled);
        }
    }

    #[test]
    fn submit_while_busy_is_ignored() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "first");

        let effect = update(&mut app, Action::Submit("second".into()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.conversation.len(), 2);
        assert_eq!(app.conversation.loading_count(), 1);
    }

    #[test]
    fn request_dispatched_moves_to_resolving() {
        let mut app = test_app();
        update(&mut app, Action::Submit("q".into()));
        assert_eq!(app.phase, Phase::Sending);
        update(&mut app, Action::RequestDispatched);
        assert_eq!(app.phase, Phase::Resolving);
    }

    #[test]
    fn ok_response_replaces_placeholder_with_answer() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "q");

        let effect = update(&mut app, Action::ResponseReceived(ChatResponse::ok("X")));

        assert_eq!(effect, Effect::None);
        assert_eq!(
            kinds(&app),
            vec![(Origin::User, Kind::Normal), (Origin::Assistant, Kind::Normal)]
        );
        assert_eq!(app.conversation.get(1).unwrap().text, "X");
        assert_eq!(app.conversation.loading_count(), 0);
        assert_eq!(app.phase, Phase::Idle);
        assert!(app.send_enabled);
        assert!(app.alert.is_none());
    }

    #[test]
    fn emergency_response_raises_exactly_one_alert() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "chest pain");

        let effect = update(&mut app, Action::ResponseReceived(ChatResponse::emergency("Y")));

        assert_eq!(effect, Effect::Alert(EMERGENCY_ALERT_TEXT.to_string()));
        let last = app.conversation.snapshot().last().unwrap();
        assert_eq!(last.kind, Kind::Emergency);
        assert_eq!(last.text, "Y");
        assert_eq!(last.template(), Template::Emergency);
        assert_eq!(app.alert.as_deref(), Some(EMERGENCY_ALERT_TEXT));
        assert!(app.send_enabled);
    }

    #[test]
    fn error_response_uses_server_message() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "q");

        let effect = update(&mut app, Action::ResponseReceived(ChatResponse::error("E1", "Z")));

        assert_eq!(effect, Effect::None);
        let last = app.conversation.snapshot().last().unwrap();
        assert_eq!(last.kind, Kind::Error);
        assert_eq!(last.text, "Z");
        assert_eq!(app.conversation.loading_count(), 0);
    }

    #[test]
    fn ok_or_emergency_without_data_falls_back() {
        for status in [ResponseStatus::Ok, ResponseStatus::Emergency, ResponseStatus::Error] {
            let mut app = test_app();
            submit_and_dispatch(&mut app, "q");

            let response = ChatResponse {
                status,
                data: None,
                error: None,
            };
            let effect = update(&mut app, Action::ResponseReceived(response));

            assert_eq!(effect, Effect::None, "no alert for {status:?} without data");
            let last = app.conversation.snapshot().last().unwrap();
            assert_eq!(last.kind, Kind::Error);
            assert_eq!(last.text, SERVICE_UNAVAILABLE_TEXT);
            assert!(app.send_enabled);
        }
    }

    #[test]
    fn ok_without_data_but_with_error_uses_error_message() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "q");
        let mut response = ChatResponse::error("internal_error", "boom");
        response.status = ResponseStatus::Ok;

        update(&mut app, Action::ResponseReceived(response));
        assert_eq!(app.conversation.snapshot().last().unwrap().text, "boom");
    }

    #[test]
    fn timeout_failure_shows_wakeup_text_and_reenables_send() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "q");

        let effect = update(
            &mut app,
            Action::TransportFailed(TransportError::Timeout("operation timed out".into())),
        );

        assert_eq!(effect, Effect::Alert(TIMEOUT_TEXT.to_string()));
        let last = app.conversation.snapshot().last().unwrap();
        assert_eq!(last.kind, Kind::Error);
        assert_eq!(last.text, TIMEOUT_TEXT);
        assert_eq!(app.conversation.loading_count(), 0);
        assert!(app.send_enabled);
        assert_eq!(app.phase, Phase::Idle);
    }

    #[test]
    fn dns_and_refused_failures_map_to_canned_text() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "q");
        update(
            &mut app,
            Action::TransportFailed(TransportError::HostUnresolvable("backend.example".into())),
        );
        assert_eq!(app.conversation.snapshot().last().unwrap().text, NETWORK_DOWN_TEXT);

        submit_and_dispatch(&mut app, "q");
        update(
            &mut app,
            Action::TransportFailed(TransportError::ConnectionRefused("127.0.0.1:8000".into())),
        );
        assert_eq!(
            app.conversation.snapshot().last().unwrap().text,
            SERVER_UNREACHABLE_TEXT
        );
    }

    #[test]
    fn unmatched_failure_falls_back_to_generic_text() {
        let err = TransportError::Server {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert_eq!(
            describe_failure(&err.to_string()),
            "Network error: server error (HTTP 502): Bad Gateway"
        );
    }

    #[test]
    fn failure_matching_is_case_insensitive() {
        assert_eq!(describe_failure("Read TIMEOUT elapsed"), TIMEOUT_TEXT);
        assert_eq!(describe_failure("Unable to resolve host \"x\""), NETWORK_DOWN_TEXT);
        assert_eq!(describe_failure("Connection Refused"), SERVER_UNREACHABLE_TEXT);
    }

    #[test]
    fn displaced_placeholder_is_not_removed() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "q");
        // Something else took the placeholder's slot.
        app.conversation.remove_at(1).unwrap();
        app.conversation.append(Message::assistant("unrelated"));

        update(&mut app, Action::ResponseReceived(ChatResponse::ok("answer")));

        let texts: Vec<_> = app
            .conversation
            .snapshot()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["q", "unrelated", "answer"]);
        assert!(app.send_enabled);
    }

    #[test]
    fn placeholder_past_the_end_is_skipped_on_failure() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "q");
        app.conversation.remove_at(1).unwrap();

        update(
            &mut app,
            Action::TransportFailed(TransportError::Network("reset".into())),
        );

        assert_eq!(app.conversation.len(), 2);
        assert_eq!(app.conversation.get(0).unwrap().text, "q");
        assert_eq!(app.conversation.get(1).unwrap().kind, Kind::Error);
    }

    #[test]
    fn repeated_questions_are_not_deduplicated() {
        let mut app = test_app();
        for answer in ["first answer", "second answer"] {
            submit_and_dispatch(&mut app, "same question");
            assert!(app.conversation.loading_count() <= 1);
            update(&mut app, Action::ResponseReceived(ChatResponse::ok(answer)));
        }

        let texts: Vec<_> = app
            .conversation
            .snapshot()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec!["same question", "first answer", "same question", "second answer"]
        );
    }

    #[test]
    fn dismiss_alert_clears_it() {
        let mut app = test_app();
        submit_and_dispatch(&mut app, "q");
        update(&mut app, Action::ResponseReceived(ChatResponse::emergency("go")));
        assert!(app.alert.is_some());

        assert_eq!(update(&mut app, Action::DismissAlert), Effect::None);
        assert!(app.alert.is_none());
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
