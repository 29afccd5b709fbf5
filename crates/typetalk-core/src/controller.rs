//! Conversation turn controller.
//!
//! Drives one message exchange end to end:
//!
//! ```text
//! Idle -> Submitting (busy, pending turn shown) -> Resolved | Failed -> Idle
//! ```
//!
//! The controller owns the session state and the transcript, talks to the
//! UI only through [`Presenter`], and to the network only through
//! [`ClassifierTransport`]. `submit` never returns an error: every failure
//! becomes a bot turn carrying the connectivity message.

use std::time::Instant;

use tracing::{debug, info, warn};

use typetalk_types::classify::ClassifyRequest;
use typetalk_types::turn::{Turn, TurnId};

use crate::presenter::Presenter;
use crate::session::{BusyGuard, ConversationSession, Transcript};
use crate::transport::ClassifierTransport;

/// Why a submission was dropped without doing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Input was empty after trimming.
    Empty,
    /// Another request is still in flight.
    Busy,
}

/// Result of [`TurnController::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rejected(RejectReason),
    /// The classifier answered; carries the rendered bot turn.
    Resolved(Turn),
    /// The request failed; carries the rendered error turn.
    Failed(Turn),
}

impl SubmitOutcome {
    /// The bot turn rendered by this submission, if any.
    pub fn turn(&self) -> Option<&Turn> {
        match self {
            SubmitOutcome::Rejected(_) => None,
            SubmitOutcome::Resolved(turn) | SubmitOutcome::Failed(turn) => Some(turn),
        }
    }
}

/// Result of [`TurnController::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// No exchange has completed yet.
    NothingToReset,
    /// A request is in flight.
    Busy,
    /// The user declined the confirmation.
    Declined,
    Cleared,
}

pub const NOTHING_TO_RESET_NOTICE: &str = "Start chatting to begin!";
pub const RESET_BUSY_NOTICE: &str = "Wait for the current reply before starting over.";
pub const RESET_CONFIRM_PROMPT: &str = "Start a new conversation? Current chat will be cleared.";
pub const RESET_DONE_NOTICE: &str = "New conversation started";

pub struct TurnController<P, T> {
    presenter: P,
    transport: T,
    session: ConversationSession,
    transcript: Transcript,
    /// Text of the bot turn rendered when a request fails.
    error_message: String,
}

impl<P: Presenter, T: ClassifierTransport> TurnController<P, T> {
    pub fn new(presenter: P, transport: T, error_message: impl Into<String>) -> Self {
        Self {
            presenter,
            transport,
            session: ConversationSession::new(),
            transcript: Transcript::new(),
            error_message: error_message.into(),
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn turn_count(&self) -> u32 {
        self.session.turn_count()
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// Submit raw input text.
    ///
    /// Dropped without side effects when the trimmed text is empty or a
    /// request is already in flight. Otherwise renders the user turn and a
    /// pending placeholder, issues exactly one classification request, and
    /// swaps the placeholder for the reply or the connectivity message.
    pub async fn submit(&self, raw_text: &str) -> SubmitOutcome {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("Ignoring empty submission");
            return SubmitOutcome::Rejected(RejectReason::Empty);
        }

        let Some(busy) = self.session.try_begin() else {
            debug!("Ignoring submission while a request is in flight");
            return SubmitOutcome::Rejected(RejectReason::Busy);
        };

        self.presenter.lock_input();
        let mut in_flight = InFlight {
            presenter: &self.presenter,
            transcript: &self.transcript,
            pending: None,
            busy: Some(busy),
        };

        let user_turn = Turn::user(text);
        self.presenter.render_user_turn(&user_turn);
        self.transcript.push(user_turn);
        self.presenter.clear_input();

        let pending = Turn::pending_bot();
        in_flight.pending = Some(pending.id);
        self.presenter.render_pending_turn(&pending);
        self.transcript.push(pending);

        let request = ClassifyRequest::new(text);
        let started = Instant::now();
        let result = self.transport.classify(&request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        in_flight.retire_pending();

        match result {
            Ok(response) => {
                let turn = Turn::bot(response.response, Some(response.prediction));
                self.presenter.render_bot_turn(&turn);
                self.transcript.push(turn.clone());
                self.session.increment_turn();
                info!(
                    label = turn.label.as_deref().unwrap_or_default(),
                    elapsed_ms,
                    turn_count = self.session.turn_count(),
                    "Exchange resolved"
                );
                SubmitOutcome::Resolved(turn)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    kind = e.kind(),
                    endpoint = self.transport.endpoint(),
                    elapsed_ms,
                    "Classification request failed"
                );
                let turn = Turn::bot(self.error_message.clone(), None);
                self.presenter.render_bot_turn(&turn);
                self.transcript.push(turn.clone());
                SubmitOutcome::Failed(turn)
            }
        }
    }

    /// Start over: clear every turn and the exchange counter after the user
    /// confirms.
    pub fn reset(&self) -> ResetOutcome {
        if self.session.turn_count() == 0 {
            self.presenter.notify(NOTHING_TO_RESET_NOTICE);
            return ResetOutcome::NothingToReset;
        }

        if self.session.is_busy() {
            self.presenter.notify(RESET_BUSY_NOTICE);
            return ResetOutcome::Busy;
        }

        if !self.presenter.confirm(RESET_CONFIRM_PROMPT) {
            debug!("Reset declined");
            return ResetOutcome::Declined;
        }

        self.transcript.clear();
        self.presenter.clear_turns();
        self.session.reset_turns();
        self.presenter.show_welcome();
        self.presenter.notify(RESET_DONE_NOTICE);
        info!("Conversation reset");
        ResetOutcome::Cleared
    }
}

/// Cleanup for one accepted submission.
///
/// Dropping it retires the pending placeholder if it is still shown, then
/// frees the busy flag and releases input, in that order. Also runs when the
/// `submit` future is dropped mid-request.
struct InFlight<'a, P: Presenter> {
    presenter: &'a P,
    transcript: &'a Transcript,
    pending: Option<TurnId>,
    busy: Option<BusyGuard<'a>>,
}

impl<P: Presenter> InFlight<'_, P> {
    fn retire_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.transcript.remove(id);
            self.presenter.remove_turn(id);
        }
    }
}

impl<P: Presenter> Drop for InFlight<'_, P> {
    fn drop(&mut self) {
        if self.pending.is_some() {
            debug!("Submission dropped before the reply arrived");
        }
        self.retire_pending();
        drop(self.busy.take());
        self.presenter.release_input();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::sync::Notify;

    use typetalk_types::classify::ClassifyResponse;
    use typetalk_types::error::TransportError;
    use typetalk_types::turn::TurnRole;

    use super::*;

    const ERROR_TEXT: &str = "I'm having trouble connecting to the server. Please make sure the backend is running on http://127.0.0.1:5000";

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        LockInput,
        User(String),
        ClearInput,
        Pending(TurnId),
        Remove(TurnId),
        Bot(String, Option<String>),
        Notify(String),
        Confirm(String),
        ClearTurns,
        Welcome,
        ReleaseInput,
    }

    #[derive(Default)]
    struct RecordingPresenter {
        events: Mutex<Vec<Event>>,
        confirm_answer: bool,
        /// Pending placeholders visible at each render call.
        max_pending: AtomicUsize,
        pending_now: AtomicUsize,
    }

    impl RecordingPresenter {
        fn confirming(answer: bool) -> Self {
            Self {
                confirm_answer: answer,
                ..Self::default()
            }
        }

        fn record(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn bot_turns(&self) -> Vec<(String, Option<String>)> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Bot(text, label) => Some((text, label)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Presenter for RecordingPresenter {
        fn render_user_turn(&self, turn: &Turn) {
            self.record(Event::User(turn.text.clone()));
        }

        fn render_pending_turn(&self, turn: &Turn) {
            let now = self.pending_now.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_pending.fetch_max(now, Ordering::SeqCst);
            self.record(Event::Pending(turn.id));
        }

        fn render_bot_turn(&self, turn: &Turn) {
            self.record(Event::Bot(turn.text.clone(), turn.label.clone()));
        }

        fn remove_turn(&self, id: TurnId) {
            self.pending_now.fetch_sub(1, Ordering::SeqCst);
            self.record(Event::Remove(id));
        }

        fn notify(&self, message: &str) {
            self.record(Event::Notify(message.to_string()));
        }

        fn confirm(&self, prompt: &str) -> bool {
            self.record(Event::Confirm(prompt.to_string()));
            self.confirm_answer
        }

        fn clear_turns(&self) {
            self.record(Event::ClearTurns);
        }

        fn show_welcome(&self) {
            self.record(Event::Welcome);
        }

        fn lock_input(&self) {
            self.record(Event::LockInput);
        }

        fn clear_input(&self) {
            self.record(Event::ClearInput);
        }

        fn release_input(&self) {
            self.record(Event::ReleaseInput);
        }
    }

    /// Replays canned results in order and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<ClassifyResponse, TransportError>>>,
        requests: Mutex<Vec<ClassifyRequest>>,
        /// When set, each call waits for a permit before answering.
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedTransport {
        fn with(replies: Vec<Result<ClassifyResponse, TransportError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                ..Self::default()
            }
        }

        fn gated(replies: Vec<Result<ClassifyResponse, TransportError>>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::with(replies)
            }
        }

        fn requests(&self) -> Vec<ClassifyRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ClassifierTransport for ScriptedTransport {
        fn endpoint(&self) -> &str {
            "http://127.0.0.1:5000/chat"
        }

        async fn classify(
            &self,
            request: &ClassifyRequest,
        ) -> Result<ClassifyResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Unreachable("no scripted reply".into())))
        }
    }

    fn ok(response: &str, prediction: &str) -> Result<ClassifyResponse, TransportError> {
        Ok(ClassifyResponse {
            response: response.to_string(),
            prediction: prediction.to_string(),
        })
    }

    fn controller(
        presenter: RecordingPresenter,
        transport: ScriptedTransport,
    ) -> TurnController<RecordingPresenter, ScriptedTransport> {
        TurnController::new(presenter, transport, ERROR_TEXT)
    }

    #[tokio::test]
    async fn test_empty_and_whitespace_input_is_ignored() {
        let ctl = controller(RecordingPresenter::default(), ScriptedTransport::default());

        for input in ["", "   ", "\n\t "] {
            assert_eq!(ctl.submit(input).await, SubmitOutcome::Rejected(RejectReason::Empty));
        }

        assert!(ctl.presenter().events().is_empty());
        assert!(ctl.transport().requests().is_empty());
        assert!(ctl.transcript().is_empty());
        assert_eq!(ctl.turn_count(), 0);
        assert!(!ctl.is_busy());
    }

    #[tokio::test]
    async fn test_successful_exchange() {
        let ctl = controller(
            RecordingPresenter::default(),
            ScriptedTransport::with(vec![ok("Hi there!", "INFP")]),
        );

        let outcome = ctl.submit("  Hello ").await;

        let SubmitOutcome::Resolved(turn) = outcome else {
            panic!("expected resolved outcome, got {outcome:?}");
        };
        assert_eq!(turn.role, TurnRole::Bot);
        assert_eq!(turn.text, "Hi there!");
        assert_eq!(turn.label.as_deref(), Some("INFP"));
        assert!(!turn.pending);

        assert_eq!(ctl.transport().requests(), vec![ClassifyRequest::new("Hello")]);
        assert_eq!(ctl.turn_count(), 1);
        assert!(!ctl.is_busy());

        let transcript = ctl.transcript().snapshot();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, TurnRole::User);
        assert_eq!(transcript[0].text, "Hello");
        assert_eq!(transcript[1], turn);
        assert_eq!(ctl.transcript().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_presenter_call_order() {
        let ctl = controller(
            RecordingPresenter::default(),
            ScriptedTransport::with(vec![ok("Hi there!", "INFP")]),
        );
        ctl.submit("Hello").await;

        let events = ctl.presenter().events();
        let Event::Pending(pending_id) = events[3].clone() else {
            panic!("expected pending turn at index 3: {events:?}");
        };
        assert_eq!(
            events,
            vec![
                Event::LockInput,
                Event::User("Hello".to_string()),
                Event::ClearInput,
                Event::Pending(pending_id),
                Event::Remove(pending_id),
                Event::Bot("Hi there!".to_string(), Some("INFP".to_string())),
                Event::ReleaseInput,
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_render_error_turn_without_label() {
        let failures = vec![
            Err(TransportError::Unreachable("connection refused".into())),
            Err(TransportError::Status {
                status: 500,
                body: "Internal Server Error".into(),
            }),
            Err(TransportError::MalformedBody("expected value at line 1".into())),
        ];
        let ctl = controller(RecordingPresenter::default(), ScriptedTransport::with(failures));

        for attempt in 1..=3 {
            let outcome = ctl.submit("Hello").await;
            let SubmitOutcome::Failed(turn) = outcome else {
                panic!("expected failure, got {outcome:?}");
            };
            assert_eq!(turn.text, ERROR_TEXT);
            assert!(turn.label.is_none());
            assert_eq!(ctl.turn_count(), 0);
            assert!(!ctl.is_busy());
            assert_eq!(ctl.transport().requests().len(), attempt);
        }

        let bots = ctl.presenter().bot_turns();
        assert_eq!(bots.len(), 3);
        assert!(bots.iter().all(|(text, label)| text == ERROR_TEXT && label.is_none()));
        assert_eq!(ctl.transcript().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_submission_accepted_after_failure() {
        let ctl = controller(
            RecordingPresenter::default(),
            ScriptedTransport::with(vec![
                Err(TransportError::Unreachable("down".into())),
                ok("Back online", "ENTP"),
            ]),
        );

        assert!(matches!(ctl.submit("first").await, SubmitOutcome::Failed(_)));
        assert!(matches!(ctl.submit("second").await, SubmitOutcome::Resolved(_)));
        assert_eq!(ctl.turn_count(), 1);
        assert_eq!(ctl.transcript().len(), 4);
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_dropped() {
        let gate = Arc::new(Notify::new());
        let ctl = controller(
            RecordingPresenter::default(),
            ScriptedTransport::gated(vec![ok("First reply", "ISTJ")], gate.clone()),
        );

        let first = ctl.submit("first");
        let second = async {
            tokio::task::yield_now().await;
            assert!(ctl.is_busy());
            let outcome = ctl.submit("second").await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(second, SubmitOutcome::Rejected(RejectReason::Busy));
        assert!(matches!(first, SubmitOutcome::Resolved(_)));
        assert_eq!(ctl.transport().requests(), vec![ClassifyRequest::new("first")]);
        assert_eq!(ctl.turn_count(), 1);
        assert_eq!(ctl.presenter().max_pending.load(Ordering::SeqCst), 1);
        assert!(!ctl.is_busy());
    }

    #[tokio::test]
    async fn test_dropped_submission_retires_pending_turn() {
        let gate = Arc::new(Notify::new());
        let ctl = controller(
            RecordingPresenter::default(),
            ScriptedTransport::gated(vec![ok("late", "INFJ"), ok("second", "ENFP")], gate.clone()),
        );

        let aborted = tokio::time::timeout(Duration::from_millis(20), ctl.submit("first")).await;
        assert!(aborted.is_err());
        assert!(!ctl.is_busy());
        assert_eq!(ctl.transcript().pending_count(), 0);
        assert_eq!(ctl.transcript().len(), 1);

        let events = ctl.presenter().events();
        let Event::Pending(pending_id) = events[3].clone() else {
            panic!("expected pending turn at index 3: {events:?}");
        };
        assert_eq!(
            &events[4..],
            &[Event::Remove(pending_id), Event::ReleaseInput]
        );

        let second = ctl.submit("second");
        let observe = async {
            tokio::task::yield_now().await;
            assert_eq!(ctl.transcript().pending_count(), 1);
            gate.notify_one();
        };
        let (second, ()) = tokio::join!(second, observe);

        assert!(matches!(second, SubmitOutcome::Resolved(_)));
        assert_eq!(ctl.presenter().max_pending.load(Ordering::SeqCst), 1);
        assert_eq!(ctl.transcript().pending_count(), 0);
        assert_eq!(ctl.turn_count(), 1);
    }

    #[test]
    fn test_reset_with_no_turns_only_notifies() {
        let ctl = controller(RecordingPresenter::confirming(true), ScriptedTransport::default());

        assert_eq!(ctl.reset(), ResetOutcome::NothingToReset);
        assert_eq!(
            ctl.presenter().events(),
            vec![Event::Notify(NOTHING_TO_RESET_NOTICE.to_string())]
        );
        assert_eq!(ctl.turn_count(), 0);
    }

    #[tokio::test]
    async fn test_reset_confirmed_clears_everything() {
        let ctl = controller(
            RecordingPresenter::confirming(true),
            ScriptedTransport::with(vec![ok("one", "INTJ"), ok("two", "INTP")]),
        );
        ctl.submit("a").await;
        ctl.submit("b").await;
        assert_eq!(ctl.turn_count(), 2);

        assert_eq!(ctl.reset(), ResetOutcome::Cleared);
        assert_eq!(ctl.turn_count(), 0);
        assert!(ctl.transcript().is_empty());

        let events = ctl.presenter().events();
        let tail = &events[events.len() - 4..];
        assert_eq!(
            tail,
            &[
                Event::Confirm(RESET_CONFIRM_PROMPT.to_string()),
                Event::ClearTurns,
                Event::Welcome,
                Event::Notify(RESET_DONE_NOTICE.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_reset_while_busy_is_refused() {
        let gate = Arc::new(Notify::new());
        let ctl = controller(
            RecordingPresenter::confirming(true),
            ScriptedTransport::gated(vec![ok("one", "ESTJ"), ok("two", "ESFJ")], gate.clone()),
        );

        // Stored permit lets the first exchange through immediately.
        gate.notify_one();
        ctl.submit("a").await;
        assert_eq!(ctl.turn_count(), 1);

        let in_flight = ctl.submit("b");
        let reset = async {
            tokio::task::yield_now().await;
            assert!(ctl.is_busy());
            let before = ctl.presenter().events().len();
            let outcome = ctl.reset();
            let during = ctl.presenter().events()[before..].to_vec();
            let snapshot = (ctl.transcript().len(), ctl.turn_count());
            gate.notify_one();
            (outcome, during, snapshot)
        };
        let (second, (outcome, during, snapshot)) = tokio::join!(in_flight, reset);

        assert_eq!(outcome, ResetOutcome::Busy);
        assert_eq!(during, vec![Event::Notify(RESET_BUSY_NOTICE.to_string())]);
        // user + reply from the first exchange, user + pending from the second
        assert_eq!(snapshot, (4, 1));

        assert!(matches!(second, SubmitOutcome::Resolved(_)));
        assert_eq!(ctl.turn_count(), 2);
        assert_eq!(ctl.transcript().len(), 4);
        let events = ctl.presenter().events();
        assert!(!events.iter().any(|e| matches!(e, Event::Confirm(_))));
        assert!(!events.contains(&Event::ClearTurns));
    }

    #[tokio::test]
    async fn test_reset_declined_keeps_state() {
        let ctl = controller(
            RecordingPresenter::confirming(false),
            ScriptedTransport::with(vec![ok("one", "INTJ")]),
        );
        ctl.submit("a").await;

        assert_eq!(ctl.reset(), ResetOutcome::Declined);
        assert_eq!(ctl.turn_count(), 1);
        assert_eq!(ctl.transcript().len(), 2);
        assert!(!ctl.presenter().events().contains(&Event::ClearTurns));
    }

    #[tokio::test]
    async fn test_unknown_label_is_kept_verbatim() {
        let ctl = controller(
            RecordingPresenter::default(),
            ScriptedTransport::with(vec![ok("hmm", "XYZW")]),
        );
        let outcome = ctl.submit("hi").await;
        let turn = outcome.turn().unwrap();
        assert_eq!(turn.label.as_deref(), Some("XYZW"));
        assert_eq!(turn.personality().unwrap().name, "Unknown");
    }
}
