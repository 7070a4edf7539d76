//! Per-message orchestration.
//!
//! A [`Session`] owns every piece of process-wide state: trigger phrases,
//! access policy, cooldown, the busy flag, the content provider and the
//! presenter. The chat reader hands each message to [`Session::on_message`]
//! on its own task.
//!
//! ```text
//! message ─▶ busy? ─▶ cooldown? ─▶ blocked? ─▶ permitted? ─▶ trigger?
//!                                                              │
//!        ┌───────────────── busy = true (compare-and-swap) ◀───┘
//!        ▼
//!   fetch(query) ─▶ filter_and_limit ─▶ cooldown.activate() ─▶ present
//!        │                                                       │
//!        └──────────────── busy = false on every exit ◀──────────┘
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Instrument, debug, info, warn};

use crate::command::{AccessPolicy, ChatMessage, Cooldown, TriggerSet};
use crate::config::{Config, DisplayMode};
use crate::content::{
    ContentItem, ContentLimits, ContentProvider, Headline, Lookup, MeaningValidator,
    filter_and_limit, mock,
};
use crate::display::{Publisher, RotationScheduler};
use crate::error::LookupError;
use crate::metrics;
use crate::telemetry::{LookupTimer, spans};

/// Why a message did not start a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Busy,
    Cooldown,
    Blocked,
    NotPermitted,
    NoTrigger,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Busy => "busy",
            Self::Cooldown => "cooldown",
            Self::Blocked => "blocked",
            Self::NotPermitted => "not_permitted",
            Self::NoTrigger => "no_trigger",
        }
    }
}

/// Result of handling one chat message. Never shown to chat.
#[derive(Debug)]
pub enum Outcome {
    Ignored(IgnoreReason),
    /// A rotation over `items` items was started.
    Shown { items: usize },
    /// The first item was handed to the publisher.
    Published,
    Failed(LookupError),
}

impl Outcome {
    /// Label for the trigger outcome metric.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ignored(reason) => reason.as_str(),
            Self::Shown { .. } => "shown",
            Self::Published => "published",
            Self::Failed(e) if e.is_rejection() => "rejected",
            Self::Failed(_) => "failed",
        }
    }
}

/// Where filtered content goes.
pub enum Presenter {
    Rotate(Arc<RotationScheduler>),
    Publish(Arc<dyn Publisher>),
}

impl Presenter {
    async fn present(&self, headline: Headline, items: Vec<ContentItem>) -> Outcome {
        match self {
            Self::Rotate(scheduler) => {
                let count = items.len();
                scheduler.run(headline, items).await;
                Outcome::Shown { items: count }
            }
            Self::Publish(publisher) => {
                // Non-empty by construction; filtered batches are checked first.
                if let Some(first) = items.first() {
                    publisher.publish(&headline, first).await;
                }
                Outcome::Published
            }
        }
    }
}

/// Clears the busy flag when the cycle ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Process-wide command state, shared via `Arc`.
pub struct Session {
    triggers: TriggerSet,
    policy: AccessPolicy,
    cooldown: Cooldown,
    cooldown_on_failure: bool,
    provider: Arc<dyn ContentProvider>,
    validator: MeaningValidator,
    limits: ContentLimits,
    presenter: Presenter,
    busy: AtomicBool,
}

impl Session {
    /// Build a session from configuration.
    ///
    /// Fails only when the banned meaning words do not form a valid
    /// pattern, which [`crate::config::validation::validate`] reports first.
    pub fn new(
        config: &Config,
        provider: Arc<dyn ContentProvider>,
        presenter: Presenter,
    ) -> Result<Self, regex::Error> {
        let validator = MeaningValidator::new(&config.content.banned_words_in_meanings)?;
        let triggers = TriggerSet::from_config(&config.command);
        info!(
            phrases = ?triggers.phrases(),
            provider = provider.name(),
            mode = ?config.display.mode,
            "Session armed"
        );
        Ok(Self {
            triggers,
            policy: AccessPolicy::from_config(&config.access),
            cooldown: Cooldown::new(config.access.cooldown()),
            cooldown_on_failure: config.access.cooldown_on_failure,
            provider,
            validator,
            limits: ContentLimits::from_config(&config.display),
            presenter,
            busy: AtomicBool::new(false),
        })
    }

    /// Which presenter a configuration asks for.
    pub fn wants_publisher(config: &Config) -> bool {
        config.display.mode == DisplayMode::Chat
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    pub fn limits(&self) -> &ContentLimits {
        &self.limits
    }

    /// Handle one chat message.
    pub async fn on_message<M: ChatMessage + ?Sized>(&self, msg: &M) -> Outcome {
        let outcome = self.handle(msg).await;
        metrics::record_trigger(outcome.label());
        outcome
    }

    async fn handle<M: ChatMessage + ?Sized>(&self, msg: &M) -> Outcome {
        if self.is_busy() {
            return Outcome::Ignored(IgnoreReason::Busy);
        }
        if self.cooldown.is_active() {
            return Outcome::Ignored(IgnoreReason::Cooldown);
        }
        if self.policy.is_blocked(msg) {
            return Outcome::Ignored(IgnoreReason::Blocked);
        }
        if !self.policy.allows(msg) {
            return Outcome::Ignored(IgnoreReason::NotPermitted);
        }
        let Some(matched) = self.triggers.find(msg.text()) else {
            return Outcome::Ignored(IgnoreReason::NoTrigger);
        };

        // Another task may have won the race since the check above.
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Outcome::Ignored(IgnoreReason::Busy);
        }
        let _busy = BusyGuard(&self.busy);

        let query = matched.remainder.trim().to_lowercase();
        let span = spans::lookup(msg.username(), &query);
        async {
            debug!(phrase = matched.index, "Trigger matched");
            match self.lookup(&query).await {
                Ok((headline, items)) => self.presenter.present(headline, items).await,
                Err(e) => {
                    if e.is_rejection() {
                        info!(error = %e, code = e.error_code(), "Lookup rejected");
                    } else {
                        warn!(error = %e, code = e.error_code(), "Lookup failed");
                    }
                    metrics::record_lookup_error(e.error_code());
                    if self.cooldown_on_failure {
                        self.cooldown.activate();
                    }
                    Outcome::Failed(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Show the mock-up entry through the presenter, bypassing chat gating.
    pub async fn show_mock(&self) -> Outcome {
        let Lookup { headline, items } = mock::mock_lookup();
        let items = filter_and_limit(items, |text| self.validator.is_valid(text), &self.limits);
        if items.is_empty() {
            return Outcome::Failed(LookupError::AllFiltered);
        }
        info!(word = %headline.word, items = items.len(), "Showing mock-up entry");
        self.presenter.present(headline, items).await
    }

    async fn lookup(&self, query: &str) -> Result<(Headline, Vec<ContentItem>), LookupError> {
        if query.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let Lookup { headline, items } = {
            let _timer = LookupTimer::new(self.provider.name());
            self.provider.fetch(query).await?
        };

        let fetched = items.len();
        let items = filter_and_limit(items, |text| self.validator.is_valid(text), &self.limits);
        debug!(word = %headline.word, fetched, kept = items.len(), "Lookup filtered");
        if items.is_empty() {
            return Err(LookupError::AllFiltered);
        }

        self.cooldown.activate();
        Ok((headline, items))
    }
}
