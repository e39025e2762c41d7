//! Lifecycle Controller
//!
//! Owns the configuration, the interaction buffer and the session descriptor
//! for one page lifetime, and drives them through
//! `Initializing -> Active -> Closing -> Closed`.
//!
//! The host binding registers one listener per [`Subscription`] on the
//! document body, plus one `visibilitychange` listener, and forwards them to
//! [`Interactor::handle_event`] and [`Interactor::handle_visibility_change`].

use crate::dom::{DomElement, DomEvent};
use crate::host::{BeaconTransport, Host, VisibilityState};
use crate::recorder::InteractionRecorder;
use crate::session::{close_session, open_session};
use crate::transmitter::Transmitter;
use interactor_common::config::InteractorConfig;
use interactor_common::protocol::{Category, InteractionRecord, SessionDescriptor};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Initializing,
    Active,
    Closing,
    Closed,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Initializing => "initializing",
            LifecycleState::Active => "active",
            LifecycleState::Closing => "closing",
            LifecycleState::Closed => "closed",
        }
    }
}

/// Index into the subscription table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub usize);

/// One (category, event name) entry of the subscription table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub category: Category,
    pub event_name: String,
    pub marker_class: String,
}

/// Outcome of forwarding one event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Recorded,
    /// The session is no longer active.
    Inactive,
    UnknownSubscription,
    MissingTarget,
    /// The target does not carry the subscription's marker class.
    Unmarked,
}

pub struct Interactor<H, T> {
    config: InteractorConfig,
    host: H,
    transmitter: Transmitter<T>,
    recorder: InteractionRecorder,
    session: Option<SessionDescriptor>,
    subscriptions: Vec<Subscription>,
    state: LifecycleState,
}

impl<H: Host, T: BeaconTransport> Interactor<H, T> {
    /// Open the session and build the subscription table.
    pub fn new(config: InteractorConfig, host: H, transport: T) -> Self {
        let mut interactor = Self {
            recorder: InteractionRecorder::new(config.debug),
            transmitter: Transmitter::new(transport),
            session: None,
            subscriptions: Vec::new(),
            state: LifecycleState::Initializing,
            config,
            host,
        };

        interactor.session = Some(open_session(&interactor.host, &interactor.config));
        interactor.subscriptions = build_subscriptions(&interactor.config);
        interactor.state = LifecycleState::Active;

        if interactor.config.debug {
            tracing::info!(
                endpoint = %interactor.config.endpoint,
                subscriptions = interactor.subscriptions.len(),
                "Interactor active"
            );
        }

        interactor
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn config(&self) -> &InteractorConfig {
        &self.config
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn subscription(&self, id: SubscriptionId) -> Option<&Subscription> {
        self.subscriptions.get(id.0)
    }

    /// Records captured so far. Empty once the session has been closed.
    pub fn records(&self) -> &[InteractionRecord] {
        self.recorder.records()
    }

    /// The open session descriptor, `None` once it has been handed off.
    pub fn session(&self) -> Option<&SessionDescriptor> {
        self.session.as_ref()
    }

    pub fn transport(&self) -> &T {
        self.transmitter.transport()
    }

    /// Body listener for subscription `id`.
    ///
    /// Only records when the event target itself carries the subscription's
    /// marker class.
    pub fn handle_event<E: DomElement>(
        &mut self,
        id: SubscriptionId,
        event: &DomEvent<E>,
    ) -> Capture {
        if self.state != LifecycleState::Active {
            return Capture::Inactive;
        }

        let Some(subscription) = self.subscriptions.get(id.0) else {
            return Capture::UnknownSubscription;
        };

        let Some(target) = event.target.as_ref() else {
            if self.config.debug {
                tracing::debug!(event = %event.event_type, "Event without target ignored");
            }
            return Capture::MissingTarget;
        };

        if !target.has_class(&subscription.marker_class) {
            return Capture::Unmarked;
        }

        let category = subscription.category;
        let captured_at = self.host.now();
        self.recorder.record(event, category, captured_at);
        Capture::Recorded
    }

    /// Document `visibilitychange` listener.
    ///
    /// The first `Hidden` signal closes and sends the session; returns whether
    /// that happened on this call.
    pub fn handle_visibility_change(&mut self, visibility: VisibilityState) -> bool {
        if visibility != VisibilityState::Hidden || self.state != LifecycleState::Active {
            return false;
        }

        self.state = LifecycleState::Closing;
        self.finish();
        self.state = LifecycleState::Closed;
        true
    }

    fn finish(&mut self) {
        let Some(descriptor) = self.session.take() else {
            return;
        };

        let records = self.recorder.take_records();
        let descriptor = close_session(descriptor, records, &self.host, &self.config);

        if self.config.debug {
            tracing::info!("Sending interaction data to {}", descriptor.endpoint);
        }

        if let Err(e) = self.transmitter.send(&descriptor) {
            if self.config.debug {
                tracing::warn!(endpoint = %descriptor.endpoint, "Session delivery failed: {}", e);
            }
        }
    }
}

fn build_subscriptions(config: &InteractorConfig) -> Vec<Subscription> {
    config
        .capture_rules()
        .into_iter()
        .flat_map(|rule| {
            rule.events.iter().map(move |event_name| Subscription {
                category: rule.category,
                event_name: event_name.clone(),
                marker_class: rule.marker_class.to_string(),
            })
        })
        .collect()
}
