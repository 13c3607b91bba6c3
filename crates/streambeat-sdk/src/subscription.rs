//! Live event subscriptions.
//!
//! [`SubscriptionManager::subscribe`] opens one logical channel per call and
//! delivers decoded events to a callback. The returned handle is the scoped
//! owner of the channel: `unsubscribe` is idempotent and dropping the handle
//! tears the channel down on every exit path. Channel-level errors are logged
//! and skipped (the transport reconnects itself), and a failed setup still
//! yields a usable (no-op) handle, so `subscribe` never raises.

use std::future::Future;
use std::sync::Arc;

use alloy_primitives::{Address, B256};
use futures_util::{stream::BoxStream, StreamExt};
use streambeat_decode::{decode_or_placeholder, EventKind, EventPayload, StreamEvent};
use tokio::task::JoinHandle;

use crate::config::Config;

/// Log filter identifying one event kind on one contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFilter {
    /// Event source contract.
    pub contract: Address,
    /// Signature hash of the subscribed event.
    pub topic0: B256,
}

impl StreamFilter {
    /// Build the filter for an event kind on `contract`.
    pub fn new(contract: Address, kind: EventKind) -> Self {
        Self {
            contract,
            topic0: kind.topic0(),
        }
    }
}

/// Stream of payloads delivered over one channel. Channel-level errors arrive
/// in-stream; the transport keeps the channel alive and reconnects itself.
pub type EventStream = BoxStream<'static, crate::Result<EventPayload>>;

/// Push transport boundary: subscribe-by-filter, delivery as a stream.
pub trait PushTransport {
    /// Open a push channel for `filter`.
    fn subscribe(
        &self,
        filter: StreamFilter,
    ) -> impl Future<Output = crate::Result<EventStream>> + Send;
}

/// Handle owning one subscription channel.
///
/// Dropping the handle unsubscribes; calling [`unsubscribe`](Self::unsubscribe)
/// any number of times is safe, including on a handle whose channel never
/// opened.
#[derive(Debug)]
pub struct SubscriptionHandle {
    task: Option<JoinHandle<()>>,
}

impl SubscriptionHandle {
    /// A handle with no channel behind it.
    pub const fn noop() -> Self {
        Self { task: None }
    }

    /// Whether a channel task is still attached.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Close the channel. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Opens push channels for rewards-contract events and dispatches decoded
/// events to callbacks.
#[derive(Debug)]
pub struct SubscriptionManager<T> {
    contract: Option<Address>,
    transport: Arc<T>,
}

impl<T> Clone for SubscriptionManager<T> {
    fn clone(&self) -> Self {
        Self {
            contract: self.contract,
            transport: self.transport.clone(),
        }
    }
}

impl<T> SubscriptionManager<T> {
    /// Create a manager over `transport`. A configuration without a rewards
    /// contract disables subscriptions: every `subscribe` becomes a no-op.
    pub fn new(config: &Config, transport: T) -> Self {
        Self {
            contract: config.rewards_contract,
            transport: Arc::new(transport),
        }
    }
}

impl<T> SubscriptionManager<T>
where
    T: PushTransport + Send + Sync + 'static,
{
    /// Subscribe to `kind`, delivering decoded events to `on_event`.
    ///
    /// Each call opens an independent channel; subscribing to the same kind
    /// twice yields two channels. Events are delivered in transport order,
    /// with no ordering guarantee across kinds. Setup failures are logged and
    /// swallowed; the returned handle is then a no-op.
    pub fn subscribe<F>(&self, kind: EventKind, on_event: F) -> SubscriptionHandle
    where
        F: Fn(StreamEvent) + Send + 'static,
    {
        let Some(contract) = self.contract else {
            tracing::warn!(%kind, "rewards contract not configured, skipping subscription");
            return SubscriptionHandle::noop();
        };

        let filter = StreamFilter::new(contract, kind);
        let transport = self.transport.clone();
        let task = tokio::spawn(async move {
            let mut stream = match transport.subscribe(filter).await {
                Ok(stream) => stream,
                Err(error) => {
                    tracing::warn!(%kind, %error, "failed to open event channel");
                    return;
                }
            };
            while let Some(message) = stream.next().await {
                match message {
                    Ok(payload) => on_event(decode_or_placeholder(kind, &payload)),
                    Err(error) => {
                        // Channel-level error: log and keep consuming. The
                        // transport reconnects itself.
                        tracing::warn!(%kind, %error, "event channel error");
                    }
                }
            }
            tracing::debug!(%kind, "event channel closed");
        });

        SubscriptionHandle { task: Some(task) }
    }
}
