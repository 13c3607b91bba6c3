//! Subscription manager tests over a channel-backed mock transport.

use std::collections::VecDeque;
use std::time::Duration;

use alloy_primitives::{address, Address, U256};
use futures_util::StreamExt;
use streambeat_sdk::decode::{EventKind, EventPayload, RawLog, ScoreEvent, StreamEvent};
use streambeat_sdk::subscription::EventStream;
use streambeat_sdk::{Config, PushTransport, StreamFilter, SubscriptionManager};
use tokio::sync::{mpsc, Mutex};
use tokio::time::timeout;
use tokio_stream::wrappers::ReceiverStream;

const CONTRACT: Address = address!("c947ef14370f74cce4d325ee4d83d9b4f3639da7");
const PLAYER: Address = address!("abcdef0123456789abcdef0123456789abcdef01");

type Message = streambeat_sdk::Result<EventPayload>;

/// Transport handing out pre-seeded channels, one per `subscribe` call.
struct ChannelTransport {
    channels: Mutex<VecDeque<mpsc::Receiver<Message>>>,
}

impl ChannelTransport {
    fn new(count: usize) -> (Self, Vec<mpsc::Sender<Message>>) {
        let mut senders = Vec::with_capacity(count);
        let mut receivers = VecDeque::with_capacity(count);
        for _ in 0..count {
            let (tx, rx) = mpsc::channel(16);
            senders.push(tx);
            receivers.push_back(rx);
        }
        (
            Self {
                channels: Mutex::new(receivers),
            },
            senders,
        )
    }
}

impl PushTransport for ChannelTransport {
    async fn subscribe(&self, filter: StreamFilter) -> streambeat_sdk::Result<EventStream> {
        assert_eq!(filter.contract, CONTRACT);
        let rx = self
            .channels
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| streambeat_sdk::Error::transport("transport unavailable"))?;
        Ok(ReceiverStream::new(rx).boxed())
    }
}

fn score_log(score: u64, timestamp: u64) -> EventPayload {
    let mut player_word = [0u8; 32];
    player_word[12..].copy_from_slice(PLAYER.as_slice());
    EventPayload::from(RawLog {
        topics: vec![EventKind::ScoreSubmitted.topic0(), player_word.into()],
        data: alloy_primitives::Bytes::from_iter(
            U256::from(score)
                .to_be_bytes::<32>()
                .into_iter()
                .chain(U256::from(timestamp).to_be_bytes::<32>()),
        ),
    })
}

fn manager(transport: ChannelTransport) -> SubscriptionManager<ChannelTransport> {
    let config = Config::new(Some(CONTRACT));
    SubscriptionManager::new(&config, transport)
}

async fn recv(rx: &mut mpsc::UnboundedReceiver<StreamEvent>) -> eyre::Result<StreamEvent> {
    timeout(Duration::from_secs(5), rx.recv())
        .await?
        .ok_or_else(|| eyre::eyre!("event channel closed"))
}

#[tokio::test]
async fn delivers_events_in_transport_order() -> eyre::Result<()> {
    let (transport, senders) = ChannelTransport::new(1);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let mut handle = manager(transport).subscribe(EventKind::ScoreSubmitted, move |event| {
        let _ = events_tx.send(event);
    });

    senders[0].send(Ok(score_log(100, 10))).await?;
    senders[0].send(Ok(score_log(200, 20))).await?;

    assert_eq!(
        recv(&mut events_rx).await?,
        StreamEvent::ScoreSubmitted(ScoreEvent {
            player: PLAYER,
            score: 100,
            timestamp: 10,
        })
    );
    assert_eq!(
        recv(&mut events_rx).await?,
        StreamEvent::ScoreSubmitted(ScoreEvent {
            player: PLAYER,
            score: 200,
            timestamp: 20,
        })
    );

    handle.unsubscribe();
    Ok(())
}

#[tokio::test]
async fn transport_error_does_not_unsubscribe() -> eyre::Result<()> {
    let (transport, senders) = ChannelTransport::new(1);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let _handle = manager(transport).subscribe(EventKind::ScoreSubmitted, move |event| {
        let _ = events_tx.send(event);
    });

    senders[0].send(Ok(score_log(1, 1))).await?;
    senders[0]
        .send(Err(streambeat_sdk::Error::transport("websocket dropped")))
        .await?;
    senders[0].send(Ok(score_log(2, 2))).await?;

    // Both valid events arrive; the in-between error is logged and skipped.
    let first = recv(&mut events_rx).await?;
    let second = recv(&mut events_rx).await?;
    assert_eq!(first.kind(), EventKind::ScoreSubmitted);
    let StreamEvent::ScoreSubmitted(event) = second else {
        panic!("wrong event kind");
    };
    assert_eq!(event.score, 2);
    Ok(())
}

#[tokio::test]
async fn malformed_payload_still_signals_refresh() -> eyre::Result<()> {
    let (transport, senders) = ChannelTransport::new(1);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let _handle = manager(transport).subscribe(EventKind::ScoreSubmitted, move |event| {
        let _ = events_tx.send(event);
    });

    // Garbage data: the callback still fires with a placeholder.
    let mut player_word = [0u8; 32];
    player_word[12..].copy_from_slice(PLAYER.as_slice());
    senders[0]
        .send(Ok(EventPayload::from(RawLog {
            topics: vec![EventKind::ScoreSubmitted.topic0(), player_word.into()],
            data: alloy_primitives::Bytes::from_static(&[0xff; 7]),
        })))
        .await?;

    let StreamEvent::ScoreSubmitted(event) = recv(&mut events_rx).await? else {
        panic!("wrong event kind");
    };
    assert!(event.is_placeholder());
    assert_eq!(event.player, PLAYER);
    Ok(())
}

#[tokio::test]
async fn unconfigured_contract_is_a_noop() -> eyre::Result<()> {
    let (transport, _senders) = ChannelTransport::new(1);
    let config = Config::new(None);
    let manager = SubscriptionManager::new(&config, transport);

    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<StreamEvent>();
    let mut handle = manager.subscribe(EventKind::ScoreSubmitted, move |event| {
        let _ = events_tx.send(event);
    });

    assert!(!handle.is_active());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(events_rx.try_recv().is_err());

    // Safe to call any number of times on a channel that never opened.
    handle.unsubscribe();
    handle.unsubscribe();
    Ok(())
}

#[tokio::test]
async fn failed_setup_still_returns_a_handle() -> eyre::Result<()> {
    // Zero seeded channels: the transport's subscribe call itself fails.
    let (transport, _) = ChannelTransport::new(0);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<StreamEvent>();

    let mut handle = manager(transport).subscribe(EventKind::PrizePoolUpdated, move |event| {
        let _ = events_tx.send(event);
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(events_rx.try_recv().is_err());
    handle.unsubscribe();
    handle.unsubscribe();
    Ok(())
}

#[tokio::test]
async fn same_kind_opens_independent_channels() -> eyre::Result<()> {
    let (transport, senders) = ChannelTransport::new(2);
    let manager = manager(transport);

    let (first_tx, mut first_rx) = mpsc::unbounded_channel();
    let (second_tx, mut second_rx) = mpsc::unbounded_channel();
    let _first = manager.subscribe(EventKind::ScoreSubmitted, move |event| {
        let _ = first_tx.send(event);
    });
    let _second = manager.subscribe(EventKind::ScoreSubmitted, move |event| {
        let _ = second_tx.send(event);
    });

    // The two spawned consumers race for the seeded channels, so only the
    // one-event-per-channel property is asserted, not the assignment.
    senders[0].send(Ok(score_log(1, 1))).await?;
    senders[1].send(Ok(score_log(2, 2))).await?;

    let StreamEvent::ScoreSubmitted(first) = recv(&mut first_rx).await? else {
        panic!("wrong event kind");
    };
    let StreamEvent::ScoreSubmitted(second) = recv(&mut second_rx).await? else {
        panic!("wrong event kind");
    };
    let mut scores = [first.score, second.score];
    scores.sort_unstable();
    assert_eq!(scores, [1, 2]);
    Ok(())
}

#[tokio::test]
async fn drop_tears_the_channel_down() -> eyre::Result<()> {
    let (transport, senders) = ChannelTransport::new(1);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let handle = manager(transport).subscribe(EventKind::ScoreSubmitted, move |event| {
        let _ = events_tx.send(event);
    });

    senders[0].send(Ok(score_log(1, 1))).await?;
    recv(&mut events_rx).await?;

    drop(handle);
    // The consuming task is aborted; the callback sender eventually drops.
    timeout(Duration::from_secs(5), async {
        while events_rx.recv().await.is_some() {}
    })
    .await?;
    Ok(())
}
