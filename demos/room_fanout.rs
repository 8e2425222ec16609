//! Room fan-out demo
//!
//! Three clients connect over in-process mpsc channels. The lifecycle
//! interceptor registers each of them on its first message, a broadcast
//! pushes a payload to every user except the sender, and a close signal
//! deregisters one client by handle identity.
//!
//! Run with: cargo run --example room_fanout

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::info;

use fanout_rs::{
    from_config, Address, Channel, ChannelPattern, Connection, ConnectionStore, Dispatch,
    DispatchResult, Exclude, Interceptor, Part, Pattern, RegistryConfig, Router, WorkContext,
    DEFAULT_SCOPE,
};

/// Delivers payload units into the target's mpsc inbox
struct MpscDispatch;

#[async_trait]
impl Dispatch for MpscDispatch {
    async fn dispatch(&self, connection: &Connection, units: &[Bytes]) -> DispatchResult {
        let tx = connection
            .downcast_ref::<mpsc::Sender<Bytes>>()
            .ok_or("connection is not an mpsc sender")?;
        for unit in units {
            tx.send(unit.clone()).await?;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fanout_rs=debug".into()),
        )
        .init();

    let store = from_config(&RegistryConfig::default().on_evict(|address, _, cause| {
        info!(address = %address, cause = %cause, "Entry evicted");
    }));
    let interceptor = Interceptor::new(store.clone());
    let router = Router::new(store.clone(), MpscDispatch);

    // Each client's first message registers its connection.
    let mut inboxes = Vec::new();
    let mut senders = Vec::new();
    for name in ["alice", "bob", "carol"] {
        let (tx, rx) = mpsc::channel::<Bytes>(8);
        let connection = Connection::new(tx);
        senders.push(connection.clone());

        let mut ctx = WorkContext::message()
            .channel(Channel::new("user", name))
            .connection(connection);
        interceptor.intercept(&mut ctx).await;
        inboxes.push((name, rx));
    }
    info!(registered = store.len().await, "Clients registered");

    // Push to every user except the sender.
    let sent = router
        .broadcast(
            &Pattern::new(
                Part::Any,
                ChannelPattern::parts(Part::exact("user"), Part::Any),
            ),
            &Exclude::address(Address::from_parts(DEFAULT_SCOPE, "user", "alice")),
            &[
                Bytes::from_static(b"alice: hello lobby"),
                Bytes::from_static(b"alice: anyone around?"),
            ],
        )
        .await;
    info!(sent, "Broadcast delivered");

    for (name, rx) in &mut inboxes {
        while let Ok(payload) = rx.try_recv() {
            info!(name, payload = %String::from_utf8_lossy(&payload), "Inbox");
        }
    }

    // Bob's transport drops; the close signal no longer names a channel, so
    // the interceptor falls back to reverse lookup by handle identity.
    let mut ctx = WorkContext::closed().connection(senders[1].clone());
    interceptor.intercept(&mut ctx).await;
    info!(registered = store.len().await, "After close");

    let stats = router.stats();
    info!(?stats, "Router counters");
}
