//! Automatic registration and removal around units of work
//!
//! The interceptor sits in the framework's processing path and keeps the
//! registry consistent with connection lifetimes without application code:
//! first sight of a channel-addressed message registers the connection, the
//! close signal removes it, and a message for an already-registered channel
//! gets the stored connection injected instead of creating a second entry.

use std::sync::Arc;

use tracing::debug;

use crate::address::{Address, Channel};
use crate::lifecycle::context::{Event, WorkContext};
use crate::registry::store::ConnectionStore;

/// Scope used when no scope function is installed
pub const DEFAULT_SCOPE: &str = "global";

/// Derives the addressing scope from the current unit of work
///
/// Evaluated fresh on every interception, so scope can follow session or
/// tenant state.
pub type ScopeFn = Arc<dyn Fn(&WorkContext) -> String + Send + Sync>;

/// Registry maintenance hooked into the message path
pub struct Interceptor {
    store: Arc<dyn ConnectionStore>,
    scope_fn: ScopeFn,
}

impl Interceptor {
    /// Interceptor with the constant default scope
    pub fn new(store: Arc<dyn ConnectionStore>) -> Self {
        Self::with_scope_fn(store, Arc::new(|_: &WorkContext| DEFAULT_SCOPE.to_string()))
    }

    /// Interceptor with a caller-supplied scope function
    pub fn with_scope_fn(store: Arc<dyn ConnectionStore>, scope_fn: ScopeFn) -> Self {
        Self { store, scope_fn }
    }

    fn address_for(&self, ctx: &WorkContext, channel: &Channel) -> Address {
        Address::new((self.scope_fn)(ctx), channel.clone())
    }

    /// Process one unit of work
    pub async fn intercept(&self, ctx: &mut WorkContext) {
        match ctx.event {
            Event::Closed => self.handle_closed(ctx).await,
            Event::Message => self.handle_message(ctx).await,
        }
    }

    /// The close signal carries no payload; when the context no longer
    /// yields a channel the entry is found by handle identity instead.
    async fn handle_closed(&self, ctx: &WorkContext) {
        if let Some(channel) = &ctx.channel {
            let address = self.address_for(ctx, channel);
            debug!(address = %address, "Deregistering closed connection");
            self.store.remove(&address).await;
            return;
        }

        if let Some(connection) = &ctx.connection {
            if let Some(address) = self.store.find_by_connection(connection).await {
                debug!(address = %address, "Deregistering closed connection by identity");
                self.store.remove(&address).await;
            }
        }
    }

    async fn handle_message(&self, ctx: &mut WorkContext) {
        let channel = match &ctx.channel {
            Some(channel) => channel.clone(),
            None => return,
        };
        let address = self.address_for(ctx, &channel);

        if let Some(existing) = self.store.get(&address).await {
            debug!(address = %address, "Reusing registered connection");
            ctx.connection = Some(existing);
            ctx.reused = true;
            return;
        }

        if ctx.close_after_reply || ctx.reused {
            return;
        }

        if let Some(connection) = &ctx.connection {
            debug!(address = %address, "Registering connection");
            self.store.put(address, connection.clone()).await;
        }
    }
}
