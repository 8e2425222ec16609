//! Per-unit-of-work context

use crate::address::Channel;
use crate::connection::Connection;

/// What the framework is delivering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Normal inbound traffic
    Message,
    /// Dedicated close signal, carries no payload
    Closed,
}

/// Mutable context threaded through one unit of work
///
/// The interceptor reads the routing fields and writes back `connection` and
/// `reused` when it finds an existing registration. Everything else belongs
/// to the surrounding framework.
#[derive(Debug, Clone)]
pub struct WorkContext {
    /// Kind of event being processed
    pub event: Event,
    /// Channel the unit of work addresses, when it names one
    pub channel: Option<Channel>,
    /// Connection handle carried by the unit of work
    pub connection: Option<Connection>,
    /// The reply terminates the connection; such a connection is never
    /// worth registering
    pub close_after_reply: bool,
    /// Set when the interceptor injected an already-registered connection
    pub reused: bool,
    /// Session identifier, input to scope derivation
    pub session: Option<String>,
}

impl WorkContext {
    /// Context for an inbound message
    pub fn message() -> Self {
        Self::with_event(Event::Message)
    }

    /// Context for the close signal
    pub fn closed() -> Self {
        Self::with_event(Event::Closed)
    }

    fn with_event(event: Event) -> Self {
        Self {
            event,
            channel: None,
            connection: None,
            close_after_reply: false,
            reused: false,
            session: None,
        }
    }

    /// Set the addressed channel
    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Attach the connection handle
    pub fn connection(mut self, connection: Connection) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Mark the unit of work as ending the connection after its reply
    pub fn close_after_reply(mut self) -> Self {
        self.close_after_reply = true;
        self
    }

    /// Set the session identifier
    pub fn session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_event() {
        assert_eq!(WorkContext::message().event, Event::Message);
        assert_eq!(WorkContext::closed().event, Event::Closed);
    }

    #[test]
    fn test_builder_fields() {
        let ctx = WorkContext::message()
            .channel(Channel::new("room", "lobby"))
            .connection(Connection::new(1u8))
            .close_after_reply()
            .session("sess-1");

        assert_eq!(ctx.channel, Some(Channel::new("room", "lobby")));
        assert!(ctx.connection.is_some());
        assert!(ctx.close_after_reply);
        assert!(!ctx.reused);
        assert_eq!(ctx.session.as_deref(), Some("sess-1"));
    }
}
