//! Transport-side delivery primitive

use async_trait::async_trait;
use bytes::Bytes;

use crate::connection::Connection;

/// Outcome of handing a payload batch to the transport
pub type DispatchResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Delivery seam between the router and the transport
///
/// The router hands all payload units for one target over in a single call,
/// so the batch is atomic relative to other targets. Delivery is a black
/// box: no timeout or cancellation is imposed at this layer.
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Deliver the payload units, in order, to one connection
    async fn dispatch(&self, connection: &Connection, units: &[Bytes]) -> DispatchResult;
}
