//! Event plumbing shared by the storefront's aggregates.
//!
//! Events describe accepted state changes; envelopes stamp them with stream
//! metadata; the bus fans them out to whoever wants to re-render.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
