//! Domain layer for billing: entities, webhook payloads, and the
//! payment event dispatcher.

pub mod dispatcher;
pub mod entities;
pub mod events;
