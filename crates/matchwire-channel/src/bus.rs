//! Event subscription surface: named events in, handlers out.
//!
//! Handlers are keyed by [`EventKind`] and run in registration order.
//! Dispatch is synchronous and runs every handler to completion, so
//! handlers never observe a half-processed event. The bus is generic
//! over a context type instead of capturing state in the closures,
//! which keeps the whole surface free of interior mutability.

use std::collections::HashMap;

use matchwire_protocol::{EventKind, ServerEvent};

/// A registered event handler.
pub type Handler<Ctx> = Box<dyn FnMut(&mut Ctx, &ServerEvent) + Send>;

/// Registration-ordered handler lists, one per event kind.
pub struct EventBus<Ctx> {
    handlers: HashMap<EventKind, Vec<Handler<Ctx>>>,
}

impl<Ctx> EventBus<Ctx> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Subscribes a handler to one event kind. Multiple handlers per
    /// kind are allowed; they run in the order they were registered.
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut Ctx, &ServerEvent) + Send + 'static,
    {
        self.handlers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Runs every handler registered for the event's kind.
    pub fn dispatch(&mut self, ctx: &mut Ctx, event: &ServerEvent) {
        if let Some(list) = self.handlers.get_mut(&event.kind()) {
            for handler in list.iter_mut() {
                handler(ctx, event);
            }
        }
    }

    /// Number of handlers registered for a kind.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl<Ctx> Default for EventBus<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}
