use async_trait::async_trait;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use streakcircle_domain::events::{DomainEvent, ErasedEventHandler, EventBus};
use streakcircle_domain::shared::DomainError;

/// In-memory event bus implementation
/// Handlers for one event run one after another; a failing handler is logged
/// and the remaining handlers still run.
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<String, Vec<Arc<dyn ErasedEventHandler>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe a handler under the event type it accepts
    pub async fn subscribe(&self, handler: Arc<dyn ErasedEventHandler>) {
        let event_type_name = handler.event_type();
        let mut handlers = self.handlers.write().await;

        handlers
            .entry(event_type_name.to_string())
            .or_default()
            .push(handler);

        info!("Subscribed handler for event type: {}", event_type_name);
    }

    /// Get the number of handlers for a specific event type
    pub async fn handler_count<E: DomainEvent + 'static>(&self) -> usize {
        let event_type_name = std::any::type_name::<E>();
        let handlers = self.handlers.read().await;
        handlers.get(event_type_name).map_or(0, |h| h.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();

        debug!("Publishing event: {}", event_type_name);

        // Clone the handler list so no lock is held while handlers run
        let event_handlers = {
            let handlers = self.handlers.read().await;
            handlers.get(event_type_name).cloned().unwrap_or_default()
        };

        if event_handlers.is_empty() {
            info!("No handlers registered for event type: {}", event_type_name);
            return Ok(());
        }

        for handler in event_handlers {
            if let Err(e) = handler.dispatch(event.as_ref()).await {
                error!("Handler failed to process event {}: {}", event_type_name, e);
            }
        }

        Ok(())
    }
}
