use async_trait::async_trait;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::shared::DomainError;

pub mod activity_events;

/// Base trait for all domain events
/// All events must be Send + Sync for thread safety
pub trait DomainEvent: Send + Sync + Any {
    /// Convert to Any for type-safe downcasting
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    /// Fully qualified type name, used as the subscription key
    fn event_type_name(&self) -> &'static str;
}

#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError>;
}

/// Reacts to one concrete activity event
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    async fn handle(&self, event: &E) -> Result<(), DomainError>;
}

/// Handler as stored by a bus, keyed by the event type it accepts
#[async_trait]
pub trait ErasedEventHandler: Send + Sync {
    /// Must equal `event_type_name()` of the events routed here
    fn event_type(&self) -> &'static str;

    async fn dispatch(&self, event: &dyn DomainEvent) -> Result<(), DomainError>;
}

/// Binds a typed handler to the `E` events it subscribes to
pub struct Subscription<E, H> {
    handler: H,
    _event: PhantomData<fn() -> E>,
}

impl<E, H> Subscription<E, H>
where
    E: DomainEvent,
    H: EventHandler<E> + 'static,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _event: PhantomData,
        }
    }

    pub fn shared(handler: H) -> Arc<dyn ErasedEventHandler> {
        Arc::new(Self::new(handler))
    }
}

#[async_trait]
impl<E, H> ErasedEventHandler for Subscription<E, H>
where
    E: DomainEvent,
    H: EventHandler<E> + 'static,
{
    fn event_type(&self) -> &'static str {
        std::any::type_name::<E>()
    }

    async fn dispatch(&self, event: &dyn DomainEvent) -> Result<(), DomainError> {
        let typed = match event.as_any().downcast_ref::<E>() {
            Some(typed) if event.event_type_name() == self.event_type() => typed,
            _ => {
                return Err(DomainError::Infrastructure(format!(
                    "Event type mismatch: {} routed to a {} handler",
                    event.event_type_name(),
                    self.event_type()
                )))
            }
        };

        self.handler.handle(typed).await
    }
}
