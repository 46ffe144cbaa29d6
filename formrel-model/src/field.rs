//! Capabilities the engine consumes from the form it is attached to.

use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::Result;

/// Anything that can drive a relation or be the target of one.
///
/// Only `id` and `value` are required. The toggles default to no-ops so
/// elements that cannot be hidden or disabled can still take part; the
/// built-in `show`/`hide`/`enable`/`disable` actions call them.
pub trait Field {
    fn id(&self) -> &str;

    /// Current value of the field.
    fn value(&self) -> Value;

    fn show(&self) {}

    fn hide(&self) {}

    fn enable(&self) {}

    fn disable(&self) {}
}

/// Handle returned by [`Container::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Receiver of container notifications.
///
/// Both callbacks run synchronously inside the notifier, so any error they
/// return surfaces to whoever triggered the notification.
pub trait ContainerListener {
    /// The container's structure is complete and its fields exist.
    fn on_ready(&self) -> Result<()>;

    /// An input field's value changed.
    fn on_field_change(&self, field: &dyn Field) -> Result<()>;
}

/// A form-like scope of fields.
pub trait Container {
    /// Every input-capable field currently reachable.
    fn input_fields(&self) -> Vec<Rc<dyn Field>>;

    /// Looks up an input field by identifier.
    fn field(&self, id: &str) -> Option<Rc<dyn Field>>;

    /// Looks up any element that may receive actions, inputs or not.
    fn target(&self, id: &str) -> Option<Rc<dyn Field>> {
        self.field(id)
    }

    fn is_ready(&self) -> bool;

    /// Registers a listener. The container keeps only a weak reference.
    fn subscribe(&self, listener: Weak<dyn ContainerListener>) -> ListenerId;

    /// Removes a listener. Returns `false` if it was not registered.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}
