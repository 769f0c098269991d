// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{EventCode, EventContext};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Opaque identity of a listener on the [`EventBus`].
///
/// A listener may subscribe to several codes with the same identity, but
/// only once per code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wraps a raw identity value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One delivery of a fired event to a listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// The code the event was fired with.
    pub code: EventCode,
    /// The listener that fired it, if any.
    pub sender: Option<ListenerId>,
    /// The listener receiving this delivery.
    pub listener: ListenerId,
    /// The payload.
    pub context: EventContext,
}

type EventCallback = Rc<dyn Fn(&EventBus, &Event) -> bool>;

struct Registration {
    listener: ListenerId,
    callback: EventCallback,
}

/// A synchronous, single-threaded event bus.
///
/// The bus starts *uninitialized*; every operation other than
/// [`EventBus::initialize`] is reported as an error and refused until then.
///
/// Callbacks receive the bus itself, so a listener may fire further events
/// or change subscriptions from inside a delivery.
pub struct EventBus {
    table: RefCell<Option<HashMap<EventCode, Vec<Registration>>>>,
    next_listener: Cell<u64>,
}

impl EventBus {
    /// Creates an uninitialized bus.
    ///
    /// ## Returns
    /// A new instance of the EventBus struct.
    pub fn new() -> Self {
        Self {
            table: RefCell::new(None),
            next_listener: Cell::new(1),
        }
    }

    /// Moves the bus to the initialized state with an empty table.
    pub fn initialize(&self) {
        let mut table = self.table.borrow_mut();
        if table.is_none() {
            *table = Some(HashMap::new());
            log::info!("Event system initialized.");
        }
    }

    /// Drops every registration and returns to the uninitialized state.
    pub fn shutdown(&self) {
        if self.table.borrow_mut().take().is_some() {
            log::info!("Event system shut down.");
        }
    }

    /// Returns `true` once [`EventBus::initialize`] has run.
    pub fn is_initialized(&self) -> bool {
        self.table.borrow().is_some()
    }

    /// Hands out a listener identity that has not been issued by this bus before.
    pub fn allocate_listener(&self) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        ListenerId(id)
    }

    /// Subscribes `callback` to `code` under the identity `listener`.
    ///
    /// ## Arguments
    /// * `code` - The event code to listen for.
    /// * `listener` - The identity of the subscriber.
    /// * `callback` - Invoked on every delivery. Returning `true` consumes the event.
    ///
    /// ## Returns
    /// `false` if the bus is uninitialized, the code is out of range, or
    /// `listener` is already subscribed to `code`.
    pub fn register<F>(&self, code: EventCode, listener: ListenerId, callback: F) -> bool
    where
        F: Fn(&EventBus, &Event) -> bool + 'static,
    {
        let mut guard = self.table.borrow_mut();
        let Some(table) = guard.as_mut() else {
            log::error!("Event system not initialized, cannot register listener for {code}.");
            return false;
        };
        if !code.is_valid() {
            log::error!("Event code {code} is outside the valid range.");
            return false;
        }

        let registrations = table.entry(code).or_default();
        if registrations.iter().any(|r| r.listener == listener) {
            log::warn!("Listener {listener:?} is already registered for {code}.");
            return false;
        }

        registrations.push(Registration {
            listener,
            callback: Rc::new(callback),
        });
        true
    }

    /// Removes the subscription of `listener` to `code`.
    ///
    /// ## Returns
    /// `false` if the bus is uninitialized, nothing is registered for `code`,
    /// or `listener` is not among the subscribers.
    pub fn unregister(&self, code: EventCode, listener: ListenerId) -> bool {
        let mut guard = self.table.borrow_mut();
        let Some(table) = guard.as_mut() else {
            log::error!("Event system not initialized, cannot unregister listener for {code}.");
            return false;
        };

        let Some(registrations) = table.get_mut(&code).filter(|r| !r.is_empty()) else {
            log::warn!("No events registered for {code}.");
            return false;
        };
        let Some(index) = registrations.iter().position(|r| r.listener == listener) else {
            log::warn!("Event listener {listener:?} not registered for {code}.");
            return false;
        };

        registrations.remove(index);
        true
    }

    /// Delivers an event to every listener of `code`, in registration order.
    ///
    /// Delivery stops at the first callback that returns `true`. The listener
    /// list is captured when the fire begins, so subscriptions changed by a
    /// callback take effect on the next fire of that code.
    ///
    /// ## Arguments
    /// * `code` - The event code to fire.
    /// * `sender` - The identity of the firing listener, if any.
    /// * `context` - The payload delivered to each listener.
    ///
    /// ## Returns
    /// `true` if a listener consumed the event. Firing a code with no
    /// listeners returns `false` and is not an error.
    pub fn fire(&self, code: EventCode, sender: Option<ListenerId>, context: EventContext) -> bool {
        let snapshot: Vec<(ListenerId, EventCallback)> = {
            let guard = self.table.borrow();
            let Some(table) = guard.as_ref() else {
                log::error!("Event system not initialized, cannot fire {code}.");
                return false;
            };
            match table.get(&code) {
                Some(registrations) => registrations
                    .iter()
                    .map(|r| (r.listener, Rc::clone(&r.callback)))
                    .collect(),
                None => return false,
            }
        };

        for (listener, callback) in snapshot {
            let event = Event {
                code,
                sender,
                listener,
                context,
            };
            if callback(self, &event) {
                log::trace!("{code} consumed by listener {listener:?}.");
                return true;
            }
        }
        false
    }

    /// Number of listeners currently subscribed to `code`.
    pub fn listener_count(&self, code: EventCode) -> usize {
        self.table
            .borrow()
            .as_ref()
            .and_then(|table| table.get(&code))
            .map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("EventBus")
            .field("initialized", &table.is_some())
            .field("codes", &table.as_ref().map_or(0, HashMap::len))
            .finish()
    }
}
