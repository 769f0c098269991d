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

use ignis_core::arena::Arena;
use ignis_core::input::{InputSystem, Key};
use ignis_core::{EventBus, EventCode, EventContext, ListenerId};
use std::cell::RefCell;
use std::rc::Rc;

const PING: EventCode = EventCode(0x0100);

fn live_bus() -> EventBus {
    let bus = EventBus::new();
    bus.initialize();
    bus
}

/// Registers a listener that logs its name and answers `consume`.
fn listen(bus: &EventBus, log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str, consume: bool) -> ListenerId {
    let id = bus.allocate_listener();
    let log = Rc::clone(log);
    assert!(bus.register(PING, id, move |_, _| {
        log.borrow_mut().push(name);
        consume
    }));
    id
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let bus = live_bus();
    let id = bus.allocate_listener();

    assert!(bus.register(PING, id, |_, _| false));
    assert!(!bus.register(PING, id, |_, _| true), "Second registration must fail");
    assert_eq!(bus.listener_count(PING), 1);
}

#[test]
fn test_fire_without_listeners_returns_false() {
    let bus = live_bus();
    assert!(!bus.fire(PING, None, EventContext::None));

    // A code whose only listener was removed behaves the same way.
    let id = bus.allocate_listener();
    bus.register(PING, id, |_, _| panic!("removed listener invoked"));
    bus.unregister(PING, id);
    assert!(!bus.fire(PING, None, EventContext::None));
}

#[test]
fn test_consumption_stops_delivery() {
    // --- 1. ARRANGE ---
    let bus = live_bus();
    let log = Rc::new(RefCell::new(Vec::new()));
    listen(&bus, &log, "first", false);
    listen(&bus, &log, "second", true);
    listen(&bus, &log, "third", false);

    // --- 2. ACT ---
    let consumed = bus.fire(PING, None, EventContext::None);

    // --- 3. ASSERT ---
    assert!(consumed);
    assert_eq!(*log.borrow(), vec!["first", "second"], "Third listener must never run");
}

#[test]
fn test_unconsumed_event_reaches_everyone_in_order() {
    let bus = live_bus();
    let log = Rc::new(RefCell::new(Vec::new()));
    listen(&bus, &log, "a", false);
    listen(&bus, &log, "b", false);
    listen(&bus, &log, "c", false);

    assert!(!bus.fire(PING, None, EventContext::None));
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn test_unregister_removes_exactly_one_entry() {
    // --- 1. ARRANGE ---
    let bus = live_bus();
    let log = Rc::new(RefCell::new(Vec::new()));
    listen(&bus, &log, "a", false);
    let b = listen(&bus, &log, "b", false);
    listen(&bus, &log, "c", false);

    // --- 2. ACT ---
    assert!(bus.unregister(PING, b));
    assert!(!bus.unregister(PING, b), "Second removal finds nothing");
    bus.fire(PING, None, EventContext::None);

    // --- 3. ASSERT ---
    assert_eq!(bus.listener_count(PING), 2);
    assert_eq!(*log.borrow(), vec!["a", "c"], "Remaining listeners keep their order");
}

#[test]
fn test_unregister_unknown_code_fails() {
    let bus = live_bus();
    assert!(!bus.unregister(PING, ListenerId::from_raw(42)));
}

#[test]
fn test_repeated_key_press_fires_once() {
    // --- 1. ARRANGE ---
    let bus = live_bus();
    let mut input = InputSystem::new();
    let slot = Arena::with_capacity(InputSystem::REQUIRED_BYTES)
        .allocate_slot(InputSystem::REQUIRED_BYTES)
        .expect("snapshot should fit");
    input.initialize(slot).expect("slot should hold the snapshot");
    let keys = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&keys);
    let id = bus.allocate_listener();
    bus.register(EventCode::KEY_PRESSED, id, move |_, event| {
        if let Some(slots) = event.context.as_u16() {
            sink.borrow_mut().push(slots[0]);
        }
        false
    });

    // --- 2. ACT ---
    let first = input.process_key(&bus, Key::SPACE, true);
    let second = input.process_key(&bus, Key::SPACE, true);

    // --- 3. ASSERT ---
    assert!(first, "First press mutates state");
    assert!(!second, "Identical press is a no-op");
    assert_eq!(*keys.borrow(), vec![Key::SPACE.0]);
}
