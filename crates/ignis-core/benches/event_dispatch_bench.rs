use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use ignis_core::arena::Arena;
use ignis_core::input::{InputSystem, Key};
use ignis_core::{EventBus, EventCode, EventContext};

const TICK: EventCode = EventCode(0x0200);

fn bench_dispatch(c: &mut Criterion) {
    let bus = EventBus::new();
    bus.initialize();

    // 64 observers, none of which consume the event
    for _ in 0..64 {
        let id = bus.allocate_listener();
        bus.register(TICK, id, |_, event| black_box(event.context).as_u16().is_none());
    }

    let mut group = c.benchmark_group("Event Dispatch");

    group.bench_function("Fan-out to 64 listeners", |b| {
        b.iter(|| bus.fire(TICK, None, black_box(EventContext::resize(800, 600))));
    });

    group.bench_function("Key toggle through input snapshot", |b| {
        let slot = Arena::with_capacity(InputSystem::REQUIRED_BYTES)
            .allocate_slot(InputSystem::REQUIRED_BYTES)
            .unwrap();
        let mut input = InputSystem::new();
        input.initialize(slot).unwrap();
        let mut pressed = false;
        b.iter(|| {
            pressed = !pressed;
            input.process_key(&bus, black_box(Key::SPACE), pressed)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
