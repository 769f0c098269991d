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

//! Two-phase subsystem boot over the systems arena.
//!
//! Each [`SubsystemDescriptor`] declares how many arena bytes its subsystem
//! needs and carries the closure that brings it up. [`SubsystemRegistry::boot`]
//! first sums every requirement and refuses to start if the arena cannot hold
//! them all, then carves one slot per descriptor and runs the initializers
//! in registration order. The first failure shuts down everything booted so
//! far and aborts.
//!
//! The input snapshot and the memory counters live inside their slot. The
//! remaining subsystems reserve their inline footprint; their growable parts
//! (listener table, backend objects) stay on the heap.

mod slots;

pub use self::slots::{SubsystemSlots, Subsystems};

use crate::arena::{Arena, ArenaSlot};
use crate::config::ApplicationConfig;
use crate::error::{BootError, SubsystemError};
use crate::event::EventBus;
use crate::input::InputSystem;
use crate::logging::LoggingSystem;
use crate::memory::{MemorySystem, MemoryTag};
use crate::platform::{Platform, WindowSettings};
use crate::renderer::{RendererBackend, RendererFrontend};
use std::fmt;
use std::mem;

/// Identifies a bootable subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubsystemKind {
    /// The event bus.
    Events,
    /// Tagged memory accounting.
    Memory,
    /// The console logger.
    Logging,
    /// The input snapshot.
    Input,
    /// The window and message pump.
    Platform,
    /// The renderer frontend.
    Renderer,
    /// A subsystem added on top of the engine set.
    Extension(&'static str),
}

impl fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Events => write!(f, "events"),
            Self::Memory => write!(f, "memory"),
            Self::Logging => write!(f, "logging"),
            Self::Input => write!(f, "input"),
            Self::Platform => write!(f, "platform"),
            Self::Renderer => write!(f, "renderer"),
            Self::Extension(name) => write!(f, "{name}"),
        }
    }
}

type SubsystemInit = Box<dyn FnOnce(ArenaSlot, &mut SubsystemSlots) -> Result<(), SubsystemError>>;

/// One entry of the boot sequence.
pub struct SubsystemDescriptor {
    kind: SubsystemKind,
    requirement: usize,
    init: SubsystemInit,
}

impl SubsystemDescriptor {
    /// Describes a subsystem needing `requirement` arena bytes.
    ///
    /// ## Arguments
    /// * `kind` - Which subsystem this is.
    /// * `requirement` - Bytes to reserve in the arena before `init` runs.
    /// * `init` - Receives the reserved arena slot and stores the live subsystem in its slot.
    pub fn new<F>(kind: SubsystemKind, requirement: usize, init: F) -> Self
    where
        F: FnOnce(ArenaSlot, &mut SubsystemSlots) -> Result<(), SubsystemError> + 'static,
    {
        Self {
            kind,
            requirement,
            init: Box::new(init),
        }
    }

    /// The subsystem this descriptor boots.
    pub fn kind(&self) -> SubsystemKind {
        self.kind
    }

    /// Bytes reserved for it in the arena.
    pub fn requirement(&self) -> usize {
        self.requirement
    }
}

impl fmt::Debug for SubsystemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubsystemDescriptor")
            .field("kind", &self.kind)
            .field("requirement", &self.requirement)
            .finish_non_exhaustive()
    }
}

/// An ordered list of subsystems to boot.
#[derive(Debug, Default)]
pub struct SubsystemRegistry {
    descriptors: Vec<SubsystemDescriptor>,
}

impl SubsystemRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine's boot sequence: events, memory, logging, input, platform, renderer.
    ///
    /// The platform must start before the renderer, which needs a live window.
    pub fn engine(
        config: &ApplicationConfig,
        platform: Box<dyn Platform>,
        backend: Box<dyn RendererBackend>,
    ) -> Self {
        let arena_capacity = config.arena_capacity as u64;
        let logging = config.logging.clone();
        let settings = WindowSettings {
            title: config.name.clone(),
            x: config.start_pos_x,
            y: config.start_pos_y,
            width: config.width,
            height: config.height,
        };
        let app_name = config.name.clone();
        let platform_size = mem::size_of_val(platform.as_ref());
        let renderer_size = mem::size_of::<RendererFrontend>() + mem::size_of_val(backend.as_ref());

        Self::new()
            .with(SubsystemDescriptor::new(
                SubsystemKind::Events,
                mem::size_of::<EventBus>(),
                |_, slots| {
                    let events = EventBus::new();
                    events.initialize();
                    slots.events = Some(events);
                    Ok(())
                },
            ))
            .with(SubsystemDescriptor::new(
                SubsystemKind::Memory,
                MemorySystem::REQUIRED_BYTES,
                move |slot, slots| {
                    let mut memory = MemorySystem::new(slot)?;
                    memory.record_allocation(arena_capacity, MemoryTag::LinearAllocator);
                    slots.memory = Some(memory);
                    Ok(())
                },
            ))
            .with(SubsystemDescriptor::new(
                SubsystemKind::Logging,
                mem::size_of::<LoggingSystem>(),
                move |_, slots| {
                    slots.logging = Some(LoggingSystem::initialize(&logging)?);
                    Ok(())
                },
            ))
            .with(SubsystemDescriptor::new(
                SubsystemKind::Input,
                InputSystem::REQUIRED_BYTES,
                |slot, slots| {
                    let mut input = InputSystem::new();
                    input.initialize(slot)?;
                    slots.input = Some(input);
                    Ok(())
                },
            ))
            .with(SubsystemDescriptor::new(
                SubsystemKind::Platform,
                platform_size,
                move |_, slots| {
                    let mut platform = platform;
                    platform.startup(&settings)?;
                    slots.platform = Some(platform);
                    Ok(())
                },
            ))
            .with(SubsystemDescriptor::new(
                SubsystemKind::Renderer,
                renderer_size,
                move |_, slots| {
                    if slots.platform.is_none() {
                        return Err(SubsystemError::MissingDependency {
                            dependent: SubsystemKind::Renderer,
                            dependency: SubsystemKind::Platform,
                        });
                    }
                    let mut renderer = RendererFrontend::new(backend);
                    renderer.initialize(&app_name)?;
                    slots.renderer = Some(renderer);
                    Ok(())
                },
            ))
    }

    /// Appends a descriptor to the boot sequence.
    pub fn push(&mut self, descriptor: SubsystemDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Builder form of [`SubsystemRegistry::push`].
    pub fn with(mut self, descriptor: SubsystemDescriptor) -> Self {
        self.push(descriptor);
        self
    }

    /// The boot order.
    pub fn kinds(&self) -> Vec<SubsystemKind> {
        self.descriptors.iter().map(SubsystemDescriptor::kind).collect()
    }

    /// Sum of every descriptor's arena requirement, saturating on overflow.
    pub fn total_requirement(&self) -> usize {
        self.descriptors
            .iter()
            .fold(0usize, |sum, d| sum.saturating_add(d.requirement))
    }

    /// Boots every subsystem in order.
    ///
    /// ## Errors
    /// * [`BootError::ArenaTooSmall`] before any initializer runs, if the
    ///   summed requirement exceeds the arena's remaining space.
    /// * [`BootError::Subsystem`] if an initializer fails. Every subsystem
    ///   booted before it is shut down first.
    pub fn boot(self, arena: &mut Arena) -> Result<SubsystemSlots, BootError> {
        let required = self.total_requirement();
        let available = arena.remaining();
        if required > available {
            log::error!(
                "FATAL: subsystems require {required} bytes, the arena has {available} available."
            );
            return Err(BootError::ArenaTooSmall {
                required,
                available,
            });
        }

        let mut slots = SubsystemSlots::default();
        for descriptor in self.descriptors {
            let kind = descriptor.kind;
            let slot = match arena.allocate_slot(descriptor.requirement) {
                Ok(slot) => slot,
                Err(e) => {
                    slots.shutdown();
                    return Err(e.into());
                }
            };

            let region = slot.region();
            if let Err(source) = (descriptor.init)(slot, &mut slots) {
                log::error!("FATAL: failed to initialize {kind} subsystem: {source}");
                slots.shutdown();
                return Err(BootError::Subsystem { kind, source });
            }
            log::trace!(
                "Booted {kind} subsystem at arena offset {} ({} bytes).",
                region.offset(),
                region.len()
            );
            slots.record_placement(kind, region);
        }
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;
    use crate::renderer::HeadlessBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(kind: SubsystemKind, size: usize, log: &Rc<RefCell<Vec<SubsystemKind>>>) -> SubsystemDescriptor {
        let log = Rc::clone(log);
        SubsystemDescriptor::new(kind, size, move |_, _| {
            log.borrow_mut().push(kind);
            Ok(())
        })
    }

    #[test]
    fn engine_registry_boots_in_dependency_order() {
        let registry = SubsystemRegistry::engine(
            &ApplicationConfig::default(),
            Box::new(HeadlessPlatform::new()),
            Box::new(HeadlessBackend::new()),
        );
        assert_eq!(
            registry.kinds(),
            vec![
                SubsystemKind::Events,
                SubsystemKind::Memory,
                SubsystemKind::Logging,
                SubsystemKind::Input,
                SubsystemKind::Platform,
                SubsystemKind::Renderer,
            ]
        );
        assert!(registry.total_requirement() > 0);
    }

    #[test]
    fn regions_are_carved_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = SubsystemRegistry::new()
            .with(recording(SubsystemKind::Extension("a"), 16, &log))
            .with(recording(SubsystemKind::Extension("b"), 32, &log));
        let mut arena = Arena::with_capacity(64);

        let slots = registry.boot(&mut arena).expect("boot should succeed");
        assert_eq!(arena.used(), 48);
        assert_eq!(
            slots.placement(SubsystemKind::Extension("b")).map(|r| r.offset()),
            Some(16)
        );
        assert_eq!(
            *log.borrow(),
            vec![SubsystemKind::Extension("a"), SubsystemKind::Extension("b")]
        );
    }

    #[test]
    fn oversized_registry_fails_before_any_init() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = SubsystemRegistry::new()
            .with(recording(SubsystemKind::Extension("small"), 8, &log))
            .with(recording(SubsystemKind::Extension("huge"), 1024, &log));
        let mut arena = Arena::with_capacity(512);

        let err = registry.boot(&mut arena).unwrap_err();
        assert!(matches!(
            err,
            BootError::ArenaTooSmall {
                required: 1032,
                available: 512
            }
        ));
        assert!(log.borrow().is_empty(), "No initializer may run on a sizing failure");
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn overflowing_requirements_saturate() {
        let registry = SubsystemRegistry::new()
            .with(SubsystemDescriptor::new(SubsystemKind::Extension("a"), usize::MAX, |_, _| Ok(())))
            .with(SubsystemDescriptor::new(SubsystemKind::Extension("b"), 1, |_, _| Ok(())));
        assert_eq!(registry.total_requirement(), usize::MAX);
    }

    #[test]
    fn failing_init_aborts_and_reports_kind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = SubsystemRegistry::new()
            .with(recording(SubsystemKind::Extension("first"), 0, &log))
            .with(SubsystemDescriptor::new(SubsystemKind::Extension("broken"), 0, |_, _| {
                Err(SubsystemError::Other("no device".into()))
            }))
            .with(recording(SubsystemKind::Extension("never"), 0, &log));

        let err = registry.boot(&mut Arena::with_capacity(0)).unwrap_err();
        assert!(matches!(
            err,
            BootError::Subsystem {
                kind: SubsystemKind::Extension("broken"),
                ..
            }
        ));
        assert_eq!(*log.borrow(), vec![SubsystemKind::Extension("first")]);
    }

    #[test]
    fn renderer_requires_platform() {
        let registry = SubsystemRegistry::new().with(SubsystemDescriptor::new(
            SubsystemKind::Renderer,
            0,
            |_, slots| {
                if slots.platform.is_none() {
                    return Err(SubsystemError::MissingDependency {
                        dependent: SubsystemKind::Renderer,
                        dependency: SubsystemKind::Platform,
                    });
                }
                Ok(())
            },
        ));
        let err = registry.boot(&mut Arena::with_capacity(0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "renderer subsystem failed to initialize: renderer requires platform to be booted first"
        );
    }

    #[test]
    fn invalid_log_level_aborts_engine_boot() {
        let mut config = ApplicationConfig::default();
        config.logging.level = "chatty".into();
        let platform = HeadlessPlatform::new();
        let recorder = platform.recorder();
        let registry = SubsystemRegistry::engine(
            &config,
            Box::new(platform),
            Box::new(HeadlessBackend::new()),
        );

        let err = registry
            .boot(&mut Arena::with_capacity(config.arena_capacity))
            .unwrap_err();
        assert!(matches!(
            err,
            BootError::Subsystem {
                kind: SubsystemKind::Logging,
                source: SubsystemError::Logging(_)
            }
        ));
        assert!(!recorder.started(), "Platform boots after logging and must not start");
    }
}
