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

use super::SubsystemKind;
use crate::arena::ArenaRegion;
use crate::error::BootError;
use crate::event::EventBus;
use crate::input::InputSystem;
use crate::logging::LoggingSystem;
use crate::memory::MemorySystem;
use crate::platform::Platform;
use crate::renderer::RendererFrontend;

/// Subsystems filled in while the boot sequence runs.
///
/// Initializers check the slots of the subsystems they depend on and store
/// their own live instance in their slot.
#[derive(Default)]
pub struct SubsystemSlots {
    /// The event bus.
    pub events: Option<EventBus>,
    /// Tagged memory accounting.
    pub memory: Option<MemorySystem>,
    /// The console logger.
    pub logging: Option<LoggingSystem>,
    /// The input snapshot.
    pub input: Option<InputSystem>,
    /// The window and message pump.
    pub platform: Option<Box<dyn Platform>>,
    /// The renderer frontend.
    pub renderer: Option<RendererFrontend>,
    placements: Vec<(SubsystemKind, ArenaRegion)>,
}

impl SubsystemSlots {
    pub(super) fn record_placement(&mut self, kind: SubsystemKind, region: ArenaRegion) {
        self.placements.push((kind, region));
    }

    /// Arena regions of every booted subsystem, in boot order.
    pub fn placements(&self) -> &[(SubsystemKind, ArenaRegion)] {
        &self.placements
    }

    /// The arena region reserved for `kind`, if it booted.
    pub fn placement(&self, kind: SubsystemKind) -> Option<ArenaRegion> {
        self.placements
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, region)| *region)
    }

    /// Shuts down every filled slot in reverse boot order and empties it.
    pub fn shutdown(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.shutdown();
        }
        if let Some(mut platform) = self.platform.take() {
            platform.shutdown();
        }
        if let Some(mut input) = self.input.take() {
            input.shutdown();
        }
        if let Some(logging) = self.logging.take() {
            logging.shutdown();
        }
        if self.memory.take().is_some() {
            log::info!("Memory subsystem shut down.");
        }
        if let Some(events) = self.events.take() {
            events.shutdown();
        }
        self.placements.clear();
    }

    /// Converts a complete boot into [`Subsystems`].
    ///
    /// ## Errors
    /// [`BootError::Missing`] if any engine subsystem was never booted. The
    /// booted ones are shut down first.
    pub fn into_subsystems(mut self) -> Result<Subsystems, BootError> {
        let placements = std::mem::take(&mut self.placements);
        match (
            self.events.take(),
            self.memory.take(),
            self.logging.take(),
            self.input.take(),
            self.platform.take(),
            self.renderer.take(),
        ) {
            (Some(events), Some(memory), Some(logging), Some(input), Some(platform), Some(renderer)) => {
                Ok(Subsystems {
                    events,
                    memory,
                    logging,
                    input,
                    platform,
                    renderer,
                    placements,
                })
            }
            (events, memory, logging, input, platform, renderer) => {
                let mut partial = SubsystemSlots {
                    events,
                    memory,
                    logging,
                    input,
                    platform,
                    renderer,
                    placements,
                };
                // At least one slot is empty in this arm, so the chain ends on renderer.
                let missing = if partial.events.is_none() {
                    SubsystemKind::Events
                } else if partial.memory.is_none() {
                    SubsystemKind::Memory
                } else if partial.logging.is_none() {
                    SubsystemKind::Logging
                } else if partial.input.is_none() {
                    SubsystemKind::Input
                } else if partial.platform.is_none() {
                    SubsystemKind::Platform
                } else {
                    SubsystemKind::Renderer
                };
                log::error!("FATAL: boot finished without the {missing} subsystem.");
                partial.shutdown();
                Err(BootError::Missing(missing))
            }
        }
    }
}

impl std::fmt::Debug for SubsystemSlots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsystemSlots")
            .field("placements", &self.placements)
            .finish_non_exhaustive()
    }
}

/// The fully booted engine subsystems.
pub struct Subsystems {
    /// The event bus.
    pub events: EventBus,
    /// Tagged memory accounting.
    pub memory: MemorySystem,
    /// The console logger.
    pub logging: LoggingSystem,
    /// The input snapshot.
    pub input: InputSystem,
    /// The window and message pump.
    pub platform: Box<dyn Platform>,
    /// The renderer frontend.
    pub renderer: RendererFrontend,
    placements: Vec<(SubsystemKind, ArenaRegion)>,
}

impl Subsystems {
    /// Arena regions of every subsystem, in boot order.
    pub fn placements(&self) -> &[(SubsystemKind, ArenaRegion)] {
        &self.placements
    }

    /// Shuts everything down in reverse boot order.
    pub fn shutdown(self) {
        let mut slots = SubsystemSlots {
            events: Some(self.events),
            memory: Some(self.memory),
            logging: Some(self.logging),
            input: Some(self.input),
            platform: Some(self.platform),
            renderer: Some(self.renderer),
            placements: self.placements,
        };
        slots.shutdown();
    }
}

impl std::fmt::Debug for Subsystems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subsystems")
            .field("events", &self.events)
            .field("renderer", &self.renderer)
            .field("placements", &self.placements)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::config::LoggingConfig;
    use crate::platform::HeadlessPlatform;

    #[test]
    fn incomplete_slots_report_first_missing_and_shut_down() {
        let platform = HeadlessPlatform::new();
        let recorder = platform.recorder();
        let events = EventBus::new();
        events.initialize();

        let slots = SubsystemSlots {
            events: Some(events),
            platform: Some(Box::new(platform)),
            ..Default::default()
        };
        let err = slots.into_subsystems().unwrap_err();

        assert!(matches!(err, BootError::Missing(SubsystemKind::Memory)));
        assert!(recorder.shut_down(), "Booted platform must be shut down");
    }

    #[test]
    fn shutdown_empties_every_slot() {
        let mut arena = Arena::with_capacity(InputSystem::REQUIRED_BYTES + MemorySystem::REQUIRED_BYTES);
        let mut input = InputSystem::new();
        input
            .initialize(arena.allocate_slot(InputSystem::REQUIRED_BYTES).unwrap())
            .unwrap();
        let memory = MemorySystem::new(arena.allocate_slot(MemorySystem::REQUIRED_BYTES).unwrap()).unwrap();
        let mut slots = SubsystemSlots {
            input: Some(input),
            memory: Some(memory),
            ..Default::default()
        };
        slots.shutdown();
        assert!(slots.input.is_none());
        assert!(slots.memory.is_none());
    }

    #[test]
    fn each_empty_slot_reports_its_own_kind() {
        let mut arena = Arena::with_capacity(InputSystem::REQUIRED_BYTES + MemorySystem::REQUIRED_BYTES);
        let mut input = InputSystem::new();
        input
            .initialize(arena.allocate_slot(InputSystem::REQUIRED_BYTES).unwrap())
            .unwrap();
        let memory = MemorySystem::new(arena.allocate_slot(MemorySystem::REQUIRED_BYTES).unwrap()).unwrap();
        let events = EventBus::new();
        events.initialize();
        let platform = HeadlessPlatform::new();
        let recorder = platform.recorder();

        let slots = SubsystemSlots {
            events: Some(events),
            memory: Some(memory),
            logging: Some(LoggingSystem::initialize(&LoggingConfig::default()).unwrap()),
            input: Some(input),
            platform: Some(Box::new(platform)),
            ..Default::default()
        };
        let err = slots.into_subsystems().unwrap_err();
        assert!(matches!(err, BootError::Missing(SubsystemKind::Renderer)));
        assert!(recorder.shut_down());

        let err = SubsystemSlots::default().into_subsystems().unwrap_err();
        assert!(matches!(err, BootError::Missing(SubsystemKind::Events)));
    }
}
