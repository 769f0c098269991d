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

//! Provides the synchronous publish/subscribe primitives shared by every subsystem.
//!
//! The [`EventBus`] maps an [`EventCode`] to an ordered list of listeners.
//! Firing delivers the event to each listener in registration order on the
//! calling thread, stopping at the first listener that consumes it.
//! Payloads travel in a small fixed-size [`EventContext`].

mod bus;
mod code;
mod context;

pub use self::bus::{Event, EventBus, ListenerId};
pub use self::code::EventCode;
pub use self::context::EventContext;
