//! Shared ECS pieces: the world factory, the frame stages with their system
//! sets, and the components and resources every gameplay crate touches.

mod components;
mod schedule;
mod sets;
mod time;

pub use components::{GravityState, Name, Transform};
pub use schedule::{EngineSchedule, EngineSchedules, MAX_FIXED_STEPS_PER_FRAME, create_world};
pub use sets::{FixedUpdateSet, PostUpdateSet, PreUpdateSet, UpdateSet};
pub use time::TimeRes;
