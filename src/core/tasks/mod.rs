//=========================================================================
// Task System
//=========================================================================
//
// Cooperative, time-sliced tasks for every animation and staged reveal.
//
// Architecture:
//   TaskScheduler<T>
//     └─ tasks: Vec<(TaskHandle, Task<T>)>
//          ├─ linear / linear_repeat / after
//          └─ staged (StagedSequence<T>)
//
// Flow:
//   owner.update() → scheduler.step_all(real_dt, &mut target)
//
// Nothing runs between frames. "Suspension" is a task keeping its elapsed
// time until the next step.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod easing;
mod scheduler;
mod sequence;
mod task;

//=== Public API ==========================================================

pub use scheduler::{TaskHandle, TaskScheduler};
pub use sequence::StagedSequence;
pub use task::{Task, TaskFault, TaskResult};
