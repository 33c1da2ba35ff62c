//=========================================================================
// Task Scheduler
//=========================================================================
//
// Flat arena of tasks stepped once per frame against a single target.
//
// Architecture:
//   start(task) ──> tasks: Vec<(TaskHandle, Task<T>)>
//                          │
//   step_all(dt, &mut T) ──┴─> Task::step() ─┬─ Running  → keep
//                                             ├─ Complete → drop
//                                             └─ Fault    → log, drop
//
// A scheduler belongs to exactly one owner (a scene or the economy).
// Dropping or clearing it discards every pending task without invoking it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::task::{StepOutcome, Task};

//=== TaskHandle ==========================================================

/// Identifies a task started on a [`TaskScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

//=== TaskScheduler =======================================================

/// Runs a pool of independently progressing tasks over a target `T`.
pub struct TaskScheduler<T> {
    tasks: Vec<(TaskHandle, Task<T>)>,
    next_id: u64,
}

impl<T> TaskScheduler<T> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    //--- Task Management --------------------------------------------------

    /// Starts a task. It is stepped on every subsequent [`step_all`](Self::step_all).
    pub fn start(&mut self, task: Task<T>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push((handle, task));
        handle
    }

    /// Rewinds an active task to its start. Returns false if it is gone.
    pub fn restart(&mut self, handle: TaskHandle) -> bool {
        match self.tasks.iter_mut().find(|(h, _)| *h == handle) {
            Some((_, task)) => {
                task.restart();
                true
            }
            None => false,
        }
    }

    /// Discards every task without invoking it. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    //--- Update -----------------------------------------------------------

    /// Advances every active task by `dt` seconds.
    ///
    /// Completed tasks are removed. A task whose callback faults is logged
    /// and removed; the remaining tasks still run this step.
    pub fn step_all(&mut self, dt: f32, target: &mut T) {
        self.tasks.retain_mut(|(handle, task)| match task.step(dt, target) {
            Ok(StepOutcome::Running) => true,
            Ok(StepOutcome::Complete) => false,
            Err(fault) => {
                warn!(target: "tasks", "Dropping task {:?}: {}", handle, fault);
                false
            }
        });
    }

    //--- Queries ----------------------------------------------------------

    /// True while the task has not completed or faulted.
    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|(h, _)| *h == handle)
    }

    /// Number of active tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True if no task is active.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for TaskScheduler<T> {
    fn drop(&mut self) {
        if !self.tasks.is_empty() {
            debug!(target: "tasks", "Discarding {} pending tasks on teardown", self.tasks.len());
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tasks::{StagedSequence, TaskFault};

    #[derive(Default)]
    struct Probe {
        once: Vec<f32>,
        repeat: Vec<f32>,
        revealed: Vec<usize>,
        faults: u32,
    }

    //=====================================================================
    // Linear Tasks
    //=====================================================================

    #[test]
    fn non_repeating_task_sees_one_exactly_once() {
        let mut probe = Probe::default();
        let mut tasks = TaskScheduler::new();
        let handle = tasks.start(Task::linear(0.3, |p: &mut Probe, x| p.once.push(x)));

        for _ in 0..60 {
            tasks.step_all(1.0 / 60.0, &mut probe);
        }

        assert_eq!(probe.once.iter().filter(|x| **x == 1.0).count(), 1);
        assert_eq!(probe.once.last(), Some(&1.0));
        assert!(!tasks.is_active(handle));
        assert!(tasks.is_empty());
    }

    #[test]
    fn repeating_task_runs_until_cleared() {
        let mut probe = Probe::default();
        let mut tasks = TaskScheduler::new();
        let handle = tasks.start(Task::linear_repeat(1.0, |p: &mut Probe, x| p.repeat.push(x)));

        for _ in 0..300 {
            tasks.step_all(0.1, &mut probe);
        }

        assert!(tasks.is_active(handle));
        assert_eq!(probe.repeat.len(), 300);
        assert!(probe.repeat.iter().all(|x| (0.0..1.0).contains(x)));

        assert_eq!(tasks.clear(), 1);
        tasks.step_all(0.1, &mut probe);
        assert_eq!(probe.repeat.len(), 300);
    }

    #[test]
    fn task_started_is_stepped_on_next_frame() {
        let mut probe = Probe::default();
        let mut tasks = TaskScheduler::new();
        tasks.start(Task::linear(1.0, |p: &mut Probe, x| p.once.push(x)));

        assert!(probe.once.is_empty());
        tasks.step_all(0.25, &mut probe);
        assert_eq!(probe.once, vec![0.25]);
    }

    //=====================================================================
    // Fault Isolation
    //=====================================================================

    #[test]
    fn faulting_task_is_dropped_alone() {
        let mut probe = Probe::default();
        let mut tasks = TaskScheduler::new();

        let bad = tasks.start(Task::fallible(1.0, |p: &mut Probe, _| {
            p.faults += 1;
            Err(TaskFault::MissingTarget("row 3".into()))
        }));
        let good = tasks.start(Task::linear(1.0, |p: &mut Probe, x| p.once.push(x)));

        tasks.step_all(0.5, &mut probe);
        tasks.step_all(0.25, &mut probe);

        assert_eq!(probe.faults, 1);
        assert!(!tasks.is_active(bad));
        assert!(tasks.is_active(good));
        assert_eq!(probe.once, vec![0.5, 0.75]);
    }

    //=====================================================================
    // Staged Sequences
    //=====================================================================

    #[test]
    fn staged_sequence_fires_all_items_once() {
        let mut probe = Probe::default();
        let mut tasks = TaskScheduler::new();
        tasks.start(Task::staged(StagedSequence::uniform(
            4,
            0.1,
            |p: &mut Probe, i| p.revealed.push(i),
        )));

        for _ in 0..120 {
            tasks.step_all(1.0 / 60.0, &mut probe);
        }

        assert_eq!(probe.revealed, vec![0, 1, 2, 3]);
        assert!(tasks.is_empty());
    }

    #[test]
    fn restart_replays_an_active_sequence() {
        let mut probe = Probe::default();
        let mut tasks = TaskScheduler::new();
        let handle = tasks.start(Task::staged(StagedSequence::uniform(
            3,
            1.0,
            |p: &mut Probe, i| p.revealed.push(i),
        )));

        tasks.step_all(0.1, &mut probe);
        assert!(tasks.restart(handle));
        tasks.step_all(0.1, &mut probe);

        assert_eq!(probe.revealed, vec![0, 0]);
    }

    #[test]
    fn handles_are_unique() {
        let mut tasks: TaskScheduler<()> = TaskScheduler::new();
        let a = tasks.start(Task::linear(1.0, |_, _| {}));
        let b = tasks.start(Task::linear(1.0, |_, _| {}));
        assert_ne!(a, b);
        assert_eq!(tasks.len(), 2);
    }
}
