//=========================================================================
// Stage
//=========================================================================
//
// Target of a scene's task scheduler. Task callbacks write presentation
// commands into the stage outbox; the scene forwards them to the host
// after stepping.
//
//=========================================================================

use std::f32::consts::PI;

use crate::core::host::{ElementId, HostCommand, HostFrame};
use crate::core::tasks::easing::{hover_in_scale, hover_out_scale};
use crate::core::tasks::{Task, TaskScheduler};

/// Scene-owned state animated by tasks.
#[derive(Debug, Default)]
pub struct Stage {
    commands: HostFrame,

    /// Total running time, refreshed before tasks are stepped.
    pub time: f32,

    /// Vertical camera offset.
    pub camera_y: f32,

    /// Set by a delayed task when the leaderboard should be fetched.
    pub fetch_due: bool,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: HostCommand) {
        self.commands.push(command);
    }

    /// Moves every pending command into `out`.
    pub fn flush_into(&mut self, out: &mut HostFrame) {
        out.append(&mut self.commands);
    }

    pub fn pending(&self) -> &[HostCommand] {
        &self.commands
    }
}

//=== Common Tasks ========================================================

/// Grows `element` to 1.25x over `duration`.
pub(crate) fn hover_in(tasks: &mut TaskScheduler<Stage>, element: ElementId, duration: f32) {
    tasks.start(Task::linear(duration, move |stage: &mut Stage, x| {
        stage.push(HostCommand::SetScale { element, scale: hover_in_scale(x) });
    }));
}

/// Settles `element` back to 1.0x over `duration`.
pub(crate) fn hover_out(tasks: &mut TaskScheduler<Stage>, element: ElementId, duration: f32) {
    tasks.start(Task::linear(duration, move |stage: &mut Stage, x| {
        stage.push(HostCommand::SetScale { element, scale: hover_out_scale(x) });
    }));
}

/// Idle sway of an element: `sin(time + phase)` scaled to ±`PI / divisor`.
pub(crate) fn sway(time: f32, phase: f32, divisor: f32) -> f32 {
    (time + phase).sin() * (PI / divisor)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_tasks_write_scale_commands() {
        let mut stage = Stage::new();
        let mut tasks = TaskScheduler::new();
        hover_in(&mut tasks, ElementId::Start, 0.3);

        tasks.step_all(0.3, &mut stage);

        assert_eq!(
            stage.pending(),
            &[HostCommand::SetScale { element: ElementId::Start, scale: 1.25 }]
        );

        let mut out = Vec::new();
        stage.flush_into(&mut out);
        assert_eq!(out.len(), 1);
        assert!(stage.pending().is_empty());
    }

    #[test]
    fn sway_is_bounded() {
        for i in 0..100 {
            assert!(sway(i as f32 * 0.1, 1.0, 32.0).abs() <= PI / 32.0);
        }
    }
}
