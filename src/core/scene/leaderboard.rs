//=========================================================================
// Leaderboard View
//=========================================================================
//
// Presents fetched leaderboard rows on either scene.
//
//   present(rows) ──> row texts (hidden)
//                 ──> staged reveal, one row per `reveal_delay`
//                 ──> endless wobble of every row
//
//=========================================================================

use log::debug;

use super::stage::{sway, Stage};
use crate::core::economy::format::grouped;
use crate::core::host::{ElementId, HostCommand};
use crate::core::remote::LeaderboardEntry;
use crate::core::tasks::{StagedSequence, Task, TaskScheduler};

/// Longest name shown unshortened.
const MAX_NAME_CHARS: usize = 12;

/// Characters kept when a name is shortened.
const SHORT_NAME_CHARS: usize = 10;

/// Display form of a leaderboard name; missing names render empty.
pub fn short_name(name: Option<&str>) -> String {
    match name {
        Some(name) if name.chars().count() > MAX_NAME_CHARS => {
            let mut short: String = name.chars().take(SHORT_NAME_CHARS).collect();
            short.push_str("..");
            short
        }
        Some(name) => name.to_string(),
        None => String::new(),
    }
}

/// `"{rank}. {name} - {value}"` with a grouped value.
pub fn row_text(entry: &LeaderboardEntry) -> String {
    format!(
        "{}. {} - {}",
        entry.rank,
        short_name(entry.display_name.as_deref()),
        grouped(entry.value)
    )
}

//=== LeaderboardView =====================================================

/// Rows currently shown and the scroll range they need.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LeaderboardView {
    rows: usize,
    row_spacing: f32,
}

impl LeaderboardView {
    /// Writes the row texts and starts the reveal and wobble tasks.
    pub fn present(
        entries: &[LeaderboardEntry],
        tasks: &mut TaskScheduler<Stage>,
        stage: &mut Stage,
        reveal_delay: f32,
        row_spacing: f32,
    ) -> Self {
        debug!(target: "scene", "Presenting {} leaderboard rows", entries.len());

        for (i, entry) in entries.iter().enumerate() {
            let element = ElementId::LeaderboardRow(i);
            stage.push(HostCommand::SetText { element, text: row_text(entry) });
            stage.push(HostCommand::SetVisible { element, visible: false });
        }

        let rows = entries.len();
        if rows > 0 {
            tasks.start(Task::staged(StagedSequence::uniform(
                rows,
                reveal_delay,
                |stage: &mut Stage, i| {
                    stage.push(HostCommand::SetVisible {
                        element: ElementId::LeaderboardRow(i),
                        visible: true,
                    });
                },
            )));

            tasks.start(Task::linear_repeat(1.0, move |stage: &mut Stage, _| {
                for i in 0..rows {
                    let radians = sway(stage.time, i as f32, 64.0);
                    stage.push(HostCommand::SetRotation {
                        element: ElementId::LeaderboardRow(i),
                        radians,
                    });
                }
            }));
        }

        Self { rows, row_spacing }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Lowest camera offset that still shows the last row.
    pub fn lowest_scroll(&self) -> f32 {
        -(self.rows.saturating_sub(1) as f32) * self.row_spacing
    }

    /// Applies a drag to `camera_y`, clamped to the rows' range.
    pub fn scroll(&self, camera_y: f32, delta: f32) -> f32 {
        (camera_y + delta).clamp(self.lowest_scroll(), 0.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
