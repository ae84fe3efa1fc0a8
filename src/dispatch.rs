// Command dispatch - turns one prompt submission into a scrollback batch
//
// Each submission produces the complete ordered batch for that command,
// echo line first, so the event loop can append it atomically. Remote
// failures never escape: every call site degrades to a single warning
// line and the session stays usable.

use crate::client::GameClient;
use crate::command::Command;

/// Everything one command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Lines to append, in display order. First is always the echo.
    pub lines: Vec<String>,
    /// Set when a load was accepted - the session's advisory level
    /// bookkeeping follows the server's confirmation.
    pub new_level: Option<usize>,
}

/// Execute `raw` against the mission server.
///
/// Returns `None` for empty/whitespace input (nothing to do). Never
/// returns an error - transport and protocol failures are already
/// rendered into warning lines.
pub async fn dispatch<C: GameClient>(raw: &str, client: &C) -> Option<Dispatch> {
    let command = Command::parse(raw)?;

    let mut lines = vec![format!("> {raw}")];
    let mut new_level = None;

    match command {
        Command::List => match client.levels().await {
            Ok(missions) => {
                lines.push("📋 Available Missions:".to_string());
                for mission in &missions {
                    if mission.locked {
                        lines.push(format!("🔒 {} - {}", mission.index, mission.name));
                    } else if mission.completed {
                        lines.push(format!(
                            "✅ {} - {} [COMPLETED]",
                            mission.index, mission.name
                        ));
                    } else {
                        lines.push(format!("🧠 {} - {}", mission.index, mission.name));
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Mission list request failed: {e:#}");
                lines.push("⚠️ Failed to load mission list.".to_string());
            }
        },

        Command::Load(index) => match client.start(index).await {
            Ok(res) => match (res.briefing, res.objective) {
                (Some(briefing), Some(objective)) => {
                    new_level = Some(index);
                    lines.push(format!("🧠 {}", res.message));
                    lines.push(format!("📜 Briefing: {briefing}"));
                    lines.push(format!("🎯 Objective: {objective}"));
                }
                // Mission rejected (locked or invalid index) - the
                // server's message carries the reason
                _ => lines.push(format!("⚠️ {}", res.message)),
            },
            Err(e) => {
                tracing::warn!(level = index, "Mission start request failed: {e:#}");
                lines.push("⚠️ Failed to load mission.".to_string());
            }
        },

        Command::Action(tool) => match client.action(&tool).await {
            Ok(res) => {
                if let Some(result) = res.result.as_deref() {
                    lines.push(result.to_string());
                }
                if let Some(ai) = res.ai_response.as_deref() {
                    lines.push(format!("🧠 {ai}"));
                }
                if let Some(mutation) = res.ai_mutation.as_deref() {
                    lines.push(format!("🔁 {mutation}"));
                }
                if res.is_terminal() {
                    let score = res.score.unwrap_or(0);
                    lines.push(format!("🎯 Final Score: {score}"));
                    lines.push(
                        "🧠 Type 'load <index>' to continue or 'list' to view missions."
                            .to_string(),
                    );
                }
            }
            Err(e) => {
                tracing::warn!(tool = %tool, "Action request failed: {e:#}");
                lines.push("⚠️ Server error. Try again.".to_string());
            }
        },
    }

    Some(Dispatch { lines, new_level })
}
