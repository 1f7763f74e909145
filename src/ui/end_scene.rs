//! End-of-session result screen.

use super::common::{render_result_overlay, ResultKind};
use lunar_lander::lander::Outcome;
use lunar_lander::Session;
use ratatui::{layout::Rect, Frame};

pub fn render_end_scene(frame: &mut Frame, area: Rect, session: &Session, score: u32) {
    let outcome = session.outcome.unwrap_or(Outcome::Crashed);
    let craft = &session.craft;

    let (kind, title) = match outcome {
        Outcome::Landed => (ResultKind::Win, ":: TOUCHDOWN ::"),
        Outcome::Crashed => (ResultKind::Loss, "CRASH"),
        Outcome::Quit => (ResultKind::Aborted, "ABORTED"),
    };

    let mut details = vec![
        format!("Score: {}", score),
        format!("Fuel remaining: {}", craft.fuel),
        format!("Difficulty: {}", session.difficulty.name()),
    ];
    if outcome != Outcome::Quit {
        details.push(format!(
            "Touchdown: vx {:+.2}  vy {:+.2}  tilt {:+.1}deg",
            craft.vx,
            craft.vy,
            craft.angle.to_degrees()
        ));
    }

    render_result_overlay(
        frame,
        area,
        kind,
        title,
        outcome.message(),
        &details,
        "[Enter] Play again   [Q] Quit",
    );
}
