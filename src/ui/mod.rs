mod common;
mod end_scene;
mod play_scene;
mod title_scene;

use lunar_lander::{Scene, Session};
use ratatui::Frame;

/// Draw the active scene.
pub fn draw(frame: &mut Frame, scene: &Scene) {
    let area = frame.size();
    match scene {
        Scene::TitleSelect => title_scene::render_title_scene(frame, area),
        Scene::Playing(session) => play_scene::render_play_scene(frame, area, session),
        Scene::EndResult { session, score } => {
            end_scene::render_end_scene(frame, area, session, *score)
        }
        Scene::Terminated => {}
    }
}

/// Draw a session's play view regardless of scene; used for the touchdown
/// freeze-frame before the result screen.
pub fn draw_session(frame: &mut Frame, session: &Session) {
    let area = frame.size();
    play_scene::render_play_scene(frame, area, session);
}
