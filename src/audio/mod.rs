//! Sound effects and music.
//!
//! `SoundBoard` decides *when* sounds play; an `AudioSink` decides *how*.
//! Every failure on the sink side degrades to silence for the affected cue.

mod rodio_sink;

pub use rodio_sink::RodioSink;

use crate::scene::SceneEvent;

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Crash,
    Landing,
}

/// Looping tracks. At most one instance of each plays at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Thrust,
    Music,
}

/// Output side of the audio collaborator.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn start_loop(&mut self, track: Track);
    fn stop_loop(&mut self, track: Track);
}

/// Sink used when audio is disabled or unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, _cue: Cue) {}
    fn start_loop(&mut self, _track: Track) {}
    fn stop_loop(&mut self, _track: Track) {}
}

impl AudioSink for Box<dyn AudioSink> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue)
    }
    fn start_loop(&mut self, track: Track) {
        (**self).start_loop(track)
    }
    fn stop_loop(&mut self, track: Track) {
        (**self).stop_loop(track)
    }
}

/// Playback policy over a sink.
pub struct SoundBoard<S: AudioSink> {
    sink: S,
    thrust_playing: bool,
    music_playing: bool,
}

impl<S: AudioSink> SoundBoard<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            thrust_playing: false,
            music_playing: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn start_music(&mut self) {
        if !self.music_playing {
            self.sink.start_loop(Track::Music);
            self.music_playing = true;
        }
    }

    /// Start the thrust loop when thrust begins, stop it when thrust ends.
    pub fn set_thrust(&mut self, active: bool) {
        if active && !self.thrust_playing {
            self.sink.start_loop(Track::Thrust);
            self.thrust_playing = true;
        } else if !active && self.thrust_playing {
            self.sink.stop_loop(Track::Thrust);
            self.thrust_playing = false;
        }
    }

    pub fn is_thrust_playing(&self) -> bool {
        self.thrust_playing
    }

    pub fn handle(&mut self, event: &SceneEvent) {
        match event {
            SceneEvent::ThrustEngaged => self.set_thrust(true),
            SceneEvent::ThrustCut => self.set_thrust(false),
            SceneEvent::Landed { .. } => {
                self.set_thrust(false);
                self.sink.play(Cue::Landing);
            }
            SceneEvent::Crashed => {
                self.set_thrust(false);
                self.sink.play(Cue::Crash);
            }
            SceneEvent::Aborted => self.set_thrust(false),
            SceneEvent::Quit => self.stop_all(),
            SceneEvent::SessionStarted(_) | SceneEvent::ReturnedToTitle => {}
        }
    }

    pub fn stop_all(&mut self) {
        self.set_thrust(false);
        if self.music_playing {
            self.sink.stop_loop(Track::Music);
            self.music_playing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lander::Difficulty;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Play(Cue),
        Start(Track),
        Stop(Track),
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<Call>,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, cue: Cue) {
            self.calls.push(Call::Play(cue));
        }
        fn start_loop(&mut self, track: Track) {
            self.calls.push(Call::Start(track));
        }
        fn stop_loop(&mut self, track: Track) {
            self.calls.push(Call::Stop(track));
        }
    }

    fn board() -> SoundBoard<RecordingSink> {
        SoundBoard::new(RecordingSink::default())
    }

    #[test]
    fn test_thrust_loop_starts_once() {
        let mut board = board();
        board.set_thrust(true);
        board.set_thrust(true);
        board.set_thrust(true);
        assert_eq!(board.sink().calls, vec![Call::Start(Track::Thrust)]);
        assert!(board.is_thrust_playing());
    }

    #[test]
    fn test_thrust_loop_stops_when_thrust_ends() {
        let mut board = board();
        board.set_thrust(true);
        board.set_thrust(false);
        board.set_thrust(false);
        assert_eq!(
            board.sink().calls,
            vec![Call::Start(Track::Thrust), Call::Stop(Track::Thrust)]
        );
        assert!(!board.is_thrust_playing());
    }

    #[test]
    fn test_stop_without_start_is_silent() {
        let mut board = board();
        board.handle(&SceneEvent::ThrustCut);
        assert!(board.sink().calls.is_empty());
    }

    #[test]
    fn test_crash_stops_thrust_then_plays_crash() {
        let mut board = board();
        board.handle(&SceneEvent::ThrustEngaged);
        board.handle(&SceneEvent::Crashed);
        assert_eq!(
            board.sink().calls,
            vec![
                Call::Start(Track::Thrust),
                Call::Stop(Track::Thrust),
                Call::Play(Cue::Crash)
            ]
        );
    }

    #[test]
    fn test_landing_plays_landing_cue() {
        let mut board = board();
        board.handle(&SceneEvent::Landed { score: 10 });
        assert_eq!(board.sink().calls, vec![Call::Play(Cue::Landing)]);
    }

    #[test]
    fn test_music_starts_once_and_stops_on_quit() {
        let mut board = board();
        board.start_music();
        board.start_music();
        board.handle(&SceneEvent::Quit);
        assert_eq!(
            board.sink().calls,
            vec![Call::Start(Track::Music), Call::Stop(Track::Music)]
        );
    }

    #[test]
    fn test_abort_stops_thrust_without_cue() {
        let mut board = board();
        board.start_music();
        board.handle(&SceneEvent::ThrustEngaged);
        board.handle(&SceneEvent::Aborted);
        assert_eq!(
            board.sink().calls,
            vec![
                Call::Start(Track::Music),
                Call::Start(Track::Thrust),
                Call::Stop(Track::Thrust)
            ]
        );
    }

    #[test]
    fn test_menu_events_are_silent() {
        let mut board = board();
        board.handle(&SceneEvent::SessionStarted(Difficulty::Easy));
        board.handle(&SceneEvent::ReturnedToTitle);
        assert!(board.sink().calls.is_empty());
    }

    #[test]
    fn test_silent_sink_accepts_everything() {
        let mut board = SoundBoard::new(SilentSink);
        board.start_music();
        board.set_thrust(true);
        board.handle(&SceneEvent::Crashed);
        assert!(!board.is_thrust_playing());
    }
}
