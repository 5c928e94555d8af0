use log::{debug, trace};

use crate::clock::PlaybackClock;
use crate::config::PlaybackConfig;
use crate::error::Result;
use crate::store::FrameStore;
use crate::topology::Topology;
use crate::types::*;
use crate::utils::hand_geometry;

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Receives resolved world-space geometry, once per present hand per emitted frame.
/// `bones` only holds bones whose two joints were present in the frame.
pub trait Renderer {
    fn update_hand(&mut self, side: HandSide, joints: &[Position], bones: &[BoneSegment]);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn update_hand(&mut self, side: HandSide, joints: &[Position], bones: &[BoneSegment]) {
        (**self).update_hand(side, joints, bones)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn update_hand(&mut self, side: HandSide, joints: &[Position], bones: &[BoneSegment]) {
        (**self).update_hand(side, joints, bones)
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Next frame to emit.
    pub current_frame: FrameIndex,
    pub is_playing: bool,
    /// Seconds accumulated towards the next tick.
    pub accumulated_time: f64,
    pub last_emitted: Option<FrameIndex>,
}

/// Replays a [`FrameStore`] at a fixed rate into a [`Renderer`].
///
/// Driven from outside: the host reports elapsed time with
/// [`on_time_advanced`](Self::on_time_advanced) and forwards the play/pause
/// input with [`on_toggle_play`](Self::on_toggle_play). When the cursor runs
/// into an index the store does not have, playback holds there until it is
/// toggled off and on again, which rewinds to the first frame.
pub struct PlaybackController<R: Renderer> {
    store: FrameStore,
    clock: PlaybackClock,
    current_frame: FrameIndex,
    /// Set once the last representable index has been emitted.
    exhausted: bool,
    is_playing: bool,
    last_emitted: Option<FrameIndex>,
    renderer: R,
}

impl<R: Renderer> PlaybackController<R> {
    pub fn new(store: FrameStore, target_rate: f64, renderer: R) -> Result<Self> {
        Ok(PlaybackController {
            store,
            clock: PlaybackClock::new(target_rate)?,
            current_frame: 0,
            exhausted: false,
            is_playing: false,
            last_emitted: None,
            renderer,
        })
    }

    pub fn from_config(store: FrameStore, config: &PlaybackConfig, renderer: R) -> Result<Self> {
        config.validate()?;
        let mut controller = Self::new(store, config.target_rate, renderer)?;
        controller.current_frame = config.start_frame;
        Ok(controller)
    }

    /// Play/pause input.
    pub fn on_toggle_play(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Resume from the cursor. A cursor past the data (or in a gap) rewinds to the first frame.
    pub fn play(&mut self) {
        if self.is_playing {
            return;
        }
        if self.exhausted || !self.store.has(self.current_frame) {
            let first = self.store.first_index().unwrap_or(0);
            debug!("frame {} not in capture, rewinding to {}", self.current_frame, first);
            self.current_frame = first;
            self.exhausted = false;
        }
        self.is_playing = true;
        debug!("playing from frame {}", self.current_frame);
    }

    /// Cursor and accumulated time are kept, so playing again resumes exactly here.
    pub fn pause(&mut self) {
        if !self.is_playing {
            return;
        }
        self.is_playing = false;
        debug!("paused at frame {}", self.current_frame);
    }

    /// Host time advanced by `dt` seconds. Returns the number of frames emitted.
    pub fn on_time_advanced(&mut self, dt: f64) -> usize {
        if !self.is_playing {
            return 0;
        }
        let ticks = self.clock.advance(dt);
        let mut emitted = 0;
        for _ in 0..ticks {
            if !self.emit_current() {
                // holding: remaining ticks have nothing to show
                break;
            }
            emitted += 1;
        }
        emitted
    }

    /// Pause and emit a single frame, as one tick would.
    pub fn step_forward(&mut self) -> bool {
        self.pause();
        self.emit_current()
    }

    /// Move the cursor without emitting.
    pub fn seek(&mut self, frame: FrameIndex) {
        debug!("seek to frame {}", frame);
        self.current_frame = frame;
        self.exhausted = false;
    }

    /// World-space geometry of every hand present at `frame`.
    pub fn frame_geometry(&self, frame: FrameIndex) -> Vec<(HandSide, HandGeometry)> {
        let topology = self.store.topology();
        let Some(capture) = self.store.get(frame) else {
            return Vec::new();
        };
        HandSide::BOTH
            .iter()
            .filter_map(|&side| Some((side, hand_geometry(topology, capture.hand(side)?))))
            .collect()
    }

    fn emit_current(&mut self) -> bool {
        if self.exhausted || !self.store.has(self.current_frame) {
            return false;
        }
        for (side, geometry) in self.frame_geometry(self.current_frame) {
            self.renderer.update_hand(side, &geometry.joints, &geometry.bones);
        }
        trace!("emitted frame {}", self.current_frame);
        self.last_emitted = Some(self.current_frame);
        match self.current_frame.checked_add(1) {
            Some(next) => self.current_frame = next,
            None => self.exhausted = true,
        }
        true
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_frame: self.current_frame,
            is_playing: self.is_playing,
            accumulated_time: self.clock.accumulated(),
            last_emitted: self.last_emitted,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_frame(&self) -> FrameIndex {
        self.current_frame
    }

    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    pub fn topology(&self) -> Topology {
        self.store.topology()
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::load_frames_from_string;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(HandSide, Vec<Position>, usize)>,
    }

    impl Renderer for Recorder {
        fn update_hand(&mut self, side: HandSide, joints: &[Position], bones: &[BoneSegment]) {
            self.calls.push((side, joints.to_vec(), bones.len()));
        }
    }

    const DT: f64 = 1.0 / 30.0;

    fn controller(json: &str) -> PlaybackController<Recorder> {
        let store = load_frames_from_string(json, Topology::ManoReduced).unwrap();
        PlaybackController::new(store, 30.0, Recorder::default()).unwrap()
    }

    fn three_frames() -> PlaybackController<Recorder> {
        controller(
            r#"{
                "0": {"left_hands": [[[[0, 0, 0], [0, 1, 0]]]]},
                "1": {"left_hands": [[[[1, 0, 0], [1, 1, 0]]]], "right_hands": [[[[5, 5, 5]]]]},
                "2": {"right_hands": [[[[2, 0, 0]]]]}
            }"#,
        )
    }

    #[test]
    fn paused_controller_emits_nothing() {
        let mut c = three_frames();
        assert_eq!(c.on_time_advanced(1.0), 0);
        assert!(c.renderer().calls.is_empty());
        assert_eq!(c.state().accumulated_time, 0.0);
    }

    #[test]
    fn emits_one_frame_per_tick_for_each_present_hand() {
        let mut c = three_frames();
        c.on_toggle_play();
        assert_eq!(c.on_time_advanced(DT), 1);
        assert_eq!(c.renderer().calls.len(), 1);
        assert_eq!(c.renderer().calls[0].0, HandSide::Left);
        // wrist and index1 only: one bone
        assert_eq!(c.renderer().calls[0].2, 1);

        assert_eq!(c.on_time_advanced(DT), 1);
        assert_eq!(c.renderer().calls.len(), 3);
        assert_eq!(c.current_frame(), 2);
        assert_eq!(c.state().last_emitted, Some(1));
    }

    #[test]
    fn holds_at_end_of_data() {
        let mut c = three_frames();
        c.on_toggle_play();
        assert_eq!(c.on_time_advanced(0.1), 3);
        assert_eq!(c.current_frame(), 3);
        let calls = c.renderer().calls.len();
        assert_eq!(c.on_time_advanced(1.0), 0);
        assert_eq!(c.current_frame(), 3);
        assert_eq!(c.renderer().calls.len(), calls);
        assert!(c.is_playing());
    }

    #[test]
    fn toggling_after_the_end_rewinds() {
        let mut c = three_frames();
        c.on_toggle_play();
        c.on_time_advanced(1.0);
        c.on_toggle_play();
        assert!(!c.is_playing());
        c.on_toggle_play();
        assert_eq!(c.current_frame(), 0);
        assert_eq!(c.on_time_advanced(DT), 1);
        assert_eq!(c.renderer().calls.last().unwrap().1[0], Position::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn pause_keeps_cursor_and_phase() {
        let mut c = three_frames();
        c.on_toggle_play();
        c.on_time_advanced(DT * 1.5);
        let paused = c.state();
        c.on_toggle_play();
        c.on_time_advanced(10.0);
        assert_eq!(c.state().current_frame, paused.current_frame);
        assert_eq!(c.state().accumulated_time, paused.accumulated_time);
        c.on_toggle_play();
        assert_eq!(c.current_frame(), 1);
        assert_eq!(c.on_time_advanced(DT * 0.5), 1);
    }

    #[test]
    fn gap_holds_the_cursor() {
        let mut c = controller(r#"{"0": {"left_hands": [[[[0, 0, 0]]]]}, "2": {"left_hands": [[[[2, 2, 2]]]]}}"#);
        assert!(!c.store().has(1));
        c.on_toggle_play();
        assert_eq!(c.on_time_advanced(DT * 5.0), 1);
        assert_eq!(c.current_frame(), 1);
        assert_eq!(c.on_time_advanced(DT), 0);
        assert_eq!(c.current_frame(), 1);
    }

    #[test]
    fn last_representable_index_is_emitted_once_then_held() {
        let mut c = controller(r#"{"18446744073709551615": {"left_hands": [[[[0, 0, 0]]]]}}"#);
        c.on_toggle_play();
        assert_eq!(c.current_frame(), FrameIndex::MAX);
        assert_eq!(c.on_time_advanced(DT), 1);
        assert_eq!(c.state().last_emitted, Some(FrameIndex::MAX));
        assert_eq!(c.on_time_advanced(DT * 3.0), 0);
        assert_eq!(c.renderer().calls.len(), 1);
        assert!(c.is_playing());

        // toggling off and on rewinds to the same (only) frame
        c.on_toggle_play();
        c.on_toggle_play();
        assert_eq!(c.on_time_advanced(DT), 1);
        assert_eq!(c.renderer().calls.len(), 2);
    }

    #[test]
    fn rewinds_to_lowest_index() {
        let mut c = controller(r#"{"5": {"left_hands": [[[[0, 0, 0]]]]}}"#);
        c.on_toggle_play();
        assert_eq!(c.current_frame(), 5);
    }

    #[test]
    fn wrist_relative_hands_reach_the_renderer_in_world_space() {
        let mut c = controller(
            r#"{"0": {"right_hands": [{
                "joints": [{"x": 0, "y": 0, "z": 0}, {"x": 0, "y": 1, "z": 0}],
                "wrist_orientation": {"x": 1, "y": 0, "z": 0}
            }]}}"#,
        );
        c.on_toggle_play();
        c.on_time_advanced(DT);
        let (side, joints, bones) = &c.renderer().calls[0];
        assert_eq!(*side, HandSide::Right);
        assert_eq!(joints, &vec![Position::new(1.0, 0.0, 0.0), Position::new(1.0, 1.0, 0.0)]);
        assert_eq!(*bones, 1);
    }

    #[test]
    fn step_forward_pauses_and_emits() {
        let mut c = three_frames();
        c.on_toggle_play();
        assert!(c.step_forward());
        assert!(!c.is_playing());
        assert_eq!(c.current_frame(), 1);
        c.seek(2);
        assert!(c.step_forward());
        assert!(!c.step_forward());
        assert_eq!(c.current_frame(), 3);
    }

    #[test]
    fn start_frame_and_rate_come_from_config() {
        let store = load_frames_from_string(r#"{"0": {}, "1": {}}"#, Topology::Full).unwrap();
        let config = PlaybackConfig {
            topology: Topology::Full,
            target_rate: 10.0,
            start_frame: 1,
        };
        let mut c = PlaybackController::from_config(store, &config, Recorder::default()).unwrap();
        c.on_toggle_play();
        assert_eq!(c.current_frame(), 1);
        assert_eq!(c.on_time_advanced(DT), 0);
        assert_eq!(c.on_time_advanced(0.1), 1);
        // a frame without hands emits but reaches no renderer call
        assert!(c.renderer().calls.is_empty());
        assert_eq!(c.topology(), Topology::Full);
    }
}
