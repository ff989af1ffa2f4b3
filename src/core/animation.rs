// Open/close playback state machine for the loaded model's clip.

use super::clip::ClipPlayer;
use super::constants::ANIMATION_SPEED_MIN;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LidState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Drives a bound [`ClipPlayer`] forward (opening) or backward (closing).
///
/// Every playback gets a fresh generation number; finished notifications from
/// any other generation are ignored, so rebinding or retriggering can never be
/// completed by a stale playback.
#[derive(Debug)]
pub struct AnimationController {
    state: LidState,
    speed: f32,
    generation: u64,
    player: Option<ClipPlayer>,
}

impl AnimationController {
    pub fn new(speed: f32) -> Self {
        Self {
            state: LidState::Closed,
            speed: speed.max(ANIMATION_SPEED_MIN),
            generation: 0,
            player: None,
        }
    }

    /// Attach the player of a freshly loaded model. The lid starts closed.
    pub fn bind(&mut self, player: Option<ClipPlayer>) {
        self.generation += 1;
        self.state = LidState::Closed;
        self.player = player;
    }

    pub fn unbind(&mut self) {
        self.bind(None);
    }

    pub fn has_clip(&self) -> bool {
        self.player.is_some()
    }

    /// Start opening or closing. Returns `false` (and changes nothing) while a
    /// playback is running or when no clip is bound.
    pub fn trigger(&mut self) -> bool {
        let next = match self.state {
            LidState::Closed => LidState::Opening,
            LidState::Open => LidState::Closing,
            LidState::Opening | LidState::Closing => return false,
        };
        let Some(player) = self.player.as_mut() else {
            return false;
        };
        self.generation += 1;
        self.state = next;
        let rate = self.speed * direction_of(next);
        player.play(rate, self.generation);
        log::debug!("[anim] {:?} at rate {:.2}", next, rate);
        true
    }

    pub fn advance(&mut self, dt_sec: f32) {
        let finished = self.player.as_mut().and_then(|p| p.advance(dt_sec));
        if let Some(generation) = finished {
            self.on_finished(generation);
        }
    }

    /// Settle a playback. Notifications for other generations are dropped.
    pub fn on_finished(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        self.state = match self.state {
            LidState::Opening => LidState::Open,
            LidState::Closing => LidState::Closed,
            settled => settled,
        };
    }

    /// Update the speed scalar; a running playback keeps its direction.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(ANIMATION_SPEED_MIN);
        let rate = self.rate();
        if let Some(player) = self.player.as_mut() {
            player.set_time_scale(rate);
        }
    }

    /// Signed playback rate: `speed * direction`, +1 towards open.
    pub fn rate(&self) -> f32 {
        self.speed * direction_of(self.state)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn state(&self) -> LidState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, LidState::Opening | LidState::Closing)
    }

    /// Target pose: true from the start of an opening until the next closing starts.
    pub fn is_open(&self) -> bool {
        matches!(self.state, LidState::Opening | LidState::Open)
    }

    /// Current clip time, if a clip is bound.
    pub fn clip_time(&self) -> Option<f32> {
        self.player.as_ref().map(ClipPlayer::time)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[inline]
fn direction_of(state: LidState) -> f32 {
    match state {
        LidState::Opening | LidState::Open => 1.0,
        LidState::Closing | LidState::Closed => -1.0,
    }
}
