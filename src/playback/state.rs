#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

impl PlaybackState {
    pub fn toggled(self) -> Self {
        match self {
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    pub fn display_text(self) -> &'static str {
        match self {
            PlaybackState::Paused => "Paused",
            PlaybackState::Playing => "Playing",
        }
    }
}

/// What the event loop should do after a key command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}
