use std::fmt;

/// Where the controller is in its lifecycle.
///
/// `Idle` means no track is selected. The other two states always have a
/// selected track with an audio handle bound to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Paused,
    Playing,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Stopped",
            Self::Paused => "Paused",
            Self::Playing => "Playing",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
