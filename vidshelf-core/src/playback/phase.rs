/// Where a preview surface is in its play/stop cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// Mounted, poster showing, never asked to play.
    #[default]
    Idle,
    /// A start request is in flight.
    Starting,
    Playing,
    /// Paused and rewound to the start.
    Stopped,
    /// The last start request failed; the poster is showing.
    Unavailable,
}

impl PlaybackPhase {
    /// True while playback has been requested and not yet stopped.
    pub fn is_active(self) -> bool {
        matches!(self, PlaybackPhase::Starting | PlaybackPhase::Playing)
    }
}
