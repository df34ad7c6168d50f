//! Path construction state
//!
//! Defines the state machine that decides which accumulator mutation an
//! incoming confirmed tap triggers. The state persists for the whole
//! drawing session and cycles `NoPath → StartPoint → EndPath → NoPath`.

/// Progress of the path currently under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathState {
    /// No path is being built; the next tap starts one
    #[default]
    NoPath,
    /// A path exists with only its start point
    StartPoint,
    /// The path has a second point; the next tap closes it
    EndPath,
}

impl PathState {
    /// Returns the state reached after a confirmed single tap
    pub fn after_touch_up(self) -> PathState {
        match self {
            PathState::NoPath => PathState::StartPoint,
            PathState::StartPoint => PathState::EndPath,
            PathState::EndPath => PathState::NoPath,
        }
    }

    /// Returns true while a path is open
    pub fn is_drawing(self) -> bool {
        !matches!(self, PathState::NoPath)
    }

    /// Double taps only clear the drawing while no path is open
    pub fn accepts_double_tap(self) -> bool {
        matches!(self, PathState::NoPath)
    }

    /// Short instruction shown to the user for this state
    pub fn hint(self) -> &'static str {
        match self {
            PathState::NoPath => "Tap to start a path, double tap to clear",
            PathState::StartPoint => "Tap to add the next point",
            PathState::EndPath => "Tap to close the path",
        }
    }
}
