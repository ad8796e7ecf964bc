//! Game action definitions

/// All logical actions the simulation reacts to.
///
/// Keyboard mapping (see `keyboard.rs`):
/// - A / Left = MoveLeft
/// - D / Right = MoveRight
/// - K / Space = Jump
/// - J = Fire
/// - F12 = ToggleDebug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,

    // Combat
    Fire,

    // System
    ToggleDebug,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Fire,
        Action::ToggleDebug,
    ];

    /// Bit used for this action in an [`super::InputSnapshot`]
    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }
}
