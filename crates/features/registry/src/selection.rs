/// Outcome of a self-service box selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The player now occupies the box. `previous` is the box they left, if any.
    Joined { previous: Option<String> },
    /// The player already occupies the box; nothing changed.
    AlreadyMember,
    /// The selection was not applied.
    Rejected(Rejection),
}

impl Selection {
    #[must_use]
    pub const fn is_joined(&self) -> bool {
        matches!(self, Self::Joined { .. })
    }
}

/// Why a self-service selection was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    UnknownBox,
    UnknownPlayer,
    /// The box already holds `occupants >= capacity` players.
    BoxFull { capacity: u32, occupants: usize },
}
