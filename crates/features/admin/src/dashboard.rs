use boxdraft_domain::state::capacity_of;
use boxdraft_domain::{AppState, Player};

/// Read model of the admin dashboard: the team board and the players table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub unassigned: Vec<PlayerCard>,
    pub columns: Vec<BoxColumn>,
    pub roster: Vec<RosterRow>,
}

/// A draggable player on the team board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxColumn {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub players: Vec<PlayerCard>,
    pub is_full: bool,
}

impl BoxColumn {
    /// `"occupants / capacity"`, e.g. `2 / 5`.
    #[must_use]
    pub fn badge(&self) -> String {
        format!("{} / {}", self.players.len(), self.capacity)
    }
}

/// Assignment shown in the players table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Pending,
    Box(String),
    /// Assigned to a box id that no longer exists.
    UnknownBox,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub id: String,
    pub name: String,
    pub placement: Placement,
    pub registered_at: i64,
}

impl Dashboard {
    #[must_use]
    pub fn build(state: &AppState) -> Self {
        let card = |p: &Player| PlayerCard { id: p.id.clone(), name: p.name.clone() };

        let columns = state
            .boxes
            .iter()
            .map(|b| {
                let players: Vec<PlayerCard> = state.occupants(&b.id).map(card).collect();
                BoxColumn {
                    id: b.id.clone(),
                    name: b.name.clone(),
                    capacity: b.capacity,
                    is_full: players.len() >= capacity_of(b),
                    players,
                }
            })
            .collect();

        let roster = state
            .players
            .iter()
            .map(|p| RosterRow {
                id: p.id.clone(),
                name: p.name.clone(),
                placement: match p.selected_box_id.as_deref() {
                    None => Placement::Pending,
                    Some(id) => {
                        state.box_by_id(id).map_or(Placement::UnknownBox, |b| Placement::Box(b.name.clone()))
                    },
                },
                registered_at: p.registered_at,
            })
            .collect();

        Self { unassigned: state.unassigned().map(card).collect(), columns, roster }
    }
}
