use boxdraft_domain::AppState;
use boxdraft_domain::state::capacity_of;

/// One box as shown on the player's box screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxView {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub occupancy: usize,
    pub is_full: bool,
    /// The viewing player occupies this box.
    pub is_mine: bool,
    /// Members of the box. Only filled for the viewer's own box while teammates are visible.
    pub teammates: Option<Vec<Teammate>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teammate {
    pub name: String,
    /// The viewing player themself.
    pub is_you: bool,
}

impl BoxView {
    /// Builds the box screen for `viewer` (or for an anonymous visitor).
    #[must_use]
    pub fn build(state: &AppState, viewer: Option<&str>) -> Vec<Self> {
        let own_box = viewer
            .and_then(|id| state.player(id))
            .and_then(|p| p.selected_box_id.as_deref());
        let visible = state.settings.teammates_visible();

        state
            .boxes
            .iter()
            .map(|b| {
                let occupancy = state.occupancy(&b.id);
                let is_mine = own_box == Some(b.id.as_str());
                let teammates = (is_mine && visible).then(|| {
                    state
                        .occupants(&b.id)
                        .map(|p| Teammate { name: p.name.clone(), is_you: Some(p.id.as_str()) == viewer })
                        .collect()
                });

                Self {
                    id: b.id.clone(),
                    name: b.name.clone(),
                    capacity: b.capacity,
                    occupancy,
                    is_full: occupancy >= capacity_of(b),
                    is_mine,
                    teammates,
                }
            })
            .collect()
    }

    /// Whether the viewer can join by tapping the box.
    #[must_use]
    pub const fn is_joinable(&self) -> bool {
        !self.is_full && !self.is_mine
    }
}
