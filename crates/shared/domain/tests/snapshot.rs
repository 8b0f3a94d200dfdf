use boxdraft_domain::{AppState, Player, QuestionType};
use serde_json::json;

#[test]
fn snapshot_roundtrip_is_deep_equal() {
    let mut state = AppState::default();
    state.players.push(Player {
        id: "p_1".to_owned(),
        name: "Alice".to_owned(),
        answers: [("q1".to_owned(), "Alice".to_owned()), ("gone".to_owned(), "x".to_owned())]
            .into_iter()
            .collect(),
        selected_box_id: Some("box-3".to_owned()),
        registered_at: 1_700_000_000_000,
    });
    state.settings.banner_url = Some("data:image/png;base64,AAAA".to_owned());

    let raw = serde_json::to_string(&state).unwrap();
    let back: AppState = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, state);
}

#[test]
fn snapshot_uses_persisted_field_names() {
    let value = serde_json::to_value(AppState::default()).unwrap();

    assert_eq!(value["questions"][1]["type"], "email");
    assert!(value["questions"][1].get("description").is_none());
    assert_eq!(value["boxes"][0], json!({ "id": "box-1", "name": "Team", "capacity": 5 }));
    assert_eq!(value["settings"]["eventTitle"], "Tournament Registration");
    assert_eq!(value["settings"]["bannerPosition"], 50);
    assert_eq!(value["settings"]["showTeammates"], true);
}

#[test]
fn snapshot_accepts_missing_optional_settings() {
    let raw = json!({
        "questions": [
            { "id": "a", "label": "Bio", "type": "textarea", "required": false, "order": 4 }
        ],
        "players": [
            { "id": "p", "name": "P", "answers": {}, "selectedBoxId": null, "registeredAt": 3 }
        ],
        "boxes": [],
        "settings": { "eventTitle": "T", "eventDescription": "D" }
    });

    let state: AppState = serde_json::from_value(raw).unwrap();
    assert_eq!(state.questions[0].kind, QuestionType::Textarea);
    assert!(state.players[0].selected_box_id.is_none());
    assert!(state.settings.teammates_visible());
    assert_eq!(state.settings.banner_position(), 50);
}
