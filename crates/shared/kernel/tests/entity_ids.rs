use boxdraft_kernel::domain::constants::{PLAYER_ID_PREFIX, QUESTION_ID_PREFIX};
use boxdraft_kernel::{SAFE_ALPHABET, prefixed_id, safe_nanoid};
use std::collections::HashSet;

#[test]
fn player_and_question_ids_carry_their_prefix() {
    let player = prefixed_id(PLAYER_ID_PREFIX);
    let question = prefixed_id(QUESTION_ID_PREFIX);

    assert_eq!(player.strip_prefix("p_").map(str::len), Some(12));
    assert_eq!(question.strip_prefix("q_").map(str::len), Some(12));
}

#[test]
fn id_body_avoids_ambiguous_characters() {
    let id = prefixed_id(PLAYER_ID_PREFIX);
    let body = &id[PLAYER_ID_PREFIX.len()..];

    assert!(body.chars().all(|ch| SAFE_ALPHABET.contains(&ch)), "unexpected character in {id}");
    assert!(!body.contains(['0', '1', 'I', 'O', 'l']));
}

#[test]
fn registrations_in_one_burst_get_distinct_ids() {
    let ids: HashSet<String> = (0..500).map(|_| prefixed_id(PLAYER_ID_PREFIX)).collect();
    assert_eq!(ids.len(), 500);
}

#[test]
fn sized_ids_for_short_codes() {
    assert_eq!(safe_nanoid!(6).len(), 6);
}
