//! Tests for the card record and contract
//!
//! These tests verify:
//! - Card table layout and decoding
//! - create / get round trips through the store
//! - Named-operation parsing from raw argument bodies
//! - Rejection of unknown operations and invalid arguments

use segkv::card::{Card, Rank, Suit};
use segkv::codec::primitive::{bool_to_bytes, int_to_bytes};
use segkv::codec::{count_segments, get_segment_by_index};
use segkv::contract::{CardContract, Invocation, Outcome};
use segkv::store::{ChangeState, MemoryStore, Store, StoreAdapter};
use segkv::SegError;

// =============================================================================
// Helper Functions
// =============================================================================

fn contract() -> CardContract<MemoryStore> {
    CardContract::new(StoreAdapter::new(MemoryStore::new(), "/"))
}

fn create_args(id: &[u8], suit: i64, rank: i64, played: bool) -> Vec<Vec<u8>> {
    vec![
        id.to_vec(),
        int_to_bytes(suit),
        int_to_bytes(rank),
        bool_to_bytes(played),
    ]
}

// =============================================================================
// Card Layout Tests
// =============================================================================

#[test]
fn test_card_table_bytes() {
    let card = Card::new(vec![0x01], Suit::Spades, Rank::Ace, true);
    let table = card.to_table();

    assert_eq!(table, vec![1, 1, 1, 1, 1, 1, 1, 1]);
    assert_eq!(count_segments(&table).unwrap(), Card::FIELD_COUNT);
    assert_eq!(get_segment_by_index(&table, 2).unwrap(), &[0x01]);
}

#[test]
fn test_card_round_trip() {
    let card = Card::new(b"card-17".to_vec(), Suit::Clubs, Rank::Queen, false);

    let decoded = Card::from_table(&card.to_table()).unwrap();
    assert_eq!(decoded, Some(card));
}

#[test]
fn test_card_from_empty_is_none() {
    assert_eq!(Card::from_table(&[]).unwrap(), None);
}

#[test]
fn test_card_unknown_suit() {
    let card = Card::new(b"x".to_vec(), Suit::Hearts, Rank::Two, false);
    let mut table = card.to_table();
    // Hearts (2) becomes 3, which is not a suit
    table[3] = 3;

    assert!(matches!(
        Card::from_table(&table),
        Err(SegError::InvalidField(_))
    ));
}

#[test]
fn test_suit_and_rank_numbers() {
    assert_eq!(Suit::try_from(8i64).unwrap(), Suit::Clubs);
    assert!(Suit::try_from(3i64).is_err());
    assert_eq!(Rank::try_from(13i64).unwrap(), Rank::King);
    assert_eq!(Rank::try_from(1i64).unwrap(), Rank::Ace);
    assert!(Rank::try_from(0i64).is_err());
    assert!(Rank::try_from(14i64).is_err());
    assert!(Rank::try_from(-1i64).is_err());
}

#[test]
fn test_storage_key() {
    assert_eq!(Card::storage_key(b"/", b"42"), b"c/42");
}

// =============================================================================
// Contract Tests
// =============================================================================

#[test]
fn test_create_and_get() {
    let contract = contract();
    let card = Card::new(b"7".to_vec(), Suit::Diamonds, Rank::Seven, false);

    assert_eq!(contract.create(&card).unwrap(), ChangeState::Create);
    assert_eq!(contract.get(b"7").unwrap(), Some(card));
    assert_eq!(
        contract.adapter().store().get(b"c/7").unwrap().map(|v| v.len()),
        Some(2 + 2 + 2 + 2)
    );
}

#[test]
fn test_create_twice_is_unchanged() {
    let contract = contract();
    let card = Card::new(b"7".to_vec(), Suit::Diamonds, Rank::Seven, false);

    contract.create(&card).unwrap();
    assert_eq!(contract.create(&card).unwrap(), ChangeState::Unchanged);
    assert_eq!(contract.adapter().store().mutations(), 1);
}

#[test]
fn test_playing_a_card_updates() {
    let contract = contract();
    let mut card = Card::new(b"7".to_vec(), Suit::Diamonds, Rank::Seven, false);
    contract.create(&card).unwrap();

    card.is_played = true;
    assert_eq!(contract.create(&card).unwrap(), ChangeState::Update);
    assert!(contract.get(b"7").unwrap().unwrap().is_played);
}

#[test]
fn test_remove() {
    let contract = contract();
    let card = Card::new(b"7".to_vec(), Suit::Diamonds, Rank::Seven, false);
    contract.create(&card).unwrap();

    assert_eq!(contract.remove(b"7").unwrap(), ChangeState::Delete);
    assert_eq!(contract.get(b"7").unwrap(), None);
}

#[test]
fn test_get_missing() {
    assert_eq!(contract().get(b"nope").unwrap(), None);
}

// =============================================================================
// Dispatch Tests
// =============================================================================

#[test]
fn test_parse_create() {
    let args = create_args(b"9", 4, 11, true);
    let invocation = Invocation::parse("create", &args).unwrap();

    assert_eq!(
        invocation,
        Some(Invocation::Create(Card::new(
            b"9".to_vec(),
            Suit::Diamonds,
            Rank::Jack,
            true
        )))
    );
}

#[test]
fn test_call_create_then_get() {
    let contract = contract();

    let outcome = contract.call("create", &create_args(b"9", 1, 13, false)).unwrap();
    match outcome {
        Outcome::Created { card, state } => {
            assert_eq!(state, ChangeState::Create);
            assert_eq!(card.rank, Rank::King);
        }
        other => panic!("expected Created, got {:?}", other),
    }

    let outcome = contract.call("get", &[b"9".to_vec()]).unwrap();
    assert_eq!(
        outcome,
        Outcome::Found(Some(Card::new(b"9".to_vec(), Suit::Spades, Rank::King, false)))
    );
}

#[test]
fn test_call_without_args_is_rejected() {
    let contract = contract();

    assert_eq!(contract.call("create", &[]).unwrap(), Outcome::Rejected);
    assert_eq!(contract.call("get", &[]).unwrap(), Outcome::Rejected);
    assert_eq!(contract.adapter().store().mutations(), 0);
}

#[test]
fn test_call_unknown_operation_is_rejected() {
    let contract = contract();

    assert_eq!(
        contract.call("burn", &[b"9".to_vec()]).unwrap(),
        Outcome::Rejected
    );
}

#[test]
fn test_call_create_with_too_few_args() {
    let contract = contract();

    assert!(matches!(
        contract.call("create", &[b"9".to_vec(), vec![1]]),
        Err(SegError::InvalidArgument(_))
    ));
}

#[test]
fn test_call_create_with_bad_rank() {
    let contract = contract();

    assert!(matches!(
        contract.call("create", &create_args(b"9", 1, 20, false)),
        Err(SegError::InvalidField(_))
    ));
    assert_eq!(contract.adapter().store().mutations(), 0);
}
