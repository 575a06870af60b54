use ejypti_core::{choose_slot, CardType, GameConfig, PlacedCard, RngState, SlotIndex, SlotTable};

fn table_with(occupied: &[u8]) -> SlotTable {
    let mut table = SlotTable::new();
    for (offset, value) in occupied.iter().enumerate() {
        let slot = SlotIndex::new(*value).expect("slot");
        table.place(
            slot,
            PlacedCard {
                id: offset as u32 + 1,
                card_type: CardType::Pottery,
            },
        );
    }
    table
}

macro_rules! slot_case {
    ($name:ident, $card:expr, [$($occupied:expr),*], $expected:expr) => {
        #[test]
        fn $name() {
            let config = GameConfig::default();
            let table = table_with(&[$($occupied),*]);
            let chosen = choose_slot($card, &table, &config.preferred_slots);
            assert_eq!(chosen.get(), $expected);
        }
    };
}

slot_case!(spade_goes_home, CardType::Spade, [], 1);
slot_case!(pyramid_goes_home, CardType::Pyramid, [], 2);
slot_case!(pharaoh_goes_home, CardType::Pharaoh, [1, 2], 3);
slot_case!(prideflag_goes_home, CardType::Prideflag, [], 4);
slot_case!(anch_goes_home, CardType::Anch, [1, 2, 3, 4], 5);
slot_case!(rings_goes_home, CardType::Rings, [], 6);
slot_case!(sunflowerman_goes_home, CardType::Sunflowerman, [], 7);
slot_case!(gaycouple_goes_home, CardType::Gaycouple, [1, 2, 3, 4, 5, 6, 7], 8);
slot_case!(oillamp_takes_first_empty, CardType::Oillamp, [], 1);
slot_case!(anubis_skips_filled_prefix, CardType::Anubis, [1, 2], 3);
slot_case!(pottery_finds_last_gap, CardType::Pottery, [1, 2, 3, 4, 5, 6, 7], 8);
slot_case!(pottery_finds_middle_gap, CardType::Pottery, [1, 2, 3, 5, 6], 4);
slot_case!(spade_falls_back_when_home_taken, CardType::Spade, [1], 2);
slot_case!(rings_falls_back_to_lowest, CardType::Rings, [6], 1);
slot_case!(rings_falls_back_past_prefix, CardType::Rings, [1, 2, 3, 4, 5, 6], 7);
slot_case!(pyramid_home_free_among_others, CardType::Pyramid, [1, 3], 2);
slot_case!(full_table_falls_back_to_first, CardType::Pharaoh, [1, 2, 3, 4, 5, 6, 7, 8], 1);
slot_case!(full_table_unpreferred_falls_back, CardType::Oillamp, [1, 2, 3, 4, 5, 6, 7, 8], 1);

#[test]
fn chosen_slot_is_empty_unless_table_is_full() {
    let config = GameConfig::default();
    let mut rng = RngState::from_seed(0x5eed);
    for _ in 0..500 {
        let mask = rng.next_u64() & 0xff;
        let occupied: Vec<u8> = (1..=8u8).filter(|bit| mask & (1 << (bit - 1)) != 0).collect();
        let table = table_with(&occupied);
        for card_type in CardType::ALL {
            let chosen = choose_slot(card_type, &table, &config.preferred_slots);
            if table.is_full() {
                assert_eq!(chosen, SlotIndex::FIRST);
            } else {
                assert!(table.is_empty_at(chosen), "{card_type} -> {chosen} with {occupied:?}");
            }
        }
    }
}
