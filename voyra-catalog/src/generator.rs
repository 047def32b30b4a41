use crate::error::LayoutError;
use crate::layout::{LayoutDescriptor, Numbering};
use crate::seat::{Seat, SeatMap};

/// Materializes the seat map for a descriptor.
///
/// Deterministic: the same descriptor always yields the same ordered seats.
/// The resulting map goes through [`SeatMap::new`], so a descriptor whose
/// declared total disagrees with its deck plans yields
/// [`LayoutError::LayoutMismatch`] instead of a short map.
pub fn generate(descriptor: &LayoutDescriptor) -> Result<SeatMap, LayoutError> {
    let mut seats = Vec::with_capacity(descriptor.total_seats as usize);
    let mut row_offset = 0;
    let mut sequence: u32 = 1;

    for plan in descriptor.decks {
        for deck_row in 1..=plan.rows {
            let row = row_offset + deck_row;

            for (index, spec) in plan.columns.iter().enumerate() {
                let column = index as u32 + 1;
                let seat_number = match descriptor.numbering {
                    Numbering::RowLetter => {
                        let letter = spec.letter.ok_or_else(|| {
                            LayoutError::InvalidSeat(format!("{} row {} column {}", descriptor.name, row, column))
                        })?;
                        format!("{}{}", row, letter)
                    }
                    Numbering::Sequential => sequence.to_string(),
                };
                sequence += 1;

                seats.push(Seat {
                    seat_number,
                    row,
                    column,
                    seat_type: plan.seat_type,
                    position: spec.position,
                    deck: plan.deck,
                });
            }
        }
        row_offset += plan.rows;
    }

    SeatMap::new(descriptor.label, descriptor.total_seats, seats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{class_names, lookup, BusSeatType, CabinClass, DeckPlan, SeatClass, TransportMode};
    use crate::seat::{Deck, SeatPosition, SeatType};
    use std::collections::HashSet;

    fn map_for(class: CabinClass) -> SeatMap {
        class.descriptor().generate().unwrap()
    }

    fn position_of(map: &SeatMap, number: &str) -> SeatPosition {
        map.find(number).unwrap_or_else(|| panic!("seat {} missing", number)).position
    }

    #[test]
    fn test_every_class_generates_declared_count_with_unique_keys() {
        for mode in [TransportMode::Flight, TransportMode::Bus] {
            for name in class_names(mode) {
                let descriptor = lookup(mode, name).unwrap();
                let map = generate(descriptor).unwrap();

                assert_eq!(map.seats().len(), descriptor.total_seats as usize, "{}", name);
                assert_eq!(map.layout(), descriptor.label);

                let numbers: HashSet<_> = map.seats().iter().map(|s| s.seat_number.as_str()).collect();
                let cells: HashSet<_> = map.seats().iter().map(|s| (s.row, s.column)).collect();
                assert_eq!(numbers.len(), map.seats().len(), "{}", name);
                assert_eq!(cells.len(), map.seats().len(), "{}", name);
            }
        }
    }

    #[test]
    fn test_economy_layout() {
        let map = map_for(CabinClass::Economy);
        assert_eq!(map.total_seats(), 120);
        assert_eq!(map.layout(), "3x3");

        for row in 1..=20 {
            for letter in ['A', 'B', 'C', 'D', 'E', 'F'] {
                assert!(map.contains(&format!("{}{}", row, letter)));
            }
        }
        assert!(!map.contains("21A"));

        assert_eq!(position_of(&map, "1A"), SeatPosition::Window);
        assert_eq!(position_of(&map, "1F"), SeatPosition::Window);
        assert_eq!(position_of(&map, "1C"), SeatPosition::Aisle);
        assert_eq!(position_of(&map, "1D"), SeatPosition::Aisle);
        assert_eq!(position_of(&map, "1B"), SeatPosition::Middle);
        assert_eq!(position_of(&map, "1E"), SeatPosition::Middle);

        let seat = map.find("12C").unwrap();
        assert_eq!((seat.row, seat.column), (12, 3));
        assert!(map.seats().iter().all(|s| s.deck == Deck::Main && s.seat_type == SeatType::Economy));
    }

    #[test]
    fn test_premium_economy_layout() {
        let map = map_for(CabinClass::PremiumEconomy);
        assert_eq!(map.total_seats(), 60);
        assert!(map.contains("10F"));
        assert!(!map.contains("11A"));
        assert!(map.seats().iter().all(|s| s.seat_type == SeatType::PremiumEconomy));
    }

    #[test]
    fn test_business_skips_b_and_e() {
        let map = map_for(CabinClass::Business);
        assert_eq!(map.total_seats(), 40);
        assert_eq!(map.layout(), "2x2");

        let letters: HashSet<char> = map
            .seats()
            .iter()
            .map(|s| s.seat_number.chars().last().unwrap())
            .collect();
        assert_eq!(letters, HashSet::from(['A', 'C', 'D', 'F']));

        assert_eq!(position_of(&map, "1A"), SeatPosition::Window);
        assert_eq!(position_of(&map, "1F"), SeatPosition::Window);
        assert_eq!(position_of(&map, "1C"), SeatPosition::Aisle);
        // D sits in column 3, next to the aisle.
        assert_eq!(map.find("1D").unwrap().column, 3);
        assert_eq!(position_of(&map, "1D"), SeatPosition::Aisle);
    }

    #[test]
    fn test_first_class_layout() {
        let map = map_for(CabinClass::FirstClass);
        assert_eq!(map.total_seats(), 12);

        let letters: HashSet<char> = map
            .seats()
            .iter()
            .map(|s| s.seat_number.chars().last().unwrap())
            .collect();
        assert_eq!(letters, HashSet::from(['A', 'F', 'K']));
        assert_eq!(position_of(&map, "1F"), SeatPosition::Center);
        assert_eq!(position_of(&map, "4A"), SeatPosition::Window);
        assert_eq!(position_of(&map, "4K"), SeatPosition::Window);
    }

    #[test]
    fn test_generation_is_deterministic() {
        for class in CabinClass::all() {
            assert_eq!(map_for(*class), map_for(*class));
        }
        for seat_type in BusSeatType::all() {
            let descriptor = seat_type.descriptor();
            assert_eq!(generate(descriptor).unwrap(), generate(descriptor).unwrap());
        }
    }

    #[test]
    fn test_semi_sleeper_decks() {
        let map = BusSeatType::SemiSleeper.descriptor().generate().unwrap();
        assert_eq!(map.total_seats(), 35);

        let lower: Vec<_> = map.seats().iter().filter(|s| s.deck == Deck::Lower).collect();
        let upper: Vec<_> = map.seats().iter().filter(|s| s.deck == Deck::Upper).collect();
        assert_eq!(lower.len(), 20);
        assert_eq!(upper.len(), 15);
        assert!(lower.iter().all(|s| s.seat_type == SeatType::Seater));
        assert!(upper.iter().all(|s| s.seat_type == SeatType::Sleeper));

        assert_eq!(lower.first().unwrap().seat_number, "1");
        assert_eq!(upper.first().unwrap().seat_number, "21");
        assert_eq!(upper.last().unwrap().seat_number, "35");
        // Upper deck rows follow the lower deck.
        assert_eq!(upper.first().unwrap().row, 6);

        let berth = map.find("22").unwrap();
        assert_eq!((berth.column, berth.position), (2, SeatPosition::Aisle));
        assert_eq!(map.find("23").unwrap().position, SeatPosition::Window);
    }

    #[test]
    fn test_seater_and_sleeper_numbering() {
        let seater = BusSeatType::Seater.descriptor().generate().unwrap();
        let numbers: Vec<_> = seater.seats().iter().map(|s| s.seat_number.clone()).collect();
        let expected: Vec<_> = (1..=40).map(|n| n.to_string()).collect();
        assert_eq!(numbers, expected);
        assert_eq!(seater.find("1").unwrap().position, SeatPosition::Window);
        assert_eq!(seater.find("2").unwrap().position, SeatPosition::Aisle);

        let sleeper = BusSeatType::Sleeper.descriptor().generate().unwrap();
        assert_eq!(sleeper.total_seats(), 30);
        assert!(sleeper.seats().iter().all(|s| s.seat_type == SeatType::Sleeper));
    }

    #[test]
    fn test_mismatched_descriptor_is_rejected() {
        static BROKEN: LayoutDescriptor = LayoutDescriptor {
            name: "Broken",
            mode: TransportMode::Flight,
            label: "2x2",
            total_seats: 41,
            numbering: Numbering::RowLetter,
            decks: &[DeckPlan {
                deck: Deck::Main,
                seat_type: SeatType::Business,
                rows: 10,
                columns: &crate::layout::BUSINESS_COLUMNS,
            }],
        };

        assert_eq!(
            generate(&BROKEN).unwrap_err(),
            LayoutError::LayoutMismatch { declared: 41, actual: 40 }
        );
    }
}
