use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LayoutError;
use crate::seat::SeatPosition::{Aisle, Center, Middle, Window};
use crate::seat::{Deck, SeatMap, SeatPosition, SeatType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Flight,
    Bus,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Flight => "flight",
            TransportMode::Bus => "bus",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flight" => Ok(TransportMode::Flight),
            "bus" => Ok(TransportMode::Bus),
            other => Err(format!("unknown transport mode: {}", other)),
        }
    }
}

/// How seat numbers are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    /// `{row}{letter}`, e.g. `12C`.
    RowLetter,
    /// `1`, `2`, ... running across every deck.
    Sequential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub letter: Option<char>,
    pub position: SeatPosition,
}

const fn lettered(letter: char, position: SeatPosition) -> ColumnSpec {
    ColumnSpec {
        letter: Some(letter),
        position,
    }
}

const fn plain(position: SeatPosition) -> ColumnSpec {
    ColumnSpec {
        letter: None,
        position,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckPlan {
    pub deck: Deck,
    pub seat_type: SeatType,
    pub rows: u32,
    pub columns: &'static [ColumnSpec],
}

impl DeckPlan {
    pub fn seat_count(&self) -> u32 {
        self.rows * self.columns.len() as u32
    }
}

/// Static description of one seat class. Decks are generated in order and
/// their rows are numbered consecutively, so a lower deck of 5 rows is
/// followed by upper-deck rows 6, 7, ...
#[derive(Debug, PartialEq, Eq)]
pub struct LayoutDescriptor {
    pub name: &'static str,
    pub mode: TransportMode,
    pub label: &'static str,
    pub total_seats: u32,
    pub numbering: Numbering,
    pub decks: &'static [DeckPlan],
}

impl LayoutDescriptor {
    pub fn rows(&self) -> u32 {
        self.decks.iter().map(|d| d.rows).sum()
    }

    pub fn generate(&self) -> Result<SeatMap, LayoutError> {
        crate::generator::generate(self)
    }
}

static SIX_ABREAST: [ColumnSpec; 6] = [
    lettered('A', Window),
    lettered('B', Middle),
    lettered('C', Aisle),
    lettered('D', Aisle),
    lettered('E', Middle),
    lettered('F', Window),
];

// B and E are dropped to model the wider seats.
pub(crate) static BUSINESS_COLUMNS: [ColumnSpec; 4] = [
    lettered('A', Window),
    lettered('C', Aisle),
    lettered('D', Aisle),
    lettered('F', Window),
];

static FIRST_COLUMNS: [ColumnSpec; 3] = [
    lettered('A', Window),
    lettered('F', Center),
    lettered('K', Window),
];

static TWO_BY_TWO: [ColumnSpec; 4] = [plain(Window), plain(Aisle), plain(Aisle), plain(Window)];

static ONE_BY_TWO: [ColumnSpec; 3] = [plain(Window), plain(Aisle), plain(Window)];

static ECONOMY: LayoutDescriptor = LayoutDescriptor {
    name: "Economy",
    mode: TransportMode::Flight,
    label: "3x3",
    total_seats: 120,
    numbering: Numbering::RowLetter,
    decks: &[DeckPlan {
        deck: Deck::Main,
        seat_type: SeatType::Economy,
        rows: 20,
        columns: &SIX_ABREAST,
    }],
};

static PREMIUM_ECONOMY: LayoutDescriptor = LayoutDescriptor {
    name: "Premium Economy",
    mode: TransportMode::Flight,
    label: "3x3",
    total_seats: 60,
    numbering: Numbering::RowLetter,
    decks: &[DeckPlan {
        deck: Deck::Main,
        seat_type: SeatType::PremiumEconomy,
        rows: 10,
        columns: &SIX_ABREAST,
    }],
};

static BUSINESS: LayoutDescriptor = LayoutDescriptor {
    name: "Business",
    mode: TransportMode::Flight,
    label: "2x2",
    total_seats: 40,
    numbering: Numbering::RowLetter,
    decks: &[DeckPlan {
        deck: Deck::Main,
        seat_type: SeatType::Business,
        rows: 10,
        columns: &BUSINESS_COLUMNS,
    }],
};

static FIRST_CLASS: LayoutDescriptor = LayoutDescriptor {
    name: "First Class",
    mode: TransportMode::Flight,
    label: "1x1x1",
    total_seats: 12,
    numbering: Numbering::RowLetter,
    decks: &[DeckPlan {
        deck: Deck::Main,
        seat_type: SeatType::First,
        rows: 4,
        columns: &FIRST_COLUMNS,
    }],
};

static SEATER: LayoutDescriptor = LayoutDescriptor {
    name: "Seater",
    mode: TransportMode::Bus,
    label: "2x2",
    total_seats: 40,
    numbering: Numbering::Sequential,
    decks: &[DeckPlan {
        deck: Deck::Lower,
        seat_type: SeatType::Seater,
        rows: 10,
        columns: &TWO_BY_TWO,
    }],
};

static SEMI_SLEEPER: LayoutDescriptor = LayoutDescriptor {
    name: "Semi-Sleeper",
    mode: TransportMode::Bus,
    label: "2x2+1x2",
    total_seats: 35,
    numbering: Numbering::Sequential,
    decks: &[
        DeckPlan {
            deck: Deck::Lower,
            seat_type: SeatType::Seater,
            rows: 5,
            columns: &TWO_BY_TWO,
        },
        DeckPlan {
            deck: Deck::Upper,
            seat_type: SeatType::Sleeper,
            rows: 5,
            columns: &ONE_BY_TWO,
        },
    ],
};

static SLEEPER: LayoutDescriptor = LayoutDescriptor {
    name: "Sleeper",
    mode: TransportMode::Bus,
    label: "1x2",
    total_seats: 30,
    numbering: Numbering::Sequential,
    decks: &[DeckPlan {
        deck: Deck::Lower,
        seat_type: SeatType::Sleeper,
        rows: 10,
        columns: &ONE_BY_TWO,
    }],
};

/// A closed set of seat classes for one transport mode.
pub trait SeatClass: Copy + Sized + 'static {
    const MODE: TransportMode;

    fn all() -> &'static [Self];

    fn descriptor(self) -> &'static LayoutDescriptor;

    fn name(self) -> &'static str {
        self.descriptor().name
    }

    fn parse(name: &str) -> Result<Self, LayoutError> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|class| class.name() == name)
            .ok_or_else(|| LayoutError::UnknownClass {
                mode: Self::MODE,
                name: name.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CabinClass {
    Economy,
    #[serde(rename = "Premium Economy")]
    PremiumEconomy,
    Business,
    #[serde(rename = "First Class")]
    FirstClass,
}

impl SeatClass for CabinClass {
    const MODE: TransportMode = TransportMode::Flight;

    fn all() -> &'static [Self] {
        &[
            CabinClass::Economy,
            CabinClass::PremiumEconomy,
            CabinClass::Business,
            CabinClass::FirstClass,
        ]
    }

    fn descriptor(self) -> &'static LayoutDescriptor {
        match self {
            CabinClass::Economy => &ECONOMY,
            CabinClass::PremiumEconomy => &PREMIUM_ECONOMY,
            CabinClass::Business => &BUSINESS,
            CabinClass::FirstClass => &FIRST_CLASS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusSeatType {
    Seater,
    #[serde(rename = "Semi-Sleeper")]
    SemiSleeper,
    Sleeper,
}

impl SeatClass for BusSeatType {
    const MODE: TransportMode = TransportMode::Bus;

    fn all() -> &'static [Self] {
        &[BusSeatType::Seater, BusSeatType::SemiSleeper, BusSeatType::Sleeper]
    }

    fn descriptor(self) -> &'static LayoutDescriptor {
        match self {
            BusSeatType::Seater => &SEATER,
            BusSeatType::SemiSleeper => &SEMI_SLEEPER,
            BusSeatType::Sleeper => &SLEEPER,
        }
    }
}

macro_rules! impl_class_text {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = LayoutError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as SeatClass>::parse(s)
            }
        }
    };
}

impl_class_text!(CabinClass);
impl_class_text!(BusSeatType);

/// Resolves a class name for the given mode. Unknown names always fail;
/// there is no default class.
pub fn lookup(mode: TransportMode, class_name: &str) -> Result<&'static LayoutDescriptor, LayoutError> {
    match mode {
        TransportMode::Flight => CabinClass::parse(class_name).map(CabinClass::descriptor),
        TransportMode::Bus => BusSeatType::parse(class_name).map(BusSeatType::descriptor),
    }
}

/// Class names offered for a mode, in registry order.
pub fn class_names(mode: TransportMode) -> Vec<&'static str> {
    match mode {
        TransportMode::Flight => CabinClass::all().iter().map(|c| c.name()).collect(),
        TransportMode::Bus => BusSeatType::all().iter().map(|c| c.name()).collect(),
    }
}
