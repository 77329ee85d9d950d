use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ORDERED: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Maps a zero-based rank index (0 = Two, 12 = Ace).
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 13 {
            Some(Self::ORDERED[index as usize])
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self as u8 - 2
    }

    pub fn from_symbol(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" | "T" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn from_index_covers_two_through_ace() {
        assert_eq!(Rank::from_index(0), Some(Rank::Two));
        assert_eq!(Rank::from_index(10), Some(Rank::Queen));
        assert_eq!(Rank::from_index(12), Some(Rank::Ace));
        assert_eq!(Rank::from_index(13), None);
    }

    #[test]
    fn index_is_inverse_of_from_index() {
        for rank in Rank::ORDERED {
            assert_eq!(Rank::from_index(rank.index()), Some(rank));
        }
    }

    #[test]
    fn symbols_parse_both_ten_spellings() {
        assert_eq!(Rank::from_symbol("10"), Some(Rank::Ten));
        assert_eq!(Rank::from_symbol("t"), Some(Rank::Ten));
        assert_eq!(Rank::from_symbol("1"), None);
        assert_eq!(Rank::Queen.to_string(), "Q");
    }
}
