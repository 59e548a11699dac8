//! Jacks or Better video poker (9/6 pay table), single hand, one draw.
//!
//! The first ten cards of a seeded shuffle decide the hand: cards 0..5 are the
//! deal, cards 5..10 replace the non-held cards left to right. Because the
//! shuffle only depends on the seed, the deal can be shown before the player
//! picks holds and the draw stays verifiable.

use crate::errors::FairdrawResult;
use crate::games::seed_engine::{GameSeed, RollStream};
use crate::games::types::{GameDetails, GameResult};
use crate::money::{Amount, Multiplier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 5;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
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

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn text(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn text(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// A playing card, serialized as two characters such as `"As"` or `"Td"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Card at `index` of an unshuffled deck, rank-major
    fn from_deck_index(index: usize) -> Self {
        Self {
            rank: Rank::ALL[index / 4],
            suit: Suit::ALL[index % 4],
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.text(), self.suit.text())
    }
}

impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format!("invalid card '{}'", s));
        };
        let rank = Rank::ALL
            .into_iter()
            .find(|x| x.text() == r)
            .ok_or_else(|| format!("invalid rank in '{}'", s))?;
        let suit = Suit::ALL
            .into_iter()
            .find(|x| x.text() == su)
            .ok_or_else(|| format!("invalid suit in '{}'", s))?;
        Ok(Card::new(rank, suit))
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Paying hand categories, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandRank {
    JacksOrBetter,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandRank {
    /// 9/6 Jacks or Better, stake included
    pub const fn pays(self) -> u64 {
        match self {
            HandRank::RoyalFlush => 250,
            HandRank::StraightFlush => 50,
            HandRank::FourOfAKind => 25,
            HandRank::FullHouse => 9,
            HandRank::Flush => 6,
            HandRank::Straight => 4,
            HandRank::ThreeOfAKind => 3,
            HandRank::TwoPair => 2,
            HandRank::JacksOrBetter => 1,
        }
    }
}

/// Seeded partial shuffle returning the first ten cards
fn deal_cards(stream: &mut RollStream) -> [Card; 2 * HAND_SIZE] {
    let mut deck: Vec<usize> = (0..DECK_SIZE).collect();
    for i in 0..2 * HAND_SIZE {
        let j = i + stream.next_below((DECK_SIZE - i) as u32) as usize;
        deck.swap(i, j);
    }
    std::array::from_fn(|i| Card::from_deck_index(deck[i]))
}

/// The initial five cards for a seed, before any holds
pub fn deal_preview(seed: &GameSeed) -> FairdrawResult<[Card; HAND_SIZE]> {
    let cards = deal_cards(&mut RollStream::new(seed)?);
    Ok(std::array::from_fn(|i| cards[i]))
}

/// Best paying category of a five-card hand, `None` for a losing hand
pub fn evaluate_hand(hand: &[Card; HAND_SIZE]) -> Option<HandRank> {
    let mut counts = [0u8; 15];
    for card in hand {
        counts[card.rank.value() as usize] += 1;
    }

    let flush = hand.iter().all(|c| c.suit == hand[0].suit);

    let mut values: Vec<u8> = hand.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable();
    let distinct = values.windows(2).all(|w| w[0] != w[1]);
    let wheel = values == [2, 3, 4, 5, 14];
    let straight = distinct && (values[4] - values[0] == 4 || wheel);

    if straight && flush {
        return Some(if values[0] == Rank::Ten.value() {
            HandRank::RoyalFlush
        } else {
            HandRank::StraightFlush
        });
    }

    let mut groups: Vec<u8> = counts.iter().copied().filter(|&n| n > 0).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    match groups.as_slice() {
        [4, ..] => Some(HandRank::FourOfAKind),
        [3, 2] => Some(HandRank::FullHouse),
        _ if flush => Some(HandRank::Flush),
        _ if straight => Some(HandRank::Straight),
        [3, ..] => Some(HandRank::ThreeOfAKind),
        [2, 2, ..] => Some(HandRank::TwoPair),
        [2, ..] => {
            let pair = counts.iter().rposition(|&n| n == 2)?;
            ((pair as u8) >= Rank::Jack.value()).then_some(HandRank::JacksOrBetter)
        }
        _ => None,
    }
}

pub fn play_video_poker(bet: Amount, holds: [bool; HAND_SIZE], stream: &mut RollStream) -> FairdrawResult<GameResult> {
    let cards = deal_cards(stream);
    let initial_hand: [Card; HAND_SIZE] = std::array::from_fn(|i| cards[i]);

    let mut replacements = cards[HAND_SIZE..].iter().copied();
    let mut final_hand = initial_hand;
    for (slot, held) in final_hand.iter_mut().zip(holds) {
        if !held {
            if let Some(card) = replacements.next() {
                *slot = card;
            }
        }
    }

    let rank = evaluate_hand(&final_hand);
    let details = GameDetails::VideoPoker {
        initial_hand,
        final_hand,
        holds,
        rank,
    };

    match rank {
        Some(r) => GameResult::settle(bet, Multiplier::from_whole(r.pays()), details),
        None => Ok(GameResult::loss(details)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(cards: &str) -> [Card; HAND_SIZE] {
        let parsed: Vec<Card> = cards.split_whitespace().map(|c| c.parse().unwrap()).collect();
        parsed.try_into().unwrap()
    }

    #[test]
    fn test_card_text_roundtrip() {
        let card: Card = "Td".parse().unwrap();
        assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"Td\"");
        assert!("1x".parse::<Card>().is_err());
        assert!("Asd".parse::<Card>().is_err());
    }

    #[test]
    fn test_hand_ranks() {
        let cases = [
            ("Ts Js Qs Ks As", Some(HandRank::RoyalFlush)),
            ("9h Th Jh Qh Kh", Some(HandRank::StraightFlush)),
            ("Ad 2d 3d 4d 5d", Some(HandRank::StraightFlush)),
            ("7c 7d 7h 7s 2c", Some(HandRank::FourOfAKind)),
            ("Kc Kd Kh 3s 3c", Some(HandRank::FullHouse)),
            ("2h 6h 9h Jh Ah", Some(HandRank::Flush)),
            ("Ac 2d 3h 4s 5c", Some(HandRank::Straight)),
            ("Tc Jd Qh Ks Ac", Some(HandRank::Straight)),
            ("5c 5d 5h 9s Kc", Some(HandRank::ThreeOfAKind)),
            ("4c 4d 9h 9s Kc", Some(HandRank::TwoPair)),
            ("Jc Jd 3h 8s 2c", Some(HandRank::JacksOrBetter)),
            ("Tc Td 3h 8s 2c", None),
            ("Qc Ad 3h 8s 2c", None),
            ("Qc Kd Ah 2s 3c", None),
        ];
        for (cards, expected) in cases {
            assert_eq!(evaluate_hand(&hand(cards)), expected, "{}", cards);
        }
    }

    #[test]
    fn test_deal_is_ten_distinct_cards() {
        let mut stream = RollStream::new(&GameSeed::new("poker", "client", 1)).unwrap();
        let cards = deal_cards(&mut stream);
        let mut seen: Vec<Card> = Vec::new();
        for card in cards {
            assert!(!seen.contains(&card));
            seen.push(card);
        }
    }

    #[test]
    fn test_holding_everything_keeps_the_deal() {
        let seed = GameSeed::new("poker", "client", 9);
        let preview = deal_preview(&seed).unwrap();
        let result = play_video_poker(Amount(100), [true; 5], &mut RollStream::new(&seed).unwrap()).unwrap();

        let GameDetails::VideoPoker { initial_hand, final_hand, rank, .. } = result.details else {
            panic!("expected video poker details");
        };
        assert_eq!(initial_hand, preview);
        assert_eq!(final_hand, preview);
        assert_eq!(rank, evaluate_hand(&preview));
    }

    #[test]
    fn test_draw_replaces_in_order() {
        let seed = GameSeed::new("poker", "client", 4);
        let cards = deal_cards(&mut RollStream::new(&seed).unwrap());
        let holds = [true, false, true, false, false];
        let result = play_video_poker(Amount(100), holds, &mut RollStream::new(&seed).unwrap()).unwrap();

        let GameDetails::VideoPoker { final_hand, .. } = result.details else {
            panic!("expected video poker details");
        };
        assert_eq!(final_hand, [cards[0], cards[5], cards[2], cards[6], cards[7]]);
    }

    #[test]
    fn test_payout_follows_pay_table() {
        for nonce in 0..40 {
            let seed = GameSeed::new("poker", "table", nonce);
            let result = play_video_poker(Amount(10), [false; 5], &mut RollStream::new(&seed).unwrap()).unwrap();
            let GameDetails::VideoPoker { rank, .. } = result.details else {
                panic!("expected video poker details");
            };
            let expected = rank.map_or(0, |r| 10 * r.pays());
            assert_eq!(result.payout, Amount(expected));
        }
    }
}
