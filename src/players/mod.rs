//! Player state.
//!
//! A `Player` owns one seat's spices, hand, discard pile, victory cards and
//! coins. Seats are addressed by `core::PlayerId` and stored in a
//! `core::PlayerMap`.

mod player;

pub use player::Player;
