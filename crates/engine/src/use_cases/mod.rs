//! Use cases - user story orchestration across stores and ports.

pub mod check_message;
pub mod reset_game;
pub mod select_character;
pub mod send_message;

pub use check_message::{CheckMessage, MessageCheck};
pub use reset_game::ResetGame;
pub use select_character::{CharacterSelected, SelectCharacter, SelectCharacterError};
pub use send_message::{SendMessage, SendMessageError, SendOutcome};
