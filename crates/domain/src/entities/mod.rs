//! Domain entities.

mod conversation;
mod game_state;
mod message;
mod suspect;

pub use conversation::{Conversation, ConversationContext};
pub use game_state::GameState;
pub use message::{Message, MessageSender, MAX_MESSAGE_CHARS};
pub use suspect::Suspect;
