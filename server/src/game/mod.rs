//! Nuclear War game engine: catalog, session state, rules and views.

pub mod cards;
pub mod error;
pub mod logic;
pub mod secrets;
pub mod session;
pub mod state;
pub mod types;
pub mod view;

pub use error::GameError;
pub use session::{Session, SessionRegistry};
pub use state::Game;
