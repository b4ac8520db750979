//! Inter-agent text communication.
//!
//! - `CommunicationChannel` keeps the current joint message and its history
//! - `CommWrapper` layers the channel over any `MultiAgentEnv`
//! - `Transcript` appends messages to a text file

mod channel;
mod transcript;
mod wrapper;

pub use channel::{CommunicationChannel, JointMessage};
pub use transcript::Transcript;
pub use wrapper::{CommWrapper, ACTIONS_KEY, ENV_KEY, MESSAGES_KEY};
