pub mod channel;
pub mod error;
pub mod traits;
pub mod types;

pub use channel::{BusTransport, Outbound, OutboundBus};
pub use error::{Result, SwitchyardError};
pub use traits::Transport;
pub use types::{
    Action, AttachmentRef, Command, DisplayItem, IncomingMessage, Profile, ResponseEnvelope,
    SessionId, StarterPrompt,
};
