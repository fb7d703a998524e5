pub mod email_sender;
pub mod error;

pub use email_sender::{EmailSender, EmailSenderConfig};
pub use error::EmailError;
