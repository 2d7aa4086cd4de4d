pub mod channel;
pub mod expo_channel;
pub mod fanout;
pub mod fcm_channel;
pub mod token_store;
pub mod validation;

pub use channel::*;
pub use expo_channel::*;
pub use fanout::*;
pub use fcm_channel::*;
pub use token_store::*;
pub use validation::*;
