//! Built-in command modules.

mod echo;
mod jid;
mod menu;
mod ping;
mod whoami;

pub use echo::Echo;
pub use jid::JidCommand;
pub use menu::Menu;
pub use ping::Ping;
pub use whoami::Whoami;
