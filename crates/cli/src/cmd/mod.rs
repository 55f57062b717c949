mod create;
mod info;
mod init;
mod inspect;

pub use create::{CreateArgs, cmd_create};
pub use info::cmd_info;
pub use init::cmd_init;
pub use inspect::cmd_inspect;
