pub mod classify;
pub mod init;
pub mod plan;

pub use classify::classify_command;
pub use init::init_command;
pub use plan::plan_command;
