pub mod mock;
pub mod watch;
