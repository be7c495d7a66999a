pub mod add;
pub mod check;
pub mod fix;
pub mod helper;
pub mod hover;
pub mod init;
pub mod sync;
