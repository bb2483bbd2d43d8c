pub mod command;
pub mod power;
pub mod protocol;
