pub mod commands;
pub mod worker;
