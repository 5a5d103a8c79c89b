pub mod action;
pub mod key;
