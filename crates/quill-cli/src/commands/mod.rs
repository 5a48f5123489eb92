pub mod bind;
pub mod clear;
pub mod show;
pub mod unset;
pub mod update;
pub mod write;
