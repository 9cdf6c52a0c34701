pub mod core;
pub mod drive;
pub mod generation;
pub mod gui;
pub mod logging;
pub mod persistence;
pub mod speech;
pub mod views;

pub use crate::core::{
    LinguaError,
    Settings,
};
