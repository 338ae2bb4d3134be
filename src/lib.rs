//! Registration form engine: field validation and the touched/error state
//! machine that decides which messages are shown.

pub mod config;
pub mod consts;
pub mod form;
pub mod models;
pub mod utils;
