//! Infrastructure layer - database bootstrap, state building and DbErr translation.

pub mod db;
pub mod db_errors;
pub mod state;
