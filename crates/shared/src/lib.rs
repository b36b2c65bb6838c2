pub mod domain;
pub mod error;
pub mod leader;
pub mod snapshot;
pub mod team;
