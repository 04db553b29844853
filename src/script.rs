pub mod fordo;
pub mod ifthen;
