pub mod competition;
pub mod db;
