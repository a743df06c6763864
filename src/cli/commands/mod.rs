pub mod db;
pub mod fixture;
