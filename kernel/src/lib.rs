pub mod directory;
pub mod ledger;
pub mod model;
pub mod repository;
