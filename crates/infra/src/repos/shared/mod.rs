pub mod file_repo;
pub mod inmemory_repo;
