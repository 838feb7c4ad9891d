pub mod catalog;
pub mod directory;

pub use catalog::DoctorCatalog;
pub use directory::DirectoryService;
