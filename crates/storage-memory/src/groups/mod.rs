mod repository;

pub use repository::GroupRepository;
