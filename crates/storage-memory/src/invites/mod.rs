mod repository;

pub use repository::GroupInviteRepository;
