// Repository modules
pub mod birthday_repository;

pub use birthday_repository::BirthdayRepository;
