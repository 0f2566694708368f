pub mod file;
pub mod song;

pub use file::Entity as File;
pub use song::Entity as Song;
