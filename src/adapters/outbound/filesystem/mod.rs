/// Filesystem adapters for seed, token and report files
mod file_writer;
mod seed_file_reader;
mod token_file;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use seed_file_reader::SeedFileReader;
pub use token_file::FileTokenStore;
