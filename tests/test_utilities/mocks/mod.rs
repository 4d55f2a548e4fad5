/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_seed_reader;
mod mock_token_store;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_seed_reader::MockSeedReader;
pub use mock_token_store::MockTokenStore;
