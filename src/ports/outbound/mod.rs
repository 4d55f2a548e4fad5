/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (record stores, file system,
/// network, console, etc.).
pub mod change_listener;
pub mod clock;
pub mod entity_store;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod seed_reader;
pub mod token_store;

pub use change_listener::{
    ChangeEvent, ChangeListener, ChangeNotifier, ChangeOp, ListenerRegistry, SubscriptionId,
};
pub use clock::Clock;
pub use entity_store::{EntityStore, InventoryStore};
pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use seed_reader::SeedReader;
pub use token_store::TokenStore;
