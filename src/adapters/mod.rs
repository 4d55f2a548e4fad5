/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// record stores, the REST client, files, the console and formatters.
pub mod outbound;
