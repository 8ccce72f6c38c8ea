pub mod cache;
pub mod chat;
pub mod embedding;

pub use cache::ICache;
pub use chat::IChatModel;
pub use embedding::IEmbeddingProvider;
