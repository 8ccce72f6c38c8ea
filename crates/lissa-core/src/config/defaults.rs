//! Compiled defaults. Single source of truth for every tunable.

// Cache
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_CACHE_MAX_DIRTY: usize = 50;

// Retrieval
pub const DEFAULT_MAX_RESULTS: i64 = 10;
pub const MAX_RESULTS_INFINITY: &str = "infinity";
pub const DEFAULT_TOKENIZATION: &str = "WORD";
pub const DEFAULT_MINIMUM_MATCH_LENGTH: i64 = 1;
pub const DEFAULT_TOKEN_EXPONENT: f64 = 2.0;
pub const DEFAULT_CODE_GRAPH_INNER_STRATEGY: &str = "cosine_similarity";

// Chat models
pub const DEFAULT_SEED: i64 = 133_742_243;
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 600;

// Embeddings
pub const DEFAULT_OPENAI_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_OLLAMA_EMBEDDING_MODEL: &str = "nomic-embed-text:v1.5";
pub const DEFAULT_OPENWEBUI_EMBEDDING_MODEL: &str = "nomic-embed-text:v1.5";
pub const OPENAI_EMBEDDING_THREADS: usize = 40;
pub const SELF_HOSTED_EMBEDDING_THREADS: usize = 1;
pub const MAX_EMBEDDING_TOKENS: usize = 8000;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_MOCK_EMBEDDING_DIMENSIONS: usize = 16;
pub const EMBEDDING_L1_CAPACITY: u64 = 10_000;

// Aggregation
pub const DEFAULT_SOURCE_GRANULARITY: i64 = 0;
pub const DEFAULT_TARGET_GRANULARITY: i64 = 0;

// Logging
pub const DEFAULT_LOG_FILTER: &str = "lissa=info";
