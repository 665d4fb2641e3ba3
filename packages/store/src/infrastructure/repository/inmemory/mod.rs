//! InMemory Repository 実装

pub mod document;

pub use document::InMemoryDocumentRepository;
