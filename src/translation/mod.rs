/*!
 * Translation engine for JSON documents.
 *
 * This module contains the core functionality for translating the strings of
 * a JSON document while keeping its structure. It is split into several submodules:
 *
 * - `placeholders`: Placeholder protection (`{{name}}` <-> `<t0/>`)
 * - `cache`: Deduplicating cache of translation-safe keys
 * - `walker`: Recursive traversal of JSON values
 * - `batch`: Partitioning and sequential batch submission
 * - `core`: Translation service tying the passes together
 */

// Re-export main types for easier usage
pub use self::batch::{BatchSummary, BatchTranslator, DEFAULT_MAX_BATCH_SIZE, partition};
pub use self::cache::EntryCache;
pub use self::core::{CollectionStats, TranslationReport, TranslationService};
pub use self::placeholders::{NormalizedText, contains_marker, denormalize, normalize};
pub use self::walker::walk;

// Submodules
pub mod batch;
pub mod cache;
pub mod core;
pub mod placeholders;
pub mod walker;
