//! Hash collections used on hot paths.

/// Fx-hashed map, the default map type throughout the engine.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Fx-hashed set, the default set type throughout the engine.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
