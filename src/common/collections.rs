//! Hashing collections used across the crate. FxHash is plenty for the small
//! keys we map (window handles, scope strings).

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;
