//! Shorthand range searches, one per comparator.

use crate::comparator::Comparator;
use crate::types::BPlusTree;

macro_rules! comparator_shortcuts {
    ($($(#[$meta:meta])* $suffix:ident => $variant:ident),* $(,)?) => {
        paste::paste! {
            impl<K: Ord, V> BPlusTree<K, V> {
                $(
                    $(#[$meta])*
                    pub fn [<range_ $suffix>](&self, target: &K) -> Vec<&V> {
                        self.range_search_by(target, Comparator::$variant)
                    }
                )*
            }
        }
    };
}

comparator_shortcuts! {
    /// Values whose key is `<= target`.
    le => LessOrEqual,
    /// Values whose key is `== target`.
    eq => Equal,
    /// Values whose key is `>= target`.
    ge => GreaterOrEqual,
}
