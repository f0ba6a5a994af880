//! Authorized card registry.

use std::collections::HashSet;

use deadbolt_core::CardId;

/// The set of card identifiers authorized to begin an entry session.
///
/// Built once at construction and never mutated afterwards: runtime
/// enrollment is a non-goal. The minimal deployment registers a single
/// card, but any number is supported.
///
/// # Examples
///
/// ```
/// use deadbolt_access::CardRegistry;
/// use deadbolt_core::CardId;
///
/// let registry = CardRegistry::single("52C31C2F".parse().unwrap());
///
/// assert!(registry.contains(&"52C31C2F".parse().unwrap()));
/// assert!(!registry.contains(&"00000000".parse().unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct CardRegistry {
    cards: HashSet<CardId>,
}

impl CardRegistry {
    /// Build a registry from any collection of card identifiers.
    pub fn new(cards: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Build a registry holding exactly one card.
    pub fn single(card: CardId) -> Self {
        Self::new([card])
    }

    /// Check whether a card is authorized.
    #[must_use]
    pub fn contains(&self, card: &CardId) -> bool {
        self.cards.contains(card)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if no cards are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
