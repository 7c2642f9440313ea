//! Display-name provider for new documents.
//!
//! Identity is an opaque per-session handle; the only thing the core asks
//! of it is a display name to record at document creation. Nothing else
//! reads it.

use rand::seq::SliceRandom;

/// Supplies an opaque display name when a document is created.
pub trait IdentityProvider: Send + Sync {
    fn display_name(&self) -> String;
}

const ADJECTIVES: [&str; 16] = [
    "Brave", "Calm", "Daring", "Eager", "Gentle", "Hasty", "Keen", "Lucky", "Merry", "Nimble",
    "Patient", "Quiet", "Rapid", "Sly", "Tidy", "Witty",
];

const ANIMALS: [&str; 16] = [
    "Otter", "Heron", "Badger", "Lynx", "Marmot", "Osprey", "Pika", "Raven", "Seal", "Shrew",
    "Stoat", "Swift", "Tern", "Vole", "Wren", "Yak",
];

/// Random adjective-animal pairs, e.g. "Brave Otter".
#[derive(Debug, Clone, Copy, Default)]
pub struct WordlistIdentity;

impl IdentityProvider for WordlistIdentity {
    fn display_name(&self) -> String {
        let mut rng = rand::thread_rng();
        let adjective = ADJECTIVES.choose(&mut rng).unwrap_or(&ADJECTIVES[0]);
        let animal = ANIMALS.choose(&mut rng).unwrap_or(&ANIMALS[0]);
        format!("{adjective} {animal}")
    }
}

/// Always returns the same name. For tests and scripted use.
#[derive(Debug, Clone)]
pub struct FixedIdentity {
    name: String,
}

impl FixedIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl IdentityProvider for FixedIdentity {
    fn display_name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wordlist_name_has_two_words() {
        let name = WordlistIdentity.display_name();
        let words: Vec<&str> = name.split(' ').collect();
        assert_eq!(words.len(), 2);
        assert!(ADJECTIVES.contains(&words[0]));
        assert!(ANIMALS.contains(&words[1]));
    }

    #[test]
    fn fixed_identity_repeats() {
        let identity = FixedIdentity::new("Test User");
        assert_eq!(identity.display_name(), "Test User");
        assert_eq!(identity.display_name(), "Test User");
    }
}
