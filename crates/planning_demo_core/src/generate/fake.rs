//! Synthetic text: person names, words, catch phrases and filler prose.
//!
//! Pools are fixed and every draw comes from the caller's [`DemoRng`], so
//! text is as reproducible as the rest of the dataset.

use super::rng::DemoRng;
use super::GenerateResult;

const FIRST_NAMES: &[&str] = &[
    "Sarah", "Mike", "Priya", "James", "Ana", "David", "Emily", "Carlos", "Mei", "Omar",
    "Hannah", "Lucas", "Aisha", "Daniel", "Sofia", "Ethan", "Yuki", "Noah", "Grace", "Ravi",
    "Olivia", "Mateo", "Chloe", "Samuel", "Fatima", "Leo", "Isabel", "Victor", "Nora", "Kenji",
    "Amara", "Julian", "Elena", "Marcus", "Zara", "Henry", "Lina", "Tomas", "Ruth", "Andre",
];

const LAST_NAMES: &[&str] = &[
    "Chen", "Rodriguez", "Patel", "Liu", "Silva", "Johnson", "Nguyen", "Garcia", "Kim",
    "Okafor", "Schmidt", "Rossi", "Haddad", "Kowalski", "Martin", "Tanaka", "Brown", "Singh",
    "Lopez", "Novak", "Walker", "Dubois", "Costa", "Ibrahim", "Larsen", "Moreau", "Ahmed",
    "Fischer", "Murphy", "Yamamoto", "Green", "Alvarez", "Petrov", "Hughes", "Mendes",
    "Sato", "Baker", "Kaur", "Reyes", "Olsen",
];

const WORDS: &[&str] = &[
    "account", "analytics", "archive", "billing", "budget", "cache", "calendar", "catalog",
    "checkout", "cluster", "dashboard", "delivery", "directory", "export", "feedback", "filter",
    "forecast", "gateway", "import", "inbox", "index", "inventory", "invoice", "ledger",
    "login", "metrics", "network", "onboarding", "order", "partner", "payment", "pipeline",
    "portal", "pricing", "profile", "queue", "quota", "receipt", "registry", "release",
    "report", "routing", "search", "session", "settings", "shipping", "signup", "storage",
    "subscription", "support", "survey", "sync", "timeline", "token", "tracking", "upload",
    "vendor", "wallet", "webhook", "workflow", "audit", "backup", "compliance", "consent",
    "identity", "schema", "service", "interface", "performance", "migration",
];

const CATCH_ADJECTIVES: &[&str] = &[
    "Adaptive", "Balanced", "Centralized", "Cross-platform", "Customer-focused",
    "Distributed", "Enhanced", "Extended", "Integrated", "Managed", "Multi-layered",
    "Optimized", "Proactive", "Reactive", "Robust", "Scalable", "Streamlined", "Synergized",
    "Unified", "Versatile",
];

const CATCH_DESCRIPTORS: &[&str] = &[
    "24/7", "asynchronous", "client-driven", "cohesive", "contextually-based", "dynamic",
    "fault-tolerant", "global", "hybrid", "interactive", "mission-critical", "modular",
    "next generation", "real-time", "secure", "value-added",
];

const CATCH_NOUNS: &[&str] = &[
    "architecture", "capability", "framework", "hub", "initiative", "infrastructure",
    "interface", "model", "platform", "portal", "service-desk", "solution", "strategy",
    "toolset", "workforce",
];

const BS_VERBS: &[&str] = &[
    "aggregate", "architect", "deliver", "deploy", "drive", "embrace", "empower", "enable",
    "engage", "harness", "integrate", "leverage", "optimize", "orchestrate", "scale",
    "streamline", "transform", "unify",
];

const BS_ADJECTIVES: &[&str] = &[
    "best-of-breed", "cross-media", "end-to-end", "frictionless", "holistic", "innovative",
    "intuitive", "mission-critical", "plug-and-play", "real-time", "scalable", "seamless",
    "strategic", "turn-key", "vertical",
];

const BS_NOUNS: &[&str] = &[
    "channels", "communities", "deliverables", "experiences", "infrastructures", "markets",
    "metrics", "networks", "partnerships", "platforms", "solutions", "systems", "users",
    "web-readiness", "workflows",
];

/// Text source bound to one random stream.
pub struct Faker<'r> {
    rng: &'r mut DemoRng,
}

impl<'r> Faker<'r> {
    pub fn new(rng: &'r mut DemoRng) -> Self {
        Self { rng }
    }

    /// `First Last`.
    pub fn name(&mut self) -> GenerateResult<String> {
        let first = self.rng.pick(FIRST_NAMES, "first names")?;
        let last = self.rng.pick(LAST_NAMES, "last names")?;
        Ok(format!("{first} {last}"))
    }

    /// One lowercase word.
    pub fn word(&mut self) -> GenerateResult<&'static str> {
        Ok(*self.rng.pick(WORDS, "words")?)
    }

    /// Marketing-style project name, e.g. `Scalable real-time platform`.
    pub fn catch_phrase(&mut self) -> GenerateResult<String> {
        let adjective = self.rng.pick(CATCH_ADJECTIVES, "catch adjectives")?;
        let descriptor = self.rng.pick(CATCH_DESCRIPTORS, "catch descriptors")?;
        let noun = self.rng.pick(CATCH_NOUNS, "catch nouns")?;
        Ok(format!("{adjective} {descriptor} {noun}"))
    }

    /// Business phrase, e.g. `streamline seamless workflows`.
    pub fn bs(&mut self) -> GenerateResult<String> {
        let verb = self.rng.pick(BS_VERBS, "bs verbs")?;
        let adjective = self.rng.pick(BS_ADJECTIVES, "bs adjectives")?;
        let noun = self.rng.pick(BS_NOUNS, "bs nouns")?;
        Ok(format!("{verb} {adjective} {noun}"))
    }

    /// Capitalized sentence of 4..=10 words ending in a period.
    pub fn sentence(&mut self) -> GenerateResult<String> {
        let length = self.rng.int(4..=10);
        let mut words = Vec::with_capacity(length as usize);
        for _ in 0..length {
            words.push(self.word()?);
        }
        let mut sentence = capitalize(&words.join(" "));
        sentence.push('.');
        Ok(sentence)
    }

    /// Three to six sentences.
    pub fn paragraph(&mut self) -> GenerateResult<String> {
        let count = self.rng.int(3..=6);
        let mut sentences = Vec::with_capacity(count as usize);
        for _ in 0..count {
            sentences.push(self.sentence()?);
        }
        Ok(sentences.join(" "))
    }
}

/// Uppercases the first character.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{capitalize, Faker};
    use crate::generate::rng::DemoRng;

    #[test]
    fn capitalize_handles_empty_and_ascii() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("gateway"), "Gateway");
    }

    #[test]
    fn text_has_expected_shape() {
        let mut rng = DemoRng::seeded(5);
        let mut fake = Faker::new(&mut rng);

        let name = fake.name().unwrap();
        assert_eq!(name.split(' ').count(), 2);

        let sentence = fake.sentence().unwrap();
        assert!(sentence.ends_with('.'));
        assert!(sentence.chars().next().unwrap().is_uppercase());

        let paragraph = fake.paragraph().unwrap();
        assert!(paragraph.matches('.').count() >= 3);
    }
}
