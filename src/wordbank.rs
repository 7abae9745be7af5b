use rand::Rng;

/// The closed animal vocabulary. Order is stable.
pub const ANIMAL_WORDS: [&str; 53] = [
    "ALLIGATOR", "ANT", "BEAR", "BEE", "BIRD", "CAMEL", "CAT", "CHEETAH", "CHICKEN", "CHIMPANZEE",
    "COW", "CROCODILE", "DEER", "DOG", "DOLPHIN", "DUCK", "EAGLE", "ELEPHANT", "FISH", "FLY",
    "FOX", "FROG", "GIRAFFE", "GOAT", "GOLDFISH", "HAMSTER", "HIPPOPOTAMUS", "HORSE", "KANGAROO",
    "KITTEN", "LION", "LOBSTER", "MONKEY", "OCTOPUS", "OWL", "PANDA", "PIG", "PENGUIN", "PUPPY",
    "RABBIT", "RAT", "SCORPION", "SEAL", "SHARK", "SHEEP", "SNAIL", "SNAKE", "SPIDER", "SQUIRREL",
    "TIGER", "TURTLE", "WOLF", "ZEBRA",
];

#[must_use]
pub fn all_words() -> &'static [&'static str] {
    &ANIMAL_WORDS
}

/// Draws one word uniformly at random, with replacement.
pub fn random_word<R: Rng>(rng: &mut R) -> &'static str {
    ANIMAL_WORDS[rng.random_range(0..ANIMAL_WORDS.len())]
}
