//! Offline word list used when the dictionary service is unavailable.

const COMMON_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "cat",
    "dog", "car", "house", "book", "tree", "water", "fire", "earth", "wind", "love", "hate",
    "good", "bad", "big", "small", "fast", "slow", "hot", "cold", "up", "down", "left", "right",
    "yes", "no", "hello", "goodbye", "please", "thank", "sorry", "help", "word", "game", "play",
    "fun", "win", "lose", "start", "end", "go", "stop", "run", "walk", "jump", "sit", "stand",
    "look", "hear", "talk", "read", "write", "learn", "teach", "work", "rest", "eat", "drink",
    "sleep", "wake", "happy", "sad", "angry", "calm", "fork", "spoon", "knife", "plate", "cup",
    "glass", "table", "chair", "door", "window", "wall", "floor", "roof", "room", "kitchen",
    "bedroom", "bathroom", "garden", "park", "school", "office", "store", "market", "hospital",
    "church", "bank", "hotel", "restaurant",
];

/// Case-insensitive exact match against the common word list.
pub fn is_common_word(word: &str) -> bool {
    COMMON_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
}
