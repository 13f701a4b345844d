//! Sample quotes for seeding.
//!
//! Pure data; the seeding tool stamps each one with a creation time and
//! writes it with a conditional put.

use chrono::{DateTime, Duration, Utc};

use super::requests::NewQuote;
use super::types::Quote;

const SAMPLES: &[(&str, &str, &str, &str)] = &[
    (
        "Do or do not. There is no try.",
        "Yoda",
        "sci-fi",
        "Star Wars: The Empire Strikes Back",
    ),
    (
        "Fear is the mind-killer.",
        "Paul Atreides",
        "sci-fi",
        "Dune Messiah",
    ),
    (
        "All we have to decide is what to do with the time that is given us.",
        "Gandalf",
        "fantasy",
        "The Lord of the Rings",
    ),
    (
        "It is our choices, Harry, that show what we truly are, far more than our abilities.",
        "Dumbledore",
        "fantasy",
        "Harry Potter and the Chamber of Secrets",
    ),
    ("I am Groot.", "Groot", "sci-fi", "Guardians of the Galaxy"),
    (
        "Not all those who wander are lost.",
        "Bilbo Baggins",
        "fantasy",
        "The Hobbit",
    ),
];

/// Returns the sample quotes as validated creation requests.
pub fn sample_quotes() -> Vec<NewQuote> {
    SAMPLES
        .iter()
        .map(|(text, author, genre, source)| NewQuote {
            text: text.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            source: source.to_string(),
        })
        .collect()
}

/// Builds the sample quotes with creation times one millisecond apart,
/// starting at `start`, so index order matches list order.
pub fn generate_sample_quotes(start: DateTime<Utc>) -> Vec<Quote> {
    sample_quotes()
        .into_iter()
        .enumerate()
        .map(|(i, new)| Quote::new(new, start + Duration::milliseconds(i as i64)))
        .collect()
}
