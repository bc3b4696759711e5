//! Question bank collaborator
//!
//! The bank supplies a complete board on demand and is the swappable
//! content source for a session: a database-backed or generated bank only
//! has to implement [`QuestionBank`]. An incomplete board (any category
//! missing any tier) is a hard failure, never a silently smaller grid.

use std::collections::HashMap;

use thiserror::Error;

use crate::board::{Board, BoardLayout, Cell, CellKey};

/// Supplies a full category/value/prompt/answer board on demand
pub trait QuestionBank {
    /// Draws a complete board for the given layout
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the bank cannot produce a board where every
    /// category has a prompt for every tier of the layout.
    fn draw_board(&self, layout: BoardLayout) -> Result<Board, Error>;
}

/// Errors that can occur while drawing a board
#[derive(Debug, Error)]
pub enum Error {
    /// The bank has no categories at all
    #[error("question pool has no categories")]
    EmptyPool,
    /// The pool has fewer categories than the layout needs
    #[error("pool has {available} categories, {needed} needed")]
    TooFewCategories {
        /// Categories available in the pool
        available: usize,
        /// Categories the layout requires
        needed: usize,
    },
    /// A pool category has no question at one of the layout's tiers
    #[error("category {category:?} has no question worth {value}")]
    MissingTier {
        /// The category lacking the question
        category: String,
        /// The point value with no question behind it
        value: u32,
    },
    /// The assembled board failed structural validation
    #[error("malformed board: {0}")]
    Malformed(#[from] crate::board::Error),
}

/// A bank backed by an in-memory pool of categories
///
/// The default pool carries the built-in general-knowledge set (five
/// categories, five tiers each). When the pool holds more categories than
/// the layout needs, the draw samples a random subset while preserving the
/// pool's category order.
#[derive(Debug, Clone)]
pub struct SampleBank {
    pool: Vec<(String, Vec<(u32, Cell)>)>,
}

impl SampleBank {
    /// Creates a bank over an explicit pool of categories
    ///
    /// Each entry pairs a category name with its (value, cell) list.
    pub fn from_pool(pool: Vec<(String, Vec<(u32, Cell)>)>) -> Self {
        Self { pool }
    }

    fn builtin_pool() -> Vec<(String, Vec<(u32, Cell)>)> {
        let category = |name: &str, questions: [(&str, &str); 5]| {
            (
                name.to_owned(),
                questions
                    .into_iter()
                    .zip(crate::constants::board::FULL_TIERS)
                    .map(|((prompt, answer), value)| (value, Cell::new(prompt, answer)))
                    .collect(),
            )
        };

        vec![
            category(
                "History",
                [
                    (
                        "Who was the first President of the United States?",
                        "George Washington",
                    ),
                    ("In what year did World War II end?", "1945"),
                    ("What ancient civilization built the pyramids?", "Egyptians"),
                    ("What year did the American Civil War end?", "1865"),
                    (
                        "Who was the first person to walk on the moon?",
                        "Neil Armstrong",
                    ),
                ],
            ),
            category(
                "Science",
                [
                    ("What is the chemical symbol for gold?", "Au"),
                    ("What planet is known as the Red Planet?", "Mars"),
                    ("What is the largest organ in the human body?", "Skin"),
                    (
                        "What gas do plants absorb from the atmosphere during photosynthesis?",
                        "Carbon dioxide",
                    ),
                    ("What is the hardest natural substance on Earth?", "Diamond"),
                ],
            ),
            category(
                "Literature",
                [
                    ("Who wrote 'Romeo and Juliet'?", "William Shakespeare"),
                    (
                        "What is the name of the wizard school in Harry Potter?",
                        "Hogwarts",
                    ),
                    ("Who wrote 'The Great Gatsby'?", "F. Scott Fitzgerald"),
                    (
                        "What is the first book in the Lord of the Rings trilogy?",
                        "The Fellowship of the Ring",
                    ),
                    ("Who wrote the novel '1984'?", "George Orwell"),
                ],
            ),
            category(
                "Movies",
                [
                    (
                        "What movie features the line 'May the Force be with you'?",
                        "Star Wars",
                    ),
                    ("Who directed the movie 'Jaws'?", "Steven Spielberg"),
                    (
                        "What movie won the Academy Award for Best Picture in 1994?",
                        "Forrest Gump",
                    ),
                    (
                        "What actor played the Joker in 'The Dark Knight'?",
                        "Heath Ledger",
                    ),
                    (
                        "What movie is known for the quote 'Here's looking at you, kid'?",
                        "Casablanca",
                    ),
                ],
            ),
            category(
                "Sports",
                [
                    (
                        "How many players are on a basketball team on the court at one time?",
                        "5",
                    ),
                    ("What sport is played at Wimbledon?", "Tennis"),
                    (
                        "How many holes are played in a standard round of golf?",
                        "18",
                    ),
                    ("What team won the first Super Bowl?", "Green Bay Packers"),
                    (
                        "What country has won the most FIFA World Cups?",
                        "Brazil",
                    ),
                ],
            ),
        ]
    }
}

impl Default for SampleBank {
    /// A bank over the built-in general-knowledge pool
    fn default() -> Self {
        Self::from_pool(Self::builtin_pool())
    }
}

impl QuestionBank for SampleBank {
    fn draw_board(&self, layout: BoardLayout) -> Result<Board, Error> {
        if self.pool.is_empty() {
            return Err(Error::EmptyPool);
        }
        let needed = layout.category_count();
        if self.pool.len() < needed {
            return Err(Error::TooFewCategories {
                available: self.pool.len(),
                needed,
            });
        }

        // Sample which categories play, keeping the pool's ordering
        let mut indices: Vec<usize> = (0..self.pool.len()).collect();
        fastrand::shuffle(&mut indices);
        indices.truncate(needed);
        indices.sort_unstable();

        let mut categories = Vec::with_capacity(needed);
        let mut cells = HashMap::new();
        for index in indices {
            let (name, questions) = &self.pool[index];
            for &value in layout.tiers() {
                let cell = questions
                    .iter()
                    .find(|(v, _)| *v == value)
                    .map(|(_, cell)| cell.clone())
                    .ok_or_else(|| Error::MissingTier {
                        category: name.clone(),
                        value,
                    })?;
                cells.insert(CellKey::new(name.clone(), value), cell);
            }
            categories.push(name.clone());
        }

        Ok(Board::new(layout, categories, cells)?)
    }
}
