use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered voter in a single election, as stored in the snapshot.
///
/// The voter's ID is the key of the owning election's voter map and is not
/// repeated here. A voter is mutated at most once, when their vote is cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Voter display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Whether this voter has already cast their vote.
    pub has_voted: bool,
    /// When the vote was cast, if it has been.
    pub vote_timestamp: Option<DateTime<Utc>>,
}

impl Voter {
    /// Create a new voter who has not yet voted.
    pub fn new(name: String, email: String) -> Self {
        Self {
            name,
            email,
            has_voted: false,
            vote_timestamp: None,
        }
    }

    /// Record that this voter has cast their vote.
    pub(crate) fn mark_voted(&mut self, at: DateTime<Utc>) {
        self.has_voted = true;
        self.vote_timestamp = Some(at);
    }
}
