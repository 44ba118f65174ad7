use serde::{Deserialize, Serialize};

/// A candidate standing in a single election, as stored in the snapshot.
///
/// The candidate's ID is the key of the owning election's candidate map and
/// is not repeated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate display name.
    pub name: String,
    /// Party or affiliation label.
    pub party: String,
    /// Free-text description.
    pub description: String,
    /// Votes received so far. Only ever incremented, by vote casting.
    pub votes: u64,
}

impl Candidate {
    /// Create a new candidate with no votes.
    pub fn new(name: String, party: String, description: String) -> Self {
        Self {
            name,
            party,
            description,
            votes: 0,
        }
    }
}
