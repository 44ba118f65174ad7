use serde::{Deserialize, Serialize};

use crate::model::ElectionId;

/// One candidate's share of a tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    /// Candidate display name.
    pub name: String,
    /// Party or affiliation label.
    pub party: String,
    /// Votes received.
    pub votes: u64,
    /// Share of all votes cast, as a percentage rounded to two decimal
    /// places. Zero when no votes have been cast.
    pub percentage: f64,
}

/// The full tally of a single election, computed on demand from its state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionResults {
    /// Election title.
    pub title: String,
    /// Total votes cast.
    pub total_votes: u64,
    /// Total registered voters.
    pub total_registered: u64,
    /// Votes cast as a percentage of registered voters.
    pub turnout_percentage: f64,
    /// Per-candidate tallies, ordered by vote count descending.
    pub results: Vec<CandidateResult>,
}

/// A summary of an election, shorter than the full [`Election`].
///
/// [`Election`]: super::Election
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSummary {
    /// Election unique ID.
    pub id: ElectionId,
    /// Election title.
    pub title: String,
    /// Whether votes may still be cast.
    pub is_active: bool,
    /// Whether this is the registry's current election.
    pub is_current: bool,
    /// Number of candidates standing.
    pub candidate_count: usize,
    /// Number of registered voters.
    pub voter_count: usize,
    /// Number of votes cast.
    pub vote_count: usize,
}
