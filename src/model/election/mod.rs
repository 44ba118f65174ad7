mod results;

pub use results::{CandidateResult, ElectionResults, ElectionSummary};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Candidate, CandidateId, Voter, VoterId};

/// A single anonymous entry in an election's vote log. The log never
/// records who cast the vote, only who received it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// The candidate the vote was cast for.
    pub candidate_id: CandidateId,
    /// When the vote was cast.
    pub timestamp: DateTime<Utc>,
}

/// Core election data, as stored in the snapshot.
///
/// The election's own ID is the key of the registry map that owns it and is
/// not repeated here. An election upholds two invariants across every
/// sequence of successful operations: the vote log is exactly as long as
/// the number of voters with `has_voted` set, and the candidates' vote
/// counters sum to the vote log's length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    /// Election title.
    pub title: String,
    /// Election description.
    pub description: String,
    /// Whether votes may still be cast. Transitions one way, to `false`.
    pub is_active: bool,
    /// When the election was created.
    pub created_at: DateTime<Utc>,
    /// Election candidates by ID, in insertion order.
    pub candidates: IndexMap<CandidateId, Candidate>,
    /// Registered voters by ID, in insertion order.
    pub voters: IndexMap<VoterId, Voter>,
    /// Anonymous log of every vote cast, in casting order.
    pub votes: Vec<VoteRecord>,
}

impl Election {
    /// Create a new, open election with no candidates, voters, or votes.
    pub fn new(title: String, description: String) -> Self {
        Self {
            title,
            description,
            is_active: true,
            created_at: Utc::now(),
            candidates: IndexMap::new(),
            voters: IndexMap::new(),
            votes: Vec::new(),
        }
    }

    /// Add a candidate with a zeroed vote counter.
    pub fn add_candidate(
        &mut self,
        id: CandidateId,
        name: String,
        party: String,
        description: String,
    ) -> Result<()> {
        if self.candidates.contains_key(&id) {
            return Err(Error::DuplicateCandidate(id));
        }
        self.candidates
            .insert(id, Candidate::new(name, party, description));
        Ok(())
    }

    /// Register a voter who has not yet voted.
    pub fn register_voter(&mut self, id: VoterId, name: String, email: String) -> Result<()> {
        if self.voters.contains_key(&id) {
            return Err(Error::DuplicateVoter(id));
        }
        self.voters.insert(id, Voter::new(name, email));
        Ok(())
    }

    /// Cast a vote for a candidate on behalf of a voter.
    ///
    /// Checks run in a fixed order so callers always see the same error for
    /// the same state: closed election, then unknown voter, then unknown
    /// candidate, then double vote. On success the candidate's counter, the
    /// voter's `has_voted` flag and timestamp, and the vote log all update
    /// together, with one shared timestamp.
    pub fn cast_vote(&mut self, voter_id: &str, candidate_id: &str) -> Result<()> {
        if !self.is_active {
            return Err(Error::ElectionClosed(self.title.clone()));
        }
        let voter = self
            .voters
            .get_mut(voter_id)
            .ok_or_else(|| Error::UnknownVoter(voter_id.to_owned()))?;
        let candidate = self
            .candidates
            .get_mut(candidate_id)
            .ok_or_else(|| Error::UnknownCandidate(candidate_id.to_owned()))?;
        if voter.has_voted {
            return Err(Error::AlreadyVoted(voter_id.to_owned()));
        }

        let timestamp = Utc::now();
        candidate.votes += 1;
        voter.mark_voted(timestamp);
        self.votes.push(VoteRecord {
            candidate_id: candidate_id.to_owned(),
            timestamp,
        });
        Ok(())
    }

    /// Close the election, permanently blocking further votes. Closing an
    /// already-closed election is a no-op. Candidate addition and voter
    /// registration are not gated on this; only casting is.
    pub fn close(&mut self) {
        self.is_active = false;
    }

    /// Voter turnout as a percentage of registered voters, rounded to two
    /// decimal places. Zero when nobody is registered.
    pub fn turnout(&self) -> f64 {
        if self.voters.is_empty() {
            return 0.0;
        }
        round2(self.votes.len() as f64 / self.voters.len() as f64 * 100.0)
    }

    /// Tally the election.
    ///
    /// Candidates are ordered by vote count descending; ties keep candidate
    /// insertion order, as the sort is stable. Percentages are shares of
    /// the votes cast, rounded to two decimal places, and all zero when no
    /// votes have been cast.
    pub fn results(&self) -> ElectionResults {
        let total_votes = self.votes.len();
        let mut results: Vec<CandidateResult> = self
            .candidates
            .values()
            .map(|candidate| {
                let percentage = if total_votes > 0 {
                    round2(candidate.votes as f64 / total_votes as f64 * 100.0)
                } else {
                    0.0
                };
                CandidateResult {
                    name: candidate.name.clone(),
                    party: candidate.party.clone(),
                    votes: candidate.votes,
                    percentage,
                }
            })
            .collect();
        results.sort_by(|a, b| b.votes.cmp(&a.votes));

        ElectionResults {
            title: self.title.clone(),
            total_votes: total_votes as u64,
            total_registered: self.voters.len() as u64,
            turnout_percentage: self.turnout(),
            results,
        }
    }
}

/// Round to two decimal places.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Election {
        /// Two candidates ("A", "B") and two voters ("V1", "V2"), no votes.
        pub fn example() -> Self {
            let mut election = Election::new(
                "Student Union President".to_string(),
                "Annual leadership election".to_string(),
            );
            election
                .add_candidate(
                    "A".to_string(),
                    "Alice Martin".to_string(),
                    "Progress".to_string(),
                    "Second-year rep".to_string(),
                )
                .unwrap();
            election
                .add_candidate(
                    "B".to_string(),
                    "Bob Okafor".to_string(),
                    "Unity".to_string(),
                    String::new(),
                )
                .unwrap();
            election
                .register_voter(
                    "V1".to_string(),
                    "Vera Lang".to_string(),
                    "vera@example.com".to_string(),
                )
                .unwrap();
            election
                .register_voter(
                    "V2".to_string(),
                    "Victor Hale".to_string(),
                    "victor@example.com".to_string(),
                )
                .unwrap();
            election
        }
    }

    /// The two counting invariants that every operation must preserve.
    fn assert_counts_consistent(election: &Election) {
        let voted = election.voters.values().filter(|v| v.has_voted).count();
        assert_eq!(election.votes.len(), voted);
        let tallied: u64 = election.candidates.values().map(|c| c.votes).sum();
        assert_eq!(tallied, election.votes.len() as u64);
    }

    #[test]
    fn duplicate_candidate_rejected() {
        let mut election = Election::example();
        let err = election
            .add_candidate(
                "A".to_string(),
                "Impostor".to_string(),
                "None".to_string(),
                String::new(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateCandidate(id) if id == "A"));
        assert_eq!(election.candidates.len(), 2);
    }

    #[test]
    fn duplicate_voter_rejected() {
        let mut election = Election::example();
        let err = election
            .register_voter(
                "V1".to_string(),
                "Impostor".to_string(),
                "x@example.com".to_string(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateVoter(id) if id == "V1"));
        assert_eq!(election.voters.len(), 2);
    }

    #[test]
    fn vote_updates_counter_voter_and_log_together() {
        let mut election = Election::example();
        election.cast_vote("V1", "A").unwrap();

        assert_eq!(election.candidates["A"].votes, 1);
        let voter = &election.voters["V1"];
        assert!(voter.has_voted);
        assert!(voter.vote_timestamp.is_some());
        assert_eq!(election.votes.len(), 1);
        assert_eq!(election.votes[0].candidate_id, "A");
        assert_eq!(Some(election.votes[0].timestamp), voter.vote_timestamp);
        assert_counts_consistent(&election);
    }

    #[test]
    fn second_vote_rejected_and_counts_unchanged() {
        let mut election = Election::example();
        election.cast_vote("V1", "A").unwrap();
        let err = election.cast_vote("V1", "A").unwrap_err();
        assert!(matches!(err, Error::AlreadyVoted(id) if id == "V1"));
        assert_eq!(election.candidates["A"].votes, 1);
        assert_eq!(election.votes.len(), 1);
        assert_counts_consistent(&election);
    }

    #[test]
    fn voter_counts_towards_one_candidate_only() {
        // A voter who voted for A cannot later add to B's counter.
        let mut election = Election::example();
        election.cast_vote("V1", "A").unwrap();
        assert!(election.cast_vote("V1", "B").is_err());
        assert_eq!(election.candidates["A"].votes, 1);
        assert_eq!(election.candidates["B"].votes, 0);
        assert_counts_consistent(&election);
    }

    #[test]
    fn closed_election_rejects_votes_before_any_other_check() {
        let mut election = Election::example();
        election.close();
        // Even bogus voter/candidate IDs report the closure first.
        let err = election.cast_vote("nobody", "no-one").unwrap_err();
        assert!(matches!(err, Error::ElectionClosed(_)));
        let err = election.cast_vote("V1", "A").unwrap_err();
        assert!(matches!(err, Error::ElectionClosed(_)));
    }

    #[test]
    fn unknown_voter_reported_before_unknown_candidate() {
        let mut election = Election::example();
        let err = election.cast_vote("nobody", "no-one").unwrap_err();
        assert!(matches!(err, Error::UnknownVoter(id) if id == "nobody"));
    }

    #[test]
    fn unknown_candidate_reported_before_double_vote() {
        let mut election = Election::example();
        election.cast_vote("V1", "A").unwrap();
        let err = election.cast_vote("V1", "no-one").unwrap_err();
        assert!(matches!(err, Error::UnknownCandidate(id) if id == "no-one"));
    }

    #[test]
    fn close_is_idempotent_and_does_not_gate_registration() {
        let mut election = Election::example();
        election.close();
        election.close();
        assert!(!election.is_active);
        // Registration and candidate addition stay open after closure.
        election
            .register_voter(
                "V3".to_string(),
                "Wanda Price".to_string(),
                "wanda@example.com".to_string(),
            )
            .unwrap();
        election
            .add_candidate(
                "C".to_string(),
                "Carol Danvers".to_string(),
                "Progress".to_string(),
                String::new(),
            )
            .unwrap();
    }

    #[test]
    fn tallies_always_match_the_vote_log() {
        let mut election = Election::example();
        election
            .register_voter(
                "V3".to_string(),
                "Wanda Price".to_string(),
                "wanda@example.com".to_string(),
            )
            .unwrap();
        election.cast_vote("V1", "A").unwrap();
        election.cast_vote("V2", "B").unwrap();
        // Failed casts must not disturb the counts.
        let _ = election.cast_vote("V2", "B");
        let _ = election.cast_vote("ghost", "A");
        election.cast_vote("V3", "A").unwrap();
        assert_counts_consistent(&election);
        assert_eq!(election.votes.len(), 3);
    }

    #[test]
    fn landslide_scenario_tallies_and_turnout() {
        let mut election = Election::example();
        election.cast_vote("V1", "A").unwrap();
        election.cast_vote("V2", "A").unwrap();

        let results = election.results();
        assert_eq!(results.total_votes, 2);
        assert_eq!(results.total_registered, 2);
        assert_eq!(results.turnout_percentage, 100.0);
        assert_eq!(results.results.len(), 2);
        assert_eq!(results.results[0].name, "Alice Martin");
        assert_eq!(results.results[0].votes, 2);
        assert_eq!(results.results[0].percentage, 100.0);
        assert_eq!(results.results[1].name, "Bob Okafor");
        assert_eq!(results.results[1].votes, 0);
        assert_eq!(results.results[1].percentage, 0.0);
    }

    #[test]
    fn results_order_votes_descending_with_insertion_order_ties() {
        let mut election = Election::example();
        election
            .add_candidate(
                "C".to_string(),
                "Carol Danvers".to_string(),
                "Unity".to_string(),
                String::new(),
            )
            .unwrap();
        election.cast_vote("V1", "C").unwrap();

        let results = election.results();
        // C leads; A and B are tied on zero and keep their insertion order.
        assert_eq!(results.results[0].name, "Carol Danvers");
        assert_eq!(results.results[1].name, "Alice Martin");
        assert_eq!(results.results[2].name, "Bob Okafor");
    }

    #[test]
    fn percentages_round_to_two_decimals() {
        let mut election = Election::example();
        election
            .register_voter(
                "V3".to_string(),
                "Wanda Price".to_string(),
                "wanda@example.com".to_string(),
            )
            .unwrap();
        election.cast_vote("V1", "A").unwrap();
        election.cast_vote("V2", "A").unwrap();
        election.cast_vote("V3", "B").unwrap();

        let results = election.results();
        assert_eq!(results.results[0].percentage, 66.67);
        assert_eq!(results.results[1].percentage, 33.33);
        assert_eq!(results.turnout_percentage, 100.0);
    }

    #[test]
    fn no_voters_and_no_votes_never_divide_by_zero() {
        let election = Election::new("Empty".to_string(), String::new());
        assert_eq!(election.turnout(), 0.0);
        let results = election.results();
        assert_eq!(results.total_votes, 0);
        assert_eq!(results.turnout_percentage, 0.0);

        // Candidates but no votes: every percentage is zero.
        let election = Election::example();
        let results = election.results();
        assert!(results.results.iter().all(|r| r.percentage == 0.0));
        assert_eq!(election.turnout(), 0.0);
    }
}
