use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::election::{Election, ElectionResults, ElectionSummary};
use crate::model::{CandidateId, ElectionId, VoterId};

/// The full election-management state: every election plus a pointer to the
/// one currently being operated on.
///
/// All operations that address "the current election" go through here; the
/// registry routes them to the election the pointer names. The pointer is
/// set when an election is created or selected and, if non-null, always
/// names an election in the map. It is deliberately left in place when an
/// election closes; casting against a closed election reports the closure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRegistry {
    /// The election addressed by ID-less operations, if any.
    pub current_election_id: Option<ElectionId>,
    /// All elections by ID, in creation order. Elections are never deleted.
    pub elections: IndexMap<ElectionId, Election>,
}

impl ElectionRegistry {
    /// Create an empty registry with no current election.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new election and make it current.
    pub fn create_election(
        &mut self,
        id: ElectionId,
        title: String,
        description: String,
    ) -> Result<()> {
        if self.elections.contains_key(&id) {
            return Err(Error::DuplicateElection(id));
        }
        info!("Created election '{id}' ({title})");
        self.elections.insert(id.clone(), Election::new(title, description));
        self.current_election_id = Some(id);
        Ok(())
    }

    /// Point subsequent ID-less operations at the given election.
    pub fn select_election(&mut self, id: &str) -> Result<()> {
        if !self.elections.contains_key(id) {
            return Err(Error::UnknownElection(id.to_owned()));
        }
        info!("Selected election '{id}'");
        self.current_election_id = Some(id.to_owned());
        Ok(())
    }

    /// The election the current pointer names. This may be a closed
    /// election; only vote casting is gated on that.
    pub fn current_election(&self) -> Result<&Election> {
        let id = self
            .current_election_id
            .as_deref()
            .ok_or(Error::NoActiveElection)?;
        self.elections
            .get(id)
            .ok_or_else(|| Error::UnknownElection(id.to_owned()))
    }

    fn current_election_mut(&mut self) -> Result<&mut Election> {
        let id = self
            .current_election_id
            .as_deref()
            .ok_or(Error::NoActiveElection)?;
        self.elections
            .get_mut(id)
            .ok_or_else(|| Error::UnknownElection(id.to_owned()))
    }

    /// Add a candidate to the current election.
    pub fn add_candidate(
        &mut self,
        id: CandidateId,
        name: String,
        party: String,
        description: String,
    ) -> Result<()> {
        self.current_election_mut()?
            .add_candidate(id, name, party, description)
    }

    /// Register a voter in the current election.
    pub fn register_voter(&mut self, id: VoterId, name: String, email: String) -> Result<()> {
        self.current_election_mut()?.register_voter(id, name, email)
    }

    /// Cast a vote in the current election.
    pub fn cast_vote(&mut self, voter_id: &str, candidate_id: &str) -> Result<()> {
        self.current_election_mut()?.cast_vote(voter_id, candidate_id)?;
        info!("Vote recorded for candidate '{candidate_id}'");
        Ok(())
    }

    /// Close the current election. The current pointer is left in place.
    pub fn close_election(&mut self) -> Result<()> {
        let election = self.current_election_mut()?;
        election.close();
        info!("Closed election '{}'", election.title);
        Ok(())
    }

    /// Tally the current election.
    pub fn results(&self) -> Result<ElectionResults> {
        Ok(self.current_election()?.results())
    }

    /// Turnout of the current election.
    pub fn turnout(&self) -> Result<f64> {
        Ok(self.current_election()?.turnout())
    }

    /// Summaries of all elections in creation order. Each call returns a
    /// fresh iterator, so the listing can be restarted at will.
    pub fn list_elections(&self) -> impl Iterator<Item = ElectionSummary> + '_ {
        self.elections.iter().map(|(id, election)| ElectionSummary {
            id: id.clone(),
            title: election.title.clone(),
            is_active: election.is_active,
            is_current: self.current_election_id.as_deref() == Some(id.as_str()),
            candidate_count: election.candidates.len(),
            voter_count: election.voters.len(),
            vote_count: election.votes.len(),
        })
    }
}
