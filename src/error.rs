use thiserror::Error;

use crate::model::{CandidateId, ElectionId, VoterId};

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in a registry or store operation.
///
/// All variants are recoverable at the call site: the core never aborts the
/// process, and whether to retry with corrected input is the caller's
/// decision.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Election '{0}' already exists")]
    DuplicateElection(ElectionId),
    #[error("Candidate '{0}' already exists")]
    DuplicateCandidate(CandidateId),
    #[error("Voter '{0}' is already registered")]
    DuplicateVoter(VoterId),
    #[error("Election '{0}' not found")]
    UnknownElection(ElectionId),
    #[error("Candidate '{0}' not found")]
    UnknownCandidate(CandidateId),
    #[error("Voter '{0}' is not registered")]
    UnknownVoter(VoterId),
    #[error("No election selected; create or select an election first")]
    NoActiveElection,
    #[error("Election '{0}' is closed")]
    ElectionClosed(String),
    #[error("Voter '{0}' has already voted")]
    AlreadyVoted(VoterId),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
