mod candidate;
mod voter;

pub mod election;
pub mod registry;

pub use candidate::Candidate;
pub use voter::Voter;

/// Election IDs are caller-chosen strings, unique within the registry.
pub type ElectionId = String;
/// Candidate IDs are caller-chosen strings, unique within an election.
pub type CandidateId = String;
/// Voter IDs are caller-chosen strings, unique within an election.
pub type VoterId = String;
