use std::fmt::{Display, Formatter, Result};
use std::ops::RangeInclusive;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

/// Vote validation attributes
pub const MAX_TITLE_LENGTH: usize = 64;
pub const MAX_DESC_LENGTH: usize = 1024;
pub const MAX_LINK_LENGTH: usize = 256;

/// Allowed bounds for the configured size of an eligible voter set
pub const ELIGIBLE_VOTERS_LIMIT: RangeInclusive<u32> = 1..=200;
pub const DEFAULT_MAX_ELIGIBLE_VOTERS: u32 = 100;

/// Max items per page in list queries
pub const MAX_PAGE_LIMIT: u64 = 50;

/// This structure holds the parameters used for creating the voting ledger contract.
#[cw_serde]
pub struct InstantiateMsg {
    /// Address allowed to update the contract configuration
    pub owner: String,
    /// Maximum number of eligible voters a single vote may have
    pub max_eligible_voters: Option<u32>,
}

/// Parameters of a new vote.
#[cw_serde]
pub struct CreateVoteInput {
    /// Vote title
    pub title: String,
    /// Optional free text description
    pub description: Option<String>,
    /// Link to an additional description or introduction
    pub link: Option<String>,
    /// Number of `yes` ballots required to pass the vote
    pub threshold: u64,
    /// Accounts invited to cast a ballot
    pub eligible_voters: Vec<String>,
}

/// This enum describes all execute functions available in the contract.
#[cw_serde]
pub enum ExecuteMsg {
    /// Open a new vote. The sender becomes its creator.
    CreateVote { input_vote: CreateVoteInput },
    /// Cast a ballot on an active vote
    Vote {
        /// Vote identifier
        vote_id: u64,
        /// `true` for yes, `false` for no
        choose: bool,
    },
    /// Update contract parameters
    /// ## Executor
    /// Only the owner can execute this.
    UpdateConfig { max_eligible_voters: Option<u32> },
}

/// This enum describes all the queries available in the contract.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Return the contract's configuration
    #[returns(Config)]
    Config {},
    /// Return the full record of a vote, closed ones included
    #[returns(Vote)]
    GetVote { vote_id: u64 },
    /// Return the active votes an account created or is eligible for
    #[returns(Vec<VoteListEntry>)]
    GetActiveVoteList {
        /// Number of matching votes to skip
        index: u64,
        /// The amount of votes to return
        limit: u64,
        account_id: String,
    },
    /// Return the votes an account has already cast a ballot on
    #[returns(Vec<FinishedVoteResponse>)]
    GetFinishVoteList {
        index: u64,
        limit: u64,
        account_id: String,
    },
    /// Return every vote an account created or is eligible for
    #[returns(Vec<VoteListEntry>)]
    GetVoteList {
        index: u64,
        limit: u64,
        account_id: String,
    },
    /// Return eligible voters who haven't voted yet
    #[returns(Vec<Addr>)]
    GetPendingVoters { vote_id: u64 },
    /// Return the number of votes ever created
    #[returns(u64)]
    VoteCount {},
}

/// This structure describes a migration message.
#[cw_serde]
pub struct MigrateMsg {}

/// This structure stores general parameters for the voting ledger.
#[cw_serde]
pub struct Config {
    /// Contract owner
    pub owner: Addr,
    /// Maximum number of eligible voters per vote
    pub max_eligible_voters: u32,
}

/// A single ballot cast on a vote.
#[cw_serde]
pub struct Ballot {
    pub voter: Addr,
    pub choose: bool,
    /// Block time in seconds
    pub voted_at: u64,
}

/// This enum describes how a closed vote was resolved.
#[cw_serde]
pub enum VoteOutcome {
    /// `yes` ballots reached the threshold
    Passed,
    /// The threshold can no longer be reached
    Rejected,
}

impl Display for VoteOutcome {
    fn fmt(&self, fmt: &mut Formatter) -> Result {
        match self {
            VoteOutcome::Passed => fmt.write_str("passed"),
            VoteOutcome::Rejected => fmt.write_str("rejected"),
        }
    }
}

/// This structure stores data for a vote.
#[cw_serde]
pub struct Vote {
    /// Unique vote ID
    pub vote_id: u64,
    /// The address of the vote creator
    pub creator: Addr,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    /// Number of `yes` ballots required to pass
    pub threshold: u64,
    /// Sorted set of accounts allowed to vote
    pub eligible_voters: Vec<Addr>,
    /// Ballots in casting order
    pub ballots: Vec<Ballot>,
    /// Number of `yes` ballots
    pub yes_count: u64,
    /// Whether the vote still accepts ballots
    pub active: bool,
    /// Set once the vote is closed
    pub outcome: Option<VoteOutcome>,
    /// Creation time in seconds
    pub created_at: u64,
    /// Resolution time in seconds
    pub finished_at: Option<u64>,
}

impl Vote {
    pub fn is_eligible(&self, account: &Addr) -> bool {
        self.eligible_voters.binary_search(account).is_ok()
    }

    pub fn has_voted(&self, account: &Addr) -> bool {
        self.ballots.iter().any(|ballot| &ballot.voter == account)
    }

    /// Eligible voters without a ballot yet.
    pub fn pending_voters(&self) -> Vec<Addr> {
        self.eligible_voters
            .iter()
            .filter(|voter| !self.has_voted(voter))
            .cloned()
            .collect()
    }

    /// Every account the vote is indexed under: the creator and all eligible voters.
    pub fn participants(&self) -> impl Iterator<Item = &Addr> {
        std::iter::once(&self.creator).chain(
            self.eligible_voters
                .iter()
                .filter(move |voter| *voter != &self.creator),
        )
    }
}

/// This structure describes a vote entry in the account listings.
#[cw_serde]
pub struct VoteListEntry {
    pub vote_id: u64,
    pub title: String,
    pub link: Option<String>,
    pub threshold: u64,
    pub active: bool,
    /// Number of `yes` ballots
    pub yes_count: u64,
    /// Number of ballots cast so far
    pub ballots_cast: u64,
    /// Size of the eligible voter set
    pub eligible_count: u64,
}

impl From<&Vote> for VoteListEntry {
    fn from(vote: &Vote) -> Self {
        Self {
            vote_id: vote.vote_id,
            title: vote.title.clone(),
            link: vote.link.clone(),
            threshold: vote.threshold,
            active: vote.active,
            yes_count: vote.yes_count,
            ballots_cast: vote.ballots.len() as u64,
            eligible_count: vote.eligible_voters.len() as u64,
        }
    }
}

/// This structure describes a vote the account has already voted on.
#[cw_serde]
pub struct FinishedVoteResponse {
    pub vote_id: u64,
    pub title: String,
    pub choose: bool,
    pub voted_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vote() -> Vote {
        Vote {
            vote_id: 1,
            creator: Addr::unchecked("carol"),
            title: "title".to_string(),
            description: None,
            link: None,
            threshold: 2,
            eligible_voters: vec![Addr::unchecked("alice"), Addr::unchecked("bob")],
            ballots: vec![Ballot {
                voter: Addr::unchecked("bob"),
                choose: false,
                voted_at: 10,
            }],
            yes_count: 0,
            active: true,
            outcome: None,
            created_at: 1,
            finished_at: None,
        }
    }

    #[test]
    fn pending_voters_skip_cast_ballots() {
        let vote = sample_vote();
        assert!(vote.is_eligible(&Addr::unchecked("alice")));
        assert!(!vote.is_eligible(&Addr::unchecked("carol")));
        assert!(vote.has_voted(&Addr::unchecked("bob")));
        assert_eq!(vote.pending_voters(), vec![Addr::unchecked("alice")]);
    }

    #[test]
    fn participants_include_creator_once() {
        let mut vote = sample_vote();
        let participants: Vec<_> = vote.participants().cloned().collect();
        assert_eq!(
            participants,
            vec![
                Addr::unchecked("carol"),
                Addr::unchecked("alice"),
                Addr::unchecked("bob")
            ]
        );

        vote.creator = Addr::unchecked("alice");
        let participants: Vec<_> = vote.participants().cloned().collect();
        assert_eq!(
            participants,
            vec![Addr::unchecked("alice"), Addr::unchecked("bob")]
        );
    }

    #[test]
    fn listing_projection() {
        let vote = sample_vote();
        let entry = VoteListEntry::from(&vote);
        assert_eq!(entry.ballots_cast, 1);
        assert_eq!(entry.eligible_count, 2);
        assert!(entry.active);
        assert_eq!(VoteOutcome::Rejected.to_string(), "rejected");
    }
}
