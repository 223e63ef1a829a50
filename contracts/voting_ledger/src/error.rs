use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

/// This enum describes voting ledger contract errors
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    OverflowError(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Vote {0} not found")]
    NotFound(u64),

    #[error("Vote {0} is closed")]
    VoteClosed(u64),

    #[error("{voter} is not eligible to vote on vote {vote_id}")]
    NotEligible { vote_id: u64, voter: String },

    #[error("{voter} already voted on vote {vote_id}")]
    AlreadyVoted { vote_id: u64, voter: String },

    #[error("Contract can't be migrated!")]
    MigrationError {},
}
