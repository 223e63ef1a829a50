use cosmwasm_std::{Addr, Api};
use itertools::Itertools;

use group_voting::ledger::{
    CreateVoteInput, Vote, VoteOutcome, ELIGIBLE_VOTERS_LIMIT, MAX_DESC_LENGTH, MAX_LINK_LENGTH,
    MAX_TITLE_LENGTH,
};

use crate::error::ContractError;

/// Validates the parameters of a new vote and returns the sorted, de-duplicated set of
/// eligible voters.
///
/// * **max_eligible_voters** upper bound for the voter set size taken from the config.
pub fn validate_vote_input(
    api: &dyn Api,
    input: &CreateVoteInput,
    max_eligible_voters: u32,
) -> Result<Vec<Addr>, ContractError> {
    if input.title.is_empty() {
        return Err(ContractError::InvalidInput(
            "Title must not be empty".to_string(),
        ));
    }
    if input.title.len() > MAX_TITLE_LENGTH {
        return Err(ContractError::InvalidInput(format!(
            "Title is longer than {MAX_TITLE_LENGTH} bytes"
        )));
    }
    if matches!(&input.description, Some(desc) if desc.len() > MAX_DESC_LENGTH) {
        return Err(ContractError::InvalidInput(format!(
            "Description is longer than {MAX_DESC_LENGTH} bytes"
        )));
    }
    if matches!(&input.link, Some(link) if link.len() > MAX_LINK_LENGTH) {
        return Err(ContractError::InvalidInput(format!(
            "Link is longer than {MAX_LINK_LENGTH} bytes"
        )));
    }
    if input.threshold == 0 {
        return Err(ContractError::InvalidInput(
            "Threshold must be at least 1".to_string(),
        ));
    }

    let eligible_voters = input
        .eligible_voters
        .iter()
        .map(|voter| {
            api.addr_validate(voter).map_err(|_| {
                ContractError::InvalidInput(format!("Invalid voter address: {voter}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .sorted()
        .dedup()
        .collect_vec();

    if eligible_voters.is_empty() {
        return Err(ContractError::InvalidInput(
            "Eligible voters must not be empty".to_string(),
        ));
    }
    if eligible_voters.len() > max_eligible_voters as usize {
        return Err(ContractError::InvalidInput(format!(
            "At most {max_eligible_voters} eligible voters are allowed"
        )));
    }
    if input.threshold > eligible_voters.len() as u64 {
        return Err(ContractError::InvalidInput(format!(
            "Threshold {} exceeds the number of eligible voters {}",
            input.threshold,
            eligible_voters.len()
        )));
    }

    Ok(eligible_voters)
}

/// Checks the configured voter set bound.
pub fn validate_max_eligible_voters(max_eligible_voters: u32) -> Result<(), ContractError> {
    if !ELIGIBLE_VOTERS_LIMIT.contains(&max_eligible_voters) {
        return Err(ContractError::InvalidInput(format!(
            "Max eligible voters must be within {}..={}",
            ELIGIBLE_VOTERS_LIMIT.start(),
            ELIGIBLE_VOTERS_LIMIT.end()
        )));
    }

    Ok(())
}

/// Decides whether a vote is settled by its current ballots.
///
/// A vote passes once `yes` ballots reach the threshold and is rejected once the
/// remaining voters can no longer bring it there.
pub fn resolve(vote: &Vote) -> Option<VoteOutcome> {
    let pending = vote.eligible_voters.len().saturating_sub(vote.ballots.len()) as u64;

    if vote.yes_count >= vote.threshold {
        Some(VoteOutcome::Passed)
    } else if vote.yes_count + pending < vote.threshold {
        Some(VoteOutcome::Rejected)
    } else {
        None
    }
}
