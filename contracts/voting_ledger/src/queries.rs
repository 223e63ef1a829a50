#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Addr, Binary, Deps, Empty, Env, Order, StdResult};
use cw_storage_plus::Map;

use group_voting::ledger::{FinishedVoteResponse, QueryMsg, Vote, VoteListEntry, MAX_PAGE_LIMIT};

use crate::error::ContractError;
use crate::state::{
    ACCOUNT_ACTIVE_VOTES, ACCOUNT_BALLOTS, ACCOUNT_VOTES, CONFIG, NEXT_VOTE_ID, VOTES,
};

/// Expose available contract queries.
///
/// ## Queries
/// * **QueryMsg::Config {}** Returns core contract settings stored in the [`Config`] structure.
///
/// * **QueryMsg::GetVote { vote_id }** Returns the [`Vote`] with the specified `vote_id`.
///
/// * **QueryMsg::GetActiveVoteList { index, limit, account_id }** Returns a page of the
/// active votes an account created or is eligible for.
///
/// * **QueryMsg::GetFinishVoteList { index, limit, account_id }** Returns a page of the
/// ballots an account has cast.
///
/// * **QueryMsg::GetVoteList { index, limit, account_id }** Returns a page of all votes an
/// account created or is eligible for, closed ones included.
///
/// * **QueryMsg::GetPendingVoters { vote_id }** Returns eligible voters without a ballot.
///
/// * **QueryMsg::VoteCount {}** Returns the number of votes ever created.
///
/// [`Config`]: group_voting::ledger::Config
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let response = match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?)?,
        QueryMsg::GetVote { vote_id } => to_json_binary(&query_vote(deps, vote_id)?)?,
        QueryMsg::GetActiveVoteList {
            index,
            limit,
            account_id,
        } => {
            let account = deps.api.addr_validate(&account_id)?;
            to_json_binary(&query_votes_page(
                deps,
                ACCOUNT_ACTIVE_VOTES,
                &account,
                index,
                limit,
            )?)?
        }
        QueryMsg::GetFinishVoteList {
            index,
            limit,
            account_id,
        } => {
            let account = deps.api.addr_validate(&account_id)?;
            to_json_binary(&query_finished_votes(deps, &account, index, limit)?)?
        }
        QueryMsg::GetVoteList {
            index,
            limit,
            account_id,
        } => {
            let account = deps.api.addr_validate(&account_id)?;
            to_json_binary(&query_votes_page(
                deps,
                ACCOUNT_VOTES,
                &account,
                index,
                limit,
            )?)?
        }
        QueryMsg::GetPendingVoters { vote_id } => {
            to_json_binary(&query_vote(deps, vote_id)?.pending_voters())?
        }
        QueryMsg::VoteCount {} => {
            let next_vote_id = NEXT_VOTE_ID.load(deps.storage)?;
            to_json_binary(&next_vote_id.saturating_sub(1))?
        }
    };

    Ok(response)
}

/// Returns a vote by its identifier.
pub fn query_vote(deps: Deps, vote_id: u64) -> Result<Vote, ContractError> {
    VOTES
        .may_load(deps.storage, vote_id)?
        .ok_or(ContractError::NotFound(vote_id))
}

/// Returns a page of the votes indexed for `account` in `account_index`, in creation order.
///
/// * **index** number of entries to skip.
///
/// * **limit** page size, capped by [`MAX_PAGE_LIMIT`].
pub fn query_votes_page<'a>(
    deps: Deps,
    account_index: Map<'a, (&'a Addr, u64), Empty>,
    account: &'a Addr,
    index: u64,
    limit: u64,
) -> StdResult<Vec<VoteListEntry>> {
    account_index
        .prefix(account)
        .keys(deps.storage, None, None, Order::Ascending)
        .skip(page_offset(index))
        .take(page_limit(limit))
        .map(|vote_id| {
            let vote = VOTES.load(deps.storage, vote_id?)?;
            Ok(VoteListEntry::from(&vote))
        })
        .collect()
}

/// Returns a page of the ballots `account` has cast, ordered by vote id.
pub fn query_finished_votes(
    deps: Deps,
    account: &Addr,
    index: u64,
    limit: u64,
) -> StdResult<Vec<FinishedVoteResponse>> {
    ACCOUNT_BALLOTS
        .prefix(account)
        .range(deps.storage, None, None, Order::Ascending)
        .skip(page_offset(index))
        .take(page_limit(limit))
        .map(|item| {
            let (vote_id, ballot) = item?;
            let vote = VOTES.load(deps.storage, vote_id)?;
            Ok(FinishedVoteResponse {
                vote_id,
                title: vote.title,
                choose: ballot.choose,
                voted_at: ballot.voted_at,
            })
        })
        .collect()
}

fn page_offset(index: u64) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

fn page_limit(limit: u64) -> usize {
    limit.min(MAX_PAGE_LIMIT) as usize
}
