#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_json_binary, DepsMut, Empty, Env, MessageInfo, Response, Uint64,
};
use cw2::set_contract_version;

use group_voting::ledger::{
    Ballot, Config, CreateVoteInput, ExecuteMsg, InstantiateMsg, Vote,
    DEFAULT_MAX_ELIGIBLE_VOTERS,
};

use crate::error::ContractError;
use crate::state::{
    ACCOUNT_ACTIVE_VOTES, ACCOUNT_BALLOTS, ACCOUNT_VOTES, CONFIG, NEXT_VOTE_ID, VOTES,
};
use crate::utils::{resolve, validate_max_eligible_voters, validate_vote_input};

/// Contract name that is used for migration.
pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// Contract version that is used for migration.
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a new contract with the specified parameters in the [`InstantiateMsg`].
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let max_eligible_voters = msg
        .max_eligible_voters
        .unwrap_or(DEFAULT_MAX_ELIGIBLE_VOTERS);
    validate_max_eligible_voters(max_eligible_voters)?;

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        max_eligible_voters,
    };
    CONFIG.save(deps.storage, &config)?;

    // Vote ids start from 1
    NEXT_VOTE_ID.save(deps.storage, &1)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("owner", config.owner),
        attr("max_eligible_voters", max_eligible_voters.to_string()),
    ]))
}

/// Exposes all the execute functions available in the contract.
///
/// ## Execute messages
/// * **ExecuteMsg::CreateVote { input_vote }** Opens a new vote created by the sender.
///
/// * **ExecuteMsg::Vote { vote_id, choose }** Casts the sender's ballot on an active vote.
///
/// * **ExecuteMsg::UpdateConfig { max_eligible_voters }** Updates the contract configuration.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateVote { input_vote } => create_vote(deps, env, info, input_vote),
        ExecuteMsg::Vote { vote_id, choose } => cast_vote(deps, env, info, vote_id, choose),
        ExecuteMsg::UpdateConfig {
            max_eligible_voters,
        } => update_config(deps, info, max_eligible_voters),
    }
}

/// Opens a new vote. The vote is listed for its creator and for every eligible voter.
///
/// * **input** vote parameters.
pub fn create_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    input: CreateVoteInput,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let eligible_voters = validate_vote_input(deps.api, &input, config.max_eligible_voters)?;

    let vote_id = NEXT_VOTE_ID.load(deps.storage)?;
    let next_vote_id = Uint64::from(vote_id).checked_add(Uint64::one())?;
    NEXT_VOTE_ID.save(deps.storage, &next_vote_id.u64())?;

    let vote = Vote {
        vote_id,
        creator: info.sender.clone(),
        title: input.title,
        description: input.description,
        link: input.link,
        threshold: input.threshold,
        eligible_voters,
        ballots: vec![],
        yes_count: 0,
        active: true,
        outcome: None,
        created_at: env.block.time.seconds(),
        finished_at: None,
    };

    for participant in vote.participants() {
        ACCOUNT_VOTES.save(deps.storage, (participant, vote_id), &Empty {})?;
        ACCOUNT_ACTIVE_VOTES.save(deps.storage, (participant, vote_id), &Empty {})?;
    }

    VOTES.save(deps.storage, vote_id, &vote)?;

    Ok(Response::new()
        .set_data(to_json_binary(&vote_id)?)
        .add_attributes(vec![
            attr("action", "create_vote"),
            attr("creator", info.sender),
            attr("vote_id", vote_id.to_string()),
            attr("threshold", vote.threshold.to_string()),
            attr("eligible_voters", vote.eligible_voters.len().to_string()),
        ]))
}

/// Casts a ballot on a vote and closes the vote once its outcome is settled.
///
/// * **vote_id** is the identifier of the vote.
///
/// * **choose** `true` for yes, `false` for no.
pub fn cast_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    vote_id: u64,
    choose: bool,
) -> Result<Response, ContractError> {
    let mut vote = VOTES
        .may_load(deps.storage, vote_id)?
        .ok_or(ContractError::NotFound(vote_id))?;

    if !vote.active {
        return Err(ContractError::VoteClosed(vote_id));
    }

    if !vote.is_eligible(&info.sender) {
        return Err(ContractError::NotEligible {
            vote_id,
            voter: info.sender.to_string(),
        });
    }

    if vote.has_voted(&info.sender) {
        return Err(ContractError::AlreadyVoted {
            vote_id,
            voter: info.sender.to_string(),
        });
    }

    let now = env.block.time.seconds();
    let ballot = Ballot {
        voter: info.sender.clone(),
        choose,
        voted_at: now,
    };
    ACCOUNT_BALLOTS.save(deps.storage, (&info.sender, vote_id), &ballot)?;

    vote.ballots.push(ballot);
    if choose {
        vote.yes_count += 1;
    }

    let mut attrs = vec![
        attr("action", "vote"),
        attr("vote_id", vote_id.to_string()),
        attr("voter", &info.sender),
        attr("choose", choose.to_string()),
        attr("yes_count", vote.yes_count.to_string()),
    ];

    if let Some(outcome) = resolve(&vote) {
        vote.active = false;
        vote.finished_at = Some(now);

        for participant in vote.participants() {
            ACCOUNT_ACTIVE_VOTES.remove(deps.storage, (participant, vote_id));
        }

        attrs.push(attr("outcome", outcome.to_string()));
        vote.outcome = Some(outcome);
    }

    VOTES.save(deps.storage, vote_id, &vote)?;

    Ok(Response::new().add_attributes(attrs))
}

/// Updates contract parameters. Only the owner can execute this.
///
/// * **max_eligible_voters** new bound for the voter set of future votes.
pub fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    max_eligible_voters: Option<u32>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    let mut attrs = vec![attr("action", "update_config")];

    if let Some(max_eligible_voters) = max_eligible_voters {
        validate_max_eligible_voters(max_eligible_voters)?;
        config.max_eligible_voters = max_eligible_voters;
        attrs.push(attr("max_eligible_voters", max_eligible_voters.to_string()));
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(attrs))
}
