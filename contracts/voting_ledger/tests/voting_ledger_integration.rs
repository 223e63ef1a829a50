use cosmwasm_std::{attr, Addr};

use group_voting::ledger::{CreateVoteInput, VoteOutcome};
use group_voting_ledger::error::ContractError;

use crate::helper::LedgerHelper;


#[test]
fn test_yes_or_no_scenario() {
    let mut helper = LedgerHelper::new(None);
    let alice = Addr::unchecked("alice");
    let bob = Addr::unchecked("bob");

    let vote_id = helper
        .create_vote_with(
            &alice,
            CreateVoteInput {
                title: "hello yes or no".to_string(),
                description: None,
                link: Some("https://github.com/willser/YesOrNo".to_string()),
                threshold: 2,
                eligible_voters: vec![alice.to_string(), bob.to_string()],
            },
        )
        .unwrap();

    let alice_votes = helper.active_votes(&alice, 0, 10).unwrap();
    assert_eq!(alice_votes.len(), 1);
    assert_eq!(alice_votes[0].vote_id, vote_id);
    assert_eq!(alice_votes[0].title, "hello yes or no");
    assert_eq!(
        alice_votes[0].link.as_deref(),
        Some("https://github.com/willser/YesOrNo")
    );

    helper.vote(&alice, vote_id, true).unwrap();
    let vote = helper.get_vote(vote_id).unwrap();
    assert!(vote.active);
    assert_eq!(helper.pending_voters(vote_id).unwrap(), vec![bob.clone()]);

    helper.timetravel(100);
    let resp = helper.vote(&bob, vote_id, true).unwrap();
    assert!(resp.events.iter().any(|event| event
        .attributes
        .contains(&attr("outcome", "passed"))));

    let vote = helper.get_vote(vote_id).unwrap();
    assert!(!vote.active);
    assert_eq!(vote.outcome, Some(VoteOutcome::Passed));
    assert_eq!(vote.created_at + 100, vote.finished_at.unwrap());
    assert!(helper.pending_voters(vote_id).unwrap().is_empty());

    assert!(helper.active_votes(&alice, 0, 10).unwrap().is_empty());
    assert!(helper.active_votes(&bob, 0, 10).unwrap().is_empty());

    let finished = helper.finished_votes(&bob, 0, 10).unwrap();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].vote_id, vote_id);
    assert!(finished[0].choose);
    assert_eq!(finished[0].voted_at, vote.finished_at.unwrap());
}

#[test]
fn test_vote_errors() {
    let mut helper = LedgerHelper::new(None);
    let creator = Addr::unchecked("creator");
    let alice = Addr::unchecked("alice");
    let bob = Addr::unchecked("bob");
    let mallory = Addr::unchecked("mallory");

    let err = helper.create_vote(&creator, "", 1, &[&alice]).unwrap_err();
    assert_eq!(
        ContractError::InvalidInput("Title must not be empty".to_string()),
        err.downcast().unwrap()
    );
    let err = helper
        .create_vote(&creator, "title", 0, &[&alice])
        .unwrap_err();
    assert_eq!(
        ContractError::InvalidInput("Threshold must be at least 1".to_string()),
        err.downcast().unwrap()
    );
    assert_eq!(helper.vote_count().unwrap(), 0);

    let vote_id = helper
        .create_vote(&creator, "title", 1, &[&alice, &bob])
        .unwrap();

    let err = helper.vote(&alice, vote_id + 1, true).unwrap_err();
    assert_eq!(ContractError::NotFound(vote_id + 1), err.downcast().unwrap());

    let err = helper.vote(&mallory, vote_id, true).unwrap_err();
    assert_eq!(
        ContractError::NotEligible {
            vote_id,
            voter: mallory.to_string()
        },
        err.downcast().unwrap()
    );
    assert!(helper.get_vote(vote_id).unwrap().ballots.is_empty());

    helper.vote(&alice, vote_id, false).unwrap();
    let err = helper.vote(&alice, vote_id, true).unwrap_err();
    assert_eq!(
        ContractError::AlreadyVoted {
            vote_id,
            voter: alice.to_string()
        },
        err.downcast().unwrap()
    );

    helper.vote(&bob, vote_id, true).unwrap();
    let err = helper.vote(&bob, vote_id, true).unwrap_err();
    assert_eq!(ContractError::VoteClosed(vote_id), err.downcast().unwrap());

    let err = helper.get_vote(vote_id + 1).unwrap_err();
    assert!(err
        .to_string()
        .contains(&format!("Vote {} not found", vote_id + 1)));
}

#[test]
fn test_listing_across_accounts() {
    let mut helper = LedgerHelper::new(None);
    let creator = Addr::unchecked("creator");
    let alice = Addr::unchecked("alice");
    let bob = Addr::unchecked("bob");
    let carol = Addr::unchecked("carol");

    let first = helper
        .create_vote(&creator, "first", 2, &[&alice, &bob, &carol])
        .unwrap();
    let second = helper.create_vote(&alice, "second", 1, &[&bob]).unwrap();
    let third = helper
        .create_vote(&bob, "third", 1, &[&bob, &carol])
        .unwrap();
    assert!(first < second && second < third);

    let ids = |list: Vec<group_voting::ledger::VoteListEntry>| {
        list.into_iter().map(|v| v.vote_id).collect::<Vec<_>>()
    };

    // Creators see their votes without being eligible
    assert_eq!(ids(helper.active_votes(&alice, 0, 10).unwrap()), vec![first, second]);
    assert_eq!(
        ids(helper.active_votes(&bob, 0, 10).unwrap()),
        vec![first, second, third]
    );
    assert_eq!(ids(helper.active_votes(&carol, 1, 10).unwrap()), vec![third]);
    assert_eq!(ids(helper.active_votes(&creator, 0, 10).unwrap()), vec![first]);

    // Alice can't vote on her own vote
    let err = helper.vote(&alice, second, true).unwrap_err();
    assert_eq!(
        ContractError::NotEligible {
            vote_id: second,
            voter: alice.to_string()
        },
        err.downcast().unwrap()
    );

    helper.vote(&bob, second, false).unwrap();
    let vote = helper.get_vote(second).unwrap();
    assert_eq!(vote.outcome, Some(VoteOutcome::Rejected));

    assert_eq!(ids(helper.active_votes(&alice, 0, 10).unwrap()), vec![first]);
    assert_eq!(
        ids(helper.active_votes(&bob, 0, 10).unwrap()),
        vec![first, third]
    );
    assert_eq!(
        ids(helper.all_votes(&bob, 0, 10).unwrap()),
        vec![first, second, third]
    );

    let unknown = Addr::unchecked("nobody");
    assert!(helper.active_votes(&unknown, 0, 10).unwrap().is_empty());
    assert!(helper.finished_votes(&unknown, 0, 10).unwrap().is_empty());
}

#[test]
fn test_update_config_and_migrate() {
    let mut helper = LedgerHelper::new(Some(3));
    let owner = helper.owner.clone();
    let creator = Addr::unchecked("creator");
    let voters = ["voter1", "voter2", "voter3", "voter4"].map(Addr::unchecked);
    let voter_refs = voters.iter().collect::<Vec<_>>();

    let err = helper
        .create_vote(&creator, "title", 1, &voter_refs)
        .unwrap_err();
    assert_eq!(
        ContractError::InvalidInput("At most 3 eligible voters are allowed".to_string()),
        err.downcast().unwrap()
    );

    let err = helper.update_config(&creator, Some(4)).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    helper.update_config(&owner, Some(4)).unwrap();
    assert_eq!(helper.config().unwrap().max_eligible_voters, 4);

    let vote_id = helper
        .create_vote(&creator, "title", 4, &voter_refs)
        .unwrap();
    for voter in &voters[..3] {
        helper.vote(voter, vote_id, true).unwrap();
    }

    let resp = helper.migrate().unwrap();
    assert!(resp.events.iter().any(|event| event
        .attributes
        .contains(&attr("new_contract_name", "group-voting-ledger"))));

    // State survives the migration
    helper.vote(&voters[3], vote_id, true).unwrap();
    let vote = helper.get_vote(vote_id).unwrap();
    assert_eq!(vote.yes_count, 4);
    assert_eq!(vote.outcome, Some(VoteOutcome::Passed));
}
