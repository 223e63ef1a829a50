use cosmwasm_std::{Addr, Empty};
use cw_storage_plus::{Item, Map};

use group_voting::ledger::{Ballot, Config, Vote};

/// Stores the config for the voting ledger
pub const CONFIG: Item<Config> = Item::new("config");

/// Identifier the next created vote receives
pub const NEXT_VOTE_ID: Item<u64> = Item::new("next_vote_id");

/// This is a map that contains information about all votes
pub const VOTES: Map<u64, Vote> = Map::new("votes");

/// Every vote an account created or is eligible for, keyed by (account, vote id).
/// Entries are never removed.
pub const ACCOUNT_VOTES: Map<(&Addr, u64), Empty> = Map::new("account_votes");

/// Active subset of [`ACCOUNT_VOTES`]. Entries are dropped once a vote is resolved.
pub const ACCOUNT_ACTIVE_VOTES: Map<(&Addr, u64), Empty> = Map::new("account_active_votes");

/// Ballots cast by an account, keyed by (voter, vote id)
pub const ACCOUNT_BALLOTS: Map<(&Addr, u64), Ballot> = Map::new("account_ballots");
