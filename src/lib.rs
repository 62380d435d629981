//! Scoring and statistics for mock trial ballots.
//!
//! Ballots are scored per slot (see [`tournaments::ballots::slots`]); each
//! ballot gets a verdict from [`tournaments::ballots::totals`], and the
//! ballots of a tournament are rolled up into per-competitor statistics by
//! [`tournaments::standings::compute`].

pub mod config;
pub mod state;
pub mod test;
pub mod tournaments;
pub mod util_resp;
