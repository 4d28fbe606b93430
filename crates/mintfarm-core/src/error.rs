//! Error types shared across Mintfarm crates.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("missing 0x prefix")] MissingPrefix,
    #[error("invalid length: {0} hex chars, expected 40")] InvalidLength(usize),
    #[error("invalid hex: {0}")] InvalidHex(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("term too short: {term_days} < {min_days} days")] TermTooShort { term_days: u64, min_days: u64 },
    #[error("term too long: {term_days} > {max_days} days")] TermTooLong { term_days: u64, max_days: u64 },
    #[error("claim already pending for {0}")] ClaimAlreadyPending(String),
    #[error("no pending claim for {0}")] NoPendingClaim(String),
    #[error("claim not matured: matures at {maturity_ts}, now {now}")] NotMatured { maturity_ts: u64, now: u64 },
    #[error("invalid share percentage: {0}")] InvalidShare(u64),
    #[error("arithmetic overflow")] ArithmeticOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintError {
    #[error("caller {0} is not the mint authority")] NotAuthority(String),
    #[error("mint to the zero address")] ZeroRecipient,
    #[error("supply overflow")] SupplyOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("arithmetic overflow")] ArithmeticOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_matured() {
        let e = LedgerError::NotMatured {
            maturity_ts: 10,
            now: 5,
        };
        assert_eq!(e.to_string(), "claim not matured: matures at 10, now 5");
    }

    #[test]
    fn display_invalid_length() {
        assert_eq!(
            AddressError::InvalidLength(3).to_string(),
            "invalid length: 3 hex chars, expected 40"
        );
    }
}
