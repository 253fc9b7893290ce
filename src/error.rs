use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: incorrect owner")]
    Unauthorized {},

    #[error("Name does not exist: {name}")]
    NameNotFound { name: String },

    #[error("Name cannot be empty")]
    EmptyName {},

    #[error("Amounts must be positive")]
    NonPositiveAmount {},

    #[error("Denomination listed more than once")]
    RepeatedDenom {},

    #[error("Bid not high enough. Current price is {price}")]
    BidTooLow { price: String },

    /// Raised by the bank gateway when the payer cannot cover a debit.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: String, available: String },

    #[error("Incorrect number of denominations ({count}). Must be 1")]
    InvalidDenomCount { count: usize },

    #[error("Merchant {merchant} already has one escrow. Currently only one is supported at a time")]
    OrderExists { merchant: String },

    #[error("Order does not exist. Escrow not found for merchant {merchant}")]
    OrderNotFound { merchant: String },

    #[error("Order for merchant {merchant} has already been filled")]
    OrderFilled { merchant: String },

    #[error("Incorrect amount. Should be {expected}")]
    IncorrectAmount { expected: String },

    #[error("Incorrect coins. Escrow has {expected}")]
    IncorrectDenom { expected: String },

    #[error("Unrecognized nameservice request: {reason}")]
    UnrecognizedRequest { reason: String },
}
