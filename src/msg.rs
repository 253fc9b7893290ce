use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{from_slice, Addr, Binary, Coin, Uint128};

use crate::coins::{has_repeated_denoms, is_all_positive};
use crate::error::ContractError;
use crate::state::{Config, Escrow, Whois};

#[cw_serde]
pub struct InstantiateMsg {
    /// Price of a name that was never bought. Defaults to 1nametoken.
    pub min_price: Option<Coin>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Change the value a name resolves to. Owner only.
    SetName { name: String, value: String },
    /// Buy a name for at least its current price.
    BuyName { name: String, bid: Vec<Coin> },
    /// Remove a name. Owner only.
    DeleteName { name: String },
    /// Put funds in escrow as the sender (the merchant).
    CreateOrder {
        channel_state: String,
        channel_token: String,
        amount: Vec<Coin>,
    },
    /// Match a merchant's escrow as the sender (the customer).
    FillOrder {
        merchant: String,
        amount: Vec<Coin>,
        wallet_commit: Binary,
    },
}

impl ExecuteMsg {
    /// Stateless checks, run before any handler looks at the store.
    pub fn validate(&self) -> Result<(), ContractError> {
        match self {
            ExecuteMsg::SetName { name, .. } | ExecuteMsg::DeleteName { name } => {
                validate_name(name)
            }
            ExecuteMsg::BuyName { name, bid } => {
                validate_name(name)?;
                validate_amount(bid)
            }
            ExecuteMsg::CreateOrder { amount, .. } | ExecuteMsg::FillOrder { amount, .. } => {
                validate_amount(amount)
            }
        }
    }
}

fn validate_name(name: &str) -> Result<(), ContractError> {
    if name.is_empty() {
        return Err(ContractError::EmptyName {});
    }
    Ok(())
}

fn validate_amount(amount: &[Coin]) -> Result<(), ContractError> {
    if !is_all_positive(amount) {
        return Err(ContractError::NonPositiveAmount {});
    }
    if has_repeated_denoms(amount) {
        return Err(ContractError::RepeatedDenom {});
    }
    Ok(())
}

/// Decodes a raw execute payload, reporting anything that is not one of the
/// known messages as an unrecognized request.
pub fn decode_execute_msg(data: &[u8]) -> Result<ExecuteMsg, ContractError> {
    from_slice(data).map_err(|err| ContractError::UnrecognizedRequest {
        reason: err.to_string(),
    })
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // ResolveName returns the value the name resolves to
    #[returns(ResolveRecordResponse)]
    ResolveName { name: String },
    #[returns(WhoisResponse)]
    Whois { name: String },
    #[returns(NamesResponse)]
    Names {},
    #[returns(OrdersResponse)]
    Orders {},
    #[returns(OrderResponse)]
    Order { merchant: String },
    #[returns(ConfigResponse)]
    Config {},
}

// We define a custom struct for each query response
#[cw_serde]
pub struct ResolveRecordResponse {
    pub value: String,
}

#[cw_serde]
pub struct WhoisResponse {
    pub value: String,
    pub owner: Option<Addr>,
    pub price: Vec<Coin>,
}

impl From<Whois> for WhoisResponse {
    fn from(whois: Whois) -> Self {
        WhoisResponse {
            value: whois.value,
            owner: whois.owner,
            price: whois.price,
        }
    }
}

#[cw_serde]
pub struct NamesResponse {
    pub names: Vec<String>,
}

#[cw_serde]
pub struct OrdersResponse {
    pub orders: Vec<Escrow>,
}

#[cw_serde]
pub struct OrderResponse {
    pub order: Escrow,
    /// Per-side size; half the stored amount once filled
    pub size: Uint128,
    pub denom: String,
}

#[cw_serde]
pub struct ConfigResponse {
    pub min_price: Coin,
}

impl From<Config> for ConfigResponse {
    fn from(config: Config) -> Self {
        ConfigResponse {
            min_price: config.min_price,
        }
    }
}
