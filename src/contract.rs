#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Addr, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw2::set_contract_version;

use crate::bank::{AttachedFunds, Bank};
use crate::coins::{coins_to_string, covers};
use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, NamesResponse, OrderResponse, OrdersResponse,
    QueryMsg, ResolveRecordResponse, WhoisResponse,
};
use crate::state::{
    delete_whois, escrow_denom, escrow_iter, escrow_size, get_escrow, get_owner, get_price,
    get_whois, is_escrow_present, is_name_present, load_config, names_iter,
    resolve_name, set_customer, set_escrow, set_name, set_owner, set_price, Config, Escrow,
    CONFIG,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:cw-nameservice-escrow";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = match msg.min_price {
        Some(min_price) => {
            if min_price.amount.is_zero() {
                return Err(ContractError::NonPositiveAmount {});
            }
            Config { min_price }
        }
        None => Config::default(),
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("min_price", config.min_price.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    msg.validate()?;

    let mut bank = AttachedFunds::new(&info);
    let sender = info.sender;
    let res = match msg {
        ExecuteMsg::SetName { name, value } => execute_set_name(deps, &sender, name, value),
        ExecuteMsg::BuyName { name, bid } => execute_buy_name(deps, &mut bank, &sender, name, bid),
        ExecuteMsg::DeleteName { name } => execute_delete_name(deps, &sender, name),
        ExecuteMsg::CreateOrder {
            channel_state,
            channel_token,
            amount,
        } => execute_create_order(deps, &mut bank, &sender, channel_state, channel_token, amount),
        ExecuteMsg::FillOrder {
            merchant,
            amount,
            wallet_commit,
        } => {
            let merchant = deps.api.addr_validate(&merchant)?;
            execute_fill_order(deps, &mut bank, &merchant, &sender, amount, wallet_commit)
        }
    }?;

    Ok(res.add_messages(bank.into_messages()))
}

pub fn execute_set_name(
    deps: DepsMut,
    sender: &Addr,
    name: String,
    value: String,
) -> Result<Response, ContractError> {
    if get_owner(deps.storage, &name)?.as_ref() != Some(sender) {
        return Err(ContractError::Unauthorized {});
    }
    set_name(deps.storage, &name, value.clone())?;

    Ok(Response::new()
        .add_attribute("action", "set_name")
        .add_attribute("name", name)
        .add_attribute("value", value))
}

pub fn execute_buy_name(
    deps: DepsMut,
    bank: &mut dyn Bank,
    buyer: &Addr,
    name: String,
    bid: Vec<Coin>,
) -> Result<Response, ContractError> {
    let price = get_price(deps.storage, &name)?;
    if !covers(&bid, &price) {
        return Err(ContractError::BidTooLow {
            price: coins_to_string(&price),
        });
    }

    // a name nobody owned has no seller, so the bid is only taken
    match get_owner(deps.storage, &name)? {
        Some(owner) => bank.transfer(buyer, &owner, &bid)?,
        None => {
            bank.debit(buyer, &bid)?;
        }
    }

    set_owner(deps.storage, &name, buyer.clone())?;
    set_price(deps.storage, &name, bid.clone())?;

    Ok(Response::new()
        .add_attribute("action", "buy_name")
        .add_attribute("name", name)
        .add_attribute("buyer", buyer)
        .add_attribute("price", coins_to_string(&bid)))
}

pub fn execute_delete_name(
    deps: DepsMut,
    sender: &Addr,
    name: String,
) -> Result<Response, ContractError> {
    if !is_name_present(deps.storage, &name) {
        return Err(ContractError::NameNotFound { name });
    }
    if get_owner(deps.storage, &name)?.as_ref() != Some(sender) {
        return Err(ContractError::Unauthorized {});
    }
    delete_whois(deps.storage, &name);

    Ok(Response::new()
        .add_attribute("action", "delete_name")
        .add_attribute("name", name))
}

pub fn execute_create_order(
    deps: DepsMut,
    bank: &mut dyn Bank,
    merchant: &Addr,
    channel_state: String,
    channel_token: String,
    amount: Vec<Coin>,
) -> Result<Response, ContractError> {
    if amount.len() != 1 {
        return Err(ContractError::InvalidDenomCount {
            count: amount.len(),
        });
    }
    if is_escrow_present(deps.storage, merchant) {
        return Err(ContractError::OrderExists {
            merchant: merchant.to_string(),
        });
    }

    let escrowed = bank.debit(merchant, &amount)?;
    let escrow = Escrow {
        merchant: merchant.clone(),
        customer: None,
        channel_state,
        channel_token,
        wallet_commit: Binary::default(),
        amount: escrowed,
        filled: false,
    };
    set_escrow(deps.storage, merchant, &escrow)?;

    Ok(Response::new()
        .add_attribute("action", "create_order")
        .add_attribute("merchant", merchant)
        .add_attribute("amount", coins_to_string(&escrow.amount)))
}

pub fn execute_fill_order(
    deps: DepsMut,
    bank: &mut dyn Bank,
    merchant: &Addr,
    customer: &Addr,
    amount: Vec<Coin>,
    wallet_commit: Binary,
) -> Result<Response, ContractError> {
    if amount.len() != 1 {
        return Err(ContractError::InvalidDenomCount {
            count: amount.len(),
        });
    }
    if !is_escrow_present(deps.storage, merchant) {
        return Err(ContractError::OrderNotFound {
            merchant: merchant.to_string(),
        });
    }

    let escrow = get_escrow(deps.storage, merchant)?;
    if escrow.filled {
        return Err(ContractError::OrderFilled {
            merchant: merchant.to_string(),
        });
    }
    if amount != escrow.amount {
        return Err(mismatch_error(&amount[0], &escrow.amount));
    }

    let funds = bank.debit(customer, &amount)?;
    set_customer(deps.storage, merchant, customer.clone(), wallet_commit)?;

    Ok(Response::new()
        .add_attribute("action", "fill_order")
        .add_attribute("merchant", merchant)
        .add_attribute("customer", customer)
        .add_attribute("amount", coins_to_string(&funds)))
}

// quantity is checked before denomination
fn mismatch_error(offered: &Coin, escrowed: &[Coin]) -> ContractError {
    match escrowed.first() {
        Some(expected) if expected.amount != offered.amount => ContractError::IncorrectAmount {
            expected: expected.to_string(),
        },
        _ => ContractError::IncorrectDenom {
            expected: coins_to_string(escrowed),
        },
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ResolveName { name } => to_binary(&query_resolver(deps, name)?),
        QueryMsg::Whois { name } => to_binary(&query_whois(deps, name)?),
        QueryMsg::Names {} => to_binary(&query_names(deps)?),
        QueryMsg::Orders {} => to_binary(&query_orders(deps)?),
        QueryMsg::Order { merchant } => to_binary(&query_order(deps, merchant)?),
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
    }
}

// An empty value is reported the same way as an unknown name.
fn query_resolver(deps: Deps, name: String) -> StdResult<ResolveRecordResponse> {
    let value = resolve_name(deps.storage, &name)?;
    if value.is_empty() {
        return Err(StdError::not_found(format!("name {}", name)));
    }
    Ok(ResolveRecordResponse { value })
}

fn query_whois(deps: Deps, name: String) -> StdResult<WhoisResponse> {
    Ok(get_whois(deps.storage, &name)?.into())
}

fn query_names(deps: Deps) -> StdResult<NamesResponse> {
    let names = names_iter(deps.storage).collect::<StdResult<Vec<_>>>()?;
    Ok(NamesResponse { names })
}

fn query_orders(deps: Deps) -> StdResult<OrdersResponse> {
    let orders = escrow_iter(deps.storage)
        .map(|item| item.map(|(_, escrow)| escrow))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(OrdersResponse { orders })
}

fn query_order(deps: Deps, merchant: String) -> StdResult<OrderResponse> {
    let merchant = deps.api.addr_validate(&merchant)?;
    let size = escrow_size(deps.storage, &merchant)?;
    let denom = escrow_denom(deps.storage, &merchant)?;
    Ok(OrderResponse {
        order: get_escrow(deps.storage, &merchant)?,
        size,
        denom,
    })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    Ok(load_config(deps.storage)?.into())
}
