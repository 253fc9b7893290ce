use cosmwasm_std::{Addr, BankMsg, Coin, MessageInfo};
use cw_utils::NativeBalance;

use crate::coins::coins_to_string;
use crate::error::ContractError;

/// Moves funds between accounts on behalf of the handlers.
///
/// Every call is all-or-nothing: a failing debit removes nothing, and the
/// error is handed back to the handler unchanged.
pub trait Bank {
    /// Takes `amount` from `from`, returning the coins actually removed.
    fn debit(&mut self, from: &Addr, amount: &[Coin]) -> Result<Vec<Coin>, ContractError>;

    fn credit(&mut self, to: &Addr, amount: &[Coin]) -> Result<(), ContractError>;

    fn transfer(&mut self, from: &Addr, to: &Addr, amount: &[Coin]) -> Result<(), ContractError> {
        let moved = self.debit(from, amount)?;
        self.credit(to, &moved)
    }
}

/// Bank backed by the funds attached to the incoming message.
///
/// Only the sender can be debited, and only up to what they sent along.
/// Debited coins stay with the contract; credits become `BankMsg::Send`
/// and whatever was not debited is returned to the sender.
pub struct AttachedFunds {
    payer: Addr,
    available: NativeBalance,
    messages: Vec<BankMsg>,
}

impl AttachedFunds {
    pub fn new(info: &MessageInfo) -> Self {
        let mut available = NativeBalance(info.funds.clone());
        available.normalize();
        AttachedFunds {
            payer: info.sender.clone(),
            available,
            messages: vec![],
        }
    }

    /// Bank messages to dispatch, including the refund of undebited funds.
    pub fn into_messages(mut self) -> Vec<BankMsg> {
        if !self.available.is_empty() {
            self.messages.push(BankMsg::Send {
                to_address: self.payer.to_string(),
                amount: self.available.into_vec(),
            });
        }
        self.messages
    }
}

impl Bank for AttachedFunds {
    fn debit(&mut self, from: &Addr, amount: &[Coin]) -> Result<Vec<Coin>, ContractError> {
        if from != &self.payer {
            return Err(ContractError::Unauthorized {});
        }
        let mut required = NativeBalance(amount.to_vec());
        required.normalize();

        let shortfall = || ContractError::InsufficientFunds {
            required: coins_to_string(amount),
            available: coins_to_string(&self.available.0),
        };
        let mut remaining = self.available.clone();
        for coin in required.0.iter() {
            let held = remaining
                .0
                .iter_mut()
                .find(|held| held.denom == coin.denom)
                .ok_or_else(shortfall)?;
            held.amount = held.amount.checked_sub(coin.amount).map_err(|_| shortfall())?;
        }
        remaining.normalize();
        self.available = remaining;
        Ok(required.into_vec())
    }

    fn credit(&mut self, to: &Addr, amount: &[Coin]) -> Result<(), ContractError> {
        if amount.is_empty() {
            return Ok(());
        }
        self.messages.push(BankMsg::Send {
            to_address: to.to_string(),
            amount: amount.to_vec(),
        });
        Ok(())
    }
}
