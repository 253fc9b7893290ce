use cosmwasm_schema::cw_serde;
use cosmwasm_std::{coin, Addr, Binary, Coin, Order, StdError, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};


pub const DEFAULT_MIN_PRICE_DENOM: &str = "nametoken";
pub const DEFAULT_MIN_PRICE_AMOUNT: u128 = 1;

#[cw_serde]
pub struct Config {
    /// Starting price of a name that was never owned
    pub min_price: Coin,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_price: coin(DEFAULT_MIN_PRICE_AMOUNT, DEFAULT_MIN_PRICE_DENOM),
        }
    }
}

/// All the metadata of a name
#[cw_serde]
pub struct Whois {
    pub value: String,
    pub owner: Option<Addr>,
    pub price: Vec<Coin>,
}

impl Whois {
    /// Record of a name nobody has bought yet.
    pub fn new(min_price: Coin) -> Self {
        Whois {
            value: String::new(),
            owner: None,
            price: vec![min_price],
        }
    }
}

/// Funds a merchant holds in escrow until a customer fills the order.
#[cw_serde]
pub struct Escrow {
    pub merchant: Addr,
    pub customer: Option<Addr>,
    pub channel_state: String,
    pub channel_token: String,
    pub wallet_commit: Binary,
    pub amount: Vec<Coin>,
    pub filled: bool,
}

impl Default for Escrow {
    fn default() -> Self {
        Escrow {
            merchant: Addr::unchecked(""),
            customer: None,
            channel_state: String::new(),
            channel_token: String::new(),
            wallet_commit: Binary::default(),
            amount: vec![],
            filled: false,
        }
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const NAME_RESOLVER: Map<&str, Whois> = Map::new("whois");
pub const ESCROWS: Map<&Addr, Escrow> = Map::new("escrow");

pub fn load_config(storage: &dyn Storage) -> StdResult<Config> {
    Ok(CONFIG.may_load(storage)?.unwrap_or_default())
}

// Name registry
//
// Lookups never fail on absence: an unknown name reads as an unowned record
// priced at the configured minimum. Such a record is not written back until
// somebody owns it.

pub fn get_whois(storage: &dyn Storage, name: &str) -> StdResult<Whois> {
    match NAME_RESOLVER.may_load(storage, name)? {
        Some(whois) => Ok(whois),
        None => Ok(Whois::new(load_config(storage)?.min_price)),
    }
}

pub fn set_whois(storage: &mut dyn Storage, name: &str, whois: &Whois) -> StdResult<()> {
    if whois.owner.is_none() {
        return Ok(());
    }
    NAME_RESOLVER.save(storage, name, whois)
}

pub fn delete_whois(storage: &mut dyn Storage, name: &str) {
    NAME_RESOLVER.remove(storage, name)
}

pub fn is_name_present(storage: &dyn Storage, name: &str) -> bool {
    NAME_RESOLVER.has(storage, name)
}

pub fn resolve_name(storage: &dyn Storage, name: &str) -> StdResult<String> {
    Ok(get_whois(storage, name)?.value)
}

pub fn set_name(storage: &mut dyn Storage, name: &str, value: String) -> StdResult<()> {
    let mut whois = get_whois(storage, name)?;
    whois.value = value;
    set_whois(storage, name, &whois)
}

pub fn has_owner(storage: &dyn Storage, name: &str) -> StdResult<bool> {
    Ok(get_whois(storage, name)?.owner.is_some())
}

pub fn get_owner(storage: &dyn Storage, name: &str) -> StdResult<Option<Addr>> {
    Ok(get_whois(storage, name)?.owner)
}

pub fn set_owner(storage: &mut dyn Storage, name: &str, owner: Addr) -> StdResult<()> {
    let mut whois = get_whois(storage, name)?;
    whois.owner = Some(owner);
    set_whois(storage, name, &whois)
}

pub fn get_price(storage: &dyn Storage, name: &str) -> StdResult<Vec<Coin>> {
    Ok(get_whois(storage, name)?.price)
}

pub fn set_price(storage: &mut dyn Storage, name: &str, price: Vec<Coin>) -> StdResult<()> {
    let mut whois = get_whois(storage, name)?;
    whois.price = price;
    set_whois(storage, name, &whois)
}

/// Every stored name with its record, in key order.
pub fn whois_iter<'a>(
    storage: &'a dyn Storage,
) -> Box<dyn Iterator<Item = StdResult<(String, Whois)>> + 'a> {
    NAME_RESOLVER.range(storage, None, None, Order::Ascending)
}

pub fn names_iter<'a>(storage: &'a dyn Storage) -> Box<dyn Iterator<Item = StdResult<String>> + 'a> {
    NAME_RESOLVER.keys(storage, None, None, Order::Ascending)
}

// Escrow registry
//
// One escrow per merchant, keyed by the merchant address. An absent escrow
// reads as the zero record (unfilled, empty amount).

pub fn get_escrow(storage: &dyn Storage, merchant: &Addr) -> StdResult<Escrow> {
    Ok(ESCROWS.may_load(storage, merchant)?.unwrap_or_default())
}

pub fn set_escrow(storage: &mut dyn Storage, merchant: &Addr, escrow: &Escrow) -> StdResult<()> {
    if escrow.amount.is_empty() {
        return Ok(());
    }
    ESCROWS.save(storage, merchant, escrow)
}

pub fn is_escrow_present(storage: &dyn Storage, merchant: &Addr) -> bool {
    ESCROWS.has(storage, merchant)
}

pub fn is_escrow_filled(storage: &dyn Storage, merchant: &Addr) -> StdResult<bool> {
    Ok(get_escrow(storage, merchant)?.filled)
}

/// Records the customer filling the order. The stored amount stays the
/// merchant's side.
pub fn set_customer(
    storage: &mut dyn Storage,
    merchant: &Addr,
    customer: Addr,
    wallet_commit: Binary,
) -> StdResult<()> {
    let mut escrow = get_escrow(storage, merchant)?;
    escrow.customer = Some(customer);
    escrow.wallet_commit = wallet_commit;
    escrow.filled = true;
    set_escrow(storage, merchant, &escrow)
}

/// Size of the order. Halved once the order is filled.
pub fn escrow_size(storage: &dyn Storage, merchant: &Addr) -> StdResult<Uint128> {
    let escrow = get_escrow(storage, merchant)?;
    let first = escrow
        .amount
        .first()
        .ok_or_else(|| StdError::not_found(format!("escrow for {}", merchant)))?;
    if escrow.filled {
        return Ok(first.amount / Uint128::new(2));
    }
    Ok(first.amount)
}

pub fn escrow_denom(storage: &dyn Storage, merchant: &Addr) -> StdResult<String> {
    get_escrow(storage, merchant)?
        .amount
        .first()
        .map(|c| c.denom.clone())
        .ok_or_else(|| StdError::not_found(format!("escrow for {}", merchant)))
}

pub fn escrow_iter<'a>(
    storage: &'a dyn Storage,
) -> Box<dyn Iterator<Item = StdResult<(Addr, Escrow)>> + 'a> {
    ESCROWS.range(storage, None, None, Order::Ascending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;
    use cosmwasm_std::{coins, from_slice, to_vec};

    #[test]
    fn unknown_name_reads_as_default() {
        let store = MockStorage::new();
        let whois = get_whois(&store, "alice.cosmos").unwrap();
        assert_eq!(whois, Whois::new(coin(1, "nametoken")));
        assert!(!is_name_present(&store, "alice.cosmos"));
    }

    #[test]
    fn default_price_follows_config() {
        let mut store = MockStorage::new();
        CONFIG
            .save(&mut store, &Config { min_price: coin(5, "ucosm") })
            .unwrap();
        assert_eq!(get_price(&store, "alice").unwrap(), coins(5, "ucosm"));
    }

    #[test]
    fn unowned_records_are_not_persisted() {
        let mut store = MockStorage::new();
        set_name(&mut store, "alice", "1.2.3.4".to_string()).unwrap();
        assert!(!is_name_present(&store, "alice"));
        assert_eq!(resolve_name(&store, "alice").unwrap(), "");

        set_owner(&mut store, "alice", Addr::unchecked("owner")).unwrap();
        set_name(&mut store, "alice", "1.2.3.4".to_string()).unwrap();
        assert!(is_name_present(&store, "alice"));
        assert!(has_owner(&store, "alice").unwrap());
        assert_eq!(resolve_name(&store, "alice").unwrap(), "1.2.3.4");
    }

    #[test]
    fn accessors_rewrite_whole_record() {
        let mut store = MockStorage::new();
        set_owner(&mut store, "alice", Addr::unchecked("owner")).unwrap();
        set_price(&mut store, "alice", coins(7, "nametoken")).unwrap();
        set_name(&mut store, "alice", "v".to_string()).unwrap();

        let whois = get_whois(&store, "alice").unwrap();
        assert_eq!(whois.owner, Some(Addr::unchecked("owner")));
        assert_eq!(whois.price, coins(7, "nametoken"));
        assert_eq!(whois.value, "v");

        delete_whois(&mut store, "alice");
        assert!(!is_name_present(&store, "alice"));
        // deleting twice is fine
        delete_whois(&mut store, "alice");
    }

    #[test]
    fn names_iterate_in_key_order() {
        let mut store = MockStorage::new();
        for name in ["carol", "alice", "bob"] {
            set_owner(&mut store, name, Addr::unchecked("owner")).unwrap();
        }
        let names: Vec<String> = names_iter(&store).collect::<StdResult<_>>().unwrap();
        assert_eq!(names, vec!["alice", "bob", "carol"]);

        let records: Vec<(String, Whois)> =
            whois_iter(&store).collect::<StdResult<_>>().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].1.owner, Some(Addr::unchecked("owner")));
    }

    #[test]
    fn escrow_defaults_and_empty_guard() {
        let mut store = MockStorage::new();
        let merchant = Addr::unchecked("merchant");
        assert_eq!(get_escrow(&store, &merchant).unwrap(), Escrow::default());
        assert!(!is_escrow_filled(&store, &merchant).unwrap());

        set_escrow(
            &mut store,
            &merchant,
            &Escrow {
                merchant: merchant.clone(),
                ..Escrow::default()
            },
        )
        .unwrap();
        assert!(!is_escrow_present(&store, &merchant));
        assert!(escrow_size(&store, &merchant).is_err());
    }

    #[test]
    fn set_customer_marks_filled_and_keeps_amount() {
        let mut store = MockStorage::new();
        let merchant = Addr::unchecked("merchant");
        let escrow = Escrow {
            merchant: merchant.clone(),
            channel_state: "s1".to_string(),
            channel_token: "t1".to_string(),
            amount: coins(100, "ucosm"),
            ..Escrow::default()
        };
        set_escrow(&mut store, &merchant, &escrow).unwrap();
        assert_eq!(escrow_size(&store, &merchant).unwrap(), Uint128::new(100));
        assert_eq!(escrow_denom(&store, &merchant).unwrap(), "ucosm");

        set_customer(
            &mut store,
            &merchant,
            Addr::unchecked("customer"),
            Binary::from(b"commit".to_vec()),
        )
        .unwrap();

        let filled = get_escrow(&store, &merchant).unwrap();
        assert!(filled.filled);
        assert_eq!(filled.customer, Some(Addr::unchecked("customer")));
        assert_eq!(filled.wallet_commit, Binary::from(b"commit".to_vec()));
        assert_eq!(filled.amount, coins(100, "ucosm"));
        assert_eq!(escrow_size(&store, &merchant).unwrap(), Uint128::new(50));

        let all: Vec<(Addr, Escrow)> = escrow_iter(&store).collect::<StdResult<_>>().unwrap();
        assert_eq!(all, vec![(merchant, filled)]);
    }

    #[test]
    fn records_survive_binary_encoding() {
        let whois = Whois {
            value: "1.2.3.4".to_string(),
            owner: Some(Addr::unchecked("owner")),
            price: coins(3, "nametoken"),
        };
        let decoded: Whois = from_slice(&to_vec(&whois).unwrap()).unwrap();
        assert_eq!(decoded, whois);

        let escrow = Escrow {
            merchant: Addr::unchecked("merchant"),
            customer: Some(Addr::unchecked("customer")),
            channel_state: "s1".to_string(),
            channel_token: "t1".to_string(),
            wallet_commit: Binary::from(vec![0u8, 1, 2, 255]),
            amount: coins(100, "ucosm"),
            filled: true,
        };
        let decoded: Escrow = from_slice(&to_vec(&escrow).unwrap()).unwrap();
        assert_eq!(decoded, escrow);
    }
}
