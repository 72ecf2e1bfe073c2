#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Storage, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::state::{ALLOWANCES, BALANCES, CONFIG, TOKEN_INFO};
use pegkeeper::pegged_token::{
    AllowanceResponse, BalanceResponse, Config, ExecuteMsg, InstantiateMsg, MintersResponse, QueryMsg, TokenInfoResponse,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:pegged-token";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    let minters = msg
        .minters
        .iter()
        .map(|minter| deps.api.addr_validate(minter))
        .collect::<StdResult<Vec<Addr>>>()?;

    let config = Config { owner, minters };
    CONFIG.save(deps.storage, &config)?;
    TOKEN_INFO.save(
        deps.storage,
        &TokenInfoResponse {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals,
            total_supply: Uint128::zero(),
        },
    )?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("config", format!("{:?}", config))
        .add_attribute("contract_address", env.contract.address))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Transfer { recipient, amount } => transfer(deps, info, recipient, amount),
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => transfer_from(deps, info, owner, recipient, amount),
        ExecuteMsg::IncreaseAllowance { spender, amount } => {
            update_allowance(deps, info, spender, amount, true)
        }
        ExecuteMsg::DecreaseAllowance { spender, amount } => {
            update_allowance(deps, info, spender, amount, false)
        }
        ExecuteMsg::Burn { amount } => burn(deps, info, amount),
        ExecuteMsg::BurnFrom { owner, amount } => burn_from(deps, info, owner, amount),
        ExecuteMsg::Mint { recipient, amount } => mint(deps, info, recipient, amount),
        ExecuteMsg::AddMinter { minter } => edit_minters(deps, info, minter, true),
        ExecuteMsg::RemoveMinter { minter } => edit_minters(deps, info, minter, false),
    }
}

fn add_balance(storage: &mut dyn Storage, address: &Addr, amount: Uint128) -> Result<(), ContractError> {
    BALANCES.update(storage, address, |balance| -> Result<Uint128, ContractError> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    Ok(())
}

fn sub_balance(storage: &mut dyn Storage, address: &Addr, amount: Uint128) -> Result<(), ContractError> {
    BALANCES.update(storage, address, |balance| -> Result<Uint128, ContractError> {
        let balance = balance.unwrap_or_default();
        if balance < amount {
            return Err(ContractError::InsufficientBalance { balance, amount });
        }
        Ok(balance - amount)
    })?;
    Ok(())
}

/// Spends `amount` of the `owner` -> `spender` allowance
fn spend_allowance(
    storage: &mut dyn Storage,
    owner: &Addr,
    spender: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    ALLOWANCES.update(storage, (owner, spender), |allowance| -> Result<Uint128, ContractError> {
        let allowance = allowance.unwrap_or_default();
        if allowance < amount {
            return Err(ContractError::InsufficientAllowance { allowance, amount });
        }
        Ok(allowance - amount)
    })?;
    Ok(())
}

fn transfer(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;

    sub_balance(deps.storage, &info.sender, amount)?;
    add_balance(deps.storage, &recipient, amount)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "transfer"),
        attr("from", info.sender),
        attr("to", recipient),
        attr("amount", amount),
    ]))
}

fn transfer_from(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let owner = deps.api.addr_validate(&owner)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    spend_allowance(deps.storage, &owner, &info.sender, amount)?;
    sub_balance(deps.storage, &owner, amount)?;
    add_balance(deps.storage, &recipient, amount)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "transfer_from"),
        attr("from", owner),
        attr("to", recipient),
        attr("by", info.sender),
        attr("amount", amount),
    ]))
}

fn update_allowance(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    amount: Uint128,
    increase: bool,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    if spender == info.sender {
        return Err(ContractError::CannotSetOwnAccount {});
    }

    let allowance = ALLOWANCES.update(
        deps.storage,
        (&info.sender, &spender),
        |allowance| -> Result<Uint128, ContractError> {
            let allowance = allowance.unwrap_or_default();
            if increase {
                Ok(allowance.checked_add(amount)?)
            } else {
                Ok(allowance.saturating_sub(amount))
            }
        },
    )?;

    let method = if increase { "increase_allowance" } else { "decrease_allowance" };
    Ok(Response::new().add_attributes(vec![
        attr("method", method),
        attr("owner", info.sender),
        attr("spender", spender),
        attr("allowance", allowance),
    ]))
}

fn burn(deps: DepsMut, info: MessageInfo, amount: Uint128) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    sub_balance(deps.storage, &info.sender, amount)?;
    reduce_supply(deps.storage, amount)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "burn"),
        attr("from", info.sender),
        attr("amount", amount),
    ]))
}

fn burn_from(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    let owner = deps.api.addr_validate(&owner)?;

    spend_allowance(deps.storage, &owner, &info.sender, amount)?;
    sub_balance(deps.storage, &owner, amount)?;
    reduce_supply(deps.storage, amount)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "burn_from"),
        attr("from", owner),
        attr("by", info.sender),
        attr("amount", amount),
    ]))
}

fn reduce_supply(storage: &mut dyn Storage, amount: Uint128) -> Result<(), ContractError> {
    let mut token_info = TOKEN_INFO.load(storage)?;
    token_info.total_supply = token_info.total_supply.checked_sub(amount)?;
    TOKEN_INFO.save(storage, &token_info)?;
    Ok(())
}

fn mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    //Assert Authority
    if !config.minters.contains(&info.sender) {
        return Err(ContractError::Unauthorized {});
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    let mut token_info = TOKEN_INFO.load(deps.storage)?;
    token_info.total_supply = token_info.total_supply.checked_add(amount)?;
    TOKEN_INFO.save(deps.storage, &token_info)?;
    add_balance(deps.storage, &recipient, amount)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "mint"),
        attr("to", recipient),
        attr("amount", amount),
        attr("total_supply", token_info.total_supply),
    ]))
}

fn edit_minters(
    deps: DepsMut,
    info: MessageInfo,
    minter: String,
    add: bool,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    let minter = deps.api.addr_validate(&minter)?;

    if add {
        if !config.minters.contains(&minter) {
            config.minters.push(minter.clone());
        }
    } else {
        config.minters.retain(|stored| stored != &minter);
    }
    CONFIG.save(deps.storage, &config)?;

    let method = if add { "add_minter" } else { "remove_minter" };
    Ok(Response::new().add_attributes(vec![attr("method", method), attr("minter", minter)]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => {
            let address = deps.api.addr_validate(&address)?;
            let balance = BALANCES.may_load(deps.storage, &address)?.unwrap_or_default();
            to_json_binary(&BalanceResponse { balance })
        }
        QueryMsg::TokenInfo {} => to_json_binary(&TOKEN_INFO.load(deps.storage)?),
        QueryMsg::Allowance { owner, spender } => {
            let owner = deps.api.addr_validate(&owner)?;
            let spender = deps.api.addr_validate(&spender)?;
            let allowance = ALLOWANCES
                .may_load(deps.storage, (&owner, &spender))?
                .unwrap_or_default();
            to_json_binary(&AllowanceResponse { allowance })
        }
        QueryMsg::Minters {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&MintersResponse {
                owner: config.owner,
                minters: config.minters,
            })
        }
    }
}
