#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError,
    StdResult, Storage, SubMsg, SubMsgResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::math::StableSwap;
use crate::query::{query_admin_balances, query_calc, query_virtual_price};
use crate::state::{BALANCES, CONFIG, LP_BALANCES, PEG_KEEPER_LEDGER, PENDING_FEE, TOTAL_SUPPLY};
use pegkeeper::helpers::{token_transfer_from_msg, token_transfer_msg};
use pegkeeper::math::{A_PRECISION, FEE_DENOMINATOR, MAX_FEE, N_COINS, PRECISION};
use pegkeeper::peg_keeper::ExecuteMsg as KeeperExecuteMsg;
use pegkeeper::stable_pool::{BalancesResponse, Config, ExecuteMsg, InstantiateMsg, PendingFeeResponse, QueryMsg};
use pegkeeper::types::{PegKeeperBinding, PegKeeperLedger, ADMIN_ACTIONS_DELAY};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:stable-pool";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

//Reply IDs
const PEG_KEEPER_UPDATE_REPLY_ID: u64 = 1u64;

//Constants
const MAX_A: u64 = 1_000_000;
const DEFAULT_MIN_COIN_AMOUNT: u128 = 1_000_000;

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
    let coins = [
        deps.api.addr_validate(&msg.coins[0])?,
        deps.api.addr_validate(&msg.coins[1])?,
    ];
    if coins[0] == coins[1] {
        return Err(ContractError::CustomError { val: String::from("Pool coins must differ") });
    }
    let rates = msg.rates.unwrap_or([Uint128::new(PRECISION); N_COINS]);
    if rates.iter().any(|rate| rate.is_zero()) {
        return Err(ContractError::CustomError { val: String::from("Rate multipliers can't be zero") });
    }
    if msg.a == 0 || msg.a > MAX_A {
        return Err(ContractError::CustomError { val: format!("A must be within (0, {}]", MAX_A) });
    }
    assert_fees(msg.fee, msg.admin_fee)?;

    let config = Config {
        owner,
        coins,
        rates,
        amp: msg.a * A_PRECISION as u64,
        fee: msg.fee,
        admin_fee: msg.admin_fee,
        min_coin_amount: msg.min_coin_amount.unwrap_or(Uint128::new(DEFAULT_MIN_COIN_AMOUNT)),
        peg_keeper: None,
    };
    CONFIG.save(deps.storage, &config)?;
    BALANCES.save(deps.storage, &[Uint128::zero(); N_COINS])?;
    TOTAL_SUPPLY.save(deps.storage, &Uint128::zero())?;
    PENDING_FEE.save(
        deps.storage,
        &PendingFeeResponse {
            future_fee: 0,
            future_admin_fee: 0,
            deadline: 0,
        },
    )?;
    PEG_KEEPER_LEDGER.save(deps.storage, &PegKeeperLedger::default())?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("config", format!("{:?}", config))
        .add_attribute("contract_address", env.contract.address))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddLiquidity {
            amounts,
            min_mint_amount,
        } => add_liquidity(deps, env, info, amounts, min_mint_amount),
        ExecuteMsg::RemoveLiquidity { amount, min_amounts } => {
            remove_liquidity(deps, info, amount, min_amounts)
        }
        ExecuteMsg::RemoveLiquidityImbalance {
            amounts,
            max_burn_amount,
        } => remove_liquidity_imbalance(deps, info, amounts, max_burn_amount),
        ExecuteMsg::RemoveLiquidityOneCoin {
            token_amount,
            i,
            min_amount,
        } => remove_liquidity_one_coin(deps, info, token_amount, i, min_amount),
        ExecuteMsg::Exchange { i, j, dx, min_dy } => exchange(deps, env, info, i, j, dx, min_dy),
        ExecuteMsg::Transfer { recipient, amount } => transfer(deps, info, recipient, amount),
        ExecuteMsg::PegKeeperAdd { amount } => peg_keeper_add(deps, env, info, amount),
        ExecuteMsg::PegKeeperRemove { amount } => peg_keeper_remove(deps, env, info, amount),
        ExecuteMsg::PegKeeperRemoveViaToken { token_amount } => {
            peg_keeper_remove_via_token(deps, env, info, token_amount)
        }
        ExecuteMsg::SetPegKeeper {
            peg_keeper,
            pegged_index,
            auto_update,
        } => set_peg_keeper(deps, info, peg_keeper, pegged_index, auto_update),
        ExecuteMsg::CommitNewFee { fee, admin_fee } => commit_new_fee(deps, env, info, fee, admin_fee),
        ExecuteMsg::ApplyNewFee {} => apply_new_fee(deps, env, info),
        ExecuteMsg::RevertNewParameters {} => revert_new_parameters(deps, info),
        ExecuteMsg::WithdrawAdminFees {} => withdraw_admin_fees(deps, env, info),
    }
}

fn assert_fees(fee: u64, admin_fee: u64) -> Result<(), ContractError> {
    if u128::from(fee) > MAX_FEE || u128::from(admin_fee) > FEE_DENOMINATOR {
        return Err(ContractError::BadFee {});
    }
    Ok(())
}

fn assert_coin_index(i: usize) -> Result<(), ContractError> {
    if i >= N_COINS {
        return Err(ContractError::InvalidCoinIndex {});
    }
    Ok(())
}

fn fmt_amounts(amounts: &[Uint128; N_COINS]) -> String {
    amounts
        .iter()
        .map(|amount| amount.to_string())
        .collect::<Vec<String>>()
        .join(",")
}

fn mint_lp(storage: &mut dyn Storage, to: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    LP_BALANCES.update(storage, to, |balance| -> Result<Uint128, ContractError> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    let supply = TOTAL_SUPPLY.update(storage, |supply| -> Result<Uint128, ContractError> {
        Ok(supply.checked_add(amount)?)
    })?;
    Ok(supply)
}

fn burn_lp(storage: &mut dyn Storage, from: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    LP_BALANCES.update(storage, from, |balance| -> Result<Uint128, ContractError> {
        let balance = balance.unwrap_or_default();
        if balance < amount {
            return Err(ContractError::InsufficientLpBalance { balance, amount });
        }
        Ok(balance - amount)
    })?;
    let supply = TOTAL_SUPPLY.update(storage, |supply| -> Result<Uint128, ContractError> {
        Ok(supply.checked_sub(amount)?)
    })?;
    Ok(supply)
}

/// Notifies a keeper bound with `auto_update`.
/// Its failure is swallowed in `reply` so the pool operation still lands.
fn peg_keeper_hook(config: &Config) -> StdResult<Vec<SubMsg>> {
    match &config.peg_keeper {
        Some(binding) if binding.auto_update => {
            let msg = CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: binding.peg_keeper.to_string(),
                msg: to_json_binary(&KeeperExecuteMsg::Update { beneficiary: None })?,
                funds: vec![],
            });
            Ok(vec![SubMsg::reply_on_error(msg, PEG_KEEPER_UPDATE_REPLY_ID)])
        }
        _ => Ok(vec![]),
    }
}

fn assert_peg_keeper(config: &Config, sender: &Addr) -> Result<PegKeeperBinding, ContractError> {
    match &config.peg_keeper {
        Some(binding) if &binding.peg_keeper == sender => Ok(binding.clone()),
        _ => Err(ContractError::OnlyPegKeeper {}),
    }
}

fn add_liquidity(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amounts: [Uint128; N_COINS],
    min_mint_amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let balances = BALANCES.load(deps.storage)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;

    if supply.is_zero() && amounts.iter().any(|amount| amount.is_zero()) {
        return Err(ContractError::InitialDepositRequiresAllCoins {});
    }

    let deposit = StableSwap::new(&config).add_liquidity(&balances, supply, &amounts)?;
    if deposit.mint_amount < min_mint_amount {
        return Err(ContractError::Slippage {
            amount: deposit.mint_amount,
            limit: min_mint_amount,
        });
    }
    BALANCES.save(deps.storage, &deposit.balances)?;
    let token_supply = mint_lp(deps.storage, &info.sender, deposit.mint_amount)?;

    //Pull coins
    let mut messages = vec![];
    for (i, amount) in amounts.iter().enumerate() {
        if !amount.is_zero() {
            messages.push(token_transfer_from_msg(
                &config.coins[i],
                &info.sender,
                &env.contract.address,
                *amount,
            )?);
        }
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_submessages(peg_keeper_hook(&config)?)
        .add_attributes(vec![
            attr("method", "add_liquidity"),
            attr("provider", info.sender),
            attr("token_amounts", fmt_amounts(&amounts)),
            attr("fees", fmt_amounts(&deposit.fees)),
            attr("mint_amount", deposit.mint_amount),
            attr("token_supply", token_supply),
        ]))
}

fn remove_liquidity(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
    min_amounts: [Uint128; N_COINS],
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut balances = BALANCES.load(deps.storage)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;
    if amount.is_zero() || amount > supply {
        return Err(ContractError::CustomError { val: format!("Invalid LP amount: {}", amount) });
    }

    let mut amounts = [Uint128::zero(); N_COINS];
    let mut messages = vec![];
    for i in 0..N_COINS {
        let value = balances[i].multiply_ratio(amount, supply);
        if value < min_amounts[i] {
            return Err(ContractError::Slippage {
                amount: value,
                limit: min_amounts[i],
            });
        }
        balances[i] = balances[i].checked_sub(value)?;
        amounts[i] = value;
        if !value.is_zero() {
            messages.push(token_transfer_msg(&config.coins[i], &info.sender, value)?);
        }
    }
    BALANCES.save(deps.storage, &balances)?;
    let token_supply = burn_lp(deps.storage, &info.sender, amount)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_submessages(peg_keeper_hook(&config)?)
        .add_attributes(vec![
            attr("method", "remove_liquidity"),
            attr("provider", info.sender),
            attr("token_amounts", fmt_amounts(&amounts)),
            attr("fees", fmt_amounts(&[Uint128::zero(); N_COINS])),
            attr("token_supply", token_supply),
        ]))
}

fn remove_liquidity_imbalance(
    deps: DepsMut,
    info: MessageInfo,
    amounts: [Uint128; N_COINS],
    max_burn_amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let balances = BALANCES.load(deps.storage)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;

    let withdrawal = StableSwap::new(&config).remove_liquidity_imbalance(&balances, supply, &amounts)?;
    if withdrawal.burn_amount > max_burn_amount {
        return Err(ContractError::Slippage {
            amount: withdrawal.burn_amount,
            limit: max_burn_amount,
        });
    }
    BALANCES.save(deps.storage, &withdrawal.balances)?;
    let token_supply = burn_lp(deps.storage, &info.sender, withdrawal.burn_amount)?;

    let mut messages = vec![];
    for (i, amount) in amounts.iter().enumerate() {
        if !amount.is_zero() {
            messages.push(token_transfer_msg(&config.coins[i], &info.sender, *amount)?);
        }
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_submessages(peg_keeper_hook(&config)?)
        .add_attributes(vec![
            attr("method", "remove_liquidity_imbalance"),
            attr("provider", info.sender),
            attr("token_amounts", fmt_amounts(&amounts)),
            attr("fees", fmt_amounts(&withdrawal.fees)),
            attr("burn_amount", withdrawal.burn_amount),
            attr("token_supply", token_supply),
        ]))
}

fn remove_liquidity_one_coin(
    deps: DepsMut,
    info: MessageInfo,
    token_amount: Uint128,
    i: usize,
    min_amount: Uint128,
) -> Result<Response, ContractError> {
    assert_coin_index(i)?;
    let config = CONFIG.load(deps.storage)?;
    let balances = BALANCES.load(deps.storage)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;

    let one_coin = StableSwap::new(&config).withdraw_one_coin(&balances, supply, token_amount, i)?;
    if one_coin.dy < min_amount {
        return Err(ContractError::Slippage {
            amount: one_coin.dy,
            limit: min_amount,
        });
    }
    BALANCES.save(deps.storage, &one_coin.balances)?;
    let token_supply = burn_lp(deps.storage, &info.sender, token_amount)?;

    Ok(Response::new()
        .add_message(token_transfer_msg(&config.coins[i], &info.sender, one_coin.dy)?)
        .add_submessages(peg_keeper_hook(&config)?)
        .add_attributes(vec![
            attr("method", "remove_liquidity_one_coin"),
            attr("provider", info.sender),
            attr("token_amount", token_amount),
            attr("coin_index", i.to_string()),
            attr("coin_amount", one_coin.dy),
            attr("fee", one_coin.fee),
            attr("token_supply", token_supply),
        ])
        .set_data(to_json_binary(&one_coin.dy)?))
}

fn exchange(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    i: usize,
    j: usize,
    dx: Uint128,
    min_dy: Uint128,
) -> Result<Response, ContractError> {
    assert_coin_index(i)?;
    assert_coin_index(j)?;
    if i == j {
        return Err(ContractError::InvalidCoinIndex {});
    }
    let config = CONFIG.load(deps.storage)?;
    let balances = BALANCES.load(deps.storage)?;

    let swap = StableSwap::new(&config).exchange(&balances, i, j, dx)?;
    if swap.dy < min_dy {
        return Err(ContractError::Slippage {
            amount: swap.dy,
            limit: min_dy,
        });
    }
    BALANCES.save(deps.storage, &swap.balances)?;

    Ok(Response::new()
        .add_message(token_transfer_from_msg(
            &config.coins[i],
            &info.sender,
            &env.contract.address,
            dx,
        )?)
        .add_message(token_transfer_msg(&config.coins[j], &info.sender, swap.dy)?)
        .add_submessages(peg_keeper_hook(&config)?)
        .add_attributes(vec![
            attr("method", "exchange"),
            attr("buyer", info.sender),
            attr("sold_id", i.to_string()),
            attr("tokens_sold", dx),
            attr("bought_id", j.to_string()),
            attr("tokens_bought", swap.dy),
            attr("fee", swap.fee),
        ])
        .set_data(to_json_binary(&swap.dy)?))
}

fn transfer(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;

    LP_BALANCES.update(deps.storage, &info.sender, |balance| -> Result<Uint128, ContractError> {
        let balance = balance.unwrap_or_default();
        if balance < amount {
            return Err(ContractError::InsufficientLpBalance { balance, amount });
        }
        Ok(balance - amount)
    })?;
    LP_BALANCES.update(deps.storage, &recipient, |balance| -> Result<Uint128, ContractError> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "transfer"),
        attr("from", info.sender),
        attr("to", recipient),
        attr("amount", amount),
    ]))
}

/// Feeless single-sided deposit for the bound keeper
fn peg_keeper_add(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let binding = assert_peg_keeper(&config, &info.sender)?;
    if amount < config.min_coin_amount || amount.is_zero() {
        return Err(ContractError::BelowMinCoinAmount {
            amount,
            minimum: config.min_coin_amount,
        });
    }
    let balances = BALANCES.load(deps.storage)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;

    let mut amounts = [Uint128::zero(); N_COINS];
    amounts[binding.pegged_index] = amount;
    let deposit = StableSwap::feeless(&config).add_liquidity(&balances, supply, &amounts)?;

    BALANCES.save(deps.storage, &deposit.balances)?;
    let token_supply = mint_lp(deps.storage, &info.sender, deposit.mint_amount)?;
    PEG_KEEPER_LEDGER.update(deps.storage, |mut ledger| -> StdResult<PegKeeperLedger> {
        ledger.debt = ledger.debt.checked_add(amount)?;
        ledger.last_change = env.block.time.seconds();
        Ok(ledger)
    })?;

    Ok(Response::new()
        .add_message(token_transfer_from_msg(
            &config.coins[binding.pegged_index],
            &info.sender,
            &env.contract.address,
            amount,
        )?)
        .add_attributes(vec![
            attr("method", "peg_keeper_add"),
            attr("provider", info.sender),
            attr("token_amounts", fmt_amounts(&amounts)),
            attr("fees", fmt_amounts(&deposit.fees)),
            attr("mint_amount", deposit.mint_amount),
            attr("token_supply", token_supply),
        ]))
}

/// Feeless single-sided withdrawal for the bound keeper
fn peg_keeper_remove(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let binding = assert_peg_keeper(&config, &info.sender)?;
    if amount < config.min_coin_amount || amount.is_zero() {
        return Err(ContractError::BelowMinCoinAmount {
            amount,
            minimum: config.min_coin_amount,
        });
    }
    let balances = BALANCES.load(deps.storage)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;

    let mut amounts = [Uint128::zero(); N_COINS];
    amounts[binding.pegged_index] = amount;
    let withdrawal = StableSwap::feeless(&config).remove_liquidity_imbalance(&balances, supply, &amounts)?;

    BALANCES.save(deps.storage, &withdrawal.balances)?;
    let token_supply = burn_lp(deps.storage, &info.sender, withdrawal.burn_amount)?;
    PEG_KEEPER_LEDGER.update(deps.storage, |mut ledger| -> StdResult<PegKeeperLedger> {
        ledger.debt = ledger.debt.saturating_sub(amount);
        ledger.last_change = env.block.time.seconds();
        Ok(ledger)
    })?;

    Ok(Response::new()
        .add_message(token_transfer_msg(&config.coins[binding.pegged_index], &info.sender, amount)?)
        .add_attributes(vec![
            attr("method", "peg_keeper_remove"),
            attr("provider", info.sender),
            attr("token_amounts", fmt_amounts(&amounts)),
            attr("burn_amount", withdrawal.burn_amount),
            attr("token_supply", token_supply),
        ]))
}

/// Feeless redemption of keeper LP for the pegged coin
fn peg_keeper_remove_via_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let binding = assert_peg_keeper(&config, &info.sender)?;
    let balances = BALANCES.load(deps.storage)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;

    let one_coin =
        StableSwap::feeless(&config).withdraw_one_coin(&balances, supply, token_amount, binding.pegged_index)?;
    if one_coin.dy < config.min_coin_amount || one_coin.dy.is_zero() {
        return Err(ContractError::BelowMinCoinAmount {
            amount: one_coin.dy,
            minimum: config.min_coin_amount,
        });
    }

    BALANCES.save(deps.storage, &one_coin.balances)?;
    let token_supply = burn_lp(deps.storage, &info.sender, token_amount)?;
    PEG_KEEPER_LEDGER.update(deps.storage, |mut ledger| -> StdResult<PegKeeperLedger> {
        ledger.debt = ledger.debt.saturating_sub(one_coin.dy);
        ledger.last_change = env.block.time.seconds();
        Ok(ledger)
    })?;

    Ok(Response::new()
        .add_message(token_transfer_msg(
            &config.coins[binding.pegged_index],
            &info.sender,
            one_coin.dy,
        )?)
        .add_attributes(vec![
            attr("method", "peg_keeper_remove_via_token"),
            attr("provider", info.sender),
            attr("token_amount", token_amount),
            attr("coin_amount", one_coin.dy),
            attr("token_supply", token_supply),
        ])
        .set_data(to_json_binary(&one_coin.dy)?))
}

fn set_peg_keeper(
    deps: DepsMut,
    info: MessageInfo,
    peg_keeper: Option<String>,
    pegged_index: usize,
    auto_update: bool,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    assert_coin_index(pegged_index)?;

    config.peg_keeper = match peg_keeper {
        Some(peg_keeper) => Some(PegKeeperBinding {
            peg_keeper: deps.api.addr_validate(&peg_keeper)?,
            pegged_index,
            auto_update,
        }),
        None => None,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "set_peg_keeper"),
        attr("peg_keeper", format!("{:?}", config.peg_keeper)),
    ]))
}

fn commit_new_fee(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    fee: u64,
    admin_fee: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    let mut pending = PENDING_FEE.load(deps.storage)?;
    if pending.deadline != 0 {
        return Err(ContractError::ActiveAction {});
    }
    assert_fees(fee, admin_fee)?;

    pending = PendingFeeResponse {
        future_fee: fee,
        future_admin_fee: admin_fee,
        deadline: env.block.time.seconds() + ADMIN_ACTIONS_DELAY,
    };
    PENDING_FEE.save(deps.storage, &pending)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "commit_new_fee"),
        attr("fee", fee.to_string()),
        attr("admin_fee", admin_fee.to_string()),
        attr("deadline", pending.deadline.to_string()),
    ]))
}

fn apply_new_fee(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    let mut pending = PENDING_FEE.load(deps.storage)?;
    if pending.deadline == 0 {
        return Err(ContractError::NoActiveAction {});
    }
    if env.block.time.seconds() < pending.deadline {
        return Err(ContractError::InsufficientTime {
            deadline: pending.deadline,
        });
    }

    config.fee = pending.future_fee;
    config.admin_fee = pending.future_admin_fee;
    pending.deadline = 0;
    CONFIG.save(deps.storage, &config)?;
    PENDING_FEE.save(deps.storage, &pending)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "apply_new_fee"),
        attr("fee", config.fee.to_string()),
        attr("admin_fee", config.admin_fee.to_string()),
    ]))
}

fn revert_new_parameters(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    PENDING_FEE.update(deps.storage, |mut pending| -> StdResult<PendingFeeResponse> {
        pending.deadline = 0;
        Ok(pending)
    })?;

    Ok(Response::new().add_attribute("method", "revert_new_parameters"))
}

fn withdraw_admin_fees(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    let admin_balances = query_admin_balances(deps.as_ref(), env)?;

    let mut messages = vec![];
    for (i, amount) in admin_balances.balances.iter().enumerate() {
        if !amount.is_zero() {
            messages.push(token_transfer_msg(&config.coins[i], &config.owner, *amount)?);
        }
    }

    Ok(Response::new().add_messages(messages).add_attributes(vec![
        attr("method", "withdraw_admin_fees"),
        attr("amounts", fmt_amounts(&admin_balances.balances)),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Balances {} => to_json_binary(&BalancesResponse {
            balances: BALANCES.load(deps.storage)?,
        }),
        QueryMsg::GetVirtualPrice {} => to_json_binary(&query_virtual_price(deps)?),
        QueryMsg::TotalSupply {} => to_json_binary(&TOTAL_SUPPLY.load(deps.storage)?),
        QueryMsg::BalanceOf { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&LP_BALANCES.may_load(deps.storage, &address)?.unwrap_or_default())
        }
        QueryMsg::AdminBalances {} => to_json_binary(&query_admin_balances(deps, env)?),
        QueryMsg::PegKeeperLedger {} => to_json_binary(&PEG_KEEPER_LEDGER.load(deps.storage)?),
        QueryMsg::PendingFee {} => to_json_binary(&PENDING_FEE.load(deps.storage)?),
        msg => to_json_binary(&query_calc(deps, msg)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> StdResult<Response> {
    match msg.id {
        PEG_KEEPER_UPDATE_REPLY_ID => match msg.result {
            SubMsgResult::Err(err) => Ok(Response::new()
                .add_attribute("method", "peg_keeper_update_reply")
                .add_attribute("peg_keeper_error", err)),
            SubMsgResult::Ok(_) => Ok(Response::new()),
        },
        id => Err(StdError::generic_err(format!("invalid reply id: {}", id))),
    }
}
