#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, QuerierWrapper,
    Response, StdResult, Storage, Uint128, Uint256, Uint64, WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::query::{query_asymmetry, query_calc_profit, query_pool_view, query_profit, query_state};
use crate::state::{
    KeeperState, ProfitAssurance, StaffChange, CONFIG, PEGGED_ADMIN_CHANGE, PROFIT_ASSURANCE, STAFF_CHANGE, STATE,
};
use pegkeeper::helpers::{query_lp_balance, query_pool_config, query_token_balance, token_msg, token_transfer_msg};
use pegkeeper::math::{apply_share, unscale, ACTION_DIVISOR, ASYMMETRY_PRECISION, N_COINS, SHARE_PRECISION};
use pegkeeper::peg_keeper::{Config, ExecuteMsg, InstantiateMsg, QueryMsg};
use pegkeeper::pegged_token::ExecuteMsg as TokenExecuteMsg;
use pegkeeper::stable_pool::{Config as PoolConfig, ExecuteMsg as PoolExecuteMsg, QueryMsg as PoolQueryMsg};
use pegkeeper::types::{PeggedSource, PendingChange, PoolAccess, ADMIN_ACTIONS_DELAY};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:peg-keeper";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Copy, Debug, PartialEq)]
enum ActionKind {
    Provide,
    Withdraw,
}

impl ActionKind {
    fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Provide => "provide",
            ActionKind::Withdraw => "withdraw",
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let pool = deps.api.addr_validate(&msg.pool)?;
    let pegged_index = msg.pegged_index.unwrap_or(0);
    if pegged_index >= N_COINS {
        return Err(ContractError::CustomError {
            val: format!("Invalid pegged coin index: {}", pegged_index),
        });
    }
    assert_min_asymmetry(msg.min_asymmetry)?;
    let caller_share = msg.caller_share.unwrap_or(0);
    assert_caller_share(caller_share)?;

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };
    let pegged_admin = match msg.pegged_admin {
        Some(pegged_admin) => deps.api.addr_validate(&pegged_admin)?,
        None => admin.clone(),
    };

    //The pegged coin is whatever the pool lists at the index
    let pool_config = query_pool_config(deps.querier, &pool)?;

    let config = Config {
        pegged: pool_config.coins[pegged_index].clone(),
        pool,
        pegged_index,
        admin,
        receiver: deps.api.addr_validate(&msg.receiver)?,
        pegged_admin,
        min_asymmetry: msg.min_asymmetry,
        caller_share,
        admin_actions_delay: msg.admin_actions_delay.unwrap_or(ADMIN_ACTIONS_DELAY),
        capabilities: msg.capabilities,
    };
    CONFIG.save(deps.storage, &config)?;
    STATE.save(deps.storage, &KeeperState::default())?;
    STAFF_CHANGE.save(deps.storage, &StaffChange::default())?;
    PEGGED_ADMIN_CHANGE.save(deps.storage, &PendingChange::default())?;
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
        ExecuteMsg::Update { beneficiary } => update(deps, env, info, beneficiary),
        ExecuteMsg::Provide { amount } => pool_action(deps, env, info, ActionKind::Provide, amount),
        ExecuteMsg::Withdraw { amount } => pool_action(deps, env, info, ActionKind::Withdraw, amount),
        ExecuteMsg::WithdrawProfit {} => withdraw_profit(deps, env),
        ExecuteMsg::CommitNewAdmin { new_admin } => commit_new_admin(deps, env, info, new_admin),
        ExecuteMsg::ApplyNewAdmin {} => apply_new_admin(deps, env, info),
        ExecuteMsg::CommitNewReceiver { new_receiver } => commit_new_receiver(deps, env, info, new_receiver),
        ExecuteMsg::ApplyNewReceiver {} => apply_new_receiver(deps, env, info),
        ExecuteMsg::RevertNewStaff {} => revert_new_staff(deps, info),
        ExecuteMsg::SetNewMinAsymmetry { new_min_asymmetry } => {
            set_new_min_asymmetry(deps, info, new_min_asymmetry)
        }
        ExecuteMsg::SetNewCallerShare { new_caller_share } => set_new_caller_share(deps, info, new_caller_share),
        ExecuteMsg::CommitNewPeggedAdmin { new_pegged_admin } => {
            commit_new_pegged_admin(deps, env, info, new_pegged_admin)
        }
        ExecuteMsg::ApplyNewPeggedAdmin {} => apply_new_pegged_admin(deps, env, info),
        ExecuteMsg::RevertNewPeggedAdmin {} => revert_new_pegged_admin(deps, info),
        ExecuteMsg::WithdrawPegged { amount, receiver } => withdraw_pegged(deps, env, info, amount, receiver),
        ExecuteMsg::ProfitAssurance {} => profit_assurance(deps, env, info),
    }
}

fn assert_min_asymmetry(min_asymmetry: u64) -> Result<(), ContractError> {
    if min_asymmetry == 0 || u128::from(min_asymmetry) >= ASYMMETRY_PRECISION {
        return Err(ContractError::BadAsymmetry {});
    }
    Ok(())
}

fn assert_caller_share(caller_share: u64) -> Result<(), ContractError> {
    if u128::from(caller_share) > SHARE_PRECISION {
        return Err(ContractError::BadCallerShare {});
    }
    Ok(())
}

fn assert_admin(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if sender != &config.admin {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

fn assert_reserve(config: &Config) -> Result<(), ContractError> {
    if config.capabilities.pegged_source != PeggedSource::Reserve {
        return Err(ContractError::UnsupportedAction {});
    }
    Ok(())
}

fn admin_deadline(env: &Env, config: &Config) -> Result<u64, ContractError> {
    Ok(Uint64::from(env.block.time.seconds())
        .checked_add(Uint64::from(config.admin_actions_delay))?
        .u64())
}

/// The pool's binding for this keeper must name the same pegged coin
fn assert_binding(env: &Env, config: &Config, pool_config: &PoolConfig) -> Result<(), ContractError> {
    match &pool_config.peg_keeper {
        Some(binding)
            if binding.peg_keeper == env.contract.address && binding.pegged_index != config.pegged_index =>
        {
            Err(ContractError::PeggedIndexMismatch {
                keeper: config.pegged_index,
                pool: binding.pegged_index,
            })
        }
        _ => Ok(()),
    }
}

/// Set while an update's callback is outstanding
fn assurance_pending(storage: &dyn Storage) -> StdResult<bool> {
    Ok(PROFIT_ASSURANCE.may_load(storage)?.is_some())
}

fn action_delay_passed(env: &Env, config: &Config, state: &KeeperState) -> bool {
    env.block.time.seconds() >= state.last_change.saturating_add(config.capabilities.action_delay)
}

fn pool_msg(config: &Config, msg: &PoolExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.pool.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

/// Self-call that runs after the pool messages settle
fn profit_assurance_msg(env: &Env) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: env.contract.address.to_string(),
        msg: to_json_binary(&ExecuteMsg::ProfitAssurance {})?,
        funds: vec![],
    }))
}

fn pegged_amounts(config: &Config, amount: Uint128) -> [Uint128; N_COINS] {
    let mut amounts = [Uint128::zero(); N_COINS];
    amounts[config.pegged_index] = amount;
    amounts
}

/// Mint (or draw from reserve) and deposit `amount` pegged coins.
/// Returns the amount actually provided, None when it's dust.
fn provide_msgs(
    querier: QuerierWrapper,
    env: &Env,
    config: &Config,
    pool_config: &PoolConfig,
    amount: Uint128,
) -> StdResult<Option<(Uint128, Vec<CosmosMsg>)>> {
    let amount = match config.capabilities.pegged_source {
        PeggedSource::Mint => amount,
        PeggedSource::Reserve => {
            amount.min(query_token_balance(querier, &config.pegged, &env.contract.address)?)
        }
    };
    if amount.is_zero() || amount < pool_config.min_coin_amount {
        return Ok(None);
    }

    let mut messages = vec![];
    if config.capabilities.pegged_source == PeggedSource::Mint {
        messages.push(token_msg(
            &config.pegged,
            &TokenExecuteMsg::Mint {
                recipient: env.contract.address.to_string(),
                amount,
            },
        )?);
    }
    messages.push(token_msg(
        &config.pegged,
        &TokenExecuteMsg::IncreaseAllowance {
            spender: config.pool.to_string(),
            amount,
        },
    )?);
    let deposit = match config.capabilities.pool_access {
        PoolAccess::Privileged => PoolExecuteMsg::PegKeeperAdd { amount },
        PoolAccess::Public => PoolExecuteMsg::AddLiquidity {
            amounts: pegged_amounts(config, amount),
            min_mint_amount: Uint128::zero(),
        },
    };
    messages.push(pool_msg(config, &deposit)?);

    Ok(Some((amount, messages)))
}

/// Withdraw up to `amount` pegged coins, capped at `debt` and at what the keeper's LP can redeem.
/// Returns the amount actually withdrawn, None when it's dust.
fn withdraw_msgs(
    querier: QuerierWrapper,
    env: &Env,
    config: &Config,
    pool_config: &PoolConfig,
    debt: Uint128,
    amount: Uint128,
) -> StdResult<Option<(Uint128, Vec<CosmosMsg>)>> {
    let amount = amount.min(debt);
    if amount.is_zero() || amount < pool_config.min_coin_amount {
        return Ok(None);
    }
    let lp_balance = query_lp_balance(querier, &config.pool, &env.contract.address)?;
    if lp_balance.is_zero() {
        return Ok(None);
    }

    let amounts = pegged_amounts(config, amount);
    let burn_amount: Uint128 = match config.capabilities.pool_access {
        PoolAccess::Privileged => {
            querier.query_wasm_smart(config.pool.to_string(), &PoolQueryMsg::CalcPegKeeperRemove { amount })?
        }
        PoolAccess::Public => {
            querier.query_wasm_smart(config.pool.to_string(), &PoolQueryMsg::CalcRemoveImbalance { amounts })?
        }
    };

    let (amount, withdrawal) = if burn_amount > lp_balance {
        //Redeem the whole LP balance instead
        let token_amount = lp_balance;
        match config.capabilities.pool_access {
            PoolAccess::Privileged => {
                let received: Uint128 = querier.query_wasm_smart(
                    config.pool.to_string(),
                    &PoolQueryMsg::CalcPegKeeperRemoveViaToken { token_amount },
                )?;
                (received, PoolExecuteMsg::PegKeeperRemoveViaToken { token_amount })
            }
            PoolAccess::Public => {
                let received: Uint128 = querier.query_wasm_smart(
                    config.pool.to_string(),
                    &PoolQueryMsg::CalcWithdrawOneCoin {
                        token_amount,
                        i: config.pegged_index,
                    },
                )?;
                (
                    received,
                    PoolExecuteMsg::RemoveLiquidityOneCoin {
                        token_amount,
                        i: config.pegged_index,
                        min_amount: received,
                    },
                )
            }
        }
    } else {
        match config.capabilities.pool_access {
            PoolAccess::Privileged => (amount, PoolExecuteMsg::PegKeeperRemove { amount }),
            PoolAccess::Public => (
                amount,
                PoolExecuteMsg::RemoveLiquidityImbalance {
                    amounts,
                    max_burn_amount: burn_amount,
                },
            ),
        }
    };
    if amount.is_zero() || amount < pool_config.min_coin_amount {
        return Ok(None);
    }

    let mut messages = vec![pool_msg(config, &withdrawal)?];
    if config.capabilities.pegged_source == PeggedSource::Mint {
        //Everything received is burned, only the debt part is booked
        messages.push(token_msg(&config.pegged, &TokenExecuteMsg::Burn { amount })?);
    }

    Ok(Some((amount.min(debt), messages)))
}

/// Builds the provide or withdraw and books it on `state`
fn take_action(
    querier: QuerierWrapper,
    env: &Env,
    config: &Config,
    pool_config: &PoolConfig,
    state: &mut KeeperState,
    kind: ActionKind,
    amount: Uint128,
) -> Result<Option<(Vec<CosmosMsg>, Event)>, ContractError> {
    assert_binding(env, config, pool_config)?;
    let action = match kind {
        ActionKind::Provide => provide_msgs(querier, env, config, pool_config, amount)?,
        ActionKind::Withdraw => withdraw_msgs(querier, env, config, pool_config, state.debt, amount)?,
    };
    let (amount, messages) = match action {
        Some(action) => action,
        None => return Ok(None),
    };

    state.debt = match kind {
        ActionKind::Provide => state.debt.checked_add(amount)?,
        ActionKind::Withdraw => state.debt.checked_sub(amount)?,
    };
    state.last_change = env.block.time.seconds();

    Ok(Some((
        messages,
        Event::new(kind.as_str()).add_attribute("amount", amount),
    )))
}

/// Rebalance toward 1:1 when the pool is asymmetric enough, then harvest in the callback
fn update(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    beneficiary: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.capabilities.requires_pool_caller && info.sender != config.pool {
        return Err(ContractError::OnlyPool {});
    }
    //Nested call from the keeper's own liquidity op
    if assurance_pending(deps.storage)? {
        return Ok(Response::new()
            .add_attributes(vec![attr("method", "update"), attr("skipped", "assurance_pending")])
            .set_data(to_json_binary(&false)?));
    }
    let beneficiary = match beneficiary {
        Some(beneficiary) => deps.api.addr_validate(&beneficiary)?,
        None => info.sender,
    };

    let view = query_pool_view(deps.querier, &config)?;
    let asymmetry = view.asymmetry()?;
    if asymmetry < Uint256::from(u128::from(config.min_asymmetry)) {
        return Ok(Response::new()
            .add_attributes(vec![
                attr("method", "update"),
                attr("asymmetry", asymmetry.to_string()),
            ])
            .set_data(to_json_binary(&false)?));
    }

    let mut state = STATE.load(deps.storage)?;
    let initial_profit = query_profit(deps.querier, &env, &config, state.debt)?;

    let mut response = Response::new();
    let mut acted = false;
    if action_delay_passed(&env, &config, &state) {
        let (kind, excess) = if view.balance_peg > view.balance_pegged {
            (ActionKind::Provide, view.balance_peg - view.balance_pegged)
        } else {
            (ActionKind::Withdraw, view.balance_pegged - view.balance_peg)
        };
        let amount = unscale(
            excess / Uint256::from(ACTION_DIVISOR),
            view.config.rates[config.pegged_index],
        )?;

        if let Some((messages, event)) =
            take_action(deps.querier, &env, &config, &view.config, &mut state, kind, amount)?
        {
            STATE.save(deps.storage, &state)?;
            response = response.add_messages(messages).add_event(event);
            acted = true;
        }
    }

    PROFIT_ASSURANCE.save(
        deps.storage,
        &ProfitAssurance {
            initial_profit,
            beneficiary: beneficiary.clone(),
        },
    )?;

    Ok(response
        .add_message(profit_assurance_msg(&env)?)
        .add_attributes(vec![
            attr("method", "update"),
            attr("asymmetry", asymmetry.to_string()),
            attr("initial_profit", initial_profit),
            attr("beneficiary", beneficiary),
        ])
        .set_data(to_json_binary(&acted)?))
}

/// Pool-driven `provide` / `withdraw`
fn pool_action(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    kind: ActionKind,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.capabilities.requires_pool_caller {
        return Err(ContractError::UnsupportedAction {});
    }
    if info.sender != config.pool {
        return Err(ContractError::OnlyPool {});
    }

    let no_op = Response::new()
        .add_attribute("method", kind.as_str())
        .set_data(to_json_binary(&false)?);
    let mut state = STATE.load(deps.storage)?;
    if assurance_pending(deps.storage)? || !action_delay_passed(&env, &config, &state) {
        return Ok(no_op);
    }

    let pool_config = query_pool_config(deps.querier, &config.pool)?;
    let initial_profit = query_profit(deps.querier, &env, &config, state.debt)?;
    let (messages, event) =
        match take_action(deps.querier, &env, &config, &pool_config, &mut state, kind, amount)? {
            Some(action) => action,
            None => return Ok(no_op),
        };
    STATE.save(deps.storage, &state)?;
    PROFIT_ASSURANCE.save(
        deps.storage,
        &ProfitAssurance {
            initial_profit,
            beneficiary: info.sender,
        },
    )?;

    Ok(Response::new()
        .add_messages(messages)
        .add_message(profit_assurance_msg(&env)?)
        .add_event(event)
        .add_attributes(vec![attr("method", kind.as_str()), attr("debt", state.debt)])
        .set_data(to_json_binary(&true)?))
}

/// Fails the whole transaction if the action lowered profit, otherwise pays the caller share
fn profit_assurance(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    //Error if not the contract calling
    if info.sender != env.contract.address {
        return Err(ContractError::Unauthorized {});
    }
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;
    let assurance = PROFIT_ASSURANCE.load(deps.storage)?;
    PROFIT_ASSURANCE.remove(deps.storage);

    let new_profit = query_profit(deps.querier, &env, &config, state.debt)?;
    if new_profit < assurance.initial_profit {
        return Err(ContractError::UnprofitablePeg {});
    }

    let mut response = Response::new();
    let mut caller_profit = Uint128::zero();
    if config.capabilities.supports_caller_share {
        caller_profit = apply_share(new_profit - assurance.initial_profit, config.caller_share)?;
        if !caller_profit.is_zero() {
            response = response.add_message(pool_msg(
                &config,
                &PoolExecuteMsg::Transfer {
                    recipient: assurance.beneficiary.to_string(),
                    amount: caller_profit,
                },
            )?);
        }
    }

    Ok(response.add_attributes(vec![
        attr("method", "profit_assurance"),
        attr("profit", new_profit),
        attr("caller_profit", caller_profit),
        attr("beneficiary", assurance.beneficiary),
    ]))
}

/// Send all harvestable LP to the receiver
fn withdraw_profit(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;
    let profit = query_profit(deps.querier, &env, &config, state.debt)?;

    let mut response = Response::new();
    if !profit.is_zero() {
        response = response.add_message(pool_msg(
            &config,
            &PoolExecuteMsg::Transfer {
                recipient: config.receiver.to_string(),
                amount: profit,
            },
        )?);
    }

    Ok(response
        .add_event(Event::new("profit").add_attribute("lp_amount", profit))
        .add_attributes(vec![
            attr("method", "withdraw_profit"),
            attr("receiver", config.receiver),
        ])
        .set_data(to_json_binary(&profit)?))
}

fn commit_new_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;
    let change = STAFF_CHANGE.load(deps.storage)?;
    if change.admin_actions_deadline != 0 {
        return Err(ContractError::ActiveAction {});
    }

    let change = StaffChange {
        future_admin: Some(deps.api.addr_validate(&new_admin)?),
        future_receiver: None,
        admin_actions_deadline: admin_deadline(&env, &config)?,
    };
    STAFF_CHANGE.save(deps.storage, &change)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "commit_new_admin"),
        attr("new_admin", new_admin),
        attr("deadline", change.admin_actions_deadline.to_string()),
    ]))
}

fn apply_new_admin(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    let mut change = STAFF_CHANGE.load(deps.storage)?;
    if change.admin_actions_deadline == 0 {
        return Err(ContractError::NoActiveAction {});
    }
    let new_admin = match &change.future_admin {
        Some(future_admin) if future_admin == &info.sender => future_admin.clone(),
        _ => return Err(ContractError::Unauthorized {}),
    };
    if env.block.time.seconds() < change.admin_actions_deadline {
        return Err(ContractError::InsufficientTime {
            deadline: change.admin_actions_deadline,
        });
    }

    config.admin = new_admin;
    change.admin_actions_deadline = 0;
    CONFIG.save(deps.storage, &config)?;
    STAFF_CHANGE.save(deps.storage, &change)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "apply_new_admin"),
        attr("admin", config.admin),
    ]))
}

fn commit_new_receiver(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_receiver: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;
    let change = STAFF_CHANGE.load(deps.storage)?;
    if change.admin_actions_deadline != 0 {
        return Err(ContractError::ActiveAction {});
    }

    let change = StaffChange {
        future_admin: None,
        future_receiver: Some(deps.api.addr_validate(&new_receiver)?),
        admin_actions_deadline: admin_deadline(&env, &config)?,
    };
    STAFF_CHANGE.save(deps.storage, &change)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "commit_new_receiver"),
        attr("new_receiver", new_receiver),
        attr("deadline", change.admin_actions_deadline.to_string()),
    ]))
}

fn apply_new_receiver(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    let mut change = STAFF_CHANGE.load(deps.storage)?;
    if change.admin_actions_deadline == 0 {
        return Err(ContractError::NoActiveAction {});
    }
    assert_admin(&config, &info.sender)?;
    let new_receiver = match &change.future_receiver {
        Some(future_receiver) => future_receiver.clone(),
        None => return Err(ContractError::NoActiveAction {}),
    };
    if env.block.time.seconds() < change.admin_actions_deadline {
        return Err(ContractError::InsufficientTime {
            deadline: change.admin_actions_deadline,
        });
    }

    config.receiver = new_receiver;
    change.admin_actions_deadline = 0;
    CONFIG.save(deps.storage, &config)?;
    STAFF_CHANGE.save(deps.storage, &change)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "apply_new_receiver"),
        attr("receiver", config.receiver),
    ]))
}

fn revert_new_staff(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;

    STAFF_CHANGE.update(deps.storage, |mut change| -> StdResult<StaffChange> {
        change.admin_actions_deadline = 0;
        Ok(change)
    })?;

    Ok(Response::new().add_attribute("method", "revert_new_staff"))
}

fn set_new_min_asymmetry(
    deps: DepsMut,
    info: MessageInfo,
    new_min_asymmetry: u64,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;
    assert_min_asymmetry(new_min_asymmetry)?;

    config.min_asymmetry = new_min_asymmetry;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "set_new_min_asymmetry"),
        attr("min_asymmetry", new_min_asymmetry.to_string()),
    ]))
}

fn set_new_caller_share(
    deps: DepsMut,
    info: MessageInfo,
    new_caller_share: u64,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_admin(&config, &info.sender)?;
    if !config.capabilities.supports_caller_share {
        return Err(ContractError::UnsupportedAction {});
    }
    assert_caller_share(new_caller_share)?;

    config.caller_share = new_caller_share;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "set_new_caller_share"),
        attr("caller_share", new_caller_share.to_string()),
    ]))
}

fn commit_new_pegged_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_pegged_admin: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_reserve(&config)?;
    if info.sender != config.pegged_admin {
        return Err(ContractError::Unauthorized {});
    }
    if PEGGED_ADMIN_CHANGE.load(deps.storage)?.is_active() {
        return Err(ContractError::ActiveAction {});
    }

    let change = PendingChange {
        future: Some(deps.api.addr_validate(&new_pegged_admin)?),
        deadline: admin_deadline(&env, &config)?,
    };
    PEGGED_ADMIN_CHANGE.save(deps.storage, &change)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "commit_new_pegged_admin"),
        attr("new_pegged_admin", new_pegged_admin),
        attr("deadline", change.deadline.to_string()),
    ]))
}

fn apply_new_pegged_admin(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_reserve(&config)?;
    let mut change = PEGGED_ADMIN_CHANGE.load(deps.storage)?;
    if !change.is_active() {
        return Err(ContractError::NoActiveAction {});
    }
    let new_pegged_admin = match &change.future {
        Some(future) if future == &info.sender => future.clone(),
        _ => return Err(ContractError::Unauthorized {}),
    };
    if env.block.time.seconds() < change.deadline {
        return Err(ContractError::InsufficientTime {
            deadline: change.deadline,
        });
    }

    config.pegged_admin = new_pegged_admin;
    change.deadline = 0;
    CONFIG.save(deps.storage, &config)?;
    PEGGED_ADMIN_CHANGE.save(deps.storage, &change)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "apply_new_pegged_admin"),
        attr("pegged_admin", config.pegged_admin),
    ]))
}

fn revert_new_pegged_admin(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_reserve(&config)?;
    if info.sender != config.pegged_admin {
        return Err(ContractError::Unauthorized {});
    }

    PEGGED_ADMIN_CHANGE.update(deps.storage, |mut change| -> StdResult<PendingChange> {
        change.deadline = 0;
        Ok(change)
    })?;

    Ok(Response::new().add_attribute("method", "revert_new_pegged_admin"))
}

/// Send reserve coins out, capped at what the keeper holds
fn withdraw_pegged(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    receiver: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_reserve(&config)?;
    if info.sender != config.pegged_admin {
        return Err(ContractError::Unauthorized {});
    }
    let receiver = match receiver {
        Some(receiver) => deps.api.addr_validate(&receiver)?,
        None => info.sender,
    };

    let balance = query_token_balance(deps.querier, &config.pegged, &env.contract.address)?;
    let amount = amount.min(balance);
    if amount.is_zero() {
        return Ok(Response::new()
            .add_attribute("method", "withdraw_pegged")
            .set_data(to_json_binary(&false)?));
    }

    Ok(Response::new()
        .add_message(token_transfer_msg(&config.pegged, &receiver, amount)?)
        .add_event(
            Event::new("withdraw_pegged")
                .add_attribute("amount", amount)
                .add_attribute("receiver", receiver.to_string()),
        )
        .add_attribute("method", "withdraw_pegged")
        .set_data(to_json_binary(&true)?))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::State {} => to_json_binary(&query_state(deps)?),
        QueryMsg::CalcProfit {} => to_json_binary(&query_calc_profit(deps, env)?),
        QueryMsg::Asymmetry {} => to_json_binary(&query_asymmetry(deps)?),
    }
}
