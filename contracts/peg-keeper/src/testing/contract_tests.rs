use crate::contract::{execute, instantiate, query};
use crate::ContractError;

use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info, MockQuerier};
use cosmwasm_std::{
    attr, from_json, to_json_binary, Addr, ContractResult, CosmosMsg, Event, QuerierResult, SystemError, SystemResult,
    Uint128, WasmMsg, WasmQuery,
};

use pegkeeper::math::PRECISION;
use pegkeeper::peg_keeper::{AsymmetryResponse, Config, ExecuteMsg, InstantiateMsg, QueryMsg, StateResponse};
use pegkeeper::pegged_token::{BalanceResponse, ExecuteMsg as TokenExecuteMsg, QueryMsg as TokenQueryMsg};
use pegkeeper::stable_pool::{
    BalancesResponse, Config as PoolConfig, ExecuteMsg as PoolExecuteMsg, QueryMsg as PoolQueryMsg,
};
use pegkeeper::types::{Capabilities, PegKeeperBinding};

const POOL: &str = "pool";
const PEGGED: &str = "pegged";
const PEG: &str = "peg";
const KEEPER: &str = "cosmos2contract";

/// Stand-in for the pool and the pegged token.
/// Removals price LP 1:1 with the pegged coin.
#[derive(Clone)]
struct MockPool {
    balances: [u128; 2],
    lp_balance: u128,
    virtual_price: u128,
    min_coin_amount: u128,
    reserve: u128,
    /// Pegged coins paid on top of the LP redeemed via token
    redeem_bonus: u128,
    /// Pegged index the pool binds this keeper with
    binding_index: Option<usize>,
}

impl Default for MockPool {
    fn default() -> Self {
        MockPool {
            balances: [1_000_000 * PRECISION; 2],
            lp_balance: 0,
            virtual_price: PRECISION,
            min_coin_amount: 1_000_000,
            reserve: 0,
            redeem_bonus: 0,
            binding_index: None,
        }
    }
}

impl MockPool {
    fn install(&self, querier: &mut MockQuerier) {
        let pool = self.clone();
        querier.update_wasm(move |query| pool.handle(query));
    }

    fn handle(&self, query: &WasmQuery) -> QuerierResult {
        let res = match query {
            WasmQuery::Smart { contract_addr, msg } if contract_addr == POOL => {
                match from_json::<PoolQueryMsg>(msg).unwrap() {
                    PoolQueryMsg::Config {} => to_json_binary(&PoolConfig {
                        owner: Addr::unchecked("owner"),
                        coins: [Addr::unchecked(PEGGED), Addr::unchecked(PEG)],
                        rates: [Uint128::new(PRECISION); 2],
                        amp: 20_000,
                        fee: 0,
                        admin_fee: 0,
                        min_coin_amount: Uint128::new(self.min_coin_amount),
                        peg_keeper: self.binding_index.map(|pegged_index| PegKeeperBinding {
                            peg_keeper: Addr::unchecked(KEEPER),
                            pegged_index,
                            auto_update: false,
                        }),
                    }),
                    PoolQueryMsg::Balances {} => to_json_binary(&BalancesResponse {
                        balances: [Uint128::new(self.balances[0]), Uint128::new(self.balances[1])],
                    }),
                    PoolQueryMsg::GetVirtualPrice {} => to_json_binary(&Uint128::new(self.virtual_price)),
                    PoolQueryMsg::BalanceOf { .. } => to_json_binary(&Uint128::new(self.lp_balance)),
                    PoolQueryMsg::CalcPegKeeperRemove { amount } => to_json_binary(&amount),
                    PoolQueryMsg::CalcPegKeeperRemoveViaToken { token_amount } => {
                        to_json_binary(&(token_amount + Uint128::new(self.redeem_bonus)))
                    }
                    _ => panic!("unexpected pool query"),
                }
            }
            WasmQuery::Smart { contract_addr, msg } if contract_addr == PEGGED => {
                match from_json::<TokenQueryMsg>(msg).unwrap() {
                    TokenQueryMsg::Balance { .. } => to_json_binary(&BalanceResponse {
                        balance: Uint128::new(self.reserve),
                    }),
                    _ => panic!("unexpected token query"),
                }
            }
            _ => {
                return SystemResult::Err(SystemError::UnsupportedRequest {
                    kind: String::from("wasm"),
                })
            }
        };
        SystemResult::Ok(ContractResult::Ok(res.unwrap()))
    }
}

fn instantiate_msg(capabilities: Capabilities) -> InstantiateMsg {
    InstantiateMsg {
        pool: String::from(POOL),
        pegged_index: None,
        receiver: String::from("receiver"),
        admin: None,
        pegged_admin: None,
        min_asymmetry: 500_000_000,
        caller_share: Some(20_000),
        admin_actions_delay: None,
        capabilities,
    }
}

fn wasm_execute<T: serde::Serialize>(contract: &str, msg: &T) -> CosmosMsg {
    CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: String::from(contract),
        msg: to_json_binary(msg).unwrap(),
        funds: vec![],
    })
}

fn state(deps: cosmwasm_std::Deps) -> StateResponse {
    from_json(&query(deps, mock_env(), QueryMsg::State {}).unwrap()).unwrap()
}

/// Runs the callback the chain dispatches after every acting update
fn settle(deps: cosmwasm_std::DepsMut) {
    execute(deps, mock_env(), mock_info(KEEPER, &[]), ExecuteMsg::ProfitAssurance {}).unwrap();
}

#[test]
fn proper_initialization() {
    let mut deps = mock_dependencies();
    MockPool::default().install(&mut deps.querier);

    //Asymmetry bounds are exclusive
    for min_asymmetry in [0u64, 10_000_000_000] {
        let mut msg = instantiate_msg(Capabilities::pluggable());
        msg.min_asymmetry = min_asymmetry;
        let err = instantiate(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg).unwrap_err();
        assert_eq!(err, ContractError::BadAsymmetry {});
    }
    let mut msg = instantiate_msg(Capabilities::pluggable());
    msg.caller_share = Some(100_001);
    let err = instantiate(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg).unwrap_err();
    assert_eq!(err, ContractError::BadCallerShare {});

    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();

    let config: Config = from_json(&query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.pegged, Addr::unchecked(PEGGED));
    assert_eq!(config.admin, Addr::unchecked("admin"));
    assert_eq!(config.pegged_admin, Addr::unchecked("admin"));
    assert_eq!(config.admin_actions_delay, 3 * 86_400);
    assert_eq!(state(deps.as_ref()).debt, Uint128::zero());
}

#[test]
fn balanced_pool_is_a_no_op() {
    let mut deps = mock_dependencies();
    MockPool::default().install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();

    let res = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    assert_eq!(res.data, Some(to_json_binary(&false).unwrap()));
    assert!(res.messages.is_empty());
    assert!(res.events.is_empty());
    assert_eq!(state(deps.as_ref()).last_change, 0);
}

#[test]
fn provide_then_withdraw() {
    let mut deps = mock_dependencies();
    let mut pool = MockPool {
        balances: [1_000_000 * PRECISION, 2_000_000 * PRECISION],
        ..MockPool::default()
    };
    pool.install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();

    let res: AsymmetryResponse =
        from_json(&query(deps.as_ref(), mock_env(), QueryMsg::Asymmetry {}).unwrap()).unwrap();
    assert_eq!(res.asymmetry, 1_111_111_112);

    //Peg side is heavy: provide a fifth of the gap
    let amount = Uint128::new(200_000 * PRECISION);
    let res = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    assert_eq!(res.data, Some(to_json_binary(&true).unwrap()));
    assert_eq!(res.events, vec![Event::new("provide").add_attribute("amount", amount)]);
    let msgs: Vec<CosmosMsg> = res.messages.into_iter().map(|sub| sub.msg).collect();
    assert_eq!(
        msgs,
        vec![
            wasm_execute(
                PEGGED,
                &TokenExecuteMsg::Mint {
                    recipient: String::from(KEEPER),
                    amount
                }
            ),
            wasm_execute(
                PEGGED,
                &TokenExecuteMsg::IncreaseAllowance {
                    spender: String::from(POOL),
                    amount
                }
            ),
            wasm_execute(POOL, &PoolExecuteMsg::PegKeeperAdd { amount }),
            wasm_execute(KEEPER, &ExecuteMsg::ProfitAssurance {}),
        ]
    );
    let keeper_state = state(deps.as_ref());
    assert_eq!(keeper_state.debt, amount);
    assert_eq!(keeper_state.last_change, mock_env().block.time.seconds());
    settle(deps.as_mut());

    //Within the action delay nothing moves
    let mut env = mock_env();
    env.block.time = env.block.time.plus_seconds(899);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    assert_eq!(res.data, Some(to_json_binary(&false).unwrap()));
    assert_eq!(res.messages.len(), 1);
    settle(deps.as_mut());

    //Pegged side is heavy but the keeper's LP only covers half the debt
    pool.balances = [3_000_000 * PRECISION, 1_000_000 * PRECISION];
    pool.lp_balance = 100_000 * PRECISION;
    pool.install(&mut deps.querier);
    env.block.time = env.block.time.plus_seconds(1);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    let half = Uint128::new(100_000 * PRECISION);
    assert_eq!(res.events, vec![Event::new("withdraw").add_attribute("amount", half)]);
    assert_eq!(
        res.messages[0].msg,
        wasm_execute(POOL, &PoolExecuteMsg::PegKeeperRemoveViaToken { token_amount: half })
    );
    assert_eq!(
        res.messages[1].msg,
        wasm_execute(PEGGED, &TokenExecuteMsg::Burn { amount: half })
    );
    assert_eq!(state(deps.as_ref()).debt, half);
    settle(deps.as_mut());

    //Withdraw is capped at the remaining debt
    pool.lp_balance = 1_000_000 * PRECISION;
    pool.install(&mut deps.querier);
    env.block.time = env.block.time.plus_seconds(900);
    let res = execute(
        deps.as_mut(),
        env,
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    assert_eq!(
        res.messages[0].msg,
        wasm_execute(POOL, &PoolExecuteMsg::PegKeeperRemove { amount: half })
    );
    assert_eq!(state(deps.as_ref()).debt, Uint128::zero());
}

#[test]
fn nested_update_is_skipped() {
    let mut deps = mock_dependencies();
    MockPool {
        balances: [1_000_000 * PRECISION, 2_000_000 * PRECISION],
        ..MockPool::default()
    }
    .install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::optimized()),
    )
    .unwrap();

    let res = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    assert_eq!(res.data, Some(to_json_binary(&true).unwrap()));
    let debt = state(deps.as_ref()).debt;

    //The pool's hook fires while the first callback is still outstanding
    let mut env = mock_env();
    env.block.time = env.block.time.plus_seconds(900);
    let res = execute(
        deps.as_mut(),
        env.clone(),
        mock_info(POOL, &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    assert_eq!(res.data, Some(to_json_binary(&false).unwrap()));
    assert!(res.messages.is_empty());
    assert!(res.attributes.contains(&attr("skipped", "assurance_pending")));
    assert_eq!(state(deps.as_ref()).debt, debt);

    //The outer callback still finds its snapshot
    settle(deps.as_mut());
    let res = execute(
        deps.as_mut(),
        env,
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    assert_eq!(res.data, Some(to_json_binary(&true).unwrap()));
    assert!(state(deps.as_ref()).debt > debt);
}

#[test]
fn redeemed_surplus_is_burned() {
    let mut deps = mock_dependencies();
    let mut pool = MockPool {
        balances: [1_000_000 * PRECISION, 2_000_000 * PRECISION],
        ..MockPool::default()
    };
    pool.install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();
    execute(
        deps.as_mut(),
        mock_env(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    settle(deps.as_mut());
    let debt = Uint128::new(200_000 * PRECISION);
    assert_eq!(state(deps.as_ref()).debt, debt);

    //Redeeming the whole LP pays out more than the debt
    pool.balances = [3_000_000 * PRECISION, 1_000_000 * PRECISION];
    pool.lp_balance = 150_000 * PRECISION;
    pool.redeem_bonus = 100_000 * PRECISION;
    pool.install(&mut deps.querier);
    let mut env = mock_env();
    env.block.time = env.block.time.plus_seconds(900);
    let res = execute(
        deps.as_mut(),
        env,
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    let received = Uint128::new(250_000 * PRECISION);
    assert_eq!(res.events, vec![Event::new("withdraw").add_attribute("amount", debt)]);
    assert_eq!(
        res.messages[0].msg,
        wasm_execute(
            POOL,
            &PoolExecuteMsg::PegKeeperRemoveViaToken {
                token_amount: Uint128::new(150_000 * PRECISION)
            }
        )
    );
    assert_eq!(
        res.messages[1].msg,
        wasm_execute(PEGGED, &TokenExecuteMsg::Burn { amount: received })
    );
    assert_eq!(state(deps.as_ref()).debt, Uint128::zero());
}

#[test]
fn binding_must_match_pegged_index() {
    let mut deps = mock_dependencies();
    MockPool {
        balances: [1_000_000 * PRECISION, 2_000_000 * PRECISION],
        binding_index: Some(1),
        ..MockPool::default()
    }
    .install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();

    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::PeggedIndexMismatch { keeper: 0, pool: 1 });
    assert_eq!(state(deps.as_ref()).debt, Uint128::zero());
}

#[test]
fn pool_driven_entry_points() {
    let mut deps = mock_dependencies();
    MockPool::default().install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::template()),
    )
    .unwrap();

    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::OnlyPool {});

    let provide = ExecuteMsg::Provide { amount: Uint128::new(1_000 * PRECISION) };
    let err = execute(deps.as_mut(), mock_env(), mock_info("bob", &[]), provide.clone()).unwrap_err();
    assert_eq!(err, ContractError::OnlyPool {});

    //Pool-driven provide skips the asymmetry check
    let res = execute(deps.as_mut(), mock_env(), mock_info(POOL, &[]), provide).unwrap();
    assert_eq!(res.data, Some(to_json_binary(&true).unwrap()));
    assert_eq!(res.messages.len(), 4);
    assert_eq!(state(deps.as_ref()).debt, Uint128::new(1_000 * PRECISION));
    settle(deps.as_mut());

    //Dust
    let mut env = mock_env();
    env.block.time = env.block.time.plus_seconds(900);
    let res = execute(
        deps.as_mut(),
        env,
        mock_info(POOL, &[]),
        ExecuteMsg::Provide { amount: Uint128::new(999_999) },
    )
    .unwrap();
    assert_eq!(res.data, Some(to_json_binary(&false).unwrap()));
    assert!(res.messages.is_empty());

    //Template keepers pay no caller share
    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        ExecuteMsg::SetNewCallerShare { new_caller_share: 10 },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::UnsupportedAction {});

    //Permissionless keepers don't take pool-driven calls
    let mut deps = mock_dependencies();
    MockPool::default().install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();
    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info(POOL, &[]),
        ExecuteMsg::Withdraw { amount: Uint128::new(1_000) },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::UnsupportedAction {});
}

#[test]
fn profit_assurance() {
    let mut deps = mock_dependencies();
    //Asymmetric, but every action is dust
    let mut pool = MockPool {
        balances: [1_000_000 * PRECISION, 2_000_000 * PRECISION],
        lp_balance: 10 * PRECISION,
        min_coin_amount: u128::MAX,
        ..MockPool::default()
    };
    pool.install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();

    let err = execute(deps.as_mut(), mock_env(), mock_info("bob", &[]), ExecuteMsg::ProfitAssurance {})
        .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});

    let res = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: Some(String::from("carol")) },
    )
    .unwrap();
    assert_eq!(res.data, Some(to_json_binary(&false).unwrap()));
    assert_eq!(res.messages[0].msg, wasm_execute(KEEPER, &ExecuteMsg::ProfitAssurance {}));

    //Profit grew from 9 to 19 LP, 20% of it goes to the beneficiary
    pool.lp_balance = 20 * PRECISION;
    pool.install(&mut deps.querier);
    let res = execute(deps.as_mut(), mock_env(), mock_info(KEEPER, &[]), ExecuteMsg::ProfitAssurance {})
        .unwrap();
    assert_eq!(
        res.messages[0].msg,
        wasm_execute(
            POOL,
            &PoolExecuteMsg::Transfer {
                recipient: String::from("carol"),
                amount: Uint128::new(2 * PRECISION)
            }
        )
    );

    //Profit dropped
    execute(
        deps.as_mut(),
        mock_env(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    pool.lp_balance = 5 * PRECISION;
    pool.install(&mut deps.querier);
    let err = execute(deps.as_mut(), mock_env(), mock_info(KEEPER, &[]), ExecuteMsg::ProfitAssurance {})
        .unwrap_err();
    assert_eq!(err, ContractError::UnprofitablePeg {});
}

#[test]
fn withdraw_profit() {
    let mut deps = mock_dependencies();
    MockPool {
        lp_balance: 10 * PRECISION,
        ..MockPool::default()
    }
    .install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();

    let res = query(deps.as_ref(), mock_env(), QueryMsg::CalcProfit {}).unwrap();
    let profit: Uint128 = from_json(&res).unwrap();
    assert_eq!(profit, Uint128::new(9 * PRECISION));

    //Anyone can call, the receiver is paid
    let res = execute(deps.as_mut(), mock_env(), mock_info("bob", &[]), ExecuteMsg::WithdrawProfit {}).unwrap();
    assert_eq!(res.data, Some(to_json_binary(&profit).unwrap()));
    assert_eq!(res.events, vec![Event::new("profit").add_attribute("lp_amount", profit)]);
    assert_eq!(
        res.messages[0].msg,
        wasm_execute(
            POOL,
            &PoolExecuteMsg::Transfer {
                recipient: String::from("receiver"),
                amount: profit
            }
        )
    );
}

#[test]
fn admin_time_lock() {
    let mut deps = mock_dependencies();
    MockPool::default().install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();

    let commit = ExecuteMsg::CommitNewAdmin { new_admin: String::from("new_admin") };
    let err = execute(deps.as_mut(), mock_env(), mock_info("bob", &[]), commit.clone()).unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});

    let err = execute(deps.as_mut(), mock_env(), mock_info("new_admin", &[]), ExecuteMsg::ApplyNewAdmin {})
        .unwrap_err();
    assert_eq!(err, ContractError::NoActiveAction {});

    execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), commit).unwrap();
    let deadline = mock_env().block.time.seconds() + 3 * 86_400;
    assert_eq!(state(deps.as_ref()).admin_actions_deadline, deadline);

    //One pending change at a time
    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        ExecuteMsg::CommitNewReceiver { new_receiver: String::from("bob") },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::ActiveAction {});

    let mut env = mock_env();
    env.block.time = env.block.time.plus_seconds(3 * 86_400 - 1);
    let err = execute(deps.as_mut(), env.clone(), mock_info("admin", &[]), ExecuteMsg::ApplyNewAdmin {})
        .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});
    let err = execute(deps.as_mut(), env.clone(), mock_info("new_admin", &[]), ExecuteMsg::ApplyNewAdmin {})
        .unwrap_err();
    assert_eq!(err, ContractError::InsufficientTime { deadline });

    env.block.time = env.block.time.plus_seconds(1);
    execute(deps.as_mut(), env.clone(), mock_info("new_admin", &[]), ExecuteMsg::ApplyNewAdmin {}).unwrap();
    let config: Config = from_json(&query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.admin, Addr::unchecked("new_admin"));
    assert_eq!(state(deps.as_ref()).admin_actions_deadline, 0);

    //Reverted receiver change can't be applied
    execute(
        deps.as_mut(),
        env.clone(),
        mock_info("new_admin", &[]),
        ExecuteMsg::CommitNewReceiver { new_receiver: String::from("bob") },
    )
    .unwrap();
    execute(deps.as_mut(), env.clone(), mock_info("new_admin", &[]), ExecuteMsg::RevertNewStaff {}).unwrap();
    env.block.time = env.block.time.plus_seconds(3 * 86_400);
    let err = execute(deps.as_mut(), env, mock_info("new_admin", &[]), ExecuteMsg::ApplyNewReceiver {})
        .unwrap_err();
    assert_eq!(err, ContractError::NoActiveAction {});
}

#[test]
fn parameter_bounds() {
    let mut deps = mock_dependencies();
    MockPool::default().install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::pluggable()),
    )
    .unwrap();

    let set_asymmetry = |value: u64| ExecuteMsg::SetNewMinAsymmetry { new_min_asymmetry: value };
    let err = execute(deps.as_mut(), mock_env(), mock_info("bob", &[]), set_asymmetry(1)).unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});
    for value in [0u64, 10_000_000_000] {
        let err = execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), set_asymmetry(value)).unwrap_err();
        assert_eq!(err, ContractError::BadAsymmetry {});
    }
    execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), set_asymmetry(9_999_999_999)).unwrap();

    let set_share = |value: u64| ExecuteMsg::SetNewCallerShare { new_caller_share: value };
    let err = execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), set_share(100_001)).unwrap_err();
    assert_eq!(err, ContractError::BadCallerShare {});
    execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), set_share(100_000)).unwrap();

    let config: Config = from_json(&query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.min_asymmetry, 9_999_999_999);
    assert_eq!(config.caller_share, 100_000);

    //Deadline past u64 errors instead of panicking
    let mut deps = mock_dependencies();
    MockPool::default().install(&mut deps.querier);
    let mut msg = instantiate_msg(Capabilities::reserve());
    msg.admin_actions_delay = Some(u64::MAX);
    instantiate(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg).unwrap();
    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        ExecuteMsg::CommitNewAdmin { new_admin: String::from("new_admin") },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Overflow(_)));
    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        ExecuteMsg::CommitNewPeggedAdmin { new_pegged_admin: String::from("dao") },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Overflow(_)));
    assert_eq!(state(deps.as_ref()).admin_actions_deadline, 0);
}

#[test]
fn reserve_pegged_management() {
    let mut deps = mock_dependencies();
    let mut pool = MockPool {
        balances: [1_000_000 * PRECISION, 2_000_000 * PRECISION],
        reserve: 50_000 * PRECISION,
        ..MockPool::default()
    };
    pool.install(&mut deps.querier);
    let mut msg = instantiate_msg(Capabilities::reserve());
    msg.pegged_admin = Some(String::from("treasury"));
    instantiate(deps.as_mut(), mock_env(), mock_info("admin", &[]), msg).unwrap();

    //Provide is limited by the reserve and nothing is minted
    let reserve = Uint128::new(50_000 * PRECISION);
    let res = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("bob", &[]),
        ExecuteMsg::Update { beneficiary: None },
    )
    .unwrap();
    assert_eq!(res.events, vec![Event::new("provide").add_attribute("amount", reserve)]);
    assert_eq!(
        res.messages[1].msg,
        wasm_execute(
            POOL,
            &PoolExecuteMsg::AddLiquidity {
                amounts: [reserve, Uint128::zero()],
                min_mint_amount: Uint128::zero(),
            }
        )
    );

    let withdraw = ExecuteMsg::WithdrawPegged { amount: Uint128::new(u128::MAX), receiver: None };
    let err = execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), withdraw.clone()).unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});

    //Capped at the balance
    let res = execute(deps.as_mut(), mock_env(), mock_info("treasury", &[]), withdraw.clone()).unwrap();
    assert_eq!(
        res.events,
        vec![Event::new("withdraw_pegged")
            .add_attribute("amount", reserve)
            .add_attribute("receiver", "treasury")]
    );
    assert_eq!(
        res.messages[0].msg,
        wasm_execute(
            PEGGED,
            &TokenExecuteMsg::Transfer {
                recipient: String::from("treasury"),
                amount: reserve
            }
        )
    );

    //Empty reserve
    pool.reserve = 0;
    pool.install(&mut deps.querier);
    let res = execute(deps.as_mut(), mock_env(), mock_info("treasury", &[]), withdraw).unwrap();
    assert_eq!(res.data, Some(to_json_binary(&false).unwrap()));
    assert!(res.messages.is_empty());

    //Pegged admin hand-over
    let commit = ExecuteMsg::CommitNewPeggedAdmin { new_pegged_admin: String::from("dao") };
    let err = execute(deps.as_mut(), mock_env(), mock_info("admin", &[]), commit.clone()).unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});
    execute(deps.as_mut(), mock_env(), mock_info("treasury", &[]), commit).unwrap();

    let mut env = mock_env();
    env.block.time = env.block.time.plus_seconds(3 * 86_400);
    execute(deps.as_mut(), env, mock_info("dao", &[]), ExecuteMsg::ApplyNewPeggedAdmin {}).unwrap();
    let config: Config = from_json(&query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.pegged_admin, Addr::unchecked("dao"));

    //Mint keepers hold no reserve
    let mut deps = mock_dependencies();
    MockPool::default().install(&mut deps.querier);
    instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        instantiate_msg(Capabilities::optimized()),
    )
    .unwrap();
    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        ExecuteMsg::WithdrawPegged { amount: Uint128::new(1), receiver: None },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::UnsupportedAction {});
}
