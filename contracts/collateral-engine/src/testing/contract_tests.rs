#[cfg(test)]
mod tests {
    use cosmwasm_std::testing::{
        mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage,
        MOCK_CONTRACT_ADDR,
    };
    use cosmwasm_std::{
        from_binary, to_binary, Addr, ContractResult, CosmosMsg, Decimal, OwnedDeps,
        QuerierResult, Reply, ReplyOn, SubMsgResult, SystemError, SystemResult, Uint128,
        WasmMsg, WasmQuery,
    };
    use cw20::{Cw20ExecuteMsg, TokenInfoResponse};

    use keel::engine::{
        CallbackMsg, CollateralInfo, Config, ExecuteMsg, InstantiateMsg, QueryMsg,
        RiskParametersResponse,
    };
    use keel::price_feed::{DecimalsResponse, QueryMsg as FeedQueryMsg, RoundDataResponse};

    use crate::contract::{execute, instantiate, query, reply};
    use crate::positions::{
        BURN_REPLY_ID, BURN_TRANSFER_REPLY_ID, DEPOSIT_REPLY_ID, MINT_REPLY_ID, REDEEM_REPLY_ID,
    };
    use crate::state::{collateral_deposited, debt_minted, is_locked};
    use crate::ContractError;

    const USER: &str = "user";
    const WETH: &str = "weth";
    const WBTC: &str = "wbtc";
    const ETH_FEED: &str = "eth_feed";
    const BTC_FEED: &str = "btc_feed";
    const DEBT_TOKEN: &str = "debt_token";

    const ETH_PRICE: u128 = 2_000_0000_0000;
    const BTC_PRICE: u128 = 30_000_0000_0000;
    const ONE: u128 = 1_000_000_000_000_000_000;

    fn mock_wasm_querier(query: &WasmQuery) -> QuerierResult {
        match query {
            WasmQuery::Smart { contract_addr, msg } => {
                let response = match contract_addr.as_str() {
                    WETH | WBTC => to_binary(&TokenInfoResponse {
                        name: contract_addr.to_uppercase(),
                        symbol: contract_addr.to_uppercase(),
                        decimals: if contract_addr == WETH { 18 } else { 8 },
                        total_supply: Uint128::zero(),
                    }),
                    ETH_FEED | BTC_FEED => {
                        let answer = if contract_addr == ETH_FEED { ETH_PRICE } else { BTC_PRICE };
                        match from_binary(msg).unwrap() {
                            FeedQueryMsg::Decimals {} => to_binary(&DecimalsResponse { decimals: 8 }),
                            FeedQueryMsg::LatestRoundData {} => to_binary(&RoundDataResponse {
                                round_id: 1,
                                answer: Uint128::new(answer),
                                started_at: 0,
                                updated_at: 0,
                                answered_in_round: 1,
                            }),
                        }
                    }
                    _ => {
                        return SystemResult::Err(SystemError::NoSuchContract {
                            addr: contract_addr.clone(),
                        })
                    }
                };
                SystemResult::Ok(ContractResult::Ok(response.unwrap()))
            }
            _ => SystemResult::Err(SystemError::UnsupportedRequest {
                kind: String::from("wasm"),
            }),
        }
    }

    fn instantiate_msg() -> InstantiateMsg {
        InstantiateMsg {
            collateral_tokens: vec![String::from(WETH), String::from(WBTC)],
            price_feeds: vec![String::from(ETH_FEED), String::from(BTC_FEED)],
            debt_token: String::from(DEBT_TOKEN),
        }
    }

    fn setup() -> OwnedDeps<MockStorage, MockApi, MockQuerier> {
        let mut deps = mock_dependencies();
        deps.querier.update_wasm(mock_wasm_querier);

        instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), instantiate_msg()).unwrap();
        deps
    }

    fn release(deps: &mut OwnedDeps<MockStorage, MockApi, MockQuerier>) {
        execute(
            deps.as_mut(),
            mock_env(),
            mock_info(MOCK_CONTRACT_ADDR, &[]),
            ExecuteMsg::Callback(CallbackMsg::ReleaseLock {}),
        )
        .unwrap();
    }

    #[test]
    fn proper_initialization() {
        let deps = setup();

        let res = query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap();
        let config: Config = from_binary(&res).unwrap();
        assert_eq!(
            config,
            Config {
                debt_token: Addr::unchecked(DEBT_TOKEN),
                collateral_tokens: vec![Addr::unchecked(WETH), Addr::unchecked(WBTC)],
            }
        );

        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::CollateralTokenPriceFeed {
                token: String::from(WBTC),
            },
        )
        .unwrap();
        let collateral: CollateralInfo = from_binary(&res).unwrap();
        assert_eq!(
            collateral,
            CollateralInfo {
                token: Addr::unchecked(WBTC),
                price_feed: Addr::unchecked(BTC_FEED),
                token_decimals: 8,
                feed_decimals: 8,
            }
        );

        let res = query(deps.as_ref(), mock_env(), QueryMsg::RiskParameters {}).unwrap();
        let params: RiskParametersResponse = from_binary(&res).unwrap();
        assert_eq!(params.min_health_factor, Decimal::one());
        assert_eq!(params.liquidation_threshold, Uint128::new(50));
        assert_eq!(params.liquidation_bonus, Uint128::new(10));
        assert_eq!(params.precision, Uint128::new(ONE));

        assert!(!is_locked(deps.as_ref().storage).unwrap());
    }

    #[test]
    fn invalid_instantiation() {
        let mut deps = mock_dependencies();
        deps.querier.update_wasm(mock_wasm_querier);

        let mut msg = instantiate_msg();
        msg.price_feeds.pop();
        let err = instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg).unwrap_err();
        assert_eq!(err, ContractError::LengthMismatch { tokens: 2, price_feeds: 1 });

        let msg = InstantiateMsg {
            collateral_tokens: vec![],
            price_feeds: vec![],
            debt_token: String::from(DEBT_TOKEN),
        };
        let err = instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg).unwrap_err();
        assert_eq!(err, ContractError::NoCollateral {});

        let msg = InstantiateMsg {
            collateral_tokens: vec![String::from(WETH), String::from(WETH)],
            price_feeds: vec![String::from(ETH_FEED), String::from(BTC_FEED)],
            debt_token: String::from(DEBT_TOKEN),
        };
        let err = instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg).unwrap_err();
        assert_eq!(
            err,
            ContractError::DuplicateCollateral {
                token: String::from(WETH)
            }
        );

        //Feed that doesn't answer
        let mut deps = mock_dependencies();
        deps.querier.update_wasm(mock_wasm_querier);
        let msg = InstantiateMsg {
            collateral_tokens: vec![String::from(WETH)],
            price_feeds: vec![String::from("missing_feed")],
            debt_token: String::from(DEBT_TOKEN),
        };
        instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg).unwrap_err();
    }

    #[test]
    fn deposit_input_validation() {
        let mut deps = setup();

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::DepositCollateral {
                token: String::from(WETH),
                amount: Uint128::zero(),
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::NeedsMoreThanZero {});
        //Mock storage isn't reverted on error
        release(&mut deps);

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::DepositCollateral {
                token: String::from("random_token"),
                amount: Uint128::new(ONE),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::TokenNotAllowed {
                token: String::from("random_token")
            }
        );
    }

    #[test]
    fn deposit_builds_pull_and_holds_lock() {
        let mut deps = setup();

        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::DepositCollateral {
                token: String::from(WETH),
                amount: Uint128::new(10 * ONE),
            },
        )
        .unwrap();

        //Ledger is credited before the transfer runs
        assert_eq!(
            collateral_deposited(deps.as_ref().storage, &Addr::unchecked(USER), &Addr::unchecked(WETH)).unwrap(),
            Uint128::new(10 * ONE)
        );

        //Pull, then lock release
        assert_eq!(res.messages.len(), 2);
        assert_eq!(res.messages[0].id, DEPOSIT_REPLY_ID);
        assert_eq!(res.messages[0].reply_on, ReplyOn::Error);
        assert_eq!(
            res.messages[0].msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: String::from(WETH),
                msg: to_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: String::from(USER),
                    recipient: String::from(MOCK_CONTRACT_ADDR),
                    amount: Uint128::new(10 * ONE),
                })
                .unwrap(),
                funds: vec![],
            })
        );
        assert_eq!(res.messages[1].reply_on, ReplyOn::Never);
        assert_eq!(
            res.messages[1].msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: String::from(MOCK_CONTRACT_ADDR),
                msg: to_binary(&ExecuteMsg::Callback(CallbackMsg::ReleaseLock {})).unwrap(),
                funds: vec![],
            })
        );

        let event = res.events.iter().find(|event| event.ty == "collateral_deposited").unwrap();
        assert_eq!(event.attributes[0].value, USER);
        assert_eq!(event.attributes[1].value, WETH);
        assert_eq!(event.attributes[2].value, (10 * ONE).to_string());

        //Lock stays held until the release message runs
        assert!(is_locked(deps.as_ref().storage).unwrap());
    }

    #[test]
    fn reentrant_calls_are_rejected() {
        let mut deps = setup();

        execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::DepositCollateral {
                token: String::from(WETH),
                amount: Uint128::new(10 * ONE),
            },
        )
        .unwrap();

        //e.g. a collateral token calling back while its transfer runs
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(WETH, &[]),
            ExecuteMsg::MintDebt {
                amount: Uint128::new(ONE),
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::ReentrantCall {});

        //Only the contract itself can release
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::Callback(CallbackMsg::ReleaseLock {}),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});

        release(&mut deps);
        assert!(!is_locked(deps.as_ref().storage).unwrap());

        execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::MintDebt {
                amount: Uint128::new(ONE),
            },
        )
        .unwrap();
    }

    #[test]
    fn mint_requires_collateral() {
        let mut deps = setup();

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::MintDebt {
                amount: Uint128::new(1),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::HealthFactorIsBelowMinimum {
                health_factor: Decimal::zero()
            }
        );
    }

    #[test]
    fn mint_builds_mint_msg() {
        let mut deps = setup();

        execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::DepositCollateral {
                token: String::from(WETH),
                amount: Uint128::new(10 * ONE),
            },
        )
        .unwrap();
        release(&mut deps);

        //$20,000 of collateral backs $10,000 of debt
        let res = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::MintDebt {
                amount: Uint128::new(10_000 * ONE),
            },
        )
        .unwrap();
        assert_eq!(res.messages[0].id, MINT_REPLY_ID);
        assert_eq!(
            res.messages[0].msg,
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: String::from(DEBT_TOKEN),
                msg: to_binary(&keel::debt_token::ExecuteMsg::Mint {
                    recipient: String::from(USER),
                    amount: Uint128::new(10_000 * ONE),
                })
                .unwrap(),
                funds: vec![],
            })
        );
        assert_eq!(
            debt_minted(deps.as_ref().storage, &Addr::unchecked(USER)).unwrap(),
            Uint128::new(10_000 * ONE)
        );

        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::HealthFactor {
                user: String::from(USER),
            },
        )
        .unwrap();
        let health_factor: Decimal = from_binary(&res).unwrap();
        assert_eq!(health_factor, Decimal::one());
    }

    #[test]
    fn redeem_underflow_fails() {
        let mut deps = setup();

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::RedeemCollateral {
                token: String::from(WBTC),
                amount: Uint128::new(1),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientCollateral {
                deposited: Uint128::zero(),
                requested: Uint128::new(1),
            }
        );
    }

    #[test]
    fn burn_more_than_debt_fails() {
        let mut deps = setup();

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info(USER, &[]),
            ExecuteMsg::BurnDebt {
                amount: Uint128::new(5),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::ExcessRepayment {
                debt: Uint128::zero(),
                repayment: Uint128::new(5),
            }
        );
    }

    #[test]
    fn external_failures_are_named() {
        let mut deps = setup();

        let err = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: DEPOSIT_REPLY_ID,
                result: SubMsgResult::Err(String::from("No allowance for this account")),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::CollateralDepositFailed {
                reason: String::from("No allowance for this account")
            }
        );

        let err = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: REDEEM_REPLY_ID,
                result: SubMsgResult::Err(String::from("Overflow")),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::CollateralRedeemFailed {
                reason: String::from("Overflow")
            }
        );

        let err = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: BURN_TRANSFER_REPLY_ID,
                result: SubMsgResult::Err(String::from("No allowance for this account")),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::BurnDebtTransferFailed {
                reason: String::from("No allowance for this account")
            }
        );

        let err = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: BURN_REPLY_ID,
                result: SubMsgResult::Err(String::from("Unauthorized")),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::BurnFailed {
                reason: String::from("Unauthorized")
            }
        );

        let err = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: MINT_REPLY_ID,
                result: SubMsgResult::Err(String::from("Unauthorized")),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::MintFailed {
                reason: String::from("Unauthorized")
            }
        );

        let err = reply(
            deps.as_mut(),
            mock_env(),
            Reply {
                id: 42,
                result: SubMsgResult::Err(String::from("?")),
            },
        )
        .unwrap_err();
        assert_eq!(err, ContractError::UnknownReplyId { id: 42 });
    }

    #[test]
    fn valuation_queries() {
        let deps = setup();

        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::UsdValue {
                token: String::from(WETH),
                amount: Uint128::new(15 * ONE),
            },
        )
        .unwrap();
        let value: Uint128 = from_binary(&res).unwrap();
        assert_eq!(value, Uint128::new(30_000 * ONE));

        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::TokenAmountFromUsd {
                token: String::from(WBTC),
                usd_amount: Uint128::new(60_000 * ONE),
            },
        )
        .unwrap();
        let amount: Uint128 = from_binary(&res).unwrap();
        assert_eq!(amount, Uint128::new(2_0000_0000));

        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::CalculateHealthFactor {
                total_debt_minted: Uint128::zero(),
                collateral_value_in_usd: Uint128::new(ONE),
            },
        )
        .unwrap();
        let health_factor: Decimal = from_binary(&res).unwrap();
        assert_eq!(health_factor, Decimal::MAX);

        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::UsdValue {
                token: String::from("random_token"),
                amount: Uint128::new(ONE),
            },
        )
        .unwrap_err();
    }
}
