use crate::config::RouterOptions;
use crate::error::{CoreError, is_arithmetic_error};
use crate::quote::{SwapQuoteParams, swap_quote};
use crate::router::fetcher::Fetcher;
use crate::router::ranker::combine_split_sets;
use crate::router::typedefs::{Hop, RouteId, RouteQuote, SplitResult, TradeParams, Walks};
use crate::state::Pool;
use crate::state::pda::tick_array_address;
use crate::state::tick_array::{TICK_ARRAY_SIZE, TickArray, TickArrays};
use crate::state_math::tick::get_tick_array_start_tick_index;
use crate::types::Slippage;
use anyhow::{Result, bail};
use itertools::Itertools;
use solana_program::pubkey::Pubkey;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

struct OrientedRoute {
    pools: Vec<Pubkey>,
    a_to_b: Vec<bool>,
}

struct PartialRoute {
    hops: Vec<Option<Hop>>,
    carry: u64,
    alive: bool,
}

/// Quote and rank split combinations of candidate routes for one trade.
///
/// Pools are prefetched in one batch, tick-array windows in a second ordered
/// batch; everything after that is synchronous. Infeasible routes (missing
/// accounts, drained windows, zero liquidity) are dropped silently; the call
/// only fails when nothing survived *and* a quote died on an arithmetic error.
pub async fn find_best_routes<F>(
    fetcher: &F,
    params: &TradeParams,
    walks: &Walks,
    options: &RouterOptions,
) -> Result<Vec<SplitResult>>
where
    F: Fetcher + ?Sized,
{
    options.validate()?;

    let route_id = RouteId::new(params.input_mint, params.output_mint);
    let Some(candidates) = walks.get(&route_id) else {
        return Ok(Vec::new());
    };

    // one pool fetch covering every address any candidate mentions
    let mut pool_addresses: Vec<Pubkey> = Vec::new();
    let mut seen = HashSet::new();
    for walk in candidates {
        for pool_address in walk {
            if seen.insert(*pool_address) {
                pool_addresses.push(*pool_address);
            }
        }
    }

    let fetched = fetcher.list_pools(&pool_addresses, true).await?;
    let pools: HashMap<Pubkey, Pool> = pool_addresses
        .iter()
        .copied()
        .zip(fetched)
        .filter_map(|(address, pool)| Some((address, pool?)))
        .collect();

    let routes = orient_routes(candidates, &pools, params);
    if routes.is_empty() {
        debug!("no viable routes for trade pair");
        return Ok(Vec::new());
    }

    let windows = prefetch_tick_windows(fetcher, params, &routes, &pools).await?;

    let increment = options.percent_increment;
    let percents: Vec<u8> = (1..=(100 / increment)).map(|i| i * increment).collect();
    let amounts: Vec<u64> = percents
        .iter()
        .map(|percent| (params.trade_amount as u128 * *percent as u128 / 100) as u64)
        .collect();

    let mut quote_map: Vec<Vec<PartialRoute>> = percents
        .iter()
        .map(|_| {
            routes
                .iter()
                .map(|route| PartialRoute {
                    hops: vec![None; route.pools.len()],
                    carry: 0,
                    alive: true,
                })
                .collect()
        })
        .collect();

    let max_route_length = routes
        .iter()
        .map(|route| route.pools.len())
        .max()
        .unwrap_or(0);
    let mut arithmetic_errors = 0usize;

    // hop-major iteration: depth d of every (percent, route) entry resolves
    // before depth d + 1, forward or backward per the trade direction
    for depth in 0..max_route_length {
        for (percent_index, _) in percents.iter().enumerate() {
            for (route_index, route) in routes.iter().enumerate() {
                let entry = &mut quote_map[percent_index][route_index];
                if !entry.alive || depth >= route.pools.len() {
                    continue;
                }

                let hop_index = if params.amount_specified_is_input {
                    depth
                } else {
                    route.pools.len() - 1 - depth
                };
                let amount = if depth == 0 {
                    amounts[percent_index]
                } else {
                    entry.carry
                };

                let pool_address = route.pools[hop_index];
                let a_to_b = route.a_to_b[hop_index];
                let Some(window) = windows.get(&(pool_address, a_to_b)) else {
                    entry.alive = false;
                    continue;
                };
                let pool = &pools[&pool_address];

                match swap_quote(SwapQuoteParams {
                    pool: pool.clone(),
                    amount_specified: amount,
                    a_to_b,
                    amount_specified_is_input: params.amount_specified_is_input,
                    sqrt_price_limit: None,
                    tick_arrays: window.clone(),
                    slippage: Slippage::ZERO,
                }) {
                    Ok(quote) => {
                        let (input_mint, output_mint) = if a_to_b {
                            (pool.token_mint_a, pool.token_mint_b)
                        } else {
                            (pool.token_mint_b, pool.token_mint_a)
                        };
                        entry.carry = if params.amount_specified_is_input {
                            quote.estimated_amount_out
                        } else {
                            quote.estimated_amount_in
                        };
                        entry.hops[hop_index] = Some(Hop {
                            pool: pool_address,
                            a_to_b,
                            input_mint,
                            output_mint,
                            amount_in: quote.estimated_amount_in,
                            amount_out: quote.estimated_amount_out,
                            quote,
                        });
                    }
                    Err(error) => {
                        if is_arithmetic_error(error) {
                            arithmetic_errors += 1;
                        }
                        trace!(%pool_address, error, "hop quote failed, dropping entry");
                        entry.alive = false;
                    }
                }
            }
        }
    }

    // cleanup: keep complete routes, prune to the objective per percent
    let quotes_by_percent: Vec<Vec<RouteQuote>> = percents
        .iter()
        .enumerate()
        .map(|(percent_index, percent)| {
            quote_map[percent_index]
                .iter_mut()
                .enumerate()
                .filter(|(_, entry)| entry.alive && entry.hops.iter().all(Option::is_some))
                .map(|(route_index, entry)| {
                    let hops: Vec<Hop> = entry.hops.drain(..).flatten().collect();
                    RouteQuote {
                        route: routes[route_index].pools.clone(),
                        percent: *percent,
                        amount_in: hops[0].amount_in,
                        amount_out: hops[hops.len() - 1].amount_out,
                        hops,
                    }
                })
                .sorted_by(|a, b| {
                    if params.amount_specified_is_input {
                        b.amount_out.cmp(&a.amount_out)
                    } else {
                        a.amount_in.cmp(&b.amount_in)
                    }
                })
                .take(options.num_top_partial_quotes)
                .collect()
        })
        .collect();

    let results = combine_split_sets(&quotes_by_percent, options, params.amount_specified_is_input);

    if results.is_empty() && arithmetic_errors > 0 {
        bail!("routing failed: {arithmetic_errors} quote(s) hit arithmetic errors and no route survived");
    }

    debug!(
        routes = routes.len(),
        results = results.len(),
        "routing finished"
    );
    Ok(results)
}

/// Orient each candidate walk so its first pool carries the input mint, then
/// chain mints hop by hop. Walks touching unknown pools or failing to connect
/// the pair are skipped, not errors.
fn orient_routes(
    candidates: &[Vec<Pubkey>],
    pools: &HashMap<Pubkey, Pool>,
    params: &TradeParams,
) -> Vec<OrientedRoute> {
    let mut routes = Vec::new();
    'walk: for walk in candidates {
        if walk.is_empty() {
            continue;
        }
        for pool_address in walk {
            if !pools.contains_key(pool_address) {
                debug!(%pool_address, "pool not found, skipping walk");
                continue 'walk;
            }
        }

        let mut ordered = walk.clone();
        if pools[&ordered[0]].other_mint(&params.input_mint).is_none() {
            ordered.reverse();
        }

        let mut a_to_b = Vec::with_capacity(ordered.len());
        let mut current_mint = params.input_mint;
        for pool_address in &ordered {
            let pool = &pools[pool_address];
            let Some(next_mint) = pool.other_mint(&current_mint) else {
                continue 'walk;
            };
            a_to_b.push(current_mint == pool.token_mint_a);
            current_mint = next_mint;
        }
        if current_mint != params.output_mint {
            continue 'walk;
        }

        routes.push(OrientedRoute {
            pools: ordered,
            a_to_b,
        });
    }
    routes
}

/// The three tick-array start indexes a swap in this direction may traverse.
/// Searching upwards starts one spacing ahead of the current tick.
fn tick_array_window_starts(
    tick_current_index: i32,
    tick_spacing: u16,
    a_to_b: bool,
) -> Result<[i32; 3], CoreError> {
    let probe = if a_to_b {
        tick_current_index
    } else {
        tick_current_index + tick_spacing as i32
    };
    let first = get_tick_array_start_tick_index(probe, tick_spacing)?;
    let span = TICK_ARRAY_SIZE as i32 * tick_spacing as i32;
    Ok(if a_to_b {
        [first, first - span, first - 2 * span]
    } else {
        [first, first + span, first + 2 * span]
    })
}

/// Batch-fetch the tick-array window of every (pool, direction) pair the
/// routes use, in first-seen order. A missing primary array drops the window
/// (and with it the routes that need it); missing continuation arrays stand in
/// as uninitialized. Pools with an unusable tick spacing are skipped the same
/// way.
async fn prefetch_tick_windows<F>(
    fetcher: &F,
    params: &TradeParams,
    routes: &[OrientedRoute],
    pools: &HashMap<Pubkey, Pool>,
) -> Result<HashMap<(Pubkey, bool), TickArrays>>
where
    F: Fetcher + ?Sized,
{
    let mut window_meta: Vec<((Pubkey, bool), [i32; 3])> = Vec::new();
    let mut seen = HashSet::new();
    for route in routes {
        for (pool_address, a_to_b) in route.pools.iter().zip(&route.a_to_b) {
            let key = (*pool_address, *a_to_b);
            if !seen.insert(key) {
                continue;
            }
            let pool = &pools[pool_address];
            match tick_array_window_starts(pool.tick_current_index, pool.tick_spacing, *a_to_b) {
                Ok(starts) => window_meta.push((key, starts)),
                Err(error) => {
                    debug!(pool = %key.0, error, "unusable tick spacing, skipping window");
                }
            }
        }
    }

    let mut addresses = Vec::with_capacity(window_meta.len() * 3);
    for ((pool_address, _), starts) in &window_meta {
        for start in starts {
            addresses.push(tick_array_address(&params.program_id, pool_address, *start));
        }
    }

    let fetched = fetcher.list_tick_arrays(&addresses, true).await?;

    let mut windows = HashMap::new();
    for (index, (key, starts)) in window_meta.iter().enumerate() {
        let chunk = &fetched[index * 3..index * 3 + 3];
        let Some(primary) = chunk[0].clone() else {
            debug!(pool = %key.0, a_to_b = key.1, "primary tick array not found");
            continue;
        };
        let second = chunk[1]
            .clone()
            .unwrap_or_else(|| TickArray::uninitialized(starts[1]));
        let third = chunk[2]
            .clone()
            .unwrap_or_else(|| TickArray::uninitialized(starts[2]));
        windows.insert(*key, TickArrays::Three(primary, second, third));
    }
    Ok(windows)
}
