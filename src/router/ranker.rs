use crate::config::RouterOptions;
use crate::router::typedefs::{RouteQuote, SplitResult};
use solana_program::pubkey::Pubkey;
use std::cmp::Ordering;

/// Combine pruned per-percent quotes into ranked split sets.
///
/// Enumerates subsets of size `1..=max_splits` whose percents sum to exactly
/// 100 and whose members differ in their first pool, then orders them by the
/// trade objective with deterministic tie-breaks: fewer splits, shorter summed
/// route length, lexicographic pool addresses.
pub fn combine_split_sets(
    quotes_by_percent: &[Vec<RouteQuote>],
    options: &RouterOptions,
    amount_specified_is_input: bool,
) -> Vec<SplitResult> {
    let items: Vec<&RouteQuote> = quotes_by_percent.iter().flatten().collect();

    let mut results = Vec::new();
    let mut current: Vec<&RouteQuote> = Vec::new();
    collect_subsets(
        &items,
        0,
        100,
        options.max_splits,
        &mut current,
        &mut results,
    );

    results.sort_by(|a, b| compare_split_results(a, b, amount_specified_is_input));
    results.truncate(options.num_top_routes);
    results
}

fn collect_subsets<'a>(
    items: &[&'a RouteQuote],
    start: usize,
    remaining_percent: u16,
    splits_left: usize,
    current: &mut Vec<&'a RouteQuote>,
    results: &mut Vec<SplitResult>,
) {
    if remaining_percent == 0 {
        if let Some(result) = build_split_result(current) {
            results.push(result);
        }
        return;
    }
    if splits_left == 0 {
        return;
    }
    for index in start..items.len() {
        let quote = items[index];
        if quote.percent as u16 > remaining_percent {
            continue;
        }
        // routes sharing a first pool would trade against their own impact
        if current.iter().any(|chosen| chosen.route[0] == quote.route[0]) {
            continue;
        }
        current.push(quote);
        collect_subsets(
            items,
            index + 1,
            remaining_percent - quote.percent as u16,
            splits_left - 1,
            current,
            results,
        );
        current.pop();
    }
}

fn build_split_result(quotes: &[&RouteQuote]) -> Option<SplitResult> {
    let mut total_in: u64 = 0;
    let mut total_out: u64 = 0;
    for quote in quotes {
        total_in = total_in.checked_add(quote.amount_in)?;
        total_out = total_out.checked_add(quote.amount_out)?;
    }
    Some(SplitResult {
        quotes: quotes.iter().map(|quote| (*quote).clone()).collect(),
        percent: 100,
        total_in,
        total_out,
    })
}

fn compare_split_results(
    a: &SplitResult,
    b: &SplitResult,
    amount_specified_is_input: bool,
) -> Ordering {
    let objective = if amount_specified_is_input {
        b.total_out.cmp(&a.total_out)
    } else {
        a.total_in.cmp(&b.total_in)
    };
    objective
        .then_with(|| a.quotes.len().cmp(&b.quotes.len()))
        .then_with(|| summed_route_length(a).cmp(&summed_route_length(b)))
        .then_with(|| pool_address_key(a).cmp(&pool_address_key(b)))
}

fn summed_route_length(result: &SplitResult) -> usize {
    result.quotes.iter().map(|quote| quote.route.len()).sum()
}

fn pool_address_key(result: &SplitResult) -> Vec<Pubkey> {
    result
        .quotes
        .iter()
        .flat_map(|quote| quote.route.iter().copied())
        .collect()
}
