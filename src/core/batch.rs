//! Bounded per-symbol fan-out shared by the summary and quote readers.

use futures::{StreamExt, stream};

/// Run `per_symbol` once for every requested symbol and return the outputs in
/// request order.
///
/// A single symbol runs inline with no pool overhead. Multiple symbols run
/// through a bounded `buffer_unordered` pool of `limit` in-flight calls;
/// completion order is irrelevant because results are reassembled by request
/// index. The closure is infallible by construction: per-symbol failures must
/// be folded into its output value, which is what keeps one symbol's failure
/// from disturbing its siblings.
pub(crate) async fn run_per_symbol<T, F, Fut>(symbols: Vec<String>, limit: usize, per_symbol: F) -> Vec<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = T>,
{
    if symbols.len() == 1 {
        let symbol = symbols.into_iter().next().expect("one symbol");
        return vec![per_symbol(symbol).await];
    }

    let tagged = symbols.into_iter().enumerate().map(|(idx, symbol)| {
        let fut = per_symbol(symbol);
        async move { (idx, fut.await) }
    });

    let mut done: Vec<(usize, T)> = stream::iter(tagged)
        .buffer_unordered(limit.max(1))
        .collect()
        .await;
    done.sort_by_key(|(idx, _)| *idx);
    done.into_iter().map(|(_, out)| out).collect()
}
