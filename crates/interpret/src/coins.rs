//! For representing a nanocoin value to a human.

/// Nanocoin per coin.
pub const NANO: i64 = 1_000_000_000;
pub const SYMBOL: &str = "TON";

/// Exact amount in coins with trailing zeros removed.
///
/// E.g., 1_500_000_000 -> "1.5 TON", 1 -> "0.000000001 TON". Integer
/// arithmetic only.
pub fn to_coins_pretty(nano: i64) -> String {
    format!("{} {SYMBOL}", to_coins(nano))
}

/// Like [`to_coins_pretty`] without the symbol.
pub fn to_coins(nano: i64) -> String {
    let sign = if nano < 0 { "-" } else { "" };
    let abs = nano.unsigned_abs();
    let whole = abs / NANO as u64;
    let fraction = abs % NANO as u64;
    if fraction == 0 {
        return format!("{sign}{whole}");
    }
    let digits = format!("{fraction:09}");
    format!("{sign}{whole}.{}", digits.trim_end_matches('0'))
}

/// Jetton amount in base units, decimals are unknown to the summarizer.
pub fn to_jettons_pretty(amount: u128, symbol: Option<&str>) -> String {
    match symbol {
        Some(symbol) => format!("{amount} {symbol}"),
        None => format!("{amount} jettons"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_coins_pretty() {
        assert_eq!(to_coins_pretty(0), "0 TON");
        assert_eq!(to_coins_pretty(1_000_000_000), "1 TON");
        assert_eq!(to_coins_pretty(1_500_000_000), "1.5 TON");
        assert_eq!(to_coins_pretty(25_558_833_280), "25.55883328 TON");
        assert_eq!(to_coins_pretty(1), "0.000000001 TON");
        assert_eq!(to_coins_pretty(-12_000_000), "-0.012 TON");
        assert_eq!(to_coins(i64::MIN), "-9223372036.854775808");
    }

    #[test]
    fn test_to_jettons_pretty() {
        assert_eq!(to_jettons_pretty(500, None), "500 jettons");
        assert_eq!(to_jettons_pretty(500, Some("USDT")), "500 USDT");
    }
}
