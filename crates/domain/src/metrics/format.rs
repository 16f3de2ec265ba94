/// Presentation variants of [`format_address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressStyle {
    /// Wallet addresses: 6 leading, 4 trailing characters.
    Wallet,
    /// Reward token contracts: 8 leading, 6 trailing characters.
    RewardToken,
    /// Wide tables: 10 leading, 6 trailing characters.
    Wide,
}

impl AddressStyle {
    #[must_use]
    pub fn lengths(&self) -> (usize, usize) {
        match self {
            Self::Wallet => (6, 4),
            Self::RewardToken => (8, 6),
            Self::Wide => (10, 6),
        }
    }

    pub fn format(&self, addr: &str) -> String {
        let (head, tail) = self.lengths();
        format_address(addr, head, tail)
    }
}

/// Shortens `addr` to `head...tail`. Addresses no longer than
/// `head_len + tail_len` characters are returned unchanged.
pub fn format_address(addr: &str, head_len: usize, tail_len: usize) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= head_len + tail_len {
        return addr.to_string();
    }
    let head: String = chars[..head_len].iter().collect();
    let tail: String = chars[chars.len() - tail_len..].iter().collect();
    format!("{head}...{tail}")
}

/// Formats a USD amount with a magnitude suffix, e.g. `$12.3M`.
pub fn format_usd_compact(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    if abs >= 1e9 {
        format!("{sign}${:.1}B", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{sign}${:.1}M", abs / 1e6)
    } else if abs >= 1e3 {
        format!("{sign}${:.1}K", abs / 1e3)
    } else {
        format!("{sign}${:.2}", abs)
    }
}
