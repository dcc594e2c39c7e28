use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Knowledge base partitions, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Device register maps
    #[default]
    Device,
    /// Protocol reference data
    Protocol,
    /// Troubleshooting entries
    Troubleshoot,
}

impl Domain {
    /// All domains, in the order ties are resolved
    pub const ALL: [Domain; 3] = [Domain::Device, Domain::Protocol, Domain::Troubleshoot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Device => "device",
            Domain::Protocol => "protocol",
            Domain::Troubleshoot => "troubleshoot",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Domain::ALL
            .into_iter()
            .find(|domain| domain.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Unknown domain: {s}"))
    }
}

/// Keywords that vote for each domain, matched as lowercase substrings
pub const DOMAIN_KEYWORDS: &[(Domain, &[&str])] = &[
    (
        Domain::Device,
        &[
            "inverter", "meter", "plc", "sensor", "solis", "huawei", "sma", "growatt", "register",
            "modbus",
        ],
    ),
    (
        Domain::Protocol,
        &[
            "protocol", "tcp", "rtu", "iec104", "bacnet", "melsec", "opc", "dnp3", "serial",
            "ethernet",
        ],
    ),
    (
        Domain::Troubleshoot,
        &[
            "error",
            "timeout",
            "crc",
            "no response",
            "fail",
            "issue",
            "problem",
            "fix",
            "wrong",
            "debug",
        ],
    ),
];

/// Count how many of `keywords` appear anywhere in an already lowercased query
fn keyword_hits(query_lower: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| query_lower.contains(*keyword))
        .count()
}

/// Guess the most relevant domain for a free-text query
///
/// The domain with the most keyword hits wins. On a tie the earlier domain in
/// [`DOMAIN_KEYWORDS`] wins, and a query with no hits at all maps to
/// [`Domain::Device`].
pub fn detect_domain(query: &str) -> Domain {
    let query_lower = query.to_lowercase();

    let mut best = Domain::default();
    let mut best_hits = 0;
    for (domain, keywords) in DOMAIN_KEYWORDS {
        let hits = keyword_hits(&query_lower, keywords);
        if hits > best_hits {
            best = *domain;
            best_hits = hits;
        }
    }

    debug!("Detected domain '{}' ({} keyword hits)", best, best_hits);
    best
}
