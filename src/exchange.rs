use std::fmt;
use std::str::FromStr;

use crate::error::CollectorError;

/// Closed enumeration of all listing venues this collector knows about.
///
/// IMPORTANT:
/// - The enumeration is closed: raw codes that do not match a variant
///   are rejected at parse time, never stored.
/// - Membership here does NOT imply a fetch recipe exists; that is the
///   catalog's call. An exchange without a catalog entry is simply
///   "unsupported" and never appears in a result map.
///
/// `Ord` follows variant order and gives the final market map its
/// stable iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Exchange {
    Amex,
    Asx,
    Ath,
    Bru,
    Bse,
    Bud,
    Bue,
    Cph,
    Cse,
    Dub,
    Fra,
    Hel,
    Hkex,
    Ist,
    Jkt,
    Jse,
    Kar,
    Klse,
    Krx,
    Lim,
    Lis,
    Lse,
    Mce,
    Mcx,
    Mex,
    Mil,
    Nasdaq,
    Nse,
    Nyse,
    Nzx,
    Osl,
    Otcbb,
    Par,
    Pra,
    Sao,
    Sgo,
    Sgx,
    She,
    Shg,
    Sto,
    Swx,
    Tlv,
    Tse,
    Tsx,
    Tsxv,
    Twse,
    Vie,
    War,
}

/// Every variant, in `Ord` order. Used by "download everything"
/// workflows and by the catalog coverage test.
const ALL: [Exchange; 48] = [
    Exchange::Amex,
    Exchange::Asx,
    Exchange::Ath,
    Exchange::Bru,
    Exchange::Bse,
    Exchange::Bud,
    Exchange::Bue,
    Exchange::Cph,
    Exchange::Cse,
    Exchange::Dub,
    Exchange::Fra,
    Exchange::Hel,
    Exchange::Hkex,
    Exchange::Ist,
    Exchange::Jkt,
    Exchange::Jse,
    Exchange::Kar,
    Exchange::Klse,
    Exchange::Krx,
    Exchange::Lim,
    Exchange::Lis,
    Exchange::Lse,
    Exchange::Mce,
    Exchange::Mcx,
    Exchange::Mex,
    Exchange::Mil,
    Exchange::Nasdaq,
    Exchange::Nse,
    Exchange::Nyse,
    Exchange::Nzx,
    Exchange::Osl,
    Exchange::Otcbb,
    Exchange::Par,
    Exchange::Pra,
    Exchange::Sao,
    Exchange::Sgo,
    Exchange::Sgx,
    Exchange::She,
    Exchange::Shg,
    Exchange::Sto,
    Exchange::Swx,
    Exchange::Tlv,
    Exchange::Tse,
    Exchange::Tsx,
    Exchange::Tsxv,
    Exchange::Twse,
    Exchange::Vie,
    Exchange::War,
];

impl Exchange {
    /// Canonical uppercase code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Exchange::Amex => "AMEX",
            Exchange::Asx => "ASX",
            Exchange::Ath => "ATH",
            Exchange::Bru => "BRU",
            Exchange::Bse => "BSE",
            Exchange::Bud => "BUD",
            Exchange::Bue => "BUE",
            Exchange::Cph => "CPH",
            Exchange::Cse => "CSE",
            Exchange::Dub => "DUB",
            Exchange::Fra => "FRA",
            Exchange::Hel => "HEL",
            Exchange::Hkex => "HKEX",
            Exchange::Ist => "IST",
            Exchange::Jkt => "JKT",
            Exchange::Jse => "JSE",
            Exchange::Kar => "KAR",
            Exchange::Klse => "KLSE",
            Exchange::Krx => "KRX",
            Exchange::Lim => "LIM",
            Exchange::Lis => "LIS",
            Exchange::Lse => "LSE",
            Exchange::Mce => "MCE",
            Exchange::Mcx => "MCX",
            Exchange::Mex => "MEX",
            Exchange::Mil => "MIL",
            Exchange::Nasdaq => "NASDAQ",
            Exchange::Nse => "NSE",
            Exchange::Nyse => "NYSE",
            Exchange::Nzx => "NZX",
            Exchange::Osl => "OSL",
            Exchange::Otcbb => "OTCBB",
            Exchange::Par => "PAR",
            Exchange::Pra => "PRA",
            Exchange::Sao => "SAO",
            Exchange::Sgo => "SGO",
            Exchange::Sgx => "SGX",
            Exchange::She => "SHE",
            Exchange::Shg => "SHG",
            Exchange::Sto => "STO",
            Exchange::Swx => "SWX",
            Exchange::Tlv => "TLV",
            Exchange::Tse => "TSE",
            Exchange::Tsx => "TSX",
            Exchange::Tsxv => "TSXV",
            Exchange::Twse => "TWSE",
            Exchange::Vie => "VIE",
            Exchange::War => "WAR",
        }
    }

    pub fn all() -> &'static [Exchange] {
        &ALL
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Exchange {
    type Err = CollectorError;

    /// Case-insensitive code lookup.
    ///
    /// Unknown codes are an error here; whether that error surfaces or
    /// the code is silently dropped is the caller's policy.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        ALL.iter()
            .find(|e| e.code() == code)
            .copied()
            .ok_or_else(|| CollectorError::Config(format!("unknown exchange code '{s}'")))
    }
}
