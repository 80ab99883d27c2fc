use crate::exchange::Exchange;

// ------------------------------------------------------------
// Source catalog
// ------------------------------------------------------------
//
// Static table mapping an exchange code to its fetch recipe.
//
// CONTRACT:
// - The table is ordered and versioned; downstream compatibility
//   tests pin its order, so entries must only be appended or
//   edited in place, never reshuffled.
// - Absence of an entry means "unsupported": the exchange is
//   silently excluded from results, never an error.
// - Every entry must have `column_index >= 1`; column 0 is the
//   vendor row label and is never extractable.

/// Fetch recipe for one exchange listing endpoint.
///
/// Vendors disagree on delimiter and on which column the symbols
/// start in, hence the per-entry convention. `rfc2396_only` opts the
/// source into the URL-safe symbol filter: `true` drops candidates
/// carrying characters outside `[A-Z0-9._-]`, `false` keeps every
/// normalized candidate.
#[derive(Debug, Clone, Copy)]
pub struct Source {
    pub url: &'static str,
    pub delimiter: char,
    pub column_index: i32,
    pub rfc2396_only: bool,
}

const fn eoddata(url: &'static str) -> Source {
    Source { url, delimiter: '\t', column_index: 1, rfc2396_only: false }
}

const fn euronext(url: &'static str) -> Source {
    Source { url, delimiter: ';', column_index: 2, rfc2396_only: false }
}

/// The fixed exchange -> source table, ~45 entries.
///
/// Kept as an ordered association slice rather than a map: lookup
/// volume is tiny and table order is part of the compatibility
/// surface.
pub static CATALOG: &[(Exchange, Source)] = &[
    (Exchange::Amex, Source {
        url: "https://www.nasdaqtrader.com/dynamic/symdir/otherlisted.txt",
        delimiter: '|',
        column_index: 1,
        rfc2396_only: true,
    }),
    (Exchange::Asx, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=ASX")),
    (Exchange::Ath, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=ATH")),
    (Exchange::Bru, euronext("https://live.euronext.com/en/pd_es/data/stocks/download?mics=XBRU")),
    (Exchange::Bse, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=BSE")),
    (Exchange::Bud, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=BUD")),
    (Exchange::Cph, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=CPH")),
    (Exchange::Dub, euronext("https://live.euronext.com/en/pd_es/data/stocks/download?mics=XDUB")),
    (Exchange::Fra, Source {
        url: "https://www.deutsche-boerse-cash-market.com/resource/instruments.csv",
        delimiter: ';',
        column_index: 1,
        rfc2396_only: false,
    }),
    (Exchange::Hel, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=HEL")),
    (Exchange::Hkex, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=HKEX")),
    (Exchange::Ist, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=IST")),
    (Exchange::Jkt, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=JKT")),
    (Exchange::Jse, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=JSE")),
    (Exchange::Klse, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=KLSE")),
    (Exchange::Krx, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=KRX")),
    (Exchange::Lis, euronext("https://live.euronext.com/en/pd_es/data/stocks/download?mics=XLIS")),
    (Exchange::Lse, Source {
        url: "https://www.londonstockexchange.com/reports/instruments.csv",
        delimiter: ',',
        column_index: 1,
        rfc2396_only: false,
    }),
    (Exchange::Mce, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=MCE")),
    (Exchange::Mcx, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=MCX")),
    (Exchange::Mex, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=MEX")),
    (Exchange::Mil, euronext("https://live.euronext.com/en/pd_es/data/stocks/download?mics=XMIL")),
    (Exchange::Nasdaq, Source {
        url: "https://www.nasdaqtrader.com/dynamic/symdir/nasdaqlisted.txt",
        delimiter: '|',
        column_index: 1,
        rfc2396_only: true,
    }),
    (Exchange::Nse, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=NSE")),
    (Exchange::Nyse, Source {
        url: "https://www.nasdaqtrader.com/dynamic/symdir/otherlisted.txt",
        delimiter: '|',
        column_index: 1,
        rfc2396_only: true,
    }),
    (Exchange::Nzx, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=NZX")),
    (Exchange::Osl, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=OSL")),
    (Exchange::Otcbb, Source {
        url: "https://www.nasdaqtrader.com/dynamic/symdir/otcbb.txt",
        delimiter: '|',
        column_index: 1,
        rfc2396_only: true,
    }),
    (Exchange::Par, euronext("https://live.euronext.com/en/pd_es/data/stocks/download?mics=XPAR")),
    (Exchange::Pra, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=PRA")),
    (Exchange::Sao, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=SAO")),
    (Exchange::Sgo, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=SGO")),
    (Exchange::Sgx, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=SGX")),
    (Exchange::She, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=SHE")),
    (Exchange::Shg, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=SHG")),
    (Exchange::Sto, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=STO")),
    (Exchange::Swx, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=SWX")),
    (Exchange::Tlv, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=TLV")),
    (Exchange::Tse, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=TSE")),
    (Exchange::Tsx, Source {
        url: "https://www.tsx.com/files/trading/interlisted-companies.txt",
        delimiter: '\t',
        column_index: 2,
        rfc2396_only: false,
    }),
    (Exchange::Tsxv, Source {
        url: "https://www.tsx.com/files/trading/venture-companies.txt",
        delimiter: '\t',
        column_index: 2,
        rfc2396_only: false,
    }),
    (Exchange::Twse, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=TWSE")),
    (Exchange::Vie, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=VIE")),
    (Exchange::War, eoddata("http://www.eoddata.com/Data/symbollist.aspx?e=WAR")),
];

/// Pure lookup. `None` means the exchange is unsupported.
pub fn lookup(exchange: Exchange) -> Option<&'static Source> {
    CATALOG
        .iter()
        .find(|(ex, _)| *ex == exchange)
        .map(|(_, source)| source)
}
