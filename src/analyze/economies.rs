// src/analyze/economies.rs
//! Built-in table of currency-issuing economies the analyzer can attribute news to.
//!
//! Keywords are matched as whole token phrases (see `text::tokenize`), so
//! "people's bank of china" is written the way the tokenizer sees it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Economy {
    pub id: &'static str,
    pub name: &'static str,
    pub currency: &'static str,
    pub keywords: &'static [&'static str],
    pub major_pairs: &'static [&'static str],
}

pub const ECONOMIES: &[Economy] = &[
    Economy {
        id: "us",
        name: "United States",
        currency: "USD",
        keywords: &[
            "fed",
            "federal reserve",
            "fomc",
            "powell",
            "usa",
            "united states",
            "dollar",
            "greenback",
            "usd",
            "treasury",
            "treasuries",
            "nonfarm payrolls",
            "nfp",
            "wall street",
        ],
        major_pairs: &["EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "USD/CAD", "AUD/USD"],
    },
    Economy {
        id: "eurozone",
        name: "Eurozone",
        currency: "EUR",
        keywords: &[
            "ecb",
            "european central bank",
            "lagarde",
            "euro",
            "eurozone",
            "euro area",
            "eur",
            "bund",
            "bunds",
            "germany",
            "german",
        ],
        major_pairs: &["EUR/USD", "EUR/GBP", "EUR/JPY", "EUR/CHF"],
    },
    Economy {
        id: "uk",
        name: "United Kingdom",
        currency: "GBP",
        keywords: &[
            "boe",
            "bank of england",
            "bailey",
            "sterling",
            "pound",
            "gbp",
            "uk",
            "britain",
            "british",
            "gilts",
        ],
        major_pairs: &["GBP/USD", "EUR/GBP", "GBP/JPY"],
    },
    Economy {
        id: "japan",
        name: "Japan",
        currency: "JPY",
        keywords: &[
            "boj",
            "bank of japan",
            "ueda",
            "yen",
            "jpy",
            "japan",
            "japanese",
            "jgb",
            "jgbs",
        ],
        major_pairs: &["USD/JPY", "EUR/JPY", "GBP/JPY"],
    },
    Economy {
        id: "switzerland",
        name: "Switzerland",
        currency: "CHF",
        keywords: &[
            "snb",
            "swiss national bank",
            "swiss franc",
            "franc",
            "chf",
            "switzerland",
            "swiss",
        ],
        major_pairs: &["USD/CHF", "EUR/CHF"],
    },
    Economy {
        id: "canada",
        name: "Canada",
        currency: "CAD",
        keywords: &[
            "boc",
            "bank of canada",
            "macklem",
            "loonie",
            "canadian dollar",
            "cad",
            "canada",
            "canadian",
        ],
        major_pairs: &["USD/CAD", "CAD/JPY"],
    },
    Economy {
        id: "australia",
        name: "Australia",
        currency: "AUD",
        keywords: &[
            "rba",
            "reserve bank of australia",
            "bullock",
            "aussie",
            "australian dollar",
            "aud",
            "australia",
            "australian",
        ],
        major_pairs: &["AUD/USD", "AUD/JPY", "AUD/NZD"],
    },
    Economy {
        id: "new-zealand",
        name: "New Zealand",
        currency: "NZD",
        keywords: &[
            "rbnz",
            "reserve bank of new zealand",
            "kiwi",
            "new zealand dollar",
            "nzd",
            "new zealand",
        ],
        major_pairs: &["NZD/USD", "AUD/NZD"],
    },
    Economy {
        id: "china",
        name: "China",
        currency: "CNY",
        keywords: &[
            "pboc",
            "people s bank of china",
            "yuan",
            "renminbi",
            "cny",
            "cnh",
            "china",
            "chinese",
        ],
        major_pairs: &["USD/CNY"],
    },
];
