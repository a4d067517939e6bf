/// Static site configuration
pub struct Config {
    pub name: &'static str,
    pub tagline: &'static str,

    /// Financial-data service base URL, without trailing slash
    pub api_base: &'static str,

    pub default_ticker: &'static str,
    pub default_year: i32,

    /// Fiscal years offered in the year picker, newest first
    pub years: &'static [i32],

    /// Companies offered as quick picks
    pub tickers: &'static [&'static str],
}

pub static CONFIG: Config = Config {
    name: "Finsight",
    tagline: "Normalized financial statements from XBRL filings",

    api_base: "https://finsight-production-d5c1.up.railway.app",

    default_ticker: "NOVO-B",
    default_year: 2024,

    years: &[2024, 2023, 2022, 2021, 2020],

    tickers: &["NOVO-B", "AAPL", "MSFT", "NVDA"],
};
