//! Market data provider clients

pub mod finnhub;

pub use finnhub::FinnhubClient;
