pub mod source;

pub use crate::source::{
    connect, format_units_truncated, parse_amount, ClientConfig, ClientError, ContractHandle,
    ExchangeApi, PriceClient, RpcExchange,
};
