use alloy::{
    primitives::{Address, Bytes, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    transports::http::reqwest::Url,
};
use async_trait::async_trait;
use log::{debug, error};
use std::sync::Arc;

use crate::source::{
    amount_in_price_calldata, amount_out_price_calldata, build_call,
    decode_amount_in_price_response, decode_amount_out_price_response,
    decode_estimate_lp_token_response, decode_estimate_out_token_response,
    estimate_lp_token_calldata, estimate_out_token_calldata, format_units_truncated,
    parse_amount, ClientConfig, ClientError, EXCHANGE_SIGNATURES,
};

/// Read-only surface of the exchange contract. All pricing and liquidity
/// math happens on-chain; implementors only move integers across.
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    fn address(&self) -> Address;

    /// Signatures of every method the bound contract exposes.
    fn descriptor(&self) -> &'static [&'static str] {
        &EXCHANGE_SIGNATURES
    }

    async fn get_amount_out_price(
        &self,
        supply: U256,
        path: Vec<U256>,
    ) -> Result<Vec<U256>, ClientError>;

    async fn get_amount_in_price(
        &self,
        supply: U256,
        path: Vec<U256>,
    ) -> Result<Vec<U256>, ClientError>;

    async fn get_estimate_lp_token(
        &self,
        token0: U256,
        amount0: U256,
        token1: U256,
        amount1: U256,
    ) -> Result<U256, ClientError>;

    async fn get_estimate_out_token(
        &self,
        supply: U256,
        token0: U256,
        token1: U256,
    ) -> Result<U256, ClientError>;
}

pub type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
>;

pub type ContractHandle = PriceClient<RpcExchange<HttpProvider>>;

/// `ExchangeApi` backed by `eth_call` against a node.
pub struct RpcExchange<P> {
    provider: P,
    address: Address,
    endpoint: String,
}

impl<P: Provider> RpcExchange<P> {
    pub fn new(provider: P, address: Address, endpoint: impl Into<String>) -> Self {
        Self {
            provider,
            address,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, method: &str, calldata: Bytes) -> Result<Bytes, ClientError> {
        let tx = build_call(self.address, calldata);
        self.provider
            .call(tx)
            .await
            .map_err(|e| ClientError::from_transport(method, e))
    }
}

#[async_trait]
impl<P: Provider> ExchangeApi for RpcExchange<P> {
    fn address(&self) -> Address {
        self.address
    }

    async fn get_amount_out_price(
        &self,
        supply: U256,
        path: Vec<U256>,
    ) -> Result<Vec<U256>, ClientError> {
        let method = "getAmountOutPrice";
        let response = self
            .call(method, amount_out_price_calldata(supply, path))
            .await?;
        decode_amount_out_price_response(response).map_err(|e| ClientError::remote_call(method, e))
    }

    async fn get_amount_in_price(
        &self,
        supply: U256,
        path: Vec<U256>,
    ) -> Result<Vec<U256>, ClientError> {
        let method = "getAmountInPrice";
        let response = self
            .call(method, amount_in_price_calldata(supply, path))
            .await?;
        decode_amount_in_price_response(response).map_err(|e| ClientError::remote_call(method, e))
    }

    async fn get_estimate_lp_token(
        &self,
        token0: U256,
        amount0: U256,
        token1: U256,
        amount1: U256,
    ) -> Result<U256, ClientError> {
        let method = "getEstimateLpToken";
        let calldata = estimate_lp_token_calldata(token0, amount0, token1, amount1);
        let response = self.call(method, calldata).await?;
        decode_estimate_lp_token_response(response)
            .map_err(|e| ClientError::remote_call(method, e))
    }

    async fn get_estimate_out_token(
        &self,
        supply: U256,
        token0: U256,
        token1: U256,
    ) -> Result<U256, ClientError> {
        let method = "getEstimateOutToken";
        let calldata = estimate_out_token_calldata(supply, token0, token1);
        let response = self.call(method, calldata).await?;
        decode_estimate_out_token_response(response)
            .map_err(|e| ClientError::remote_call(method, e))
    }
}

/// Resolves `environment` to a node URL and binds the configured exchange.
///
/// Unknown environments fail before any transport is built. Building the HTTP
/// provider does not touch the network; use [`PriceClient::check_connection`]
/// for a round trip.
pub fn connect(config: &ClientConfig, environment: &str) -> Result<ContractHandle, ClientError> {
    let endpoint = config
        .endpoint(environment)
        .inspect_err(|e| error!("Error connecting to exchange: {}", e))?;
    config
        .validate()
        .inspect_err(|e| error!("Error connecting to exchange: {}", e))?;

    let url = endpoint.parse::<Url>().map_err(|e| {
        let err = ClientError::UnreachableEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        };
        error!("Error connecting to exchange: {}", err);
        err
    })?;

    debug!(
        "Binding exchange {} on '{}' ({})",
        config.exchange_address, environment, url
    );
    let provider = ProviderBuilder::new().on_http(url);
    let exchange = RpcExchange::new(provider, config.exchange_address, endpoint);

    Ok(PriceClient::new(exchange, config))
}

/// Quote operations over any `ExchangeApi`. Cloning shares the underlying
/// exchange binding.
pub struct PriceClient<E> {
    exchange: Arc<E>,
    lp_decimals: u8,
    lp_precision: usize,
}

impl<E> Clone for PriceClient<E> {
    fn clone(&self) -> Self {
        Self {
            exchange: self.exchange.clone(),
            lp_decimals: self.lp_decimals,
            lp_precision: self.lp_precision,
        }
    }
}

impl<E: ExchangeApi> PriceClient<E> {
    pub fn new(exchange: E, config: &ClientConfig) -> Self {
        Self {
            exchange: Arc::new(exchange),
            lp_decimals: config.lp_decimals,
            lp_precision: config.lp_precision,
        }
    }

    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    pub fn address(&self) -> Address {
        self.exchange.address()
    }

    pub fn descriptor(&self) -> &'static [&'static str] {
        self.exchange.descriptor()
    }

    /// Amounts along `[token_in, token_out]` for `input_amount`: index 0 is the
    /// input as echoed by the exchange, index 1 the output.
    pub async fn get_output_amounts(
        &self,
        wallet: Address,
        input_amount: &str,
        token_in: &str,
        token_out: &str,
    ) -> Result<Vec<String>, ClientError> {
        let result = async {
            let supply = parse_amount("input_amount", input_amount)?;
            let path = vec![
                parse_amount("token_in", token_in)?,
                parse_amount("token_out", token_out)?,
            ];
            debug!("getAmountOutPrice for {}: {} via {:?}", wallet, supply, path);
            self.exchange.get_amount_out_price(supply, path).await
        }
        .await;

        logged("getting amount out price", result).map(stringify_all)
    }

    /// Reverse quote: amounts needed to receive `output_amount` of `token_out`.
    pub async fn get_input_amounts(
        &self,
        wallet: Address,
        output_amount: &str,
        token_in: &str,
        token_out: &str,
    ) -> Result<Vec<String>, ClientError> {
        let result = async {
            let supply = parse_amount("output_amount", output_amount)?;
            let path = vec![
                parse_amount("token_in", token_in)?,
                parse_amount("token_out", token_out)?,
            ];
            debug!("getAmountInPrice for {}: {} via {:?}", wallet, supply, path);
            self.exchange.get_amount_in_price(supply, path).await
        }
        .await;

        logged("getting amount in price", result).map(stringify_all)
    }

    /// Raw output estimate as returned by the exchange, unscaled.
    pub async fn estimate_output_token(
        &self,
        wallet: Address,
        input_amount: &str,
        token_a: &str,
        token_b: &str,
    ) -> Result<String, ClientError> {
        let result = async {
            let supply = parse_amount("input_amount", input_amount)?;
            let token0 = parse_amount("token_a", token_a)?;
            let token1 = parse_amount("token_b", token_b)?;
            debug!("getEstimateOutToken for {}: {} {} -> {}", wallet, supply, token0, token1);
            self.exchange
                .get_estimate_out_token(supply, token0, token1)
                .await
        }
        .await;

        logged("estimating out token", result).map(|amount| amount.to_string())
    }

    /// LP tokens minted for a two-sided deposit, scaled down by the fixed-point
    /// factor and truncated to the configured number of fractional digits.
    pub async fn estimate_lp_tokens(
        &self,
        wallet: Address,
        token_a: &str,
        amount_a: &str,
        token_b: &str,
        amount_b: &str,
    ) -> Result<String, ClientError> {
        let result = async {
            let token0 = parse_amount("token_a", token_a)?;
            let amount0 = parse_amount("amount_a", amount_a)?;
            let token1 = parse_amount("token_b", token_b)?;
            let amount1 = parse_amount("amount_b", amount_b)?;
            debug!(
                "getEstimateLpToken for {}: {} of {} + {} of {}",
                wallet, amount0, token0, amount1, token1
            );
            let raw = self
                .exchange
                .get_estimate_lp_token(token0, amount0, token1, amount1)
                .await?;
            format_units_truncated(raw, self.lp_decimals, self.lp_precision)
        }
        .await;

        logged("estimating LP tokens", result)
    }
}

impl<P: Provider> PriceClient<RpcExchange<P>> {
    /// Round trip to the node; returns its chain id.
    pub async fn check_connection(&self) -> Result<u64, ClientError> {
        let result = self.exchange.provider.get_chain_id().await.map_err(|e| {
            ClientError::UnreachableEndpoint {
                url: self.exchange.endpoint.clone(),
                reason: e.to_string(),
            }
        });
        logged("checking node connection", result)
    }
}

fn logged<T>(operation: &str, result: Result<T, ClientError>) -> Result<T, ClientError> {
    result.inspect_err(|e| match e.revert_data() {
        Some(data) => error!("Error {}: {} (revert data: {})", operation, e, data),
        None => error!("Error {}: {}", operation, e),
    })
}

fn stringify_all(amounts: Vec<U256>) -> Vec<String> {
    amounts.iter().map(ToString::to_string).collect()
}
