use alloy::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::SolCall,
};

use anyhow::{anyhow, Result};

sol! {
    function getAmountOutPrice(uint256 supply, uint256[] calldata path)
    external
    view
    returns (uint256[] memory amounts);

    function getAmountInPrice(uint256 supply, uint256[] calldata path)
    external
    view
    returns (uint256[] memory amounts);

    function getEstimateLpToken(uint256 token0, uint256 amount0, uint256 token1, uint256 amount1)
    external
    view
    returns (uint256 liquidity);

    function getEstimateOutToken(uint256 supply, uint256 token0, uint256 token1)
    external
    view
    returns (uint256 amountOut);

    function swapExactTokensForTokens(
        uint256 amountIn,
        uint256 amountOutMin,
        uint256[] calldata path,
        address to,
        uint256 deadline
    ) external returns (uint256[] memory amounts);
}

/// Human-readable form of every method the exchange exposes.
pub const EXCHANGE_SIGNATURES: [&str; 5] = [
    "function getAmountOutPrice(uint256 supply, uint256[] calldata path) external view returns (uint256[] memory)",
    "function getAmountInPrice(uint256 supply, uint256[] calldata path) external view returns (uint256[] memory)",
    "function getEstimateLpToken(uint256 token0, uint256 amount0, uint256 token1, uint256 amount1) external view returns (uint256)",
    "function getEstimateOutToken(uint256 supply, uint256 token0, uint256 token1) external view returns (uint256)",
    "function swapExactTokensForTokens(uint256 amountIn, uint256 amountOutMin, uint256[] calldata path, address to, uint256 deadline) external returns (uint256[] memory amounts)",
];

pub fn amount_out_price_calldata(supply: U256, path: Vec<U256>) -> Bytes {
    Bytes::from(getAmountOutPriceCall { supply, path }.abi_encode())
}

pub fn amount_in_price_calldata(supply: U256, path: Vec<U256>) -> Bytes {
    Bytes::from(getAmountInPriceCall { supply, path }.abi_encode())
}

pub fn estimate_lp_token_calldata(
    token0: U256,
    amount0: U256,
    token1: U256,
    amount1: U256,
) -> Bytes {
    Bytes::from(
        getEstimateLpTokenCall {
            token0,
            amount0,
            token1,
            amount1,
        }
        .abi_encode(),
    )
}

pub fn estimate_out_token_calldata(supply: U256, token0: U256, token1: U256) -> Bytes {
    Bytes::from(
        getEstimateOutTokenCall {
            supply,
            token0,
            token1,
        }
        .abi_encode(),
    )
}

// Mutating call, needs a signer. Encoded only, nothing in the client sends it.
pub fn swap_exact_tokens_calldata(
    amount_in: U256,
    amount_out_min: U256,
    path: Vec<U256>,
    to: Address,
    deadline: U256,
) -> Bytes {
    Bytes::from(
        swapExactTokensForTokensCall {
            amountIn: amount_in,
            amountOutMin: amount_out_min,
            path,
            to,
            deadline,
        }
        .abi_encode(),
    )
}

pub fn decode_amount_out_price_response(response: Bytes) -> Result<Vec<U256>> {
    match getAmountOutPriceCall::abi_decode_returns(&response, true) {
        Ok(decoded) => Ok(decoded.amounts),
        Err(e) => Err(anyhow!("'getAmountOutPrice' decode failed: {:?}", e)),
    }
}

pub fn decode_amount_in_price_response(response: Bytes) -> Result<Vec<U256>> {
    match getAmountInPriceCall::abi_decode_returns(&response, true) {
        Ok(decoded) => Ok(decoded.amounts),
        Err(e) => Err(anyhow!("'getAmountInPrice' decode failed: {:?}", e)),
    }
}

pub fn decode_estimate_lp_token_response(response: Bytes) -> Result<U256> {
    match getEstimateLpTokenCall::abi_decode_returns(&response, true) {
        Ok(decoded) => Ok(decoded.liquidity),
        Err(e) => Err(anyhow!("'getEstimateLpToken' decode failed: {:?}", e)),
    }
}

pub fn decode_estimate_out_token_response(response: Bytes) -> Result<U256> {
    match getEstimateOutTokenCall::abi_decode_returns(&response, true) {
        Ok(decoded) => Ok(decoded.amountOut),
        Err(e) => Err(anyhow!("'getEstimateOutToken' decode failed: {:?}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolValue;

    #[test]
    fn descriptor_matches_bindings() {
        let bound = [
            getAmountOutPriceCall::SIGNATURE,
            getAmountInPriceCall::SIGNATURE,
            getEstimateLpTokenCall::SIGNATURE,
            getEstimateOutTokenCall::SIGNATURE,
            swapExactTokensForTokensCall::SIGNATURE,
        ];
        for (signature, human) in bound.iter().zip(EXCHANGE_SIGNATURES.iter()) {
            let name = signature.split('(').next().unwrap();
            assert!(human.contains(&format!("function {}(", name)));
        }
        assert_eq!(
            getAmountOutPriceCall::SIGNATURE,
            "getAmountOutPrice(uint256,uint256[])"
        );
        assert_eq!(
            getEstimateLpTokenCall::SIGNATURE,
            "getEstimateLpToken(uint256,uint256,uint256,uint256)"
        );
    }

    #[test]
    fn calldata_starts_with_selector() {
        let calldata = estimate_out_token_calldata(U256::from(1), U256::from(2), U256::from(3));
        assert_eq!(&calldata[..4], getEstimateOutTokenCall::SELECTOR.as_slice());
        // selector + three static words
        assert_eq!(calldata.len(), 4 + 32 * 3);
    }

    #[test]
    fn swap_calldata_roundtrips_path() {
        let path = vec![U256::from(1), U256::from(2)];
        let calldata = swap_exact_tokens_calldata(
            U256::from(10),
            U256::from(9),
            path.clone(),
            Address::ZERO,
            U256::MAX,
        );
        let decoded = swapExactTokensForTokensCall::abi_decode(&calldata, true).unwrap();
        assert_eq!(decoded.path, path);
        assert_eq!(decoded.deadline, U256::MAX);
    }

    #[test]
    fn decodes_amounts_in_order() {
        let amounts = vec![U256::from(1_000_u64), U256::from(997_u64)];
        let response = Bytes::from((amounts.clone(),).abi_encode_params());
        assert_eq!(decode_amount_out_price_response(response).unwrap(), amounts);
    }

    #[test]
    fn decodes_single_estimate() {
        let response = Bytes::from(U256::from(42_u64).abi_encode());
        assert_eq!(
            decode_estimate_lp_token_response(response.clone()).unwrap(),
            U256::from(42_u64)
        );
        assert_eq!(
            decode_estimate_out_token_response(response).unwrap(),
            U256::from(42_u64)
        );
    }

    #[test]
    fn rejects_truncated_response() {
        let response = Bytes::from(vec![0u8; 16]);
        let err = decode_estimate_out_token_response(response).unwrap_err();
        assert!(err.to_string().contains("getEstimateOutToken"));
        assert!(decode_amount_in_price_response(Bytes::new()).is_err());
    }
}
