use alloy::primitives::{address, Address, U256};

use crate::source::ONE_ETHER;

pub fn exchange_addr() -> Address {
    address!("dEF4BfeC8D2CB5ABE56E6D54665dDF78445D7112")
}

// Ganache accounts, also used as token ids.
pub fn sample_addrs() -> [Address; 5] {
    [
        address!("de9816Dd965F905a78134BFEE414Af1412cE39F1"),
        address!("387bE5Bb1FeCa2079CDB56E6364b3Eb8c1404A4B"),
        address!("4Cd136396b26373a4E6380ea7933C7D72D7b75C7"),
        address!("348E6d0f056A464ACC674DdcC83F577A0ee731C1"),
        address!("80475f4F1cE636Df2a34bF647c98bEc0AFFb63d6"),
    ]
}

/// 1, 0.5 and 2 tokens, in wei.
pub fn sample_amounts() -> [U256; 3] {
    [ONE_ETHER, ONE_ETHER / U256::from(2), ONE_ETHER * U256::from(2)]
}
