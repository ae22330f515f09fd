// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Crockford base-32 ("c32") and c32check encoding of Stacks addresses.

use sp_crypto_hashing::sha2_256;

const C32_CHARACTERS: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Encode bytes as c32, keeping one `0` per leading zero byte.
pub fn c32_encode(input: &[u8]) -> String {
    let mut result = Vec::with_capacity(input.len() * 8 / 5 + 1);
    let mut carry: u8 = 0;
    let mut carry_bits: u8 = 0;

    for &byte in input.iter().rev() {
        let low_bits_to_take = 5 - carry_bits;
        let low_bits = byte & ((1u8 << low_bits_to_take) - 1);
        let value = (low_bits << carry_bits) + carry;
        result.push(C32_CHARACTERS[value as usize]);

        carry_bits = carry_bits + 8 - 5;
        carry = byte >> (8 - carry_bits);

        if carry_bits >= 5 {
            result.push(C32_CHARACTERS[(carry & 0x1f) as usize]);
            carry_bits -= 5;
            carry >>= 5;
        }
    }

    if carry_bits > 0 {
        result.push(C32_CHARACTERS[carry as usize]);
    }

    // Drop the zero digits produced by the bit packing itself...
    while result.last() == Some(&C32_CHARACTERS[0]) {
        result.pop();
    }

    // ...and restore one per leading zero byte of the input.
    for _ in input.iter().take_while(|&&b| b == 0) {
        result.push(C32_CHARACTERS[0]);
    }

    result.reverse();
    // Every pushed byte comes from the ASCII alphabet.
    result.into_iter().map(char::from).collect()
}

/// c32check: `c32(version) ++ c32(data ++ checksum)` where the checksum is the
/// first four bytes of `sha256(sha256(version ++ data))`.
pub fn c32check_encode(version: u8, data: &[u8]) -> String {
    let mut payload = Vec::with_capacity(data.len() + 1);
    payload.push(version);
    payload.extend_from_slice(data);
    let checksum = sha2_256(&sha2_256(&payload));

    let mut body = data.to_vec();
    body.extend_from_slice(&checksum[..4]);

    let mut encoded = String::with_capacity(body.len() * 2);
    encoded.push(char::from(C32_CHARACTERS[(version & 0x1f) as usize]));
    encoded.push_str(&c32_encode(&body));
    encoded
}

/// Render a standard principal as an `S`-prefixed address.
pub fn c32_address(version: u8, hash160: &[u8; 20]) -> String {
    format!("S{}", c32check_encode(version, hash160))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c32_encode_small_values() {
        assert_eq!(c32_encode(&[]), "");
        assert_eq!(c32_encode(&[0x01]), "1");
        assert_eq!(c32_encode(&[0x1f]), "Z");
        assert_eq!(c32_encode(&[0x20]), "10");
        assert_eq!(c32_encode(&[0xff]), "7Z");
    }

    #[test]
    fn test_c32_encode_keeps_leading_zero_bytes() {
        assert_eq!(c32_encode(&[0x00]), "0");
        assert_eq!(c32_encode(&[0x00, 0x00, 0x01]), "001");
    }

    #[test]
    fn test_boot_addresses() {
        // Well known boot contract deployers (all-zero hash160).
        assert_eq!(c32_address(22, &[0u8; 20]), "SP000000000000000000002Q6VF78");
        assert_eq!(c32_address(26, &[0u8; 20]), "ST000000000000000000002AMW42H");
    }
}
