//! Legacy (EIP-155) transaction signing.
//!
//! Cryptography is delegated to `k256` (secp256k1 ECDSA with RFC 6979
//! nonces and low-S normalisation), `sha3` (Keccak-256) and `rlp`.
//!
//! ```text
//! unsigned = rlp[nonce, gasPrice, gas, to, value, data, chainId, 0, 0]
//! sig      = sign(keccak256(unsigned))
//! signed   = rlp[nonce, gasPrice, gas, to, value, data, v, r, s]
//! v        = recovery_id + chainId * 2 + 35
//! ```

use k256::ecdsa::SigningKey;
use rlp::RlpStream;
use sha3::{Digest, Keccak256};

use crate::error::LedgerError;
use crate::rpc::codec::strip_0x;

/// Fields of a pre-EIP-1559 transaction. Amounts fit in 64 bits on the
/// development networks this recorder targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub nonce: u64,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub to: [u8; 20],
    pub value: u64,
    pub data: Vec<u8>,
    pub chain_id: u64,
}

pub struct LegacyTxSigner {
    key: SigningKey,
    address: [u8; 20],
}

impl LegacyTxSigner {
    /// Build a signer from a hex private key (`0x` prefix optional).
    pub fn from_hex(private_key: &str) -> Result<Self, LedgerError> {
        let bytes = hex::decode(strip_0x(private_key.trim()))
            .map_err(|e| LedgerError::Signing(format!("private key is not hex: {e}")))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|e| LedgerError::Signing(format!("invalid private key: {e}")))?;
        let address = address_of(&key);
        Ok(Self { key, address })
    }

    pub fn address(&self) -> [u8; 20] {
        self.address
    }

    /// Checksum-free lowercase `0x` address.
    pub fn address_hex(&self) -> String {
        format!("0x{}", hex::encode(self.address))
    }

    /// Sign and return the raw transaction bytes for `eth_sendRawTransaction`.
    pub fn sign(&self, tx: &LegacyTransaction) -> Result<Vec<u8>, LedgerError> {
        let digest = Keccak256::digest(signing_payload(tx));
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| LedgerError::Signing(e.to_string()))?;

        let rs = signature.to_bytes();
        let v = u64::from(recovery_id.to_byte()) + tx.chain_id * 2 + 35;

        let mut stream = RlpStream::new_list(9);
        append_body(&mut stream, tx);
        stream.append(&v);
        stream.append(&trim_leading_zeros(&rs[..32]));
        stream.append(&trim_leading_zeros(&rs[32..]));
        Ok(stream.out().to_vec())
    }
}

/// EIP-155 signing payload.
fn signing_payload(tx: &LegacyTransaction) -> Vec<u8> {
    let mut stream = RlpStream::new_list(9);
    append_body(&mut stream, tx);
    stream.append(&tx.chain_id);
    stream.append(&0u64);
    stream.append(&0u64);
    stream.out().to_vec()
}

fn append_body(stream: &mut RlpStream, tx: &LegacyTransaction) {
    stream.append(&tx.nonce);
    stream.append(&tx.gas_price);
    stream.append(&tx.gas_limit);
    stream.append(&tx.to.to_vec());
    stream.append(&tx.value);
    stream.append(&tx.data);
}

/// Big-endian scalar as an RLP integer: no leading zero bytes.
fn trim_leading_zeros(bytes: &[u8]) -> Vec<u8> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

/// Last 20 bytes of keccak256 over the uncompressed public key sans prefix.
fn address_of(key: &SigningKey) -> [u8; 20] {
    let point = key.verifying_key().to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}
