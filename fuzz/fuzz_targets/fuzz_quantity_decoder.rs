//! Fuzz target: JSON-RPC hex quantity and data decoders
//!
//! Node responses are untrusted text. The decoders must reject anything
//! malformed with an error and never panic. Any quantity that decodes must
//! survive a re-encode unchanged in value.
//!
//! cargo fuzz run fuzz_quantity_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartsensor::rpc::codec::{decode_data, decode_quantity, encode_data, encode_quantity};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(value) = decode_quantity(text) {
        let again = decode_quantity(&encode_quantity(value)).expect("canonical form decodes");
        assert_eq!(value, again);
    }

    if let Ok(bytes) = decode_data(text) {
        assert_eq!(decode_data(&encode_data(&bytes)).ok(), Some(bytes));
    }
});
