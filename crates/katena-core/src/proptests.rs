#[cfg(test)]
mod tests {
    use katena_crypto::{PrivateKeyEd25519, PublicKeyEd25519, PublicKeyX25519};
    use proptest::prelude::*;

    use crate::clock::SystemClock;
    use crate::codec::{decode_tx, decode_tx_data, encode_tx, encode_tx_data, signing_bytes};
    use crate::tx::{SignerIdentity, Tx};
    use crate::txdata::{
        CertificateEd25519V1, CertificateRawV1, KeyCreateV1, KeyRevokeV1, KeyRotateV1,
        SecretNaclBoxV1, TxData,
    };

    fn id() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_\\-\"\\\\ é]{0,24}"
    }

    fn bytes() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(any::<u8>(), 0..96)
    }

    fn tx_data() -> impl Strategy<Value = TxData> {
        prop_oneof![
            (id(), bytes()).prop_map(|(id, value)| CertificateRawV1::new(id, value).into()),
            (id(), any::<[u8; 32]>(), bytes()).prop_map(|(id, key, sig)| {
                let signer = PublicKeyEd25519::from_bytes(&key).unwrap();
                CertificateEd25519V1::new(id, signer, sig).into()
            }),
            (id(), any::<[u8; 32]>(), bytes(), bytes()).prop_map(|(id, key, nonce, content)| {
                let sender = PublicKeyX25519::from_bytes(&key).unwrap();
                SecretNaclBoxV1::new(id, sender, nonce, content).into()
            }),
            (id(), any::<[u8; 32]>(), "[a-z_]{1,16}").prop_map(|(id, key, role)| {
                let public_key = PublicKeyEd25519::from_bytes(&key).unwrap();
                KeyCreateV1::new(id, public_key, role).into()
            }),
            (id(), any::<[u8; 32]>()).prop_map(|(id, key)| {
                let public_key = PublicKeyEd25519::from_bytes(&key).unwrap();
                KeyRotateV1::new(id, public_key).into()
            }),
            id().prop_map(|id| KeyRevokeV1::new(id).into()),
        ]
    }

    /// Compact JSON object with members in reverse-sorted order, so the
    /// text is never what a re-serialized map would produce.
    fn opaque_object() -> impl Strategy<Value = String> {
        prop::collection::btree_map("[a-z_]{1,8}", any::<i64>(), 0..6).prop_map(|members| {
            let body: Vec<String> = members
                .iter()
                .rev()
                .map(|(k, v)| format!("\"{k}\":{v}"))
                .collect();
            format!("{{{}}}", body.join(","))
        })
    }

    proptest! {
        #[test]
        fn test_variant_round_trip(data in tx_data()) {
            let json = encode_tx_data(&data).unwrap();
            prop_assert_eq!(decode_tx_data(&json).unwrap(), data);
        }

        #[test]
        fn test_unknown_tag_round_trip(
            tag in "zz[a-z]{1,8}\\.[a-z_]{1,8}\\.v[0-9]",
            value in opaque_object(),
            value_first in any::<bool>(),
            ws in "[ \n\t]{0,3}"
        ) {
            let spaced = value.replace(',', &format!(",{ws}")).replace(':', &format!("{ws}:"));
            let type_member = format!(r#"{ws}"type"{ws}:{ws}"{tag}""#);
            let value_member = format!(r#"{ws}"value":{ws}{spaced}{ws}"#);
            let blob = if value_first {
                format!("{{{value_member},{type_member}{ws}}}")
            } else {
                format!("{{{type_member},{value_member}}}")
            };

            let data = decode_tx_data(&blob).unwrap();
            prop_assert!(data.is_unknown());
            prop_assert!(data.state_ids("abcdef").is_empty());
            prop_assert_eq!(encode_tx_data(&data).unwrap(), blob);
            let fields = data.encode_fields().unwrap();
            prop_assert_eq!(fields.get(), value.as_str());
        }

        #[test]
        fn test_signing_bytes_ignore_input_member_order(
            id in "[a-z0-9]{1,16}",
            value in bytes(),
            nonce_time in "[0-9T:.\\-]{1,27}Z"
        ) {
            let encoded = katena_crypto::encoding::to_base64(&value);
            let forward = format!(
                r#"{{"type":"certify.certificate.raw.v1","value":{{"id":"{id}","value":"{encoded}"}}}}"#
            );
            let backward = format!(
                r#"{{"value":{{"value":"{encoded}","id":"{id}"}},"type":"certify.certificate.raw.v1"}}"#
            );
            let a = decode_tx_data(&forward).unwrap();
            let b = decode_tx_data(&backward).unwrap();

            let bytes_a = signing_bytes("katena-chain-test", &nonce_time, &a).unwrap();
            let bytes_b = signing_bytes("katena-chain-test", &nonce_time, &b).unwrap();
            prop_assert_eq!(&bytes_a, &bytes_b);
            prop_assert_eq!(
                bytes_a,
                signing_bytes("katena-chain-test", &nonce_time, &a).unwrap()
            );
        }

        #[test]
        fn test_decoded_envelope_verifies(seed in any::<[u8; 32]>(), data in tx_data()) {
            let key = PrivateKeyEd25519::from_seed(&seed);
            let tx = Tx::build_and_sign(
                data,
                "katena-chain-test",
                SignerIdentity::PublicKey(key.public_key()),
                &key,
                &SystemClock,
            )
            .unwrap();

            let decoded = decode_tx(&encode_tx(&tx).unwrap()).unwrap();
            prop_assert!(decoded.verify_embedded_signer("katena-chain-test").is_ok());
            prop_assert_eq!(decoded, tx);
        }
    }
}
