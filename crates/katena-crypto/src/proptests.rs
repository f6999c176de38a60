
#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::ed25519::PrivateKeyEd25519;
    use crate::encoding::{from_base64, to_base64};
    use crate::keys::KeyError;
    use crate::nacl::PrivateKeyX25519;

    fn signing_key_from_seed(seed: [u8; 32]) -> PrivateKeyEd25519 {
        let sign_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        PrivateKeyEd25519::from_bytes(&sign_key.to_keypair_bytes()).unwrap()
    }

    fn encryption_key_from_secret(secret: [u8; 32]) -> PrivateKeyX25519 {
        let public = x25519_dalek::PublicKey::from(&x25519_dalek::StaticSecret::from(secret));
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&secret);
        bytes[32..].copy_from_slice(public.as_bytes());
        PrivateKeyX25519::from_bytes(&bytes).unwrap()
    }

    proptest! {
        // verify(publicKeyOf(k), m, sign(k, m)) holds for every key pair
        #[test]
        fn test_signature_validity(
            seed in any::<[u8; 32]>(),
            message in any::<Vec<u8>>()
        ) {
            let key = signing_key_from_seed(seed);
            let signature = key.sign(&message);
            prop_assert!(key.public_key().verify(&message, &signature).is_ok());
        }

        #[test]
        fn test_public_key_derivation_is_pure(seed in any::<[u8; 32]>()) {
            let a = signing_key_from_seed(seed);
            let b = signing_key_from_seed(seed);
            prop_assert_eq!(a.public_key(), b.public_key());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn test_seal_open_inverse(
            sender_secret in any::<[u8; 32]>(),
            recipient_secret in any::<[u8; 32]>(),
            plaintext in any::<Vec<u8>>()
        ) {
            let sender = encryption_key_from_secret(sender_secret);
            let recipient = encryption_key_from_secret(recipient_secret);

            let sealed = sender.seal(&plaintext, &recipient.public_key()).unwrap();
            let opened = recipient
                .open(&sealed.ciphertext, &sender.public_key(), &sealed.nonce)
                .unwrap();
            prop_assert_eq!(opened, Some(plaintext));
        }

        #[test]
        fn test_open_with_unmatched_pair_is_none(
            plaintext in any::<Vec<u8>>()
        ) {
            let sender = PrivateKeyX25519::generate();
            let recipient = PrivateKeyX25519::generate();
            let stranger = PrivateKeyX25519::generate();

            let sealed = sender.seal(&plaintext, &recipient.public_key()).unwrap();
            let opened = stranger
                .open(&sealed.ciphertext, &sender.public_key(), &sealed.nonce)
                .unwrap();
            prop_assert!(opened.is_none());
        }

        #[test]
        fn test_signing_key_rejects_wrong_lengths(len in 0usize..128) {
            prop_assume!(len != 64);
            let result = PrivateKeyEd25519::from_bytes(&vec![0u8; len]);
            prop_assert_eq!(
                result.unwrap_err(),
                KeyError::InvalidKeyLength { expected: 64, got: len }
            );
        }

        #[test]
        fn test_base64_inverse(bytes in any::<Vec<u8>>()) {
            prop_assert_eq!(from_base64(&to_base64(&bytes)).unwrap(), bytes);
        }
    }
}
