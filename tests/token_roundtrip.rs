//! End-to-end token properties across all supported algorithms.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use saltstamp::{
    sign, sign_at, unsign, unsign_at, Algorithm, Compression, Key, SignOptions, TokenError,
    UnsignOptions, SALT_LEN,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    roles: Vec<String>,
    admin: bool,
}

fn sample_session() -> Session {
    Session {
        user: "alice".into(),
        roles: vec!["reader".into(), "writer".into()],
        admin: false,
    }
}

fn roundtrip(alg: Algorithm, signing_key: &Key, verifying_key: &Key) {
    let session = sample_session();
    let wire = sign(&session, signing_key, &SignOptions::new(alg)).unwrap();
    let decoded: Session = unsign(&wire, verifying_key, &UnsignOptions::new(alg)).unwrap();
    assert_eq!(decoded, session, "{alg} round trip");
}

#[test]
fn hs256_roundtrip() {
    let key = Key::secret(b"shared-secret-for-hs256".as_slice());
    roundtrip(Algorithm::HS256, &key, &key);
}

#[test]
fn hs512_roundtrip() {
    let key = Key::secret(b"shared-secret-for-hs512".as_slice());
    roundtrip(Algorithm::HS512, &key, &key);
}

#[test]
fn rsa_roundtrips() {
    let private_key = rsa::RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
    let public_key = private_key.to_public_key();
    let signing_key = Key::rsa_private(private_key);
    let verifying_key = Key::rsa_public(public_key);

    for alg in [
        Algorithm::RS256,
        Algorithm::RS512,
        Algorithm::PS256,
        Algorithm::PS512,
    ] {
        roundtrip(alg, &signing_key, &verifying_key);
    }
}

#[test]
fn es256_roundtrip() {
    let signing = p256::ecdsa::SigningKey::random(&mut OsRng);
    let verifying = *signing.verifying_key();
    roundtrip(
        Algorithm::ES256,
        &Key::p256_private(signing),
        &Key::p256_public(verifying),
    );
}

#[test]
fn es512_roundtrip() {
    let signing = p521::ecdsa::SigningKey::random(&mut OsRng);
    let verifying = p521::ecdsa::VerifyingKey::from(&signing);
    roundtrip(
        Algorithm::ES512,
        &Key::p521_private(signing),
        &Key::p521_public(verifying),
    );
}

#[test]
fn compression_independence() {
    // The unsign side never knows which codec was used; decoding must work
    // for all of them through the same options.
    let key = Key::secret(b"compression-test".as_slice());
    let session = sample_session();

    for compression in [Compression::None, Compression::Zlib, Compression::Zstd] {
        let options = SignOptions::default().compression(compression);
        let wire = sign(&session, &key, &options).unwrap();
        let decoded: Session = unsign(&wire, &key, &UnsignOptions::default()).unwrap();
        assert_eq!(decoded, session, "codec {compression:?}");
    }
}

/// Flip one bit in the decoded bytes of segment `index` and re-encode.
fn tamper(wire: &str, index: usize) -> String {
    let mut segments: Vec<Vec<u8>> = wire
        .split('.')
        .map(|s| URL_SAFE_NO_PAD.decode(s).unwrap())
        .collect();
    segments[index][0] ^= 0x01;
    segments
        .iter()
        .map(|bytes| URL_SAFE_NO_PAD.encode(bytes))
        .collect::<Vec<_>>()
        .join(".")
}

#[test]
fn tampering_any_segment_breaks_the_signature() {
    let key = Key::secret(b"tamper-test".as_slice());
    let wire = sign(&sample_session(), &key, &SignOptions::default()).unwrap();

    for (index, segment) in ["input", "signature", "salt", "stamp"].iter().enumerate() {
        let forged = tamper(&wire, index);
        let result: Result<Session, _> = unsign(&forged, &key, &UnsignOptions::default());
        assert!(
            matches!(result, Err(TokenError::BadSignature)),
            "bit flip in {segment} segment must fail verification"
        );
    }
}

#[test]
fn expiry_boundary_is_non_strict() {
    let key = Key::secret(b"expiry-test".as_slice());
    let now = 1_700_000_000;
    let wire = sign_at(
        &sample_session(),
        &key,
        &SignOptions::default(),
        [3u8; SALT_LEN],
        now - 100,
    )
    .unwrap();

    // Exactly max_age old: passes.
    let pass = UnsignOptions::default().max_age(Duration::from_secs(100));
    let decoded: Session = unsign_at(&wire, &key, &pass, now).unwrap();
    assert_eq!(decoded, sample_session());

    // One second tighter: expired, carrying the configured limit.
    let fail = UnsignOptions::default().max_age(Duration::from_secs(99));
    let result: Result<Session, _> = unsign_at(&wire, &key, &fail, now);
    assert!(matches!(
        result,
        Err(TokenError::Expired { age: 100, max_age: 99 })
    ));
}

#[test]
fn malformed_shapes_are_not_signature_failures() {
    let key = Key::secret(b"shape-test".as_slice());
    let wire = sign(&sample_session(), &key, &SignOptions::default()).unwrap();

    let three = wire.rsplit_once('.').unwrap().0;
    let five = format!("{wire}.extra");

    for broken in [three, five.as_str()] {
        let result: Result<Session, _> = unsign(broken, &key, &UnsignOptions::default());
        let err = result.unwrap_err();
        assert!(err.is_malformed(), "got {err:?} for {broken:?}");
    }
}

#[test]
fn repeated_signing_is_non_deterministic_but_decodes_identically() {
    let key = Key::secret(b"salt-test".as_slice());
    let session = sample_session();

    let w1 = sign(&session, &key, &SignOptions::default()).unwrap();
    let w2 = sign(&session, &key, &SignOptions::default()).unwrap();
    assert_ne!(w1, w2);

    let d1: Session = unsign(&w1, &key, &UnsignOptions::default()).unwrap();
    let d2: Session = unsign(&w2, &key, &UnsignOptions::default()).unwrap();
    assert_eq!(d1, session);
    assert_eq!(d2, session);
}

#[test]
fn algorithm_mismatch_fails_even_with_same_key_bytes() {
    let key = Key::secret(b"same-bytes-both-sides".as_slice());
    let wire = sign(&sample_session(), &key, &SignOptions::new(Algorithm::HS256)).unwrap();

    let result: Result<Session, _> = unsign(&wire, &key, &UnsignOptions::new(Algorithm::HS512));
    assert!(matches!(result, Err(TokenError::BadSignature)));
}

#[test]
fn verifying_with_the_wrong_public_key_fails() {
    let signing = p256::ecdsa::SigningKey::random(&mut OsRng);
    let other = p256::ecdsa::SigningKey::random(&mut OsRng);

    let wire = sign(
        &sample_session(),
        &Key::p256_private(signing),
        &SignOptions::new(Algorithm::ES256),
    )
    .unwrap();

    let result: Result<Session, _> = unsign(
        &wire,
        &Key::p256_public(*other.verifying_key()),
        &UnsignOptions::new(Algorithm::ES256),
    );
    assert!(matches!(result, Err(TokenError::BadSignature)));
}
