//! Integration tests for request signing
//!
//! Covers order independence, sensitivity to single-field changes, and the
//! sign → verify round trip including tampering and truncation.

use nlmarket_common::crypto::{Signer, SIGNATURE_FIELD};
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("test value must be an object")
}

fn signed(signer: &Signer, fields: &Map<String, Value>) -> Map<String, Value> {
    let mut envelope = fields.clone();
    envelope.insert(SIGNATURE_FIELD.to_string(), Value::String(signer.sign(fields)));
    envelope
}

/// Insertion order of keys never changes the signature.
#[test]
fn signature_is_invariant_under_key_order() {
    let signer = Signer::new("secret");

    let mut forward = Map::new();
    let mut backward = Map::new();
    let pairs = [
        ("a", json!(1)),
        ("id", json!("req-1")),
        ("user_id", json!("demo")),
        ("public", json!(true)),
        ("z", json!(2)),
    ];
    for (key, value) in &pairs {
        forward.insert((*key).to_string(), value.clone());
    }
    for (key, value) in pairs.iter().rev() {
        backward.insert((*key).to_string(), value.clone());
    }

    assert_eq!(signer.sign(&forward), signer.sign(&backward));
    assert_eq!(
        signer.sign(&object(json!({ "a": 1, "z": 2 }))),
        signer.sign(&object(json!({ "z": 2, "a": 1 })))
    );
}

/// Changing one value or the secret changes the digest.
#[test]
fn signature_changes_with_any_field_or_secret() {
    let signer = Signer::new("secret");
    let base = signer.sign(&object(json!({ "foo": 1, "bar": "x" })));

    assert_ne!(base, signer.sign(&object(json!({ "foo": 2, "bar": "x" }))));
    assert_ne!(base, signer.sign(&object(json!({ "foo": 1, "bar": "y" }))));
    assert_ne!(base, Signer::new("other").sign(&object(json!({ "foo": 1, "bar": "x" }))));
}

/// A freshly signed envelope verifies.
#[test]
fn sign_then_verify_round_trip() {
    let signer = Signer::new("supersecret");
    let fields = object(json!({
        "id": "0b8f5d8e-1c1e-4b7a-9d0e-9a3c2b1f0e11",
        "user_id": "demo",
        "integration_id": 7,
        "username": "someUser",
        "amount": 100,
    }));

    assert!(signer.verify(&signed(&signer, &fields)));
}

/// Mutating, adding, or removing a field after signing invalidates it.
#[test]
fn verify_fails_after_tampering() {
    let signer = Signer::new("supersecret");
    let fields = object(json!({ "id": 1, "user_id": "demo", "amount": 100 }));
    let envelope = signed(&signer, &fields);

    let mut mutated = envelope.clone();
    mutated.insert("amount".into(), json!(1000));
    assert!(!signer.verify(&mutated));

    let mut extended = envelope.clone();
    extended.insert("integration_id".into(), json!(7));
    assert!(!signer.verify(&extended));

    let mut reduced = envelope;
    reduced.remove("user_id");
    assert!(!signer.verify(&reduced));
}

/// Truncated or altered signatures are rejected.
#[test]
fn verify_fails_for_altered_signature() {
    let signer = Signer::new("supersecret");
    let fields = object(json!({ "id": 1, "user_id": "demo" }));
    let signature = signer.sign(&fields);

    let mut truncated = fields.clone();
    truncated.insert(SIGNATURE_FIELD.into(), json!(signature[..62].to_string()));
    assert!(!signer.verify(&truncated));

    let mut flipped_digit = signature.clone();
    let last = if flipped_digit.ends_with('0') { '1' } else { '0' };
    flipped_digit.pop();
    flipped_digit.push(last);
    let mut altered = fields.clone();
    altered.insert(SIGNATURE_FIELD.into(), json!(flipped_digit));
    assert!(!signer.verify(&altered));

    let foreign = Signer::new("other").sign(&fields);
    let mut wrong_secret = fields;
    wrong_secret.insert(SIGNATURE_FIELD.into(), json!(foreign));
    assert!(!signer.verify(&wrong_secret));
}
