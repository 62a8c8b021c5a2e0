use crate::{Identity, IdentityPatch};

use chrono::Utc;
use googletest::prelude::*;

fn identity() -> Identity {
    let now = Utc::now();
    Identity {
        id: 7,
        email: "a@x.com".to_string(),
        name: "A".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_into_profile_keeps_public_fields() {
    let identity = identity();
    let created_at = identity.created_at;

    let profile = identity.into_profile();

    assert_that!(profile.id, eq(7));
    assert_that!(profile.email, eq("a@x.com"));
    assert_that!(profile.name, eq("A"));
    assert_that!(profile.created_at, eq(created_at));
}

#[test]
fn test_profile_json_has_no_password_field() {
    let json = serde_json::to_value(identity().into_profile()).unwrap();

    assert_that!(json.get("password_hash"), none());
    assert_that!(json.get("password"), none());
    assert_that!(json["email"].as_str(), some(eq("a@x.com")));
}

#[test]
fn test_debug_redacts_password_hash() {
    let rendered = format!("{:?}", identity());

    assert_that!(rendered.as_str(), contains_substring("<redacted>"));
    assert_that!(rendered.as_str(), not(contains_substring("argon2id")));
}

#[test]
fn test_identity_patch_is_empty() {
    let renamed = IdentityPatch {
        name: Some("B".to_string()),
        ..Default::default()
    };

    assert_that!(IdentityPatch::default().is_empty(), eq(true));
    assert_that!(renamed.is_empty(), eq(false));
}
