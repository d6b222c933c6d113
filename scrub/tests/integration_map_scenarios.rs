//! Scrubbing of dynamically typed maps nested inside records.
//!
//! Keyed maps are scrubbed by key: string entries are matched against the
//! policies under their own key, arrays are searched for nested objects, and
//! everything else in the map is left alone. Statically typed string maps are
//! never descended into.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use scrub::{FieldPolicies, FieldPolicy, JsonCodec, PartialMask, ScrubConfig, Scrubber, Walk};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Walk)]
#[serde(rename_all = "PascalCase")]
struct User {
    pub username: String,
    pub password: String,
    pub db_secrets: Vec<String>,
    #[serde(default)]
    pub map_data: Map<String, Value>,
    #[serde(default)]
    pub unsupported_map_data: HashMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Walk)]
#[serde(rename_all = "PascalCase")]
struct Users {
    pub secret: String,
    pub keys: Vec<String>,
    pub user_info: Vec<User>,
}

const TAG_86_LONG: &str = "84240002107004C1119054885C52A2555576F148AA";
const TAG_86_SHORT: &str = "84240000083AB8700FAE0CB0DD";
const TAG_91: &str = "CA3D8B21F20B5CEB0012";

fn map_data(tag_86: [&str; 2], tag_77: &str, tag_91: &str) -> Map<String, Value> {
    let value = json!({
        "72": [
            { "86": tag_86[0] },
            { "86": tag_86[1] },
            { "77": tag_77 },
        ],
        "91": tag_91,
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn user(username: &str, password: &str, db_secrets: [&str; 2], tag_value: &str) -> User {
    User {
        username: username.into(),
        password: password.into(),
        db_secrets: db_secrets.iter().map(ToString::to_string).collect(),
        map_data: map_data([TAG_86_LONG, TAG_86_SHORT], TAG_86_SHORT, tag_value),
        unsupported_map_data: HashMap::from([("91".to_string(), tag_value.to_string())]),
    }
}

fn users() -> Users {
    Users {
        secret: "secret_sshhh".into(),
        keys: vec!["key_1".into(), "key_2".into(), "key_3".into()],
        user_info: vec![
            user(
                "John Doe",
                "John_Doe's_Password",
                ["John's_db_secret_1", "John's_db_secret_2"],
                TAG_91,
            ),
            user(
                "Jane Doe",
                "Jane_Doe's_Password",
                ["Jane's_db_secret_1", "Jane's_db_secret_2"],
                TAG_91,
            ),
        ],
    }
}

fn policies() -> FieldPolicies {
    FieldPolicies::new()
        .with("password", FieldPolicy::full())
        .with("keys", FieldPolicy::full().with_symbol("."))
        .with("secret", FieldPolicy::full())
        .with("db_secrets", FieldPolicy::full())
        .with("91", FieldPolicy::full())
        .with("86", FieldPolicy::full())
}

fn assert_all_strategies(target: &Users, expected: &Users, scrubber: &Scrubber) {
    let codec = JsonCodec::new();
    let want = serde_json::to_string(expected).unwrap();

    let mut in_place = target.clone();
    assert_eq!(scrubber.scrub_in_place(&mut in_place, &codec).unwrap(), want);
    assert_eq!(&in_place, target);

    let mut receptacle = Users::default();
    assert_eq!(
        scrubber
            .scrub_into(Some(&mut receptacle), target, &codec)
            .unwrap(),
        want
    );
    assert_eq!(&receptacle, expected);
}

#[test]
fn test_nested_map_fixed_len() {
    let scrubber = Scrubber::with_policies(ScrubConfig::default(), policies());
    let mut expected = users();
    expected.secret = "********".into();
    expected.keys = vec!["........".into(); 3];
    for user in &mut expected.user_info {
        user.password = "********".into();
        user.db_secrets = vec!["********".into(); 2];
        user.map_data = map_data(["********", "********"], TAG_86_SHORT, "********");
    }
    assert_all_strategies(&users(), &expected, &scrubber);
}

#[test]
fn test_nested_map_vary_len() {
    let scrubber =
        Scrubber::with_policies(ScrubConfig::default().with_vary_len(true), policies());
    let mut expected = users();
    expected.secret = "*".repeat(12);
    expected.keys = vec![".....".into(); 3];
    for user in &mut expected.user_info {
        user.password = "*".repeat(19);
        user.db_secrets = vec!["*".repeat(18); 2];
        user.map_data = map_data(
            [&"*".repeat(TAG_86_LONG.len()), &"*".repeat(TAG_86_SHORT.len())],
            TAG_86_SHORT,
            &"*".repeat(TAG_91.len()),
        );
    }
    assert_all_strategies(&users(), &expected, &scrubber);
}

#[test]
fn test_nested_map_partial_mask() {
    let card = PartialMask::new(true, 10, 19, 6, 16, 4);
    let scrubber = Scrubber::with_policies(
        ScrubConfig::default().with_vary_len(true),
        policies()
            .with("91", FieldPolicy::full().with_symbol("*").with_partial(card))
            .with("86", FieldPolicy::full().with_symbol("*").with_partial(card)),
    );
    let cases = [
        ("1234567891111111111", "123456*********1111"),
        ("123456789111111", "123456*********"),
        ("123456789", "*********"),
        ("12345678911111111110", "********************"),
    ];

    for (value, masked) in cases {
        let mut target = users();
        for user in &mut target.user_info {
            user.map_data = map_data([value, value], TAG_86_SHORT, value);
            user.unsupported_map_data = HashMap::from([("91".to_string(), value.to_string())]);
        }

        let mut expected = target.clone();
        expected.secret = "*".repeat(12);
        expected.keys = vec![".....".into(); 3];
        for user in &mut expected.user_info {
            user.password = "*".repeat(19);
            user.db_secrets = vec!["*".repeat(18); 2];
            user.map_data = map_data([masked, masked], TAG_86_SHORT, masked);
        }
        assert_all_strategies(&target, &expected, &scrubber);
    }
}

#[test]
fn test_statically_typed_string_map_is_untouched() {
    let scrubber = Scrubber::with_policies(ScrubConfig::default(), policies());
    let masked = scrubber.masked(&users());
    for user in &masked.user_info {
        assert_eq!(user.unsupported_map_data["91"], TAG_91);
        assert_eq!(user.map_data["91"], "********");
    }

    let mut typed: BTreeMap<String, String> = BTreeMap::from([("password".into(), "x".into())]);
    scrubber.mask(&mut typed);
    assert_eq!(typed["password"], "x");
}

#[test]
fn test_map_values_other_than_strings_and_arrays_are_untouched() {
    let scrubber = Scrubber::with_policies(
        ScrubConfig::default(),
        FieldPolicies::from_names(["token", "nested"]),
    );
    let mut value = json!({
        "token": "abc",
        "nested": { "token": "inner" },
        "count": 7,
        "list": ["token", { "token": "in-array" }, [{ "token": "too-deep" }]],
    });
    scrubber.mask(&mut value);

    assert_eq!(value["token"], "********");
    assert_eq!(value["nested"]["token"], "inner");
    assert_eq!(value["count"], 7);
    assert_eq!(value["list"][0], "token");
    assert_eq!(value["list"][1]["token"], "********");
    assert_eq!(value["list"][2][0]["token"], "too-deep");
}

#[test]
fn test_map_keys_match_case_insensitively() {
    let mut value = json!({ "Password": "one", "PASSWORD": "two", "password": "" });
    let out = Scrubber::default()
        .scrub_in_place(&mut value, &JsonCodec::new())
        .unwrap();
    assert_eq!(out, r#"{"PASSWORD":"********","Password":"********","password":""}"#);
    assert_eq!(value["Password"], "one");
    assert_eq!(value["PASSWORD"], "two");
}

#[test]
fn test_hash_map_of_values_is_a_keyed_map() {
    let scrubber = Scrubber::default();
    let mut data: HashMap<String, Value> = HashMap::from([
        ("password".to_string(), json!("hunter2")),
        ("rows".to_string(), json!([{ "password": "p1" }, { "other": "p2" }])),
    ]);
    let masked = scrubber.masked(&data);
    assert_eq!(masked["password"], "********");
    assert_eq!(masked["rows"][0]["password"], "********");
    assert_eq!(masked["rows"][1]["other"], "p2");

    let out = scrubber
        .scrub_in_place(&mut data, &JsonCodec::new())
        .unwrap();
    assert!(out.contains(r#""password":"********""#));
    assert_eq!(data["password"], "hunter2");
    assert_eq!(data["rows"][0]["password"], "p1");
}
