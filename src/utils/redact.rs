use serde_json::Value;

pub const FILTERED: &str = "[FILTERED]";

// Compared after lowercasing and dropping '-' and '_'.
const SENSITIVE_KEYS: &[&str] = &[
    "accesstoken",
    "apikey",
    "auth",
    "authentication",
    "authorization",
    "clientsecret",
    "cookie",
    "creds",
    "credentials",
    "passphrase",
    "password",
    "refreshtoken",
    "secret",
    "secretstring",
    "token",
    "xapikey",
];

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

#[must_use]
pub fn is_sensitive(key: &str) -> bool {
    let key = normalize(key);
    SENSITIVE_KEYS.contains(&key.as_str())
}

/// Copy of `value` with the values of sensitive keys replaced, at any depth.
#[must_use]
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = if is_sensitive(k) {
                        Value::String(FILTERED.to_string())
                    } else {
                        redact(v)
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sensitive_keys_ignore_case_and_separators() {
        assert!(is_sensitive("X-API-Key"));
        assert!(is_sensitive("Authorization"));
        assert!(is_sensitive("refresh_token"));
        assert!(!is_sensitive("x-amzn-trace-id"));
    }

    #[test]
    fn test_redact_walks_nested_values() {
        let event = json!({
            "headers": { "x-api-key": "k", "Accept": "*/*" },
            "multiValueHeaders": { "Cookie": ["a=b"] },
            "items": [{ "password": "p", "name": "n" }],
            "path": "/middy/message"
        });

        let redacted = redact(&event);

        assert_eq!(redacted["headers"]["x-api-key"], FILTERED);
        assert_eq!(redacted["headers"]["Accept"], "*/*");
        assert_eq!(redacted["multiValueHeaders"]["Cookie"], FILTERED);
        assert_eq!(redacted["items"][0]["password"], FILTERED);
        assert_eq!(redacted["items"][0]["name"], "n");
        assert_eq!(redacted["path"], "/middy/message");
        assert_eq!(event["headers"]["x-api-key"], "k");
    }
}
