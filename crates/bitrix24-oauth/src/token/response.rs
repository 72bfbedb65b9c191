//! Token endpoint response parsing.

use super::Token;
use crate::error::{Error, Result};
use serde_json::Value;

const ACCESS_TOKEN: &str = "access_token";
const EXPIRES_IN: &str = "expires_in";
const REFRESH_TOKEN: &str = "refresh_token";
const ERROR: &str = "error";
const ERROR_DESCRIPTION: &str = "error_description";

/// Parses a raw token endpoint body into a [`Token`].
///
/// The provider reports failures in-band, so an `error` field is checked
/// before any success field is looked at. Every field other than
/// `access_token`, `expires_in` and `refresh_token` ends up in
/// [`Token::extra_params`] untouched.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if the body is not a JSON object or
/// lacks the required fields, and [`Error::Provider`] if it carries an `error`.
pub fn parse_access_token_response(body: &str) -> Result<Token> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("invalid JSON: {e}")))?;

    let Value::Object(mut data) = value else {
        return Err(Error::malformed("response is not a JSON object"));
    };

    if let Some(error) = data.get(ERROR).filter(|v| !v.is_null()) {
        let description = data
            .get(ERROR_DESCRIPTION)
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(Error::provider_error(value_to_message(error), description));
    }

    let access_token = match data.remove(ACCESS_TOKEN) {
        Some(Value::String(token)) if !token.is_empty() => token,
        Some(Value::String(_)) => return Err(Error::malformed("access_token is empty")),
        Some(_) => return Err(Error::malformed("access_token is not a string")),
        None => return Err(Error::malformed("missing access_token")),
    };

    let lifetime = match data.remove(EXPIRES_IN) {
        Some(value) => parse_lifetime(&value)?,
        None => return Err(Error::malformed("missing expires_in")),
    };

    let mut token = Token::new(access_token).with_lifetime(lifetime);

    match data.remove(REFRESH_TOKEN) {
        Some(Value::String(refresh)) => token = token.with_refresh_token(refresh),
        Some(Value::Null) | None => {}
        Some(_) => return Err(Error::malformed("refresh_token is not a string")),
    }

    Ok(token.with_extra_params(data))
}

/// Reads `expires_in`, accepting whole numbers (`3600` or `3600.0`) and
/// numeric strings. `null` means unknown.
fn parse_lifetime(value: &Value) -> Result<Option<u64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(whole_seconds))
            .map(Some)
            .ok_or_else(|| Error::malformed(format!("expires_in is not a non-negative integer: {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| Error::malformed(format!("expires_in is not numeric: {s:?}"))),
        _ => Err(Error::malformed("expires_in has unexpected type")),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(secs: f64) -> Option<u64> {
    // Above 2^53 a float no longer maps onto a unique integer.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    (secs.fract() == 0.0 && (0.0..=MAX_EXACT).contains(&secs)).then(|| secs as u64)
}

fn value_to_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::needless_pass_by_value)]
mod tests {
    use super::*;
    use crate::token::EndOfLife;
    use serde_json::{Map, json};

    fn without_consumed(mut data: Map<String, Value>) -> Map<String, Value> {
        data.remove(ACCESS_TOKEN);
        data.remove(EXPIRES_IN);
        data.remove(REFRESH_TOKEN);
        data
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{"access_token":"abc","expires_in":3600,"refresh_token":"r1","user_id":42}"#;
        let token = parse_access_token_response(body).unwrap();

        assert_eq!(token.access_token(), "abc");
        assert_eq!(token.lifetime_seconds(), Some(3600));
        assert_eq!(token.refresh_token(), Some("r1"));
        assert_eq!(token.extra_params().len(), 1);
        assert_eq!(token.extra_params()["user_id"], json!(42));
    }

    #[test]
    fn test_extras_are_response_minus_consumed_keys() {
        let raw = json!({
            "access_token": "abc",
            "expires_in": 3600,
            "refresh_token": "r1",
            "domain": "example.bitrix24.ru",
            "member_id": "m-1",
            "scope": "crm,task",
            "server_endpoint": "https://oauth.bitrix.info/rest/",
            "status": "L",
            "nested": {"a": [1, 2, 3]}
        });
        let token = parse_access_token_response(&raw.to_string()).unwrap();

        let Value::Object(data) = raw else {
            unreachable!()
        };
        assert_eq!(token.extra_params(), &without_consumed(data));
    }

    #[test]
    fn test_parse_without_refresh_token() {
        let token = parse_access_token_response(r#"{"access_token":"abc","expires_in":60}"#).unwrap();
        assert!(token.refresh_token().is_none());
        assert!(token.extra_params().is_empty());
    }

    #[test]
    fn test_null_refresh_token_is_absent() {
        let token = parse_access_token_response(
            r#"{"access_token":"abc","expires_in":60,"refresh_token":null}"#,
        )
        .unwrap();
        assert!(token.refresh_token().is_none());
        assert!(!token.extra_params().contains_key("refresh_token"));
    }

    #[test]
    fn test_lifetime_variants() {
        let token =
            parse_access_token_response(r#"{"access_token":"abc","expires_in":"3600"}"#).unwrap();
        assert_eq!(token.lifetime_seconds(), Some(3600));

        let token =
            parse_access_token_response(r#"{"access_token":"abc","expires_in":null}"#).unwrap();
        assert_eq!(token.lifetime_seconds(), None);
        assert_eq!(token.end_of_life(), EndOfLife::Unknown);

        let token =
            parse_access_token_response(r#"{"access_token":"abc","expires_in":0}"#).unwrap();
        assert_eq!(token.end_of_life(), EndOfLife::NeverExpires);
    }

    #[test]
    fn test_whole_float_lifetime() {
        let token =
            parse_access_token_response(r#"{"access_token":"abc","expires_in":3600.0}"#).unwrap();
        assert_eq!(token.lifetime_seconds(), Some(3600));

        for body in [
            r#"{"access_token":"abc","expires_in":3600.5}"#,
            r#"{"access_token":"abc","expires_in":-60.0}"#,
            r#"{"access_token":"abc","expires_in":1e300}"#,
        ] {
            let err = parse_access_token_response(body).unwrap_err();
            assert!(
                matches!(err, Error::MalformedResponse(_)),
                "body {body:?} produced {err:?}"
            );
        }
    }

    #[test]
    fn test_error_field_wins_over_access_token() {
        let err = parse_access_token_response(
            r#"{"error":"invalid_grant","access_token":"abc","expires_in":3600}"#,
        )
        .unwrap_err();
        match err {
            Error::Provider { error, description } => {
                assert_eq!(error, "invalid_grant");
                assert!(description.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_with_description() {
        let err = parse_access_token_response(
            r#"{"error":"expired_token","error_description":"The access token provided has expired."}"#,
        )
        .unwrap_err();
        match err {
            Error::Provider { error, description } => {
                assert_eq!(error, "expired_token");
                assert_eq!(
                    description.as_deref(),
                    Some("The access token provided has expired.")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_error_is_not_a_failure() {
        let token = parse_access_token_response(
            r#"{"error":null,"access_token":"abc","expires_in":3600}"#,
        )
        .unwrap();
        assert_eq!(token.access_token(), "abc");
        assert_eq!(token.extra_params()["error"], Value::Null);
    }

    #[test]
    fn test_non_string_error_value() {
        let err = parse_access_token_response(r#"{"error":401}"#).unwrap_err();
        assert!(matches!(err, Error::Provider { ref error, .. } if error == "401"));
    }

    #[test]
    fn test_malformed_bodies() {
        for body in ["", "not json", "[1,2,3]", "\"string\"", "42", "null", "{"] {
            let err = parse_access_token_response(body).unwrap_err();
            assert!(
                matches!(err, Error::MalformedResponse(_)),
                "body {body:?} produced {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_required_fields() {
        for body in [
            r#"{"expires_in":3600}"#,
            r#"{"access_token":"abc"}"#,
            r#"{"access_token":"","expires_in":3600}"#,
            r#"{"access_token":7,"expires_in":3600}"#,
            r#"{"access_token":"abc","expires_in":-5}"#,
            r#"{"access_token":"abc","expires_in":"soon"}"#,
            r#"{"access_token":"abc","expires_in":3600,"refresh_token":5}"#,
        ] {
            let err = parse_access_token_response(body).unwrap_err();
            assert!(
                matches!(err, Error::MalformedResponse(_)),
                "body {body:?} produced {err:?}"
            );
        }
    }
}
