use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine};

/// Identifier and secret sent with HTTP Basic auth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Parse `Authorization: Basic <base64(email:password)>`.
///
/// Anything missing or malformed yields `None`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn decodes_basic_header() {
        let headers = headers_with(&format!("Basic {}", STANDARD.encode("a@b.com:secret")));
        let creds = basic_credentials(&headers).expect("credentials");
        assert_eq!(creds.email, "a@b.com");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn password_may_contain_colons() {
        let headers = headers_with(&format!("basic {}", STANDARD.encode("a@b.com:se:cr:et")));
        let creds = basic_credentials(&headers).expect("credentials");
        assert_eq!(creds.password, "se:cr:et");
    }

    #[test]
    fn absent_when_header_missing() {
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
    }

    #[test]
    fn absent_for_other_schemes_and_garbage() {
        assert_eq!(basic_credentials(&headers_with("Bearer abc.def.ghi")), None);
        assert_eq!(basic_credentials(&headers_with("Basic !!!not-base64")), None);
        assert_eq!(
            basic_credentials(&headers_with(&format!("Basic {}", STANDARD.encode("nocolon")))),
            None
        );
        assert_eq!(basic_credentials(&headers_with("Basic")), None);
    }
}
