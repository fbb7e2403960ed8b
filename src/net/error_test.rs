use super::*;

#[test]
fn unavailable_shows_retry_message() {
    assert_eq!(FetchError::Unavailable.to_string(), UNAVAILABLE_MESSAGE);
}

#[test]
fn server_error_shows_message_verbatim() {
    let err = FetchError::Server {
        status: 500,
        message: Some("banco fora do ar".to_owned()),
    };
    assert_eq!(err.to_string(), "banco fora do ar");
}

#[test]
fn server_error_without_message_uses_fallback() {
    let err = FetchError::Server { status: 500, message: None };
    assert_eq!(err.to_string(), SERVER_FALLBACK_MESSAGE);
    let empty = FetchError::Server {
        status: 500,
        message: Some(String::new()),
    };
    assert_eq!(empty.to_string(), SERVER_FALLBACK_MESSAGE);
}

#[test]
fn unexpected_hides_detail() {
    let err = FetchError::Unexpected {
        detail: "expected value at line 1".to_owned(),
    };
    assert_eq!(err.to_string(), UNEXPECTED_MESSAGE);
}

#[test]
fn transport_errors_map_to_fetch_taxonomy() {
    assert_eq!(
        FetchError::from(TransportError::NoResponse("refused".to_owned())),
        FetchError::Unavailable
    );
    assert_eq!(
        FetchError::from(TransportError::Other("bad header".to_owned())),
        FetchError::Unexpected {
            detail: "bad header".to_owned()
        }
    );
}

#[test]
fn auth_failure_only_for_401_and_403() {
    assert!(FetchError::Server { status: 401, message: None }.is_auth_failure());
    assert!(FetchError::Server { status: 403, message: None }.is_auth_failure());
    assert!(!FetchError::Server { status: 500, message: None }.is_auth_failure());
    assert!(!FetchError::Unavailable.is_auth_failure());
}

#[test]
fn login_rejected_shows_server_message_or_fallback() {
    let with_message = LoginError::Rejected {
        message: Some("senha inválida".to_owned()),
    };
    assert_eq!(with_message.to_string(), "senha inválida");
    let without = LoginError::Rejected { message: None };
    assert_eq!(without.to_string(), LOGIN_REJECTED_FALLBACK);
}

#[test]
fn login_request_error_is_transparent() {
    let err = LoginError::from(FetchError::Unavailable);
    assert_eq!(err.to_string(), UNAVAILABLE_MESSAGE);
}
