use super::*;

// =============================================================================
// env_bool — unique env var names avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_parses_known_spellings() {
    let cases = [
        ("1", Some(true)),
        ("true", Some(true)),
        ("YES", Some(true)),
        ("  on  ", Some(true)),
        ("0", Some(false)),
        ("False", Some(false)),
        ("no", Some(false)),
        ("off", Some(false)),
        ("maybe", None),
        ("", None),
    ];
    for (i, (raw, expected)) in cases.iter().enumerate() {
        let key = format!("__NOTES_TEST_ENV_BOOL_{i}__");
        unsafe { std::env::set_var(&key, raw) };
        assert_eq!(env_bool(&key), *expected, "value {raw:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__NOTES_TEST_ENV_BOOL_UNSET__"), None);
}

// =============================================================================
// session_token
// =============================================================================

#[test]
fn session_token_reads_cookie_value() {
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, "tok123"));
    assert_eq!(session_token(&jar), Some("tok123".to_owned()));
}

#[test]
fn session_token_ignores_empty_cookie() {
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, ""));
    assert_eq!(session_token(&jar), None);
}

#[test]
fn session_token_ignores_other_cookies() {
    let jar = CookieJar::new().add(Cookie::new("flavor", "oatmeal"));
    assert_eq!(session_token(&jar), None);
}

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_lax_scoped_to_root() {
    let cookie = session_cookie("tok".to_owned());
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(Duration::days(SESSION_MAX_AGE_DAYS)));
}

#[test]
fn expired_session_cookie_clears_value() {
    let cookie = expired_session_cookie();
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}

// =============================================================================
// account_error_to_status
// =============================================================================

#[test]
fn invalid_input_maps_to_bad_request() {
    assert_eq!(account_error_to_status(&AccountError::InvalidEmail), StatusCode::BAD_REQUEST);
    assert_eq!(account_error_to_status(&AccountError::InvalidPassword), StatusCode::BAD_REQUEST);
}

#[test]
fn email_taken_maps_to_conflict() {
    assert_eq!(account_error_to_status(&AccountError::EmailTaken), StatusCode::CONFLICT);
}

#[test]
fn bad_credentials_map_to_unauthorized() {
    assert_eq!(account_error_to_status(&AccountError::BadCredentials), StatusCode::UNAUTHORIZED);
}

#[test]
fn db_errors_map_to_internal() {
    let err = AccountError::Db(sqlx::Error::RowNotFound);
    assert_eq!(account_error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
}
