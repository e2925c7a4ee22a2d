use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - OTP
// =========================================================================

#[test]
#[serial]
fn given_ttl_below_min_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _ttl = EnvGuard::set("CRM_OTP_TTL_SECS", "30");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_ttl_over_max_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _ttl = EnvGuard::set("CRM_OTP_TTL_SECS", "7200");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_code_length_below_min_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _len = EnvGuard::set("CRM_OTP_CODE_LENGTH", "3");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_code_length_over_max_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _len = EnvGuard::set("CRM_OTP_CODE_LENGTH", "11");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_valid_otp_config_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _ttl = EnvGuard::set("CRM_OTP_TTL_SECS", "300");
    let _len = EnvGuard::set("CRM_OTP_CODE_LENGTH", "8");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}
