use rust_decimal::Decimal;
use validator::ValidationError;

/// Rejects negative amounts, whatever JSON shape they were decoded from.
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Must be greater than or equal to 0".into());
        return Err(err);
    }
    Ok(())
}
