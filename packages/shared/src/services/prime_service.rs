use std::num::IntErrorKind;

use tracing::debug;

use crate::services::errors::prime_service_errors::PrimeServiceError;

/// Primality of a decimal integer of any size.
///
/// Anything below 2 is not prime, including negatives too long to parse.
/// Positive values above `u64::MAX` are refused.
pub fn is_prime(input: &str) -> Result<bool, PrimeServiceError> {
    let num = match input.parse::<i128>() {
        Ok(num) => num,
        Err(e) => {
            return match e.kind() {
                IntErrorKind::NegOverflow => Ok(false),
                IntErrorKind::PosOverflow => Err(PrimeServiceError::OutOfRange { max: u64::MAX }),
                _ => {
                    debug!("Not an integer: {:?}", input);
                    Err(PrimeServiceError::NotAnInteger(input.to_string()))
                }
            };
        }
    };

    if num < 2 {
        return Ok(false);
    }
    let num = u64::try_from(num).map_err(|_| PrimeServiceError::OutOfRange { max: u64::MAX })?;
    Ok(primal::is_prime(num))
}
