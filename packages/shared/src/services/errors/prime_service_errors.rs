use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum PrimeServiceError {
    NotAnInteger(String),
    OutOfRange { max: u64 },
}

impl fmt::Display for PrimeServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrimeServiceError::NotAnInteger(input) => {
                write!(f, "Cannot parse `{}` as an integer.", input)
            }
            PrimeServiceError::OutOfRange { max } => {
                write!(f, "Primality is only supported up to {}.", max)
            }
        }
    }
}

impl std::error::Error for PrimeServiceError {}
