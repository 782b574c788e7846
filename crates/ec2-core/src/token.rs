//! Idempotency tokens for launch requests.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::Result;

/// Random bytes per token. EC2 accepts at most 64 characters and each byte
/// becomes two hex digits.
pub const CLIENT_TOKEN_BYTES: usize = 32;

/// Generate a fresh client token from the operating system's random source.
///
/// # Errors
///
/// Returns an error if the random source fails.
pub fn client_token() -> Result<String> {
    client_token_from(&mut OsRng)
}

/// Generate a client token from the given random source.
///
/// # Errors
///
/// Returns an error if `rng` fails to fill the buffer.
pub fn client_token_from<R>(rng: &mut R) -> Result<String>
where
    R: RngCore + ?Sized,
{
    let mut buf = [0u8; CLIENT_TOKEN_BYTES];
    rng.try_fill_bytes(&mut buf)?;
    Ok(hex::encode(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy exhausted",
            )))
        }
    }

    #[test]
    fn token_is_64_hex_chars() {
        let token = client_token().unwrap();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_fresh() {
        assert_ne!(client_token().unwrap(), client_token().unwrap());
    }

    #[test]
    fn rng_failure_is_reported() {
        let err = client_token_from(&mut BrokenRng).unwrap_err();
        assert!(matches!(err, Error::RandomSource(_)));
    }
}
