//! Random password generation
//!
//! Every position is drawn independently and uniformly from a fixed alphabet
//! using the operating system's CSPRNG.

use rand::rngs::OsRng;
use rand::Rng;

/// Uppercase, lowercase, digits and a fixed punctuation set
pub const ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{};:,.<>?";

/// Default length of generated passwords
pub const DEFAULT_PASSWORD_LENGTH: usize = 14;

/// Generate a password of `length` characters from `ALPHABET`
pub fn generate_password(length: usize) -> String {
    generate_password_with(length, &mut OsRng)
}

/// Generate a password using the supplied random source
pub fn generate_password_with<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
