use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::error;

const RANDOM_STRING_SOURCE: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_+-=";

/// Generates `n` random characters from [`RANDOM_STRING_SOURCE`].
///
/// Panics if the OS entropy source is unavailable.
pub fn random_string(n: usize) -> String {
    sample(ChaCha20Rng::from_entropy(), n)
}

/// Like [`random_string`], but reports entropy failures instead of panicking.
pub fn try_random_string(n: usize) -> Result<String, rand::Error> {
    let rng = ChaCha20Rng::from_rng(OsRng).map_err(|err| {
        error!("Unable to seed random string generator: {}", err);
        err
    })?;

    Ok(sample(rng, n))
}

fn sample(mut rng: ChaCha20Rng, n: usize) -> String {
    let index = Uniform::from(0..RANDOM_STRING_SOURCE.len());

    (0..n)
        .map(|_| char::from(RANDOM_STRING_SOURCE[index.sample(&mut rng)]))
        .collect()
}
