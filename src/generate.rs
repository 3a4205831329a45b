// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Random input for the radix sort benchmark.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use std::io::{Error, ErrorKind, Write};

/// A fixed seed gives reproducible output, otherwise the generator is seeded
/// from the operating system.
pub fn rng(seed: Option<u64>) -> Xoshiro256PlusPlus {
    match seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    }
}

/// Writes `count` and then `count` values uniformly drawn from `0..max`, each
/// followed by a single space.
pub fn generate<R: Rng, W: Write>(
    rng: &mut R,
    count: u64,
    max: u64,
    writer: &mut W,
) -> Result<(), Error> {
    if max == 0 {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "max must be greater than zero",
        ));
    }
    write!(writer, "{} ", count)?;
    for _ in 0..count {
        write!(writer, "{} ", rng.gen_range(0..max))?;
    }
    Ok(())
}
