//! Bucket-array sizes.
//!
//! The table only ever runs with one of the primes below. Growth and shrink
//! compute a raw target (double or half of the current capacity) and round it
//! up through [`next_valid_size`].

/// Smallest capacity a table can have; also the default.
pub const MIN_CAPACITY: usize = 11;

/// Largest capacity a table can have. Requests above it are clamped.
pub const MAX_CAPACITY: usize = 993_815_743;

/// Ascending sequence of permitted capacities, roughly 1.2x apart.
pub(crate) const CAPACITIES: &[usize] = &[
    MIN_CAPACITY, 13, 17, 19, 23, 29, 31, 37, 43, 53, 67, 79, 97, 107, 131, 157, 191, 223, 269,
    331, 389, 461, 557, 673, 797, 967, 1151, 1381, 1657, 1979, 2377, 2851, 3433, 4111, 4931,
    5923, 7103, 8513, 10211, 12251, 14699, 17657, 21169, 25409, 30491, 36583, 43889, 52667,
    63199, 75853, 91009, 109211, 131059, 157259, 188707, 226451, 271753, 326087, 391331, 469583,
    563489, 676171, 811411, 973691, 1168451, 1402123, 1682531, 2019037, 2422873, 2907419,
    3488897, 4186673, 5024009, 6028807, 7234589, 8681483, 10417769, 12501331, 15001603,
    18001909, 21602311, 25922749, 31107317, 37328761, 44794513, 53753431, 64504081, 77404907,
    92885893, 111463049, 133755659, 160506817, 192608173, 231129781, 277355759, 332826869,
    399392243, 479270713, 575124829, 690149821, 828179753, MAX_CAPACITY,
];

/// Returns the smallest permitted capacity that is `>= requested`, or
/// [`MAX_CAPACITY`] when the request exceeds every entry.
pub fn next_valid_size(requested: usize) -> usize {
    let i = CAPACITIES.partition_point(|&c| c < requested);
    CAPACITIES.get(i).copied().unwrap_or(MAX_CAPACITY)
}

/// Whether `capacity` is one of the permitted sizes.
pub fn is_valid_size(capacity: usize) -> bool {
    CAPACITIES.binary_search(&capacity).is_ok()
}
