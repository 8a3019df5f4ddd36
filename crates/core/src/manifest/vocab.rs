// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Closed vocabularies accepted in manifests
//!
//! Abbreviations follow the data-schema models used by the downstream
//! transfer service; anything outside these tables is rejected at parse time.

/// Acquisition platforms, by abbreviation
pub const PLATFORMS: &[&str] = &[
    "behavior",
    "confocal",
    "ecephys",
    "exaspim",
    "fip",
    "hcr",
    "hsfp",
    "isi",
    "merfish",
    "mesospim",
    "motor-observatory",
    "multiplane-ophys",
    "slap2",
    "single-plane-ophys",
    "smartspim",
];

/// Data modalities, by abbreviation
pub const MODALITIES: &[&str] = &[
    "behavior",
    "behavior-videos",
    "confocal",
    "EMG",
    "ecephys",
    "fib",
    "fMOST",
    "icephys",
    "ISI",
    "MRI",
    "merfish",
    "pophys",
    "slap",
    "SPIM",
];

/// Storage buckets the transfer service can upload into
pub const S3_BUCKETS: &[&str] = &["s3", "public", "private", "scratch"];

/// Canonical platform abbreviation for `name`, if known.
///
/// Matching ignores case and accepts `_` in place of `-`.
pub fn canonical_platform(name: &str) -> Option<&'static str> {
    lookup(PLATFORMS, name)
}

/// Canonical modality abbreviation for `name`, if known.
pub fn canonical_modality(name: &str) -> Option<&'static str> {
    lookup(MODALITIES, name)
}

fn lookup(table: &[&'static str], name: &str) -> Option<&'static str> {
    let wanted = name.trim().replace('_', "-");
    table
        .iter()
        .copied()
        .find(|entry| entry.eq_ignore_ascii_case(&wanted))
}
