// Third-party profile handling: retrieve → normalize → validate → persist.

pub mod handlers;
pub mod normalizer;
pub mod retriever;
pub mod store;
pub mod validation;

/// Profile fields kept by normalization.
pub const KEY_FEATURES: &[&str] = &[
    "firstName",
    "lastName",
    "summary",
    "geoLocationName",
    "countryName",
    "experience",
    "education",
    "publications",
    "certifications",
    "volunteer",
    "honors",
    "projects",
    "skills",
    "headline",
];

/// Case-insensitive substrings marking keys and string values as noise.
pub const IGNORE_KEYWORDS: &[&str] = &[
    "Urn",
    "logo",
    "expires",
    "picture",
    "https",
    "courses",
    "trackingId",
    "backgroundImage",
    "publicIdentifier",
    "url",
    "region",
    "img",
    "id",
    "elt",
    "backfilled",
    "universalName",
];

/// Fields a profile must carry, non-empty, to pass validation. Checked in this order.
pub const VALIDATION_FEATURES: &[&str] = &[
    "firstName",
    "lastName",
    "geoLocationName",
    "experience",
    "education",
    "skills",
    "headline",
];
