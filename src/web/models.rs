use serde::Serialize;

// One catalog entry as it appears in the /api/categories payload. Both URLs
// embed the percent-encoded filename under a fixed route prefix.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct VideoDescriptor {
    pub title: String,
    pub thumbnail: String,
    pub url: String,
}
