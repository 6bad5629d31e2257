/// Bucket holding every uploaded resource file.
pub const RESOURCES_BUCKET: &str = "resources";

/// Upper bound on files accepted in one upload batch.
pub const MAX_FILES_PER_BATCH: usize = 50;

pub const MAX_SEARCH_TERM_LENGTH: usize = 200;
