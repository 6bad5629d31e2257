const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const STEP: u64 = 1024;

/// Human readable size, e.g. `1536` → `"1.5 KB"`. Sizes beyond GB stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut index = 0;
    while index + 1 < UNITS.len() && bytes >= STEP.pow(index as u32 + 1) {
        index += 1;
    }
    let value = bytes as f64 / STEP.pow(index as u32) as f64;
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[index])
}
