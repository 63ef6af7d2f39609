use chrono::DateTime;

/// Helper function to format a medicine's creation timestamp
///
/// This function takes the `created_at` string the remote service assigned
/// and formats its date part in the "dd-mm-yyyy" format. Timestamps that are
/// not RFC 3339 are returned unchanged rather than dropped.
///
/// # Arguments
///
/// * `created_at` - The timestamp as stored on the medicine record
///
/// # Returns
///
/// A `String` containing the formatted date, or the input as given
pub fn format_created_at(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|date| date.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

/// Helper function to describe a medicine's availability
///
/// # Arguments
///
/// * `is_in_stock` - The availability flag of a medicine record
///
/// # Returns
///
/// "in stock" or "out of stock"
pub fn stock_label(is_in_stock: bool) -> &'static str {
    if is_in_stock {
        "in stock"
    } else {
        "out of stock"
    }
}
