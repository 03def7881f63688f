// Shown if a failed call carries no message of its own
pub const SUBMISSION_FALLBACK_MESSAGE: &str = "Failed to submit the invoice. Please try again.";
pub const LISTING_FALLBACK_MESSAGE: &str = "Failed to load invoices. Please try again.";

/// Capacity of the status and wallet broadcast channels, older messages are dropped on overflow
pub const STATUS_CHANNEL_CAPACITY: usize = 16;
