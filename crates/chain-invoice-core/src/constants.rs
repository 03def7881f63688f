/// Number of decimals of the chain's native coin, i.e. 10^18 base units per coin
pub const NATIVE_DECIMALS: u32 = 18;
pub const NATIVE_SYMBOL: &str = "tBNB";

/// BNB Smart Chain testnet
pub const DEFAULT_CHAIN_ID: u64 = 97;

/// The invoice contract both screens talk to
pub const INVOICE_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

pub const MILLIS_PER_SECOND: u64 = 1000;

// Preview export defaults
pub const EXPORT_FILENAME_PATTERN: &str = "invoice-{timestamp}.pdf";
pub const EXPORT_FILENAME_PLACEHOLDER: &str = "{timestamp}";
pub const EXPORT_MARGIN: f64 = 1.0;
pub const EXPORT_IMAGE_TYPE: &str = "jpeg";
pub const EXPORT_IMAGE_QUALITY: f64 = 0.98;
pub const EXPORT_RASTER_SCALE: f64 = 2.0;
