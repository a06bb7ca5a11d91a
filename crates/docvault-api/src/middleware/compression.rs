//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip for clients that ask for it. The default predicate leaves images
/// and tiny bodies alone.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
