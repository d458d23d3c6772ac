/// Compression applied to array datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// Deflate with the given level (0-9)
    Deflate(i64),
    /// Store every entry as-is (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Deflate(6)
    }
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Deflate(9)
    }

    /// Balanced compression (recommended default)
    pub fn balanced() -> Self {
        Self::Deflate(6)
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Deflate(1)
    }

    /// Deflate level to hand to the archive writer
    pub fn deflate_level(self) -> Option<i64> {
        match self {
            Self::Deflate(level) => Some(level.clamp(0, 9)),
            Self::Uncompressed => None,
        }
    }
}

/// Configuration for writing IPASC files
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Compression for the tensor and other array datasets
    pub compression: CompressionType,

    /// Embed `manifest.json` with the creation time and data revision
    pub manifest: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::balanced(),
            manifest: true,
        }
    }
}

impl WriterConfig {
    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::max_compression(),
            ..Default::default()
        }
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::fast(),
            ..Default::default()
        }
    }

    /// No compression at all
    pub fn uncompressed() -> Self {
        Self {
            compression: CompressionType::Uncompressed,
            ..Default::default()
        }
    }
}
