//! Map output compression codecs understood by the executor.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Compression codec for map outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompressionCodec {
    /// Hadoop's default deflate codec.
    Default,
    /// Snappy.
    Snappy,
    /// Gzip.
    Gzip,
    /// LZO (external codec package).
    Lzo,
    /// BZip2.
    Bzip2,
    /// LZ4.
    Lz4,
}

impl CompressionCodec {
    /// Every codec in declaration order.
    pub const ALL: [CompressionCodec; 6] = [
        CompressionCodec::Default,
        CompressionCodec::Snappy,
        CompressionCodec::Gzip,
        CompressionCodec::Lzo,
        CompressionCodec::Bzip2,
        CompressionCodec::Lz4,
    ];

    /// Symbolic member name (`SNAPPY`).
    pub const fn name(self) -> &'static str {
        match self {
            CompressionCodec::Default => "DEFAULT",
            CompressionCodec::Snappy => "SNAPPY",
            CompressionCodec::Gzip => "GZIP",
            CompressionCodec::Lzo => "LZO",
            CompressionCodec::Bzip2 => "BZIP2",
            CompressionCodec::Lz4 => "LZ4",
        }
    }

    /// Fully-qualified codec class passed to the executor.
    pub const fn class_name(self) -> &'static str {
        match self {
            CompressionCodec::Default => "org.apache.hadoop.io.compress.DefaultCodec",
            CompressionCodec::Snappy => "org.apache.hadoop.io.compress.SnappyCodec",
            CompressionCodec::Gzip => "org.apache.hadoop.io.compress.GzipCodec",
            CompressionCodec::Lzo => "com.hadoop.compression.lzo.LzoCodec",
            CompressionCodec::Bzip2 => "org.apache.hadoop.io.compress.BZip2Codec",
            CompressionCodec::Lz4 => "org.apache.hadoop.io.compress.Lz4Codec",
        }
    }

    /// Looks up a codec by symbolic name, ignoring case.
    pub fn from_name(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|codec| codec.name().eq_ignore_ascii_case(input.trim()))
    }

    /// Looks up a codec by fully-qualified class name, ignoring case.
    pub fn from_class_name(input: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|codec| codec.class_name().eq_ignore_ascii_case(input.trim()))
    }

    /// Resolves user input: the name table is consulted first, then the class table.
    pub fn lookup(input: &str) -> Result<Self, String> {
        Self::from_name(input)
            .or_else(|| Self::from_class_name(input))
            .ok_or_else(|| {
                format!(
                    "invalid codec '{input}'; valid options: {}",
                    Self::describe_choices()
                )
            })
    }

    /// `NAME ('class')` listing used in diagnostics and help text.
    pub fn describe_choices() -> String {
        Self::ALL
            .iter()
            .map(|codec| format!("{} ('{}')", codec.name(), codec.class_name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for CompressionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
