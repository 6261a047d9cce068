//! Compressed save-file loading.
//!
//! Area files arrive compressed on disk. The rest of the pipeline only ever
//! sees the decompressed buffer, so the codec choice stays contained here:
//! payloads are dispatched on their leading magic bytes, and anything not
//! recognizably compressed passes through untouched.

use std::io::Read;
use std::path::Path;

use flate2::read::ZlibDecoder;

use crate::error::{Error, Result};

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Read a save file and decompress it if the payload is compressed.
pub fn load_compressed_file(path: &Path) -> Result<Vec<u8>> {
    let raw = std::fs::read(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    decompress_if_needed(&raw)
}

/// Decompress a buffer based on its leading magic bytes.
pub fn decompress_if_needed(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 2 {
        return Ok(data.to_vec());
    }

    if data[0] == 0x78 {
        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| Error::Decompress(format!("zlib: {e}")))?;
        return Ok(decompressed);
    }

    if data.len() >= 4 && data[0..4] == ZSTD_MAGIC {
        return zstd::decode_all(data).map_err(|e| Error::Decompress(format!("zstd: {e}")));
    }

    Ok(data.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_zlib_payload_is_decompressed() {
        let payload = b"area file bytes area file bytes area file bytes";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        let compressed = encoder.finish().unwrap();
        assert_eq!(compressed[0], 0x78);

        assert_eq!(decompress_if_needed(&compressed).unwrap(), payload);
    }

    #[test]
    fn test_zstd_payload_is_decompressed() {
        let payload = b"zstd compressed area data";
        let compressed = zstd::encode_all(&payload[..], 0).unwrap();
        assert_eq!(compressed[0..4], ZSTD_MAGIC);

        assert_eq!(decompress_if_needed(&compressed).unwrap(), payload);
    }

    #[test]
    fn test_plain_payload_passes_through() {
        let payload = [0x00, 0x00, 0x00, 0x01, 0xAB, 0xCD];
        assert_eq!(decompress_if_needed(&payload).unwrap(), payload);
    }

    #[test]
    fn test_tiny_payload_passes_through() {
        assert_eq!(decompress_if_needed(&[0x78]).unwrap(), vec![0x78]);
        assert!(decompress_if_needed(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_zlib_payload_fails() {
        let garbage = [0x78, 0x9C, 0x00, 0x01, 0x02, 0x03];
        assert!(matches!(
            decompress_if_needed(&garbage),
            Err(Error::Decompress(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_compressed_file(Path::new("/definitely/not/here.bin")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_compressed_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("area_0_0.bin");

        let payload = b"decompressed area contents";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        assert_eq!(load_compressed_file(&path).unwrap(), payload);
    }
}
