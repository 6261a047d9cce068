use crate::codec::types::WorldPos;

/// Binary writer producing the save format's big-endian layout. The decoder
/// only reads real saves; this half exists for tooling and for building
/// synthetic area buffers in tests.
pub struct BinaryWriter {
    data: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.data.push(v);
    }

    pub fn write_i8(&mut self, v: i8) {
        self.write_u8(v as u8);
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_u8(if v { 1 } else { 0 });
    }

    pub fn write_u16_be(&mut self, v: u16) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i16_be(&mut self, v: i16) {
        self.write_u16_be(v as u16);
    }

    pub fn write_u32_be(&mut self, v: u32) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i32_be(&mut self, v: i32) {
        self.write_u32_be(v as u32);
    }

    pub fn write_u64_be(&mut self, v: u64) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i64_be(&mut self, v: i64) {
        self.write_u64_be(v as u64);
    }

    pub fn write_f32_be(&mut self, v: f32) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_f64_be(&mut self, v: f64) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    /// Write a save-format string: big-endian u32 byte length, then UTF-8 bytes.
    pub fn write_string_be(&mut self, s: &str) {
        self.write_u32_be(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    /// Write a coordinate pair (two big-endian f32s)
    pub fn write_world_pos(&mut self, pos: WorldPos) {
        self.write_f32_be(pos.x);
        self.write_f32_be(pos.y);
    }
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BinaryWriter> for Vec<u8> {
    fn from(writer: BinaryWriter) -> Self {
        writer.into_vec()
    }
}
