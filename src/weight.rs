use anyhow::Context;
use byteorder::NativeEndian;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::io::Read;
use std::io::Write;

/// Floats read per step when loading a table.
const CHUNK: usize = 1 << 12;

/// A flat table of learned values.
///
/// The table imposes no meaning on its indices; whoever owns it decides
/// how board features map to slots.
///
/// # Serialization
///
/// An 8-byte length header followed by that many 4-byte floats, in
/// platform byte order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Weight(Vec<f32>);

impl Weight {
    pub fn new(len: usize) -> Self {
        Self(vec![0.; len])
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn values(&self) -> &[f32] {
        &self.0
    }
    pub fn save<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u64::<NativeEndian>(self.0.len() as u64)?;
        for &value in self.0.iter() {
            writer.write_f32::<NativeEndian>(value)?;
        }
        Ok(())
    }
    /// Values are read in bounded chunks, so a corrupt length header
    /// surfaces as an error at end of input rather than a huge allocation.
    pub fn load<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let len = reader.read_u64::<NativeEndian>()?;
        let len = usize::try_from(len)
            .ok()
            .filter(|n| n.checked_mul(size_of::<f32>()).is_some())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("weight table length {} does not fit in memory", len),
                )
            })?;
        let mut values = Vec::with_capacity(len.min(CHUNK));
        let mut chunk = [0.; CHUNK];
        while values.len() < len {
            let n = (len - values.len()).min(CHUNK);
            reader.read_f32_into::<NativeEndian>(&mut chunk[..n])?;
            values.extend_from_slice(&chunk[..n]);
        }
        Ok(Self(values))
    }
}

impl From<Vec<f32>> for Weight {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl std::ops::Index<usize> for Weight {
    type Output = f32;
    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}
impl std::ops::IndexMut<usize> for Weight {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.0[index]
    }
}

/// An ordered set of weight tables stored together in one file,
/// behind a 4-byte table count.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Network(Vec<Weight>);

impl Network {
    pub fn tables(&self) -> &[Weight] {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn push(&mut self, table: Weight) {
        self.0.push(table);
    }
    pub fn save<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_u32::<NativeEndian>(self.0.len() as u32)?;
        self.0.iter().try_for_each(|table| table.save(writer))
    }
    pub fn load<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let n = reader.read_u32::<NativeEndian>()?;
        (0..n)
            .map(|_| Weight::load(reader))
            .collect::<std::io::Result<Vec<_>>>()
            .map(Self)
    }
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        log::info!("{:<32}{}", "saving weights", path.display());
        let file = std::fs::File::create(path)
            .with_context(|| format!("create weight file {}", path.display()))?;
        let ref mut writer = std::io::BufWriter::new(file);
        self.save(writer)
            .and_then(|_| writer.flush())
            .with_context(|| format!("write weight file {}", path.display()))
    }
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        log::info!("{:<32}{}", "loading weights", path.display());
        let file = std::fs::File::open(path)
            .with_context(|| format!("open weight file {}", path.display()))?;
        let ref mut reader = std::io::BufReader::new(file);
        Self::load(reader).with_context(|| format!("read weight file {}", path.display()))
    }
}

impl From<Vec<Weight>> for Network {
    fn from(tables: Vec<Weight>) -> Self {
        Self(tables)
    }
}

impl std::ops::Index<usize> for Network {
    type Output = Weight;
    fn index(&self, index: usize) -> &Weight {
        &self.0[index]
    }
}
impl std::ops::IndexMut<usize> for Network {
    fn index_mut(&mut self, index: usize) -> &mut Weight {
        &mut self.0[index]
    }
}
