//! Binary snapshot codec for whole-forest persistence
//!
//! The format is explicit and field-by-field so it stays stable across
//! releases: no reliance on derived serialization.
//!
//! Layout (all integers and floats little-endian):
//!
//! ```text
//! magic    4 bytes  "FRST"
//! version  u8       currently 1
//! name     u16 length + UTF-8 bytes
//! count    u32
//! trees    count * { species: u8 tag, year: i32, height: f64, rate: f64 }
//! ```
//!
//! The species tag is the position in [`TreeSpecies::ALL`].

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Forest, Tree, TreeSpecies};

const MAGIC: [u8; 4] = *b"FRST";
const VERSION: u8 = 1;

/// Encode a forest into the snapshot wire format.
///
/// Fails if the forest name does not fit the u16 length field; truncating
/// it would break the exact-round-trip guarantee.
pub fn encode(forest: &Forest) -> ApplicationResult<Vec<u8>> {
    let name = forest.name().as_bytes();
    let name_len = u16::try_from(name.len())
        .map_err(|_| ApplicationError::SnapshotNameTooLong { len: name.len() })?;

    let mut buf = Vec::with_capacity(16 + name.len() + forest.len() * 21);
    buf.extend_from_slice(&MAGIC);
    buf.push(VERSION);
    buf.extend_from_slice(&name_len.to_le_bytes());
    buf.extend_from_slice(name);

    buf.extend_from_slice(&(forest.len() as u32).to_le_bytes());
    for tree in forest.trees() {
        buf.push(species_tag(tree.species()));
        buf.extend_from_slice(&tree.planting_year().to_le_bytes());
        buf.extend_from_slice(&tree.height().to_le_bytes());
        buf.extend_from_slice(&tree.growth_rate().to_le_bytes());
    }
    Ok(buf)
}

/// Decode a snapshot back into a forest.
pub fn decode(bytes: &[u8]) -> ApplicationResult<Forest> {
    let mut r = Reader { buf: bytes, pos: 0 };

    if r.take(4)? != MAGIC {
        return Err(corrupt("bad magic, not a forest snapshot"));
    }
    let version = r.u8()?;
    if version != VERSION {
        return Err(corrupt(format!("unsupported snapshot version {version}")));
    }

    let name_len = r.u16()? as usize;
    let name = std::str::from_utf8(r.take(name_len)?)
        .map_err(|_| corrupt("forest name is not valid UTF-8"))?
        .to_string();

    let count = r.u32()?;
    let mut forest = Forest::new(name);
    for _ in 0..count {
        let tag = r.u8()?;
        let species = species_from_tag(tag)
            .ok_or_else(|| corrupt(format!("unknown species tag {tag}")))?;
        let year = r.i32()?;
        let height = r.f64()?;
        let rate = r.f64()?;
        forest.add_tree(Tree::new(species, year, height, rate));
    }

    if r.pos != bytes.len() {
        return Err(corrupt("trailing bytes after tree list"));
    }
    Ok(forest)
}

fn species_tag(species: TreeSpecies) -> u8 {
    TreeSpecies::ALL
        .iter()
        .position(|&s| s == species)
        .unwrap_or(0) as u8
}

fn species_from_tag(tag: u8) -> Option<TreeSpecies> {
    TreeSpecies::ALL.get(tag as usize).copied()
}

fn corrupt(reason: impl Into<String>) -> ApplicationError {
    ApplicationError::SnapshotCorrupt {
        reason: reason.into(),
    }
}

/// Bounds-checked cursor over the snapshot bytes.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> ApplicationResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| corrupt("snapshot truncated"))?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> ApplicationResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> ApplicationResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> ApplicationResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32(&mut self) -> ApplicationResult<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn f64(&mut self) -> ApplicationResult<f64> {
        let b = self.take(8)?;
        Ok(f64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }
}
