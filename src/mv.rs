
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

const EXPORT_HEADER: &str = "FROM TO";

/// A block in one frame (`source`) that matches a block in another (`target`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionVector {
    pub source: u32,
    pub target: u32,
}

impl MotionVector {
    #[must_use]
    pub fn new(source: u32, target: u32) -> Self {
        MotionVector { source, target }
    }
}

/// Append-only list of motion vectors in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotionVectorList {
    vectors: Vec<MotionVector>,
}

impl MotionVectorList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: u32, target: u32) {
        self.vectors.push(MotionVector::new(source, target));
    }

    /// Moves every vector of `other` to the end of this list, keeping order.
    pub fn append(&mut self, other: &mut MotionVectorList) {
        self.vectors.append(&mut other.vectors);
    }

    /// Number of vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Number of entries in the flat `source, target, source, target, ...`
    /// layout. Always even.
    #[must_use]
    pub fn flat_len(&self) -> usize {
        self.vectors.len() * 2
    }

    pub fn iter(&self) -> impl Iterator<Item = &MotionVector> {
        self.vectors.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[MotionVector] {
        &self.vectors
    }

    #[must_use]
    pub fn to_flat(&self) -> Vec<u32> {
        self.vectors
            .iter()
            .flat_map(|mv| [mv.source, mv.target])
            .collect()
    }

    /// Builds a list from alternating source and target entries.
    pub fn from_flat(flat: &[u32]) -> Result<Self> {
        if flat.len() % 2 != 0 {
            bail!(
                "MotionVectorList: flat vector data must have an even length, got {}.",
                flat.len()
            );
        }

        Ok(Self {
            vectors: flat
                .chunks_exact(2)
                .map(|pair| MotionVector::new(pair[0], pair[1]))
                .collect(),
        })
    }

    /// Writes the list as text: a `FROM TO` header, then one
    /// `<source> <target>` line per vector.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{EXPORT_HEADER}")?;
        for mv in &self.vectors {
            writeln!(writer, "{} {}", mv.source, mv.target)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create vector file {}", path.display()))?;
        self.write_to(BufWriter::new(file))
            .with_context(|| format!("failed to write vector file {}", path.display()))?;
        debug!(vectors = self.len(), path = %path.display(), "exported motion vectors");
        Ok(())
    }

    /// Parses text produced by [`MotionVectorList::write_to`]. Blank lines are
    /// ignored.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();
        let header = match lines.next() {
            Some((_, line)) => line?,
            None => bail!("vector list is empty, expected a '{EXPORT_HEADER}' header"),
        };
        if header.trim() != EXPORT_HEADER {
            bail!("line 1: expected '{EXPORT_HEADER}' header, got '{}'", header.trim());
        }

        let mut list = Self::new();
        for (i, line) in lines {
            let line = line?;
            let line_no = i + 1;
            let mut fields = line.split_whitespace();
            let (source, target) = match (fields.next(), fields.next(), fields.next()) {
                (None, ..) => continue,
                (Some(source), Some(target), None) => (source, target),
                _ => bail!("line {line_no}: expected '<source> <target>', got '{}'", line.trim()),
            };
            let source = source
                .parse()
                .map_err(|e| anyhow!("line {line_no}: invalid source index '{source}': {e}"))?;
            let target = target
                .parse()
                .map_err(|e| anyhow!("line {line_no}: invalid target index '{target}': {e}"))?;
            list.push(source, target);
        }
        Ok(list)
    }

    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open vector file {}", path.display()))?;
        let list = Self::read_from(BufReader::new(file))
            .with_context(|| format!("failed to parse vector file {}", path.display()))?;
        debug!(vectors = list.len(), path = %path.display(), "imported motion vectors");
        Ok(list)
    }
}

impl FromIterator<MotionVector> for MotionVectorList {
    fn from_iter<I: IntoIterator<Item = MotionVector>>(iter: I) -> Self {
        Self {
            vectors: iter.into_iter().collect(),
        }
    }
}

impl Extend<MotionVector> for MotionVectorList {
    fn extend<I: IntoIterator<Item = MotionVector>>(&mut self, iter: I) {
        self.vectors.extend(iter);
    }
}

impl<'a> IntoIterator for &'a MotionVectorList {
    type Item = &'a MotionVector;
    type IntoIter = std::slice::Iter<'a, MotionVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}
