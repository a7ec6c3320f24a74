
use anyhow::{Result, bail};

use crate::hexint::{MAX_ORDER, lattice_size};

/// Three channel samples of one cell.
pub type Pixel = [i32; 3];

/// An RGB image sampled on a hexagonal lattice.
///
/// The number of cells is fixed by `order` when the buffer is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexPixelBuffer {
    order: u8,
    pixels: Vec<Pixel>,
}

impl HexPixelBuffer {
    /// Allocates a buffer with every channel of every cell set to `fill`.
    pub fn new(order: u8, fill: i32) -> Result<Self> {
        if order > MAX_ORDER {
            bail!("HexPixelBuffer: order must be at most {MAX_ORDER}, got {order}.");
        }

        Ok(Self {
            order,
            pixels: vec![[fill; 3]; lattice_size(order)],
        })
    }

    pub fn from_pixels(order: u8, pixels: Vec<Pixel>) -> Result<Self> {
        if order > MAX_ORDER {
            bail!("HexPixelBuffer: order must be at most {MAX_ORDER}, got {order}.");
        }
        let size = lattice_size(order);
        if pixels.len() != size {
            bail!(
                "HexPixelBuffer: an order {order} lattice has {size} cells, got {} pixels.",
                pixels.len()
            );
        }

        Ok(Self { order, pixels })
    }

    #[must_use]
    pub fn order(&self) -> u8 {
        self.order
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Pixel> {
        self.pixels.get(index)
    }

    pub fn set(&mut self, index: usize, pixel: Pixel) -> Result<()> {
        let size = self.size();
        let Some(cell) = self.pixels.get_mut(index) else {
            bail!("HexPixelBuffer: index {index} is outside a lattice of {size} cells.");
        };
        *cell = pixel;
        Ok(())
    }

    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pixel> {
        self.pixels.iter()
    }
}
